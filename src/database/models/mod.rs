pub mod media;
pub mod property;
pub mod user;

pub use media::{
    CreatePropertyDocument, CreatePropertyImage, PropertyDocument, PropertyImage,
    UpdatePropertyDocument, UpdatePropertyImage,
};
pub use property::{CreateProperty, Property, PropertyStatus, PropertyType, PropertyWithMedia, UpdateProperty};
pub use user::{User, UserRole};
