pub mod mailer;
pub mod media_service;
pub mod property_service;
