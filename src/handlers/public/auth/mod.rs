pub mod forgot_password;
pub mod login;

pub use forgot_password::forgot_password_post;
pub use login::login_post;
