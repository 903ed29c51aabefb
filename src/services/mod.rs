pub mod admin_user_service;
pub mod auth_service;
pub mod catalog_service;
pub mod settings_service;
pub mod upload_service;

pub use admin_user_service::*;
pub use auth_service::*;
pub use catalog_service::*;
pub use settings_service::*;
pub use upload_service::*;
