// Re-export all models organized by domain
pub mod catalog;
pub mod errors;
pub mod request;
pub mod response;
pub mod settings;
pub mod user;

pub use catalog::*;
pub use errors::*;
pub use request::*;
pub use response::*;
pub use settings::*;
pub use user::*;
