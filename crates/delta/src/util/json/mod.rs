pub mod json;
pub mod validator;

pub use self::json::Json;
pub use self::validator::Validate;
