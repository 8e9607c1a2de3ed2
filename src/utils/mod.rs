pub mod content_type;
pub mod jwt;
pub mod parameter_error_handler;
pub mod validate;

pub use content_type::detect_content_type;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
