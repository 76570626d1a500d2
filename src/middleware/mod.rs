mod content_type;
mod error_handler;

pub use content_type::json_content_type;
pub use error_handler::log_errors;
