pub mod cookie;
pub mod middleware;
pub mod session;
pub mod token;

pub use middleware::CurrentSession;
pub use token::{is_valid_token, require_valid_token};
