mod response_mode;
mod session;

pub use response_mode::ResponseMode;
pub use session::{clear_session_cookie, Session, SESSION_COOKIE};
