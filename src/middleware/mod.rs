pub mod auth;
pub mod extract;
pub mod navigation;
pub mod response;

pub use auth::{expired_session_cookie, session_cookie, SessionToken};
pub use extract::{PathParam, QueryParams, UploadForm};
pub use navigation::navigation_guard;
pub use response::{ApiResponse, ApiResult};
