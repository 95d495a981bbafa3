//! Request middleware: sessions, auth extractors, method override, headers.

pub mod auth;
pub mod method_override;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use method_override::method_override;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
