//! Domain models shared across the catalog binary.

pub mod guitar;
pub mod session;
pub mod user;

pub use guitar::{Guitar, GuitarUpdate, NewGuitar};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
