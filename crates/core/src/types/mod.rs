//! Newtype wrappers for type-safe IDs, usernames, and prices.

pub mod id;
pub mod price;
pub mod username;

pub use id::{GuitarId, UserId};
pub use price::{Price, PriceError};
pub use username::{Username, UsernameError};
