pub mod error;
pub mod time;
pub mod user;

pub use error::AppError;
pub use time::ClockTime;
pub use user::{AppUser, UserRole};
