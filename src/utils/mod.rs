//! Commonly used utilities.

pub mod time;

pub use self::time::Timestamp;
