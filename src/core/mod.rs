pub mod config;
pub mod error;

pub use config::TooldexConfig;
pub use error::{Result, TooldexError};
