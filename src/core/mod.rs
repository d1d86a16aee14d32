pub mod config;
pub mod error;

pub use config::LifeConfig;
pub use error::{LifeError, Result};
