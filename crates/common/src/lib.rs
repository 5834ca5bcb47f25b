pub mod config;
pub mod errors;
pub mod types;

pub type Result<T> = std::result::Result<T, errors::Error>;
