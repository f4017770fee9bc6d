pub mod atomic_write;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod types;
pub mod user_key;
