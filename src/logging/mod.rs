//! Logger initialization.
//!
//! Kept behind the standard `log` facade; only `main` should call into here.

mod init;

pub use init::{LoggingConfig, init_logging};
