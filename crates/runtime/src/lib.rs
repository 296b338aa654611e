mod config;
pub mod logging;

pub use config::{PROGRAM_LOG_LEVEL, expand_home};

pub use logging::init;
