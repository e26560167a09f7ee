//! Command implementations.

pub mod ask;
pub mod compile;
pub mod config;

pub use self::ask::execute_ask;
pub use self::compile::execute_compile;
pub use self::config::execute_config;
