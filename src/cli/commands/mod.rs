//! CLI command implementations

pub mod completions;
pub mod config;
pub mod init;
pub mod resolve;
pub mod volumes;

pub use completions::execute as completions;
pub use config::execute as config;
pub use init::execute as init;
pub use resolve::execute as resolve;
pub use volumes::execute as volumes;
