//! Cachedisk - local cache disk resolver
//!
//! Walks a preference-ordered list of volume names and resolves an
//! application cache directory on the first one that is mounted, local,
//! and proven writable, falling back to the home directory.

pub mod cli;
pub mod config;
pub mod error;
pub mod platform;
pub mod resolver;
pub mod ui;

pub use error::{CacheDiskError, CacheDiskResult};
