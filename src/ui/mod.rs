//! UI module for consistent, modern CLI experience
//!
//! Uses `cliclack` (Rust port of @clack/prompts) for step-style output
//! with automatic fallback to plain output in CI/non-interactive
//! environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use cachedisk::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "cachedisk resolve");
//! ui::step_warn(&ctx, "Volume 'SlowRAID' skipped: not mounted");
//! ui::step_ok_detail(&ctx, "Cache path ready", "FastSSD");
//! ui::outro_success(&ctx, "/Volumes/FastSSD/_caches/nuke");
//! ```

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, outro_warn, remark, step_info, step_ok, step_ok_detail,
    step_warn, step_warn_hint,
};
