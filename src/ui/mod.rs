//! UI module for consistent CLI output
//!
//! Uses `cliclack` for interactive spinners and log lines with automatic
//! fallback to plain output in CI/non-interactive environments. Providers
//! report download and copy progress through [`render_progress`].

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    key_value, key_value_status, section, step_info, step_ok_detail, step_warn_hint,
};
pub use progress::{progress_fill, render_progress, TaskSpinner, NOT_RENDERED};
