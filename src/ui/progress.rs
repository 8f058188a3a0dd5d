//! Progress indicators with CI fallback

use super::context::UiContext;
use console::style;
use std::io::Write;

/// Value to pass as `last` before anything was drawn
pub const NOT_RENDERED: i32 = -1;

const FILLED_CELL: char = '▒';
const EMPTY_CELL: char = '-';
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

/// A task spinner with CI fallback
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else if !self.interactive {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else if !self.interactive {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }
}

/// Number of filled cells for `value` out of `max`, rounded to the nearest
/// cell and clamped to `0..=bar_width`.
pub fn progress_fill(value: i64, max: i64, bar_width: i32) -> i32 {
    if max <= 0 || bar_width <= 0 {
        return 0;
    }
    let fill = (f64::from(bar_width) * (value as f64 / max as f64)).round();
    fill.clamp(0.0, f64::from(bar_width)) as i32
}

/// Render a single-line progress bar into `out`.
///
/// The line is only redrawn when the computed fill differs from `last`.
/// Returns the fill to pass back as `last` on the next call.
pub fn render_progress<W: Write>(
    out: &mut W,
    label: &str,
    value: i64,
    max: i64,
    bar_width: i32,
    last: i32,
) -> i32 {
    let fill = progress_fill(value, max, bar_width);
    if fill == last {
        return fill;
    }

    let width = bar_width.max(0) as usize;
    let filled = fill as usize;
    let line = format!(
        "\r{}{}[{}{}]{}",
        HIDE_CURSOR,
        label,
        FILLED_CELL.to_string().repeat(filled),
        EMPTY_CELL.to_string().repeat(width - filled),
        SHOW_CURSOR
    );
    // Write errors are ignored
    out.write_all(line.as_bytes()).ok();
    out.flush().ok();

    fill
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_non_interactive() {
        let ctx = UiContext::non_interactive();
        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start("Running jlink...");
        spinner.stop("Done");
    }

    #[test]
    fn full_value_fills_bar() {
        let mut out = Vec::new();
        let fill = render_progress(&mut out, "Loading ", 100, 100, 20, NOT_RENDERED);
        assert_eq!(fill, 20);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('\r'));
        assert!(text.contains("Loading ["));
        assert_eq!(text.matches(FILLED_CELL).count(), 20);
    }

    #[test]
    fn unchanged_fill_is_not_redrawn() {
        let mut out = Vec::new();
        let first = render_progress(&mut out, "x", 50, 100, 10, NOT_RENDERED);
        let drawn = out.len();

        let second = render_progress(&mut out, "x", 52, 100, 10, first);

        assert_eq!(first, 5);
        assert_eq!(second, first);
        assert_eq!(out.len(), drawn);
    }

    #[test]
    fn fill_rounds_and_clamps() {
        assert_eq!(progress_fill(1, 3, 10), 3);
        assert_eq!(progress_fill(2, 3, 10), 7);
        assert_eq!(progress_fill(200, 100, 10), 10);
        assert_eq!(progress_fill(-5, 100, 10), 0);
        assert_eq!(progress_fill(5, 0, 10), 0);
    }

    #[test]
    fn partial_bar_has_empty_cells() {
        let mut out = Vec::new();
        render_progress(&mut out, "", 1, 4, 8, NOT_RENDERED);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[▒▒------]"));
    }
}
