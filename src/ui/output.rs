//! Step and key-value output
//!
//! Fancy output goes through `cliclack::log`, plain output is one marked
//! line per step on stdout.

use super::context::UiContext;
use console::{style, Style, StyledObject};

#[derive(Debug, Clone, Copy)]
enum Level {
    Ok,
    Warn,
    Info,
}

impl Level {
    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Self::Ok => style("[OK]").green(),
            Self::Warn => style("[WARN]").yellow(),
            Self::Info => style("[INFO]").cyan(),
        }
    }
}

fn emit(ctx: &UiContext, level: Level, text: String) {
    if !ctx.use_fancy_output() {
        println!("  {} {}", level.marker(), text);
        return;
    }
    let _ = match level {
        Level::Ok => cliclack::log::success(text),
        Level::Warn => cliclack::log::warning(text),
        Level::Info => cliclack::log::info(text),
    };
}

/// Section header, e.g. above the toolchain listing
pub fn section(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}", style(title).bold());
    }
}

/// Finished step with its result, e.g. the image folder
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    emit(ctx, Level::Ok, format!("{} ({})", message, style(detail).dim()));
}

/// Warning with what to do about it
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    emit(ctx, Level::Warn, format!("{} - {}", message, style(hint).dim()));
}

pub fn step_info(ctx: &UiContext, message: &str) {
    emit(ctx, Level::Info, message.to_string());
}

pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    key_value_status(ctx, key, value, false);
}

/// Key-value line; `selected` marks the entry that will be used
pub fn key_value_status(ctx: &UiContext, key: &str, value: &str, selected: bool) {
    if ctx.use_fancy_output() {
        let value_style = if selected {
            Style::new().green().bold()
        } else {
            Style::new()
        };
        println!("  {}: {}", style(key).dim(), value_style.apply_to(value));
    } else {
        let marker = if selected { "*" } else { " " };
        println!("  {} {}: {}", marker, key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_non_interactive() {
        let ctx = UiContext::non_interactive();
        section(&ctx, "Toolchains");
        step_ok_detail(&ctx, "Image ready", "target/image");
        step_warn_hint(&ctx, "Build step skipped", "skip is enabled");
        step_info(&ctx, "jlink: /usr/lib/jvm/jdk-21/bin/jlink");
        key_value(&ctx, "registry", "toolchains.toml");
        key_value_status(&ctx, "/usr/lib/jvm/jdk-17", "version=17", true);
    }
}
