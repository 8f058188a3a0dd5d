//! Modules command - print the merged module list

use crate::cli::args::ModulesArgs;
use crate::config::Config;
use crate::error::JlinkwResult;
use crate::jlink::build_module_list;
use crate::ui::{self, UiContext};

/// Execute the modules command
pub async fn execute(args: ModulesArgs, config: &Config, ctx: &UiContext) -> JlinkwResult<()> {
    let explicit = if args.add_modules.is_empty() {
        &config.jlink.add_modules
    } else {
        &args.add_modules
    };
    let report = args.jdeps_report.as_deref().or(config.jlink.jdeps_report.as_deref());

    let modules = build_module_list(explicit, report)?;

    if modules.is_empty() {
        ui::step_warn_hint(
            ctx,
            "No modules found",
            "Pass --add-modules or --jdeps-report",
        );
        return Ok(());
    }

    for module in &modules {
        println!("{}", module);
    }

    Ok(())
}
