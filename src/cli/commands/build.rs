//! Build command - link a runtime image

use super::load_registry;
use crate::cli::args::BuildArgs;
use crate::config::Config;
use crate::error::JlinkwResult;
use crate::jlink::InterruptSignal;
use crate::pipeline::{BuildSettings, Pipeline};
use crate::session::BuildSession;
use crate::ui::{self, TaskSpinner, UiContext};
use tracing::debug;

/// Execute the build command
pub async fn execute(
    args: BuildArgs,
    config: &Config,
    ctx: &UiContext,
    interrupt: InterruptSignal,
) -> JlinkwResult<()> {
    let offline = args.offline;
    let settings = settings(args, config)?;
    let session = BuildSession::new(offline, config.toolchains.select.clone());
    let registry = load_registry(config)?;
    debug!("Registered toolchains: {}", registry.toolchains().len());

    let pipeline = Pipeline::new(session, interrupt);

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Linking runtime image...");

    match pipeline.execute(&settings, &registry).await {
        Ok(Some(image)) => {
            spinner.stop("Runtime image linked");
            ui::step_ok_detail(ctx, "Image ready", &image.display().to_string());
            Ok(())
        }
        Ok(None) => {
            spinner.stop("Nothing to do");
            ui::step_warn_hint(ctx, "Build step skipped", "skip is enabled");
            Ok(())
        }
        Err(e) => {
            spinner.stop_error("jlink build failed");
            Err(e)
        }
    }
}

/// Merge command line overrides into the configured settings
fn settings(args: BuildArgs, config: &Config) -> JlinkwResult<BuildSettings> {
    let mut settings = BuildSettings::from(config);

    settings.skip |= args.skip;
    settings.use_only_cache |= args.use_only_cache;
    if let Some(provider) = args.provider {
        settings.provider = provider.parse()?;
    }
    if args.output.is_some() {
        settings.output = args.output;
    }
    if args.jdeps_report.is_some() {
        settings.jdeps_report = args.jdeps_report;
    }
    if args.tool_jdk.is_some() {
        settings.tool_jdk = args.tool_jdk;
    }
    if !args.add_modules.is_empty() {
        settings.add_modules = args.add_modules;
    }
    settings.options.extend(args.jlink_options);

    Ok(settings)
}
