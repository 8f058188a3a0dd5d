//! Toolchains command - list registered JDKs

use super::{load_registry, toolchains_path};
use crate::config::Config;
use crate::error::JlinkwResult;
use crate::jlink::JLINK_TOOL;
use crate::session::BuildSession;
use crate::toolchain::{Toolchain, ToolchainResolver};
use crate::ui::{self, UiContext};

/// Execute the toolchains command
pub async fn execute(config: &Config, ctx: &UiContext) -> JlinkwResult<()> {
    let path = toolchains_path(config);
    let registry = load_registry(config)?;
    let session = BuildSession::new(false, config.toolchains.select.clone());
    let resolver = ToolchainResolver::new(&registry, &session);
    let resolved = resolver.resolve_tool_path(JLINK_TOOL, config.toolchains.tool_jdk.as_deref());

    ui::section(ctx, "Toolchains");
    ui::key_value(ctx, "registry", &path.display().to_string());

    if registry.toolchains().is_empty() {
        ui::step_warn_hint(
            ctx,
            "No toolchains registered",
            "Add [[toolchain]] tables with a home to the registry file",
        );
    }

    for toolchain in registry.toolchains() {
        let attributes = toolchain
            .provides
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        let selected = resolved.is_some() && toolchain.find_tool(JLINK_TOOL) == resolved;
        ui::key_value_status(
            ctx,
            &toolchain.home.display().to_string(),
            &attributes,
            selected,
        );
    }

    match resolved {
        Some(jlink) => ui::step_info(ctx, &format!("jlink: {}", jlink.display())),
        None => ui::step_warn_hint(
            ctx,
            "No jlink found",
            "Register a JDK toolchain or set toolchains.tool_jdk",
        ),
    }

    Ok(())
}
