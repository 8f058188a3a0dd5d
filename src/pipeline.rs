//! Image build pipeline
//!
//! Prepares the provider JDK, resolves jlink, derives the module list and
//! runs jlink against a freshly cleared output folder.

use crate::cache::CacheRoot;
use crate::config::schema::ProxySettings;
use crate::config::Config;
use crate::error::{JlinkwError, JlinkwResult};
use crate::jlink::{
    build_command, build_module_list, clear_output_dir, join_modules, InterruptSignal,
    ProcessRunner, JLINK_TOOL,
};
use crate::provider::{create_provider, JdkProvider, ProviderConfig, ProviderContext, ProviderId};
use crate::session::{offline_mode, BuildSession};
use crate::toolchain::{ToolchainRegistry, ToolchainResolver};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Effective settings of one build, after CLI overrides
#[derive(Debug, Clone, Default)]
pub struct BuildSettings {
    pub skip: bool,
    pub cache_path: String,
    pub use_only_cache: bool,
    pub disable_ssl_check: bool,
    pub proxy: Option<ProxySettings>,
    pub provider: ProviderId,
    pub provider_config: ProviderConfig,
    /// JDK whose jlink is used instead of a registered toolchain
    pub tool_jdk: Option<PathBuf>,
    pub jdeps_report: Option<PathBuf>,
    pub add_modules: Vec<String>,
    pub output: Option<PathBuf>,
    /// Raw jlink options, passed through in order
    pub options: Vec<String>,
}

impl From<&Config> for BuildSettings {
    fn from(config: &Config) -> Self {
        Self {
            skip: config.skip,
            cache_path: config.cache.path.clone(),
            use_only_cache: config.cache.use_only_cache,
            disable_ssl_check: config.network.disable_ssl_check,
            proxy: config.network.proxy.clone(),
            provider: config.provider.id,
            provider_config: config.provider.config.clone(),
            tool_jdk: config.toolchains.tool_jdk.clone(),
            jdeps_report: config.jlink.jdeps_report.clone(),
            add_modules: config.jlink.add_modules.clone(),
            output: config.jlink.output.clone(),
            options: config.jlink.options.clone(),
        }
    }
}

/// Runs the build step for one session
pub struct Pipeline {
    session: BuildSession,
    interrupt: InterruptSignal,
}

impl Pipeline {
    pub fn new(session: BuildSession, interrupt: InterruptSignal) -> Self {
        Self { session, interrupt }
    }

    /// Execute the build step.
    ///
    /// Returns the image folder, or `None` when the step is skipped.
    pub async fn execute(
        &self,
        settings: &BuildSettings,
        registry: &dyn ToolchainRegistry,
    ) -> JlinkwResult<Option<PathBuf>> {
        if settings.skip {
            debug!("Skipping jlink execution");
            return Ok(None);
        }

        let output = settings.output.as_deref().ok_or_else(|| {
            JlinkwError::Configuration("Output folder for the image is not set".to_string())
        })?;

        let cache_root = CacheRoot::resolve(&settings.cache_path)?;
        let ctx = ProviderContext {
            cache_root,
            offline: offline_mode(settings.use_only_cache, &self.session),
            disable_ssl_check: settings.disable_ssl_check,
            proxy: settings.proxy.clone(),
        };
        debug!("Offline mode: {}", ctx.offline);

        let provider = create_provider(settings.provider, ctx);
        self.build_image(settings, output, provider.as_ref(), registry)
            .await
            .map(Some)
    }

    /// Build the image with an already created provider
    pub async fn build_image(
        &self,
        settings: &BuildSettings,
        output: &Path,
        provider: &dyn JdkProvider,
        registry: &dyn ToolchainRegistry,
    ) -> JlinkwResult<PathBuf> {
        debug!("Preparing JDK with provider: {}", provider.provider_name());
        let jdk_home = provider.prepare_jdk_folder(&settings.provider_config).await?;
        debug!("Provider JDK folder: {}", jdk_home.display());

        let resolver = ToolchainResolver::new(registry, &self.session);
        let jlink = resolver
            .resolve_tool_path(JLINK_TOOL, settings.tool_jdk.as_deref())
            .ok_or_else(|| JlinkwError::ToolNotFound {
                tool: JLINK_TOOL.to_string(),
            })?;
        debug!("jlink executable: {}", jlink.display());

        let modules =
            build_module_list(&settings.add_modules, settings.jdeps_report.as_deref())?;
        info!("List of modules: {}", join_modules(&modules));

        let command = build_command(&jlink, output, &jdk_home, &modules, &settings.options)?;
        info!("CLI arguments: {}", command.args().join(" "));
        debug!("Command line: {}", command);

        clear_output_dir(output).await?;

        ProcessRunner::new(self.interrupt.clone()).run(&command).await?;

        info!("Execution completed, result folder: {}", output.display());
        Ok(output.to_path_buf())
    }
}
