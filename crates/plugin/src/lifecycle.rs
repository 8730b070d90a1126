//! PluginInstance - host-facing lifecycle state machine
//!
//! ```text
//! register -> init --ok--> running --flush*--> exit
//!                 \--error--> failed (flush answers Error)
//! ```

use tracing::{error, info};

use config_loader::ConfigSource;
use contracts::{ContractError, LogEvent, Notifier, NotifierConfig};
use dispatcher::SlackNotifier;

use crate::output::OutputPlugin;
use crate::status::{FlbStatus, PluginRegistration};

/// Plugin instance wired to the Slack Web API
pub type SlackPlugin = PluginInstance<SlackNotifier>;

/// One plugin instance as seen by the host
pub struct PluginInstance<N> {
    registration: PluginRegistration,
    plugin: Option<OutputPlugin<N>>,
}

impl PluginInstance<SlackNotifier> {
    /// Init hook: load configuration and connect the Slack notifier
    pub fn init(&mut self, source: &impl ConfigSource) -> FlbStatus {
        let _guard = observability::plugin_span().entered();
        let result = OutputPlugin::init(source);
        self.install(result)
    }
}

impl<N: Notifier> PluginInstance<N> {
    /// Register hook
    pub fn register() -> Self {
        let _guard = observability::plugin_span().entered();
        info!("registering plugin");
        Self {
            registration: PluginRegistration::default(),
            plugin: None,
        }
    }

    /// Name and description reported to the host
    pub fn registration(&self) -> PluginRegistration {
        self.registration
    }

    /// Init hook with a custom notifier factory
    pub fn init_with<F>(&mut self, source: &impl ConfigSource, make_notifier: F) -> FlbStatus
    where
        F: FnOnce(&NotifierConfig) -> Result<N, ContractError>,
    {
        let _guard = observability::plugin_span().entered();
        let result = OutputPlugin::init_with(source, make_notifier);
        self.install(result)
    }

    /// Whether init succeeded and exit has not been called
    pub fn is_running(&self) -> bool {
        self.plugin.is_some()
    }

    /// Initialized plugin, if running
    pub fn output(&self) -> Option<&OutputPlugin<N>> {
        self.plugin.as_ref()
    }

    /// Flush hook: one batch, one status
    ///
    /// Answers `Error` when the plugin never initialized, so no batch is
    /// processed with an unusable configuration.
    pub fn flush(&self, batch: &[LogEvent], tag: &str) -> FlbStatus {
        match &self.plugin {
            Some(plugin) => plugin.flush(batch, tag),
            None => {
                let _guard = observability::plugin_span().entered();
                error!(tag, records = batch.len(), "flush called on a plugin that is not initialized");
                FlbStatus::Error
            }
        }
    }

    /// Exit hook
    pub fn exit(&mut self) -> FlbStatus {
        let _guard = observability::plugin_span().entered();
        if let Some(plugin) = self.plugin.take() {
            plugin.exit();
        }
        info!("exit plugin");
        FlbStatus::Ok
    }

    fn install(&mut self, result: Result<OutputPlugin<N>, ContractError>) -> FlbStatus {
        match result {
            Ok(plugin) => {
                self.plugin = Some(plugin);
                FlbStatus::Ok
            }
            Err(e) => {
                error!(error = %e, "plugin initialization failed");
                self.plugin = None;
                FlbStatus::Error
            }
        }
    }
}
