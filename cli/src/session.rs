use std::sync::Arc;

use taskdesk_core::api::{AppConfig, RefreshSequencer, TaskSource, TaskStore};
use taskdesk_plugins::factory;

/// Everything a command needs: resolved config, the one store for this process, the
/// remote source, and the fetch sequencer.
pub struct Session {
    cfg: AppConfig,
    store: TaskStore,
    source: Arc<dyn TaskSource>,
    sequencer: RefreshSequencer,
}

impl Session {
    pub fn new(cfg: AppConfig, store: TaskStore, source: Arc<dyn TaskSource>) -> Self {
        Self {
            cfg,
            store,
            source,
            sequencer: RefreshSequencer::new(),
        }
    }

    pub fn from_config(cfg: AppConfig) -> anyhow::Result<Self> {
        let store = factory::build_store(&cfg);
        let source = factory::build_source(&cfg)?;
        tracing::debug!(
            target: "taskdesk.cli",
            stage = "session.ready",
            store = ?store,
            source = source.name()
        );
        Ok(Self::new(cfg, store, source))
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    pub fn source(&self) -> &dyn TaskSource {
        self.source.as_ref()
    }

    /// Split borrow for refresh operations.
    pub fn refresh_parts(&mut self) -> (&mut TaskStore, &dyn TaskSource, &mut RefreshSequencer) {
        (&mut self.store, self.source.as_ref(), &mut self.sequencer)
    }
}
