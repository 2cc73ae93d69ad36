//! Per-invocation wiring: paths, config, history store and service client

use std::path::PathBuf;
use std::sync::Arc;
use watchworthy_client::HttpAnalysisClient;
use watchworthy_core::{Config, RecencyCache, RequestOrchestrator, HISTORY_KEY};
use watchworthy_store::{FileStore, KeyValueStore, MemoryStore, Paths};

pub struct Session {
    pub paths: Paths,
    pub config: Config,
    store: Arc<dyn KeyValueStore>,
    ephemeral: bool,
}

impl Session {
    pub fn open(
        home: Option<PathBuf>,
        endpoint: Option<String>,
        ephemeral: bool,
    ) -> anyhow::Result<Self> {
        let paths = match home {
            Some(root) => Paths::with_root(root),
            None => Paths::new()?,
        };

        let mut config = Config::load(&paths.config_file());
        if let Some(endpoint) = endpoint {
            config.endpoint = endpoint;
        }

        let store: Arc<dyn KeyValueStore> = if ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::new(paths.storage_dir()))
        };
        tracing::debug!(root = %paths.root.display(), endpoint = %config.endpoint, ephemeral, "session opened");

        Ok(Self {
            paths,
            config,
            store,
            ephemeral,
        })
    }

    pub fn cache(&self) -> RecencyCache {
        RecencyCache::load(Arc::clone(&self.store))
    }

    pub fn orchestrator(&self) -> anyhow::Result<RequestOrchestrator> {
        let client = HttpAnalysisClient::from_config(&self.config)?;
        Ok(RequestOrchestrator::new(Arc::new(client), self.cache())
            .with_tick_period(self.config.tick_interval()))
    }

    /// Where history lives, for display
    pub fn history_location(&self) -> String {
        if self.ephemeral {
            "memory (not persisted)".to_string()
        } else {
            self.paths
                .storage_dir()
                .join(format!("{}.json", HISTORY_KEY))
                .display()
                .to_string()
        }
    }
}
