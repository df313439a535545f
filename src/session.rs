//! An application session: the store plus the tip pool being entered.
//!
//! The presentation layer talks to a [`Session`]. Area and employee
//! mutations go through [`Session::store_mut`]; the session itself holds the
//! total tip input and runs the distribute-then-replace step.

use tracing::{info, warn};

use crate::calculation::{DistributionSummary, distribute, summarize};
use crate::config::AppConfig;
use crate::error::EngineResult;
use crate::models::{AreaCollection, TotalTipPool};
use crate::notification::Notifier;
use crate::persistence::{AreaRepository, FileKeyValueStore, KeyValueStore};
use crate::store::AreaStore;

/// Composes the area store with the transient tip pool.
#[derive(Debug)]
pub struct Session<S> {
    store: AreaStore<S>,
    tip_pool: TotalTipPool,
}

impl Session<FileKeyValueStore> {
    /// Opens a session backed by files under `config.storage_dir`.
    pub fn open(config: &AppConfig) -> Self {
        let backend = FileKeyValueStore::new(&config.storage_dir);
        let repository = AreaRepository::with_key(backend, &config.storage_key);
        let notifier = Notifier::new(config.notification_delay());
        Self::new(AreaStore::open(repository, notifier))
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Wraps an existing store with an empty tip pool.
    pub fn new(store: AreaStore<S>) -> Self {
        Self {
            store,
            tip_pool: TotalTipPool::ZERO,
        }
    }

    /// The area store.
    pub fn store(&self) -> &AreaStore<S> {
        &self.store
    }

    /// The area store, for mutations.
    pub fn store_mut(&mut self) -> &mut AreaStore<S> {
        &mut self.store
    }

    /// The current areas.
    pub fn areas(&self) -> &AreaCollection {
        self.store.areas()
    }

    /// The notification channel.
    pub fn notifier(&self) -> &Notifier {
        self.store.notifier()
    }

    /// The tip pool the next distribution will use.
    pub fn tip_pool(&self) -> TotalTipPool {
        self.tip_pool
    }

    /// Sets the tip pool.
    pub fn set_tip_pool(&mut self, pool: TotalTipPool) {
        self.tip_pool = pool;
    }

    /// Parses and sets the tip pool from the total tips field.
    ///
    /// Blank input means zero. Invalid input leaves the pool unchanged and is
    /// reported on the notifier.
    pub fn set_total_tips(&mut self, input: &str) -> EngineResult<TotalTipPool> {
        match TotalTipPool::parse(input) {
            Ok(pool) => {
                self.tip_pool = pool;
                Ok(pool)
            }
            Err(err) => {
                self.notifier().error(err.to_string());
                Err(err)
            }
        }
    }

    /// Distributes the tip pool and installs the result in the store.
    ///
    /// On failure, e.g. when the percentages do not add up to 100, the areas
    /// are left as they were and the error is reported on the notifier.
    pub fn distribute(&mut self) -> EngineResult<()> {
        match distribute(self.store.areas(), self.tip_pool) {
            Ok(distributed) => {
                info!(
                    pool = %self.tip_pool.amount(),
                    areas = distributed.len(),
                    "Tips distributed"
                );
                self.store
                    .replace_with_message(distributed, "Tips distributed successfully.");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Distribution rejected");
                self.notifier().error(err.to_string());
                Err(err)
            }
        }
    }

    /// Per-area totals of the current areas against the tip pool.
    pub fn summary(&self) -> EngineResult<DistributionSummary> {
        summarize(self.store.areas(), self.tip_pool)
    }
}
