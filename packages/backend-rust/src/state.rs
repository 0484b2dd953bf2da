use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::adaptive::{AdaptiveConfig, AdaptiveEngine};

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    engine: Arc<AdaptiveEngine>,
}

impl AppState {
    pub fn new(engine: Arc<AdaptiveEngine>) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            engine,
        }
    }

    pub fn create_engine(config: AdaptiveConfig) -> Arc<AdaptiveEngine> {
        Arc::new(AdaptiveEngine::from_config(config))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn engine(&self) -> Arc<AdaptiveEngine> {
        Arc::clone(&self.engine)
    }
}
