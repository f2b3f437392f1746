use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::gate::store::PersistedState;
use crate::kernel::error::Result;

/// Where the persistence gate restores state from.
#[async_trait]
pub trait HydrationSource: Send + Sync + Debug {
    fn name(&self) -> &str;
    async fn load(&self) -> Result<PersistedState>;
}

/// In-memory source, optionally delayed. Useful for headless launches.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateSource {
    state: PersistedState,
    delay: Option<Duration>,
}

impl MemoryStateSource {
    pub fn new(state: PersistedState) -> Self {
        Self { state, delay: None }
    }

    /// Resolve only after `delay` has elapsed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl HydrationSource for MemoryStateSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> Result<PersistedState> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.state.clone())
    }
}
