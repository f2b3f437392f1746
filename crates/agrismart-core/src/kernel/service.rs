use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::kernel::error::{Error, KernelLifecyclePhase, Result};

/// Lifecycle contract of a background subsystem started at app launch.
///
/// `initialize` may suspend for as long as the subsystem needs (network-bound
/// work is expected). `cleanup` is best-effort: the orchestrator logs a
/// returned error and moves on to the next handle.
#[async_trait]
pub trait ServiceHandle: Send + Sync + Debug {
    /// Diagnostic name, unique within a [`ServiceRegistry`].
    fn name(&self) -> &str;
    async fn initialize(&self) -> Result<()>;
    async fn cleanup(&self) -> Result<()>;
}

/// Fixed, ordered collection of service handles.
///
/// Registration order is the initialization order; cleanup walks it in
/// reverse. The registry is handed to the orchestrator by value and is not
/// mutated afterwards.
#[derive(Debug, Default, Clone)]
pub struct ServiceRegistry {
    services: Vec<Arc<dyn ServiceHandle>>,
}

impl ServiceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { services: Vec::new() }
    }

    /// Append a handle. Names must be unique.
    pub fn register(&mut self, service: Arc<dyn ServiceHandle>) -> Result<()> {
        if self.services.iter().any(|s| s.name() == service.name()) {
            return Err(Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::Mount,
                service_name: Some(service.name().to_string()),
                message: "Service already registered".to_string(),
                source: None,
            });
        }
        self.services.push(service);
        Ok(())
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with(mut self, service: Arc<dyn ServiceHandle>) -> Result<Self> {
        self.register(service)?;
        Ok(self)
    }

    /// Handles in declared order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Arc<dyn ServiceHandle>> {
        self.services.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.services.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
