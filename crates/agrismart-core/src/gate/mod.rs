//! # Persistence Gate
//!
//! Holds the real view tree back until previously persisted state has been
//! restored into the [`Store`]. Until then the gate renders its loading
//! view, never both. Hydration is independent of service initialization.
pub mod source;
pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::boundary::RenderError;
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::view::View;

pub use source::{HydrationSource, MemoryStateSource};
pub use store::{PersistedState, Store};

#[derive(Debug)]
pub struct PersistenceGate {
    store: Store,
    hydrated: watch::Sender<bool>,
    load_failed: AtomicBool,
    loading: View,
}

impl PersistenceGate {
    pub fn new(store: Store) -> Self {
        let (hydrated, _) = watch::channel(false);
        Self {
            store,
            hydrated,
            load_failed: AtomicBool::new(false),
            loading: View::Loading(constants::LOADING_MESSAGE.to_string()),
        }
    }

    /// Substitute rendered while hydration is pending.
    pub fn with_loading_view(mut self, loading: View) -> Self {
        self.loading = loading;
        self
    }

    pub fn loading_view(&self) -> &View {
        &self.loading
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn is_hydrated(&self) -> bool {
        *self.hydrated.borrow()
    }

    /// Whether the gate opened on an empty store because loading failed.
    pub fn hydration_failed(&self) -> bool {
        self.load_failed.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.hydrated.subscribe()
    }

    /// Resolves once hydration completed.
    pub async fn wait_hydrated(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|hydrated| *hydrated).await;
    }

    /// Restore state from `source` into the store and open the gate.
    ///
    /// The gate opens even when loading fails; the store then starts empty
    /// and the error is returned for reporting. Calling this again after the
    /// gate opened is a no-op.
    pub async fn hydrate(&self, source: &dyn HydrationSource) -> Result<usize> {
        if self.is_hydrated() {
            log::debug!("Store already hydrated; ignoring hydration from {}", source.name());
            return Ok(self.store.snapshot().len());
        }

        let outcome = match source.load().await {
            Ok(state) => {
                let restored = state.len();
                self.store.replace(state);
                log::info!("Restored {} persisted key(s) from {}", restored, source.name());
                Ok(restored)
            }
            Err(e) => {
                log::warn!("Failed to restore persisted state from {}: {}; starting fresh", source.name(), e);
                self.load_failed.store(true, Ordering::SeqCst);
                Err(e)
            }
        };
        self.hydrated.send_replace(true);
        outcome
    }

    /// Open the gate with an already-available state.
    pub fn complete_with(&self, state: PersistedState) {
        if self.is_hydrated() {
            return;
        }
        self.store.replace(state);
        self.hydrated.send_replace(true);
    }

    /// Render `children` once hydrated, the loading view before.
    pub fn render<F>(&self, children: F) -> std::result::Result<View, RenderError>
    where
        F: FnOnce(&Store) -> std::result::Result<View, RenderError>,
    {
        if self.is_hydrated() {
            children(&self.store)
        } else {
            Ok(self.loading.clone())
        }
    }
}
