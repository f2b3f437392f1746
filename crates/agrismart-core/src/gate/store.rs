use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque snapshot of the application store as persisted between launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedState(Map<String, Value>);

impl PersistedState {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Shared in-memory application store provided at the root of the tree.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<RwLock<PersistedState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).insert(key, value);
    }

    pub fn snapshot(&self) -> PersistedState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the whole store contents (used by hydration).
    pub(crate) fn replace(&self, state: PersistedState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}
