use crate::core::store::NodeStore;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// The execution environment one generation pass runs in.
///
/// Carries the node store capability, an arbitrary property bag supplied
/// by the invoking layer, and the invocation timestamp. Generators read
/// from it; they never mutate it. The async executor itself is ambient,
/// so the context never spawns or manages threads.
#[derive(Clone)]
pub struct Context {
    store: Arc<dyn NodeStore>,
    properties: HashMap<String, Value>,
    started: DateTime<Utc>,
}

impl Context {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Context {
            store,
            properties: HashMap::new(),
            started: Utc::now(),
        }
    }

    /// Adds a property, builder style.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The store subordinate references are resolved against.
    pub fn store(&self) -> &dyn NodeStore {
        self.store.as_ref()
    }

    /// When this invocation began.
    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }
}
