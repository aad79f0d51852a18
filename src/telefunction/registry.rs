//! # Telefunction Registry

use std::collections::HashMap;
use std::future::Future;

use crate::observability::{log_event_with_fields, Event};
use crate::wire::Value;

use super::errors::{RegistryError, RegistryResult};
use super::function::{Telefunction, TelefunctionId, TelefunctionResult};

/// Registry of telefunctions, built once before serving
#[derive(Debug, Default, Clone)]
pub struct TelefunctionRegistry {
    /// Telefunctions in registration order
    entries: Vec<Telefunction>,

    /// Position in `entries` by handle
    by_id: HashMap<TelefunctionId, usize>,

    /// Handles by (file, name)
    by_key: HashMap<(String, String), TelefunctionId>,
}

impl TelefunctionRegistry {
    /// Create a new registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a telefunction exported as `name` from `file`
    pub fn register<F, Fut>(
        &mut self,
        file: impl Into<String>,
        name: impl Into<String>,
        f: F,
    ) -> RegistryResult<TelefunctionId>
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TelefunctionResult> + Send + 'static,
    {
        let file = file.into();
        let name = name.into();
        let key = (file.clone(), name.clone());

        if self.by_key.contains_key(&key) {
            return Err(RegistryError::AlreadyExists(format!("{}:{}", file, name)));
        }

        let id = TelefunctionId::next();
        let telefunction = Telefunction::new(id, file, name, f);

        log_event_with_fields(
            Event::TelefunctionRegistered,
            &[("telefunction", telefunction.key().as_str())],
        );

        self.by_id.insert(id, self.entries.len());
        self.entries.push(telefunction);
        self.by_key.insert(key, id);

        Ok(id)
    }

    /// Get telefunction by handle; handles from other registries miss
    pub fn get(&self, id: TelefunctionId) -> Option<&Telefunction> {
        self.by_id.get(&id).and_then(|&index| self.entries.get(index))
    }

    /// Get telefunction by file and exported name
    pub fn find(&self, file: &str, name: &str) -> RegistryResult<&Telefunction> {
        self.by_key
            .get(&(file.to_string(), name.to_string()))
            .and_then(|id| self.get(*id))
            .ok_or_else(|| RegistryError::NotFound(format!("{}:{}", file, name)))
    }

    /// Every registered `(file, name)` pair, in registration order
    pub fn identifiers(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|t| (t.file().to_string(), t.name().to_string()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Telefunction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
