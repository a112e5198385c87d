//! Capability-keyed provider map.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Marker for types that can be registered in [`DataProviders`].
pub trait DataProvider: Any + Send + Sync {
    /// Human-readable name for logs and error messages.
    fn name(&self) -> &'static str;
}

/// Identifier of a provider capability.
///
/// Equality and hashing use the type only; the name is for display.
#[derive(Clone, Copy)]
pub struct ProviderId {
    type_id: TypeId,
    name: &'static str,
}

impl ProviderId {
    /// Capability identifier for provider type `P`.
    pub fn of<P: DataProvider>() -> Self {
        let full = std::any::type_name::<P>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Self {
            type_id: TypeId::of::<P>(),
            name,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ProviderId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ProviderId {}

impl Hash for ProviderId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One provider instance per capability type.
#[derive(Default, Clone)]
pub struct DataProviders {
    entries: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    names: Vec<&'static str>,
}

impl DataProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any earlier one of the same type.
    pub fn insert<P: DataProvider>(&mut self, provider: P) -> &mut Self {
        self.insert_shared(Arc::new(provider))
    }

    /// Register a provider the host keeps a handle to (to publish new data).
    pub fn insert_shared<P: DataProvider>(&mut self, provider: Arc<P>) -> &mut Self {
        let name = provider.name();
        if self.entries.insert(TypeId::of::<P>(), provider).is_none() {
            self.names.push(name);
        }
        self
    }

    /// Register a provider (builder pattern).
    pub fn with<P: DataProvider>(mut self, provider: P) -> Self {
        self.insert(provider);
        self
    }

    /// Look up the provider for capability `P`.
    pub fn get<P: DataProvider>(&self) -> Option<&P> {
        self.entries
            .get(&TypeId::of::<P>())
            .and_then(|provider| provider.downcast_ref::<P>())
    }

    pub fn contains(&self, id: ProviderId) -> bool {
        self.entries.contains_key(&id.type_id)
    }

    /// Capabilities from `required` that are not registered, in request order.
    pub fn missing(&self, required: &[ProviderId]) -> Vec<ProviderId> {
        required
            .iter()
            .copied()
            .filter(|id| !self.contains(*id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the registered providers in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

impl fmt::Debug for DataProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names.iter()).finish()
    }
}
