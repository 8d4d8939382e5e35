//! Builder registry
//!
//! Maps a model type to the factory producing its [`DomainBuilder`]. Types
//! without a registration get the fallback factory, [`DefaultBuilder`]
//! unless replaced.

use crate::builder::{DefaultBuilder, DomainBuilder};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type BuilderFactory = Arc<dyn Fn() -> Arc<dyn DomainBuilder> + Send + Sync>;

#[derive(Clone)]
pub struct BuilderRegistry {
    factories: HashMap<TypeId, BuilderFactory>,
    fallback: BuilderFactory,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            fallback: Arc::new(|| Arc::new(DefaultBuilder)),
        }
    }

    /// Register the factory used for model type `M`, replacing any earlier one.
    pub fn register<M, F>(&mut self, factory: F) -> &mut Self
    where
        M: 'static,
        F: Fn() -> Arc<dyn DomainBuilder> + Send + Sync + 'static,
    {
        self.factories.insert(TypeId::of::<M>(), Arc::new(factory));
        self
    }

    /// Share one builder instance across every query for `M`.
    pub fn register_builder<M, B>(&mut self, builder: B) -> &mut Self
    where
        M: 'static,
        B: DomainBuilder + 'static,
    {
        let builder: Arc<dyn DomainBuilder> = Arc::new(builder);
        self.register::<M, _>(move || builder.clone())
    }

    pub fn set_fallback<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> Arc<dyn DomainBuilder> + Send + Sync + 'static,
    {
        self.fallback = Arc::new(factory);
        self
    }

    pub fn contains<M: 'static>(&self) -> bool {
        self.factories.contains_key(&TypeId::of::<M>())
    }

    /// Builder for model type `M`, or the fallback's.
    pub fn resolve<M: 'static>(&self) -> Arc<dyn DomainBuilder> {
        match self.factories.get(&TypeId::of::<M>()) {
            Some(factory) => factory(),
            None => (self.fallback)(),
        }
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("registered", &self.factories.len())
            .finish()
    }
}
