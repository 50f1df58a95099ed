//! Capability registry
//!
//! One instance per capability per environment. Capabilities are a closed set
//! named by [`CapabilityId`]; a concrete service type declares which
//! capability it fills by implementing [`Capability`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::common::error::{Error, Result};

/// Identity of a service role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityId {
    LanguageLevel,
    ModuleSettings,
    FileManager,
    AccessPolicy,
    ClassFinder,
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A service type bound under a fixed capability
pub trait Capability: Any + Send + Sync {
    const ID: CapabilityId;
}

#[derive(Default)]
pub struct CapabilityRegistry {
    bindings: HashMap<CapabilityId, Arc<dyn Any + Send + Sync>>,
    order: Vec<CapabilityId>,
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("bindings", &self.order)
            .finish()
    }
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `instance` to `C::ID`. Existing bindings are never replaced.
    pub fn register<C: Capability>(&mut self, instance: C) -> Result<Arc<C>> {
        if self.bindings.contains_key(&C::ID) {
            return Err(Error::DuplicateRegistration { capability: C::ID });
        }

        let instance = Arc::new(instance);
        self.bindings.insert(C::ID, instance.clone());
        self.order.push(C::ID);
        tracing::trace!(capability = %C::ID, "registered capability");
        Ok(instance)
    }

    pub fn get<C: Capability>(&self) -> Result<Arc<C>> {
        self.bindings
            .get(&C::ID)
            .cloned()
            .and_then(|bound| bound.downcast::<C>().ok())
            .ok_or(Error::UnboundCapability { capability: C::ID })
    }

    pub fn is_bound(&self, id: CapabilityId) -> bool {
        self.bindings.contains_key(&id)
    }

    /// Bound capabilities in registration order
    pub fn ids(&self) -> &[CapabilityId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Release every binding
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.order.clear();
    }
}
