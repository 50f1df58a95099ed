//! Parent disposal scope
//!
//! The host owns a [`ParentScope`]; every environment created under it holds a
//! [`ScopeToken`]. Tearing the scope down marks all of its environments as
//! disposed. Environments observe the flag on their next call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug)]
pub struct ParentScope {
    name: String,
    disposed: Arc<AtomicBool>,
}

impl ParentScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> ScopeToken {
        ScopeToken {
            disposed: self.disposed.clone(),
        }
    }

    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            tracing::debug!(scope = %self.name, "parent scope disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl Drop for ParentScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Child handle onto a [`ParentScope`]
#[derive(Debug, Clone)]
pub struct ScopeToken {
    disposed: Arc<AtomicBool>,
}

impl ScopeToken {
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
