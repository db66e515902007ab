//! Process-wide registry of loaded host modules.
//!
//! Modules announce themselves with [`module_loaded`] once their
//! initialization has run; code that depends on a module checks
//! [`is_module_loaded`] instead of relying on load order.

use fxhash::FxHashSet;
use once_cell::sync::Lazy;
use std::sync::{PoisonError, RwLock};

static LOADED_MODULES: Lazy<RwLock<FxHashSet<String>>> =
    Lazy::new(|| RwLock::new(FxHashSet::default()));

/// Marks a module as loaded. Returns false if it was already registered.
pub fn module_loaded(name: &str) -> bool {
    let inserted = LOADED_MODULES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.to_string());
    if inserted {
        log::debug!("module {} loaded", name);
    }
    inserted
}

pub fn is_module_loaded(name: &str) -> bool {
    LOADED_MODULES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains(name)
}
