use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde_json::Value;

/// Distinct variants (query strings) kept per route.
const MAX_VARIANTS: usize = 256;

#[derive(Debug, Default)]
struct RouteViews {
    generation: u64,
    variants: HashMap<String, Value>,
}

/// Rendered read models keyed by route, then by query variant.
///
/// Revalidating a route drops all of its variants and bumps its generation.
/// A view rendered from data read under an older generation is never stored.
#[derive(Debug, Default)]
pub struct ViewCache {
    routes: RwLock<HashMap<String, RouteViews>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read before loading the data a view is rendered from, then hand to [`ViewCache::put`].
    pub fn generation(&self, path: &str) -> u64 {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        routes.get(path).map_or(0, |route| route.generation)
    }

    pub fn get(&self, path: &str, variant: &str) -> Option<Value> {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        routes.get(path)?.variants.get(variant).cloned()
    }

    /// Stores `view` unless the route was revalidated since `generation` was read.
    pub fn put(&self, path: &str, variant: &str, generation: u64, view: Value) {
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        let route = routes.entry(path.to_string()).or_default();
        if route.generation != generation {
            log::debug!("Discarded stale view of {}", path);
            return;
        }
        if route.variants.len() >= MAX_VARIANTS && !route.variants.contains_key(variant) {
            return;
        }
        route.variants.insert(variant.to_string(), view);
    }

    pub fn revalidate(&self, path: &str) {
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        let route = routes.entry(path.to_string()).or_default();
        route.generation += 1;
        route.variants.clear();
        log::debug!("Revalidated {}", path);
    }
}
