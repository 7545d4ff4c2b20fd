//! Named route cache invalidation.

use std::collections::BTreeSet;
use std::sync::Mutex;

/// Cache/revalidation mechanism: mark a named route stale so dependent views
/// refetch on their next read.
pub trait Revalidate: Send + Sync {
    fn invalidate(&self, route: &str);
}

/// In-process route cache tracking stale route keys.
#[derive(Debug, Default)]
pub struct RouteCache {
    stale: Mutex<BTreeSet<String>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the route was stale; clears the mark, so the next read
    /// observes a fresh route until the next invalidation.
    pub fn take(&self, route: &str) -> bool {
        match self.stale.lock() {
            Ok(mut stale) => stale.remove(route),
            Err(_) => false,
        }
    }

    pub fn is_stale(&self, route: &str) -> bool {
        self.stale
            .lock()
            .map(|stale| stale.contains(route))
            .unwrap_or(false)
    }
}

impl Revalidate for RouteCache {
    fn invalidate(&self, route: &str) {
        tracing::debug!(route, "route cache invalidated");
        if let Ok(mut stale) = self.stale.lock() {
            stale.insert(route.to_string());
        }
    }
}
