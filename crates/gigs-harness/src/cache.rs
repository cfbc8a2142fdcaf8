//! Per-test cache of the object under test.
//!
//! A test may ask for its object several times (directly, then again from a
//! dependency check) but the factory is called at most once per instance.
//! The state machine is:
//!
//! ```text
//! Unstarted --factory ok--------------> Cached
//! Unstarted --no such code------------> Unsupported
//! Unstarted --other factory error-----> Failed
//! Unstarted --inject (dependency)-----> Cached
//! ```
//!
//! Every state but `Unstarted` is terminal for the life of the instance.

use std::sync::Arc;

use gigs_error::{FactoryError, GigsError, Result};
use tracing::debug;

use crate::outcome::Lookup;

enum CacheState<T: ?Sized> {
    Unstarted,
    Cached(Arc<T>),
    Unsupported { authority: String, code: String },
    Failed(FactoryError),
}

/// Lazily created object under test.
pub struct ObjectCache<T: ?Sized> {
    state: CacheState<T>,
    factory_calls: usize,
}

impl<T: ?Sized> Default for ObjectCache<T> {
    fn default() -> Self {
        Self {
            state: CacheState::Unstarted,
            factory_calls: 0,
        }
    }
}

impl<T: ?Sized> ObjectCache<T> {
    /// Return the cached object, calling `create` only on first use.
    ///
    /// # Errors
    ///
    /// Any factory error other than a missing code, replayed on every call.
    pub fn get_or_create<F>(&mut self, code: &str, create: F) -> Result<Lookup<Arc<T>>>
    where
        F: FnOnce(&str) -> std::result::Result<Arc<T>, FactoryError>,
    {
        if matches!(self.state, CacheState::Unstarted) {
            self.factory_calls += 1;
            debug!(code, "creating object under test");
            self.state = match create(code) {
                Ok(object) => CacheState::Cached(object),
                Err(FactoryError::NoSuchAuthorityCode { authority, code }) => {
                    CacheState::Unsupported { authority, code }
                }
                Err(e) => CacheState::Failed(e),
            };
        }
        match &self.state {
            CacheState::Cached(object) => Ok(Lookup::Found(Arc::clone(object))),
            CacheState::Unsupported { authority, code } => Ok(Lookup::Unsupported {
                authority: authority.clone(),
                code: code.clone(),
            }),
            CacheState::Failed(e) => Err(GigsError::Factory(e.clone())),
            CacheState::Unstarted => Err(GigsError::internal("object cache left unstarted")),
        }
    }

    /// Store an object created elsewhere, for a dependency check.
    ///
    /// # Errors
    ///
    /// [`GigsError::Internal`] if the cache already left `Unstarted`.
    pub fn inject(&mut self, object: Arc<T>) -> Result<()> {
        if !matches!(self.state, CacheState::Unstarted) {
            return Err(GigsError::internal("object under test already created"));
        }
        self.state = CacheState::Cached(object);
        Ok(())
    }

    pub const fn is_started(&self) -> bool {
        !matches!(self.state, CacheState::Unstarted)
    }

    pub fn get(&self) -> Option<&Arc<T>> {
        match &self.state {
            CacheState::Cached(object) => Some(object),
            _ => None,
        }
    }

    /// Number of times a factory was invoked through this cache.
    pub const fn factory_calls(&self) -> usize {
        self.factory_calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_called_once() {
        let mut cache: ObjectCache<str> = ObjectCache::default();
        for _ in 0..3 {
            let found = cache.get_or_create("7030", |code| Ok(Arc::from(code))).unwrap();
            assert_eq!(found.found().as_deref(), Some("7030"));
        }
        assert_eq!(cache.factory_calls(), 1);
    }

    #[test]
    fn unsupported_code_is_remembered() {
        let mut cache: ObjectCache<str> = ObjectCache::default();
        for _ in 0..2 {
            let lookup = cache
                .get_or_create("9999", |code| Err(FactoryError::no_such_code("EPSG", code)))
                .unwrap();
            assert_eq!(
                lookup,
                Lookup::Unsupported {
                    authority: "EPSG".to_owned(),
                    code: "9999".to_owned()
                }
            );
        }
        assert_eq!(cache.factory_calls(), 1);
        assert!(cache.get().is_none());
    }

    #[test]
    fn factory_failure_is_replayed() {
        let mut cache: ObjectCache<str> = ObjectCache::default();
        let first = cache.get_or_create("1", |_| Err(FactoryError::Failure("boom".to_owned())));
        let second = cache.get_or_create("1", |_| Ok(Arc::from("late")));
        assert_eq!(first, second);
        assert_eq!(cache.factory_calls(), 1);
    }

    #[test]
    fn injected_object_skips_factory() {
        let mut cache: ObjectCache<str> = ObjectCache::default();
        cache.inject(Arc::from("built")).unwrap();
        let lookup = cache.get_or_create("1", |_| Ok(Arc::from("other"))).unwrap();
        assert_eq!(lookup.found().as_deref(), Some("built"));
        assert_eq!(cache.factory_calls(), 0);
        assert!(cache.inject(Arc::from("again")).is_err());
    }
}
