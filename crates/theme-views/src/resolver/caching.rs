//! Bounded view cache in front of a [`ViewLoader`].

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};

use super::{ViewLoader, ViewResolver};
use crate::error::ViewError;
use crate::locale::Locale;
use crate::settings::{TemplateSettings, DEFAULT_CACHE_LIMIT};
use crate::view::ViewRef;

type CacheKey = (String, Locale);

#[derive(Default)]
struct ViewCache {
    entries: HashMap<CacheKey, Option<ViewRef>>,
    // Insertion order, oldest first.
    order: VecDeque<CacheKey>,
}

impl ViewCache {
    fn insert(&mut self, key: CacheKey, view: Option<ViewRef>, limit: usize) {
        while self.entries.len() >= limit {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            tracing::debug!(view = %oldest.0, locale = %oldest.1, "evicting cached view");
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, view);
    }

    fn remove(&mut self, view_name: &str, locale: &Locale) -> bool {
        let key = (view_name.to_string(), locale.clone());
        self.order.retain(|k| k != &key);
        self.entries.remove(&key).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// A resolver that caches what its loader produces, keyed by view name and locale.
///
/// With caching off, every call goes to the loader. With caching on, the first
/// result for a key is kept and returned by later calls, including `None` when
/// unresolved caching is enabled. Once the cache holds `cache_limit` entries the
/// oldest inserted entry is evicted; hits do not reorder entries. A limit of
/// zero disables caching. Loader errors are returned and never cached.
///
/// Two threads missing on the same key may both call the loader; the first
/// result inserted is the one every caller sees afterwards.
pub struct CachingViewResolver<L> {
    loader: L,
    cache: bool,
    cache_limit: usize,
    cache_unresolved: bool,
    views: RwLock<ViewCache>,
}

impl<L: ViewLoader> CachingViewResolver<L> {
    /// Wraps a loader using the default cache settings.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            cache: true,
            cache_limit: DEFAULT_CACHE_LIMIT,
            cache_unresolved: true,
            views: RwLock::new(ViewCache::default()),
        }
    }

    /// Wraps a loader using the cache settings from `settings`.
    pub fn with_settings(loader: L, settings: &TemplateSettings) -> Self {
        Self::new(loader)
            .with_cache(settings.is_cache())
            .with_cache_limit(settings.cache_limit())
            .with_cache_unresolved(settings.cache_unresolved())
    }

    /// Turns caching on or off.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the maximum number of cached entries. Zero disables caching.
    pub fn with_cache_limit(mut self, limit: usize) -> Self {
        self.cache_limit = limit;
        self
    }

    /// Sets whether `None` results are cached.
    pub fn with_cache_unresolved(mut self, cache_unresolved: bool) -> Self {
        self.cache_unresolved = cache_unresolved;
        self
    }

    /// Whether views are cached at all.
    pub fn is_cache(&self) -> bool {
        self.cache && self.cache_limit > 0
    }

    /// Returns the maximum number of cached entries.
    pub fn cache_limit(&self) -> usize {
        self.cache_limit
    }

    /// Returns the wrapped loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Number of cached entries, resolved and unresolved.
    pub fn cached_len(&self) -> usize {
        self.views
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// Drops every cached view.
    pub fn clear_cache(&self) {
        self.views
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Drops the cached view for one name and locale.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_from_cache(&self, view_name: &str, locale: &Locale) -> bool {
        self.views
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(view_name, locale)
    }
}

impl<L: ViewLoader> ViewResolver for CachingViewResolver<L> {
    fn resolve_view_name(
        &self,
        view_name: &str,
        locale: &Locale,
    ) -> Result<Option<ViewRef>, ViewError> {
        if !self.is_cache() {
            return self.loader.load_view(view_name, locale);
        }

        let key = (view_name.to_string(), locale.clone());
        {
            let views = self.views.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = views.entries.get(&key) {
                tracing::trace!(view = view_name, %locale, "view cache hit");
                return Ok(cached.clone());
            }
        }

        let view = self.loader.load_view(view_name, locale)?;
        if view.is_none() && !self.cache_unresolved {
            return Ok(None);
        }

        let mut views = self.views.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = views.entries.get(&key) {
            return Ok(cached.clone());
        }
        tracing::debug!(view = view_name, %locale, resolved = view.is_some(), "caching view");
        views.insert(key, view.clone(), self.cache_limit);
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RedirectView;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    /// Loader that counts calls and resolves every name except "unknown".
    #[derive(Default)]
    struct CountingLoader {
        calls: AtomicUsize,
    }

    impl CountingLoader {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ViewLoader for CountingLoader {
        fn load_view(
            &self,
            view_name: &str,
            _locale: &Locale,
        ) -> Result<Option<ViewRef>, ViewError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if view_name == "unknown" {
                return Ok(None);
            }
            if view_name == "broken" {
                return Err(ViewError::NotFound {
                    path: view_name.to_string(),
                });
            }
            Ok(Some(Arc::new(RedirectView::new(format!("/{}", view_name)))))
        }
    }

    #[test]
    fn test_cached_view_is_reused() {
        let resolver = CachingViewResolver::new(CountingLoader::default());
        let locale = Locale::default();

        let first = resolver.resolve_view_name("home", &locale).unwrap().unwrap();
        let second = resolver.resolve_view_name("home", &locale).unwrap().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.loader().calls(), 1);
        assert_eq!(resolver.cached_len(), 1);
    }

    #[test]
    fn test_locale_is_part_of_key() {
        let resolver = CachingViewResolver::new(CountingLoader::default());

        resolver.resolve_view_name("home", &Locale::new("en")).unwrap();
        resolver.resolve_view_name("home", &Locale::new("fr")).unwrap();

        assert_eq!(resolver.loader().calls(), 2);
    }

    #[test]
    fn test_cache_disabled_always_loads() {
        let resolver = CachingViewResolver::new(CountingLoader::default()).with_cache(false);
        let locale = Locale::default();

        resolver.resolve_view_name("home", &locale).unwrap();
        resolver.resolve_view_name("home", &locale).unwrap();

        assert!(!resolver.is_cache());
        assert_eq!(resolver.loader().calls(), 2);
        assert_eq!(resolver.cached_len(), 0);
    }

    #[test]
    fn test_zero_limit_disables_cache() {
        let resolver = CachingViewResolver::new(CountingLoader::default()).with_cache_limit(0);
        assert!(!resolver.is_cache());
    }

    #[test]
    fn test_unresolved_cached_by_default() {
        let resolver = CachingViewResolver::new(CountingLoader::default());
        let locale = Locale::default();

        assert!(resolver.resolve_view_name("unknown", &locale).unwrap().is_none());
        assert!(resolver.resolve_view_name("unknown", &locale).unwrap().is_none());
        assert_eq!(resolver.loader().calls(), 1);
    }

    #[test]
    fn test_unresolved_not_cached_when_disabled() {
        let resolver =
            CachingViewResolver::new(CountingLoader::default()).with_cache_unresolved(false);
        let locale = Locale::default();

        resolver.resolve_view_name("unknown", &locale).unwrap();
        resolver.resolve_view_name("unknown", &locale).unwrap();
        assert_eq!(resolver.loader().calls(), 2);
        assert_eq!(resolver.cached_len(), 0);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let resolver = CachingViewResolver::new(CountingLoader::default());
        let locale = Locale::default();

        assert!(resolver.resolve_view_name("broken", &locale).is_err());
        assert!(resolver.resolve_view_name("broken", &locale).is_err());
        assert_eq!(resolver.loader().calls(), 2);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let resolver = CachingViewResolver::new(CountingLoader::default()).with_cache_limit(2);
        let locale = Locale::default();

        resolver.resolve_view_name("a", &locale).unwrap();
        resolver.resolve_view_name("b", &locale).unwrap();
        resolver.resolve_view_name("c", &locale).unwrap();
        assert_eq!(resolver.cached_len(), 2);

        // "b" and "c" are still cached, "a" was evicted.
        resolver.resolve_view_name("b", &locale).unwrap();
        resolver.resolve_view_name("c", &locale).unwrap();
        assert_eq!(resolver.loader().calls(), 3);
        resolver.resolve_view_name("a", &locale).unwrap();
        assert_eq!(resolver.loader().calls(), 4);
    }

    #[test]
    fn test_remove_and_clear() {
        let resolver = CachingViewResolver::new(CountingLoader::default());
        let locale = Locale::default();

        resolver.resolve_view_name("a", &locale).unwrap();
        resolver.resolve_view_name("b", &locale).unwrap();

        assert!(resolver.remove_from_cache("a", &locale));
        assert!(!resolver.remove_from_cache("a", &locale));
        assert_eq!(resolver.cached_len(), 1);

        resolver.resolve_view_name("a", &locale).unwrap();
        assert_eq!(resolver.loader().calls(), 3);

        resolver.clear_cache();
        assert_eq!(resolver.cached_len(), 0);
    }

    #[test]
    fn test_concurrent_misses_share_first_insert() {
        let resolver = Arc::new(CachingViewResolver::new(CountingLoader::default()));
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    resolver
                        .resolve_view_name("login", &Locale::default())
                        .unwrap()
                        .unwrap()
                })
            })
            .collect();
        let views: Vec<ViewRef> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(views.iter().all(|v| Arc::ptr_eq(v, &views[0])));
        assert_eq!(resolver.cached_len(), 1);
        assert!(resolver.loader().calls() >= 1);
    }

    #[test]
    fn test_resolver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CachingViewResolver<CountingLoader>>();
    }

    #[test]
    fn test_with_settings() {
        let settings = TemplateSettings::new()
            .with_cache(false)
            .with_cache_limit(3)
            .with_cache_unresolved(false);
        let resolver = CachingViewResolver::with_settings(CountingLoader::default(), &settings);

        assert!(!resolver.is_cache());
        assert_eq!(resolver.cache_limit(), 3);
    }
}
