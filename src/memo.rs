//! Memoized functions over a bounded argument-list cache.

use parking_lot::Mutex;

use crate::cache::RingCache;
use crate::error::ConfigError;

/// The default per-position equality: plain `==`.
///
/// This is the strictest comparison most argument types support; substitute
/// any other predicate via [`memoize_with`].
pub fn default_equality<A: PartialEq>(a: &A, b: &A) -> bool {
    a == b
}

/// Memoizes `func` over its single most recent argument list.
///
/// ```
/// use selecta::memoize;
///
/// let double = memoize(|args: &[u32]| args[0] * 2);
/// assert_eq!(double.call(&[7]), 14);
/// assert_eq!(double.call(&[7]), 14); // Served from the cache.
/// ```
pub fn memoize<A, R, F>(func: F) -> Memoized<A, R, F>
where
    A: Clone + PartialEq,
    R: Clone,
    F: Fn(&[A]) -> R,
{
    let equal: fn(&A, &A) -> bool = default_equality;
    Memoized::with_validated(func, equal, 1)
}

/// Memoizes `func` over its `cache_size` most recent distinct argument
/// lists, comparing argument positions with `equal`.
///
/// Fails with [`ConfigError::CacheSize`] when `cache_size` is zero.
pub fn memoize_with<A, R, F, E>(
    func: F,
    equal: E,
    cache_size: usize,
) -> Result<Memoized<A, R, F, E>, ConfigError>
where
    A: Clone,
    R: Clone,
    F: Fn(&[A]) -> R,
    E: Fn(&A, &A) -> bool,
{
    if cache_size < 1 {
        return Err(ConfigError::CacheSize(cache_size));
    }
    Ok(Memoized::with_validated(func, equal, cache_size))
}

/// A memoized function.
///
/// Wraps a pure function together with a fixed-capacity cache of its most
/// recent distinct argument lists. An immediately repeated call compares a
/// single slot and clones the stored result; other hits are found by a
/// recency-ordered scan; misses run the function and evict the oldest entry
/// once the cache is full.
pub struct Memoized<A, R, F, E = fn(&A, &A) -> bool> {
    func: F,
    equal: E,
    cache: Mutex<RingCache<A, R>>,
}

impl<A, R, F, E> Memoized<A, R, F, E>
where
    A: Clone,
    R: Clone,
    F: Fn(&[A]) -> R,
    E: Fn(&A, &A) -> bool,
{
    /// `cache_size` has already been validated to be at least 1.
    pub(crate) fn with_validated(func: F, equal: E, cache_size: usize) -> Self {
        Self { func, equal, cache: Mutex::new(RingCache::new(cache_size)) }
    }

    /// Calls the wrapped function, reusing a cached result when `args`
    /// shallow-equals one of the retained argument lists.
    ///
    /// The cache lock is held for the whole call, including the wrapped
    /// computation, so concurrent callers serialize here. A reentrant call
    /// (the wrapped function invoking its own wrapper) deadlocks.
    pub fn call(&self, args: &[A]) -> R {
        let mut cache = self.cache.lock();
        if let Some(result) = cache.lookup(args, &self.equal) {
            return result.clone();
        }
        // The computation runs before any slot is touched. If it panics,
        // the cache contains exactly what it contained before this call and
        // an identical retry recomputes instead of hitting a stale entry.
        let result = (self.func)(args);
        cache.insert(args.to_vec(), result.clone());
        result
    }

    /// Drops every retained entry. The next call always misses.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// The retained argument lists by physical slot, `None` where empty.
    pub fn args_arr(&self) -> Vec<Option<Vec<A>>> {
        self.cache.lock().args_arr()
    }

    /// The retained results by physical slot, `None` where empty.
    pub fn results_arr(&self) -> Vec<Option<R>> {
        self.cache.lock().results_arr()
    }

    /// The physical index of the most recently inserted slot.
    pub fn last_index(&self) -> usize {
        self.cache.lock().last_index()
    }

    /// The slot that served the previous hit or received the previous
    /// insert.
    pub fn last_cache_hit_index(&self) -> usize {
        self.cache.lock().last_hit()
    }

    /// How many slots currently hold live entries.
    pub fn results_length(&self) -> usize {
        self.cache.lock().results_length()
    }
}

/// The calling surface of a memoized function.
///
/// The selector layer depends on this trait rather than on [`Memoized`]
/// directly, so an alternative memoization strategy can be substituted via
/// [`SelectorCreator::new`](crate::SelectorCreator::new).
pub trait Memo<A, R> {
    /// Calls the wrapped function or returns a cached result.
    fn call(&self, args: &[A]) -> R;

    /// Drops all cached results.
    fn clear_cache(&self);
}

impl<A, R, F, E> Memo<A, R> for Memoized<A, R, F, E>
where
    A: Clone,
    R: Clone,
    F: Fn(&[A]) -> R,
    E: Fn(&A, &A) -> bool,
{
    fn call(&self, args: &[A]) -> R {
        Memoized::call(self, args)
    }

    fn clear_cache(&self) {
        Memoized::clear_cache(self)
    }
}
