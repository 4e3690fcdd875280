//! # Fitness Memoization
//!
//! [`MemoizedChallenge`] wraps a fitness evaluator with a bounded
//! least-recently-used cache, keyed by a caller-supplied canonical
//! representation of the chromosome. Expensive evaluators are only invoked
//! on cache misses; hit/miss statistics are tracked for observability.
//!
//! Memoization is explicit decoration: a solver is handed either a bare
//! challenge or a wrapped one. Evaluators without a canonical hashable
//! representation simply go unwrapped and are evaluated directly.
//!
//! Correctness requires the wrapped evaluator to be a pure function of the
//! cache key: two chromosomes with equal keys must score identically.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use crate::chromosome::Chromosome;
use crate::evolution::Challenge;

/// Default number of cached evaluations.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Hit/miss statistics of a memoized challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

/// Bounded LRU map. Guarded by the owning challenge's mutex, so the
/// bookkeeping never races.
#[derive(Debug)]
struct BoundedCache<K> {
    map: HashMap<K, Vec<f64>>,
    order: VecDeque<K>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K> BoundedCache<K>
where
    K: Eq + Hash + Clone,
{
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    fn get(&mut self, key: &K) -> Option<Vec<f64>> {
        match self.map.get(key) {
            Some(value) => {
                self.hits += 1;
                // refresh recency
                if let Some(position) = self.order.iter().position(|k| k == key) {
                    self.order.remove(position);
                    self.order.push_back(key.clone());
                }
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn insert(&mut self, key: K, value: Vec<f64>) {
        if self.capacity == 0 {
            return;
        }
        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            if let Some(evicted) = self.order.pop_front() {
                self.map.remove(&evicted);
            }
        }
        if self.map.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

/// A challenge decorator that caches fitness evaluations.
///
/// The cache is shared behind a single mutex, so the same key is never
/// evaluated twice by concurrent workers: the first worker to take the lock
/// computes, later workers hit.
#[derive(Debug, Clone)]
pub struct MemoizedChallenge<G, C, K, F>
where
    C: Challenge<G>,
    K: Eq + Hash + Clone + Debug + Send + Sync,
    F: Fn(&Chromosome<G>) -> K + Send + Sync,
{
    challenge: C,
    key_fn: F,
    cache: Arc<Mutex<BoundedCache<K>>>,
    _marker: PhantomData<fn(&G)>,
}

impl<G, C, K, F> MemoizedChallenge<G, C, K, F>
where
    C: Challenge<G>,
    K: Eq + Hash + Clone + Debug + Send + Sync,
    F: Fn(&Chromosome<G>) -> K + Send + Sync,
{
    /// Wraps `challenge` with a cache of [`DEFAULT_CACHE_CAPACITY`] entries,
    /// keyed by `key_fn`.
    pub fn new(challenge: C, key_fn: F) -> Self {
        Self::with_capacity(challenge, key_fn, DEFAULT_CACHE_CAPACITY)
    }

    /// Wraps `challenge` with a cache bounded to `capacity` entries.
    pub fn with_capacity(challenge: C, key_fn: F, capacity: usize) -> Self {
        Self {
            challenge,
            key_fn,
            cache: Arc::new(Mutex::new(BoundedCache::new(capacity))),
            _marker: PhantomData,
        }
    }

    /// Returns a reference to the wrapped challenge.
    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Current hit/miss statistics.
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock().unwrap();
        CacheStats {
            hits: cache.hits,
            misses: cache.misses,
            len: cache.map.len(),
            capacity: cache.capacity,
        }
    }

    /// Drops every cached evaluation. Statistics are kept.
    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
    }
}

impl<G, C, K, F> Challenge<G> for MemoizedChallenge<G, C, K, F>
where
    G: Send + Sync,
    C: Challenge<G>,
    K: Eq + Hash + Clone + Debug + Send + Sync,
    F: Fn(&Chromosome<G>) -> K + Send + Sync,
{
    fn score(&self, chromosome: &Chromosome<G>) -> Vec<f64> {
        let key = (self.key_fn)(chromosome);

        // The lock is held across the miss computation so concurrent
        // evaluations of one key cannot duplicate work.
        let mut cache = self.cache.lock().unwrap();
        if let Some(score) = cache.get(&key) {
            return score;
        }

        let score = self.challenge.score(chromosome);
        cache.insert(key, score.clone());
        score
    }
}
