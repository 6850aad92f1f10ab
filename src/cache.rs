use crate::ast::Ast;
use crate::engine::Pipeline;
use crate::rpn::PostfixToken;
use foldhash::{HashMap, HashMapExt};
use log::{debug, trace};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// A parsed expression in the form one of the pipelines consumes.
#[derive(Clone, Debug)]
pub(crate) enum Parsed {
    Postfix(Arc<Vec<PostfixToken>>),
    Tree(Arc<Ast>),
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parsed::Postfix(seq) => {
                for (i, t) in seq.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", t)?;
                }
                Ok(())
            }
            Parsed::Tree(ast) => write!(f, "{}", ast),
        }
    }
}

struct Entry {
    parsed: Parsed,
    last_used: AtomicU64,
}

type Key = (String, Pipeline);

/// Least-recently-used memo of parsed expressions.
///
/// Lookups only take the read lock; recency is tracked with atomic stamps so
/// concurrent readers never block each other.
pub(crate) struct ParseCache {
    capacity: usize,
    clock: AtomicU64,
    map: RwLock<HashMap<Key, Entry>>,
}

impl ParseCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            clock: AtomicU64::new(0),
            map: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn get(&self, text: &str, pipeline: Pipeline) -> Option<Parsed> {
        let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
        let entry = map.get(&(text.to_string(), pipeline))?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        trace!("cache hit: {:?} [{:?}]", text, pipeline);
        Some(entry.parsed.clone())
    }

    pub(crate) fn insert(&self, text: String, pipeline: Pipeline, parsed: Parsed) {
        if self.capacity == 0 {
            return;
        }
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        let key = (text, pipeline);
        if !map.contains_key(&key) && map.len() >= self.capacity {
            let oldest = map
                .iter()
                .min_by_key(|(_, e)| e.last_used.load(Ordering::Relaxed))
                .map(|(k, _)| k.clone());
            if let Some(k) = oldest {
                debug!("cache evict: {:?} [{:?}]", k.0, k.1);
                map.remove(&k);
            }
        }
        let entry = Entry {
            parsed,
            last_used: AtomicU64::new(self.tick()),
        };
        map.insert(key, entry);
    }

    pub(crate) fn clear(&self) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Trims and collapses every whitespace run to a single space.
pub(crate) fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
