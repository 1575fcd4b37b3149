use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Mutex;

use foldhash::{HashMap, HashMapExt};
use tracing::trace;

use crate::{ERR_POISONED_LOCK, Pool, Reusable};

const DEFAULT_MAX_IDLE_PER_TYPE: usize = 64;

/// A thread-safe [`Pool`] that keeps idle instances of any number of types, keyed by type.
///
/// Instances are owned by the pool only while idle. [`get()`][Pool::get] moves an idle
/// instance out (or creates a fresh one via [`Default`]) and [`release()`][Pool::release]
/// moves it back in. Each idle instance is handed out to exactly one borrower.
///
/// At most [`max_idle_per_type`][MultiPoolBuilder::max_idle_per_type] instances of each type
/// are retained; surplus releases are dropped.
///
/// # Example
///
/// ```rust
/// use ffi_request::{ConnectRequest, MultiPool, Pool};
///
/// let pool = MultiPool::new();
///
/// let request: ConnectRequest = pool.get();
/// assert_eq!(pool.idle_count::<ConnectRequest>(), 0);
///
/// pool.release(request);
/// assert_eq!(pool.idle_count::<ConnectRequest>(), 1);
/// ```
///
/// # Thread safety
///
/// This type is thread-safe. Share it between threads via [`Arc`][std::sync::Arc] or by
/// reference from scoped threads.
pub struct MultiPool {
    /// Idle instances, one stack per type. We use foldhash for better performance with
    /// small hash tables.
    idle: Mutex<HashMap<TypeId, Vec<Box<dyn Any + Send>>>>,

    max_idle_per_type: usize,
}

impl MultiPool {
    /// Creates a pool with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for creating a [`MultiPool`] with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ffi_request::MultiPool;
    ///
    /// let pool = MultiPool::builder().max_idle_per_type(8).build();
    /// ```
    pub fn builder() -> MultiPoolBuilder {
        MultiPoolBuilder::new()
    }

    /// The number of idle instances of `T` currently retained.
    #[must_use]
    pub fn idle_count<T: Reusable>(&self) -> usize {
        let idle = self.idle.lock().expect(ERR_POISONED_LOCK);
        idle.get(&TypeId::of::<T>()).map_or(0, Vec::len)
    }

    /// The number of idle instances of all types currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        let idle = self.idle.lock().expect(ERR_POISONED_LOCK);
        idle.values().map(Vec::len).sum()
    }

    /// Whether the pool retains no idle instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every idle instance, releasing the memory they hold.
    pub fn clear(&self) {
        let mut idle = self.idle.lock().expect(ERR_POISONED_LOCK);
        idle.clear();
    }
}

impl Pool for MultiPool {
    fn get<T: Reusable>(&self) -> T {
        let recycled = {
            let mut idle = self.idle.lock().expect(ERR_POISONED_LOCK);
            idle.get_mut(&TypeId::of::<T>()).and_then(Vec::pop)
        };

        // The stacks are keyed by TypeId, so the downcast only fails if nothing was idle.
        match recycled.and_then(|erased| erased.downcast::<T>().ok()) {
            Some(instance) => {
                trace!(type_name = type_name::<T>(), "reusing idle instance");
                *instance
            }
            None => {
                trace!(type_name = type_name::<T>(), "creating new instance");
                T::default()
            }
        }
    }

    fn release<T: Reusable>(&self, instance: T) {
        let mut idle = self.idle.lock().expect(ERR_POISONED_LOCK);
        let type_id = TypeId::of::<T>();

        if idle.get(&type_id).map_or(0, Vec::len) >= self.max_idle_per_type {
            drop(idle);
            trace!(
                type_name = type_name::<T>(),
                "idle limit reached; dropping released instance"
            );
            return;
        }

        idle.entry(type_id)
            .or_insert_with(Vec::new)
            .push(Box::new(instance));
    }
}

impl Default for MultiPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MultiPool {
    #[cfg_attr(test, mutants::skip)] // Debug output is informational, no API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (type_count, idle_count) = {
            let idle = self.idle.lock().expect(ERR_POISONED_LOCK);
            (idle.len(), idle.values().map(Vec::len).sum::<usize>())
        };

        f.debug_struct(type_name::<Self>())
            .field("max_idle_per_type", &self.max_idle_per_type)
            .field("type_count", &type_count)
            .field("idle_count", &idle_count)
            .finish_non_exhaustive()
    }
}

/// Builder for creating an instance of [`MultiPool`].
///
/// # Examples
///
/// ```
/// use ffi_request::MultiPool;
///
/// // Default pool.
/// let pool = MultiPool::builder().build();
///
/// // Never retain anything; every borrow creates a fresh instance.
/// let pool = MultiPool::builder().max_idle_per_type(0).build();
/// ```
#[derive(Debug)]
#[must_use]
pub struct MultiPoolBuilder {
    max_idle_per_type: usize,
}

impl MultiPoolBuilder {
    pub(crate) fn new() -> Self {
        Self {
            max_idle_per_type: DEFAULT_MAX_IDLE_PER_TYPE,
        }
    }

    /// Sets how many idle instances of each type the pool retains. Defaults to 64.
    pub fn max_idle_per_type(mut self, max: usize) -> Self {
        self.max_idle_per_type = max;
        self
    }

    /// Builds the pool with the specified configuration.
    #[must_use]
    pub fn build(self) -> MultiPool {
        MultiPool {
            idle: Mutex::new(HashMap::new()),
            max_idle_per_type: self.max_idle_per_type,
        }
    }
}
