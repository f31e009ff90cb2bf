//! @ai:module:intent Admission gate capping in-flight provider calls
//! @ai:module:layer infrastructure
//! @ai:module:public_api ConcurrencyLimiter, LimiterPermit
//! @ai:module:stateless false

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// @ai:intent Trait for concurrency limiting functionality
pub trait ConcurrencyLimiterTrait: Send + Sync {
    /// @ai:intent Wait until a call slot is free and take it
    fn acquire(&self) -> impl std::future::Future<Output = LimiterPermit> + Send;
}

/// @ai:intent Counting semaphore with a fixed number of call slots
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// @ai:intent A held slot; released when dropped on any exit path
#[derive(Debug)]
pub struct LimiterPermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyLimiter {
    /// @ai:intent Create a limiter with capacity slots
    /// @ai:pre capacity > 0
    /// @ai:effects pure
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// @ai:effects pure
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// @ai:intent Number of slots currently held
    /// @ai:effects state:read
    pub fn in_flight(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }
}

impl ConcurrencyLimiterTrait for ConcurrencyLimiter {
    /// @ai:effects state:write
    async fn acquire(&self) -> LimiterPermit {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("limiter semaphore is never closed");

        LimiterPermit { _permit: permit }
    }
}
