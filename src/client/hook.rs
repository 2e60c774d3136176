use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

/// What every gateway route answers: `{ success, data?, message? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> HookResponse<T> {
    pub fn ok(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Snapshot of a hook: idle -> loading -> success | error
#[derive(Debug, Clone, PartialEq)]
pub struct HookState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub success: bool,
    pub error: Option<String>,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            success: false,
            error: None,
        }
    }
}

/// State container for one kind of request, shared between clones.
///
/// Every `fetch` bumps a generation counter. When an older call resolves after
/// a newer one has started, its result is still returned to its caller but is
/// not written into the shared state, so the last call issued always wins.
#[derive(Debug)]
pub struct Hook<T> {
    state: Arc<Mutex<HookState<T>>>,
    generation: Arc<AtomicU64>,
}

impl<T> Clone for Hook<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<T> Default for Hook<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(HookState::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T: Clone> Hook<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HookState<T> {
        self.lock().clone()
    }

    /// Number of fetches started so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run `request`, tracking loading/success/error around it
    pub async fn fetch<F>(&self, request: F) -> HookResponse<T>
    where
        F: Future<Output = HookResponse<T>>,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.lock();
            state.is_loading = true;
            state.success = false;
            state.error = None;
        }

        let mut in_flight = InFlight {
            hook: self,
            generation,
            done: false,
        };
        let response = request.await;
        in_flight.done = true;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale response from fetch #{}", generation);
            return response;
        }

        state.is_loading = false;
        if response.success {
            state.success = true;
            state.data = response.data.clone();
        } else {
            state.error = Some(
                response
                    .message
                    .clone()
                    .unwrap_or_else(|| "Request failed".to_string()),
            );
        }

        response
    }

}

impl<T> Hook<T> {
    fn lock(&self) -> MutexGuard<'_, HookState<T>> {
        // A panic while holding the lock cannot leave the state half-written
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears `is_loading` when a fetch is dropped before its request resolves,
/// unless a newer fetch has taken over
struct InFlight<'a, T> {
    hook: &'a Hook<T>,
    generation: u64,
    done: bool,
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut state = self.hook.lock();
        if self.hook.generation.load(Ordering::SeqCst) == self.generation {
            tracing::debug!("Fetch #{} dropped before completion", self.generation);
            state.is_loading = false;
        }
    }
}
