// SPDX-License-Identifier: MIT
//! Share-link plumbing: the query-string collaborator and the debouncer
//! that coalesces bursts of edits into one link rewrite.
//!
//! The debouncer is tick-driven like the rest of the studio: the host
//! calls [`Debouncer::poll`] with the current time and receives at most
//! one value once the quiet period has elapsed.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Query parameter that carries the share token.
pub const SHARE_PARAM: &str = "a";

/// Default quiet period before the link is rewritten.
pub const DEFAULT_LINK_DEBOUNCE_MS: u64 = 120;

// ---------------------------------------------------------------------------
// QueryState
// ---------------------------------------------------------------------------

/// Read and replace named parameters of the host's location. Replacing
/// never adds a navigation entry.
pub trait QueryState {
    fn get(&self, param: &str) -> Option<String>;
    fn replace(&self, param: &str, value: &str);
}

/// In-memory query string. Clones share the same parameters.
#[derive(Debug, Clone, Default)]
pub struct MemoryQuery {
    params: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A query string that already carries `param=value`.
    #[must_use]
    pub fn with_param(param: &str, value: &str) -> Self {
        let query = Self::new();
        query.replace(param, value);
        query
    }
}

impl QueryState for MemoryQuery {
    fn get(&self, param: &str) -> Option<String> {
        self.params.read().ok()?.get(param).cloned()
    }

    fn replace(&self, param: &str, value: &str) {
        if let Ok(mut params) = self.params.write() {
            params.insert(param.to_owned(), value.to_owned());
        }
    }
}

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// Holds the latest scheduled value until `delay_ms` passes without a
/// newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Replace any pending value; the deadline restarts from `now_ms`.
    pub fn schedule(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms.saturating_add(self.delay_ms)));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((_, due)) if now_ms >= due => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Take the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_DEBOUNCE_MS)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
