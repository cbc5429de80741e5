// SPDX-License-Identifier: MIT
//! seedtone-studio: the stateful side of seedtone.
//!
//! The theme crate turns a seed into a palette and a font pairing. This
//! crate keeps what the user does with them:
//!
//! ```text
//!   query ?a=<token> ─┐
//!   store (last) ─────┼─▶ boot ─▶ Studio ──commit──▶ report + share token
//!   first run ────────┘             │                  │
//!                                   │                  ├─▶ debounced link rewrite
//!                                   ▼                  └─▶ persist (favorites,
//!                         history (≤ 12), favorites,          history, last, locks)
//!                         group and token locks
//! ```
//!
//! Modules:
//!
//! - [`snapshot`]: the shareable aesthetic, locks, history and favorites
//! - [`share`]: the versioned base64url share codec
//! - [`store`]: key-value persistence backends
//! - [`link`]: query-string state and the debouncer for link rewrites
//! - [`clock`]: injectable wall clock
//! - [`config`]: TOML user configuration
//! - [`studio`]: the live state and every operation on it

pub mod clock;
pub mod config;
pub mod error;
pub mod link;
pub mod share;
pub mod snapshot;
pub mod store;
pub mod studio;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigError};
pub use error::{Result, StudioError};
pub use link::{MemoryQuery, QueryState, SHARE_PARAM};
pub use share::ShareError;
pub use snapshot::{Entry, Favorites, HISTORY_LIMIT, History, Locks, Snapshot};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use studio::{Notice, SearchResults, Studio, StudioBuilder};
