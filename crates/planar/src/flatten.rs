//! The flattening engine.
//!
//! Bottom to top:
//!
//! - [`rules`]: one rule per shape of depth-bearing fields
//! - [`flatten_element`]: picks the rule for an element's kind
//! - [`LockGuard`]: keeps a layer unlocked for the length of one visit
//! - [`ContainerTraverser`]: walks containers, counts and reports
//! - [`FlattenSession`]: wraps one walk in one host transaction

pub mod rules;

mod dispatch;
mod lock;
mod session;
mod traverse;

pub use dispatch::{FlattenOutcome, flatten_element};
pub use lock::{LockGuard, with_unlocked};
pub use session::{FlattenSession, FlattenSummary};
pub use traverse::{ContainerTraverser, Counters, Notice};
