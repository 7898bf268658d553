//! # Progression Module
//!
//! Stage resolution, tracking status and the auto-advancement gates.
//!
//! Every function here is pure: inputs are the record and an
//! [`EvaluationContext`](crate::EvaluationContext) carrying the frozen date.
//! Nothing is mutated or persisted; callers decide what to store.

mod advancement;
mod stage;
mod tracking;

pub use advancement::*;
pub use stage::*;
pub use tracking::*;
