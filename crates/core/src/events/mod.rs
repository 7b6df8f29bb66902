//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events
//! after a view context switch or a sharing run. Shells implement the sink
//! to invalidate cached scoped reads.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
