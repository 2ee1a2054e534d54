//! Request-Processing Pipeline
//!
//! Every route is served by a [`chain::Chain`]: an ordered list of stages
//! executed strictly in sequence over one shared [`context::RequestContext`].
//! A stage either extends the context and continues, produces the final
//! response, or raises an [`crate::error::ApiError`] that the chain hands to
//! the error funnel. Exactly one terminal action is ever emitted per request
//! and no stage runs after it.

pub mod chain;
pub mod context;

pub use chain::{Chain, Stage, StageOutcome};
pub use context::{ApiReply, RequestContext, Section};
