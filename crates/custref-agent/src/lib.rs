//! custref Agent
//!
//! Wires the pipeline stages together and decides what the user sees.
//!
//! # Architecture
//!
//! ```text
//! prompt → route ─┬─ greeting / help / about / unrecognized → fixed message
//!                 └─ data query → extract → compile → execute → format
//! ```
//!
//! The pipeline is linear: no stage revises an earlier stage's output, and
//! no state survives between requests. Every failure ends in either the
//! "no customers found" message or a generic apology; error details go to
//! the log only.

#![warn(missing_docs)]

pub mod conversation;
mod error;
pub mod formatter;
mod pipeline;

pub use conversation::{classify, Intent};
pub use error::AgentError;
pub use formatter::{CustomerRow, ResultFormatter, COLUMNS};
pub use pipeline::{AgentConfig, AgentReply, CustomerReferenceAgent, PipelineOutput, ReplyKind};
