//! Reveal pacing.
//!
//! Matches resolve instantly; a presentation layer reveals them slowly.
//! [`RevealTimeline`] turns a [`crate::orchestrator::MatchReport`] into
//! cues with absolute start times so the presentation does not have to
//! re-derive the order.

pub mod timeline;

pub use timeline::{RevealCue, RevealTimeline, TimedCue};
