//! Compare resolution.
//!
//! [`resolve_compare`] scores one slot of a match and explains every
//! number it produced as a list of [`CompareEvent`]s.

pub mod event;
pub mod compare;

pub use event::{diff_side, CompareEvent, EventSource, Op, Stat};
pub use compare::{resolve_compare, CompareReport};
