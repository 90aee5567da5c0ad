//! Built-in processor backends.
//!
//! Real instruction sets live outside this crate and plug in through the
//! [`Processor`](crate::soc::traits::Processor) trait. The sequencer here lets the
//! harness run on its own.

/// Byte-stepping processor with no instruction set.
pub mod sequencer;

pub use self::sequencer::Sequencer;
