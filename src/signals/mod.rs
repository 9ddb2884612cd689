//! Signal envelope construction.

pub mod envelope;

pub use envelope::*;
