//! Helper functions shared by the register, the analyzer and the sinks.

/// Bit-level helpers: parity, width masks and bit packing.
pub mod bits;
