//! This module provides an easy single import for those using this crate.

pub use crate::analysis::{
    output_bit_balance, run_lengths, AnalysisError, OutputMode, PeriodInfo,
    PeriodStrategy, SeedConvention, SequenceAnalyzer, SequenceRecord,
};
pub use crate::config::LfsrConfig;
pub use crate::error::Error;
pub use crate::io::{Driver, Sink, VecSink};
pub use crate::lfsr::{maximal_taps, ConfigError, RegisterCore, Topology, Word};
