//! Deterministic pseudo-random bit sequences from linear-feedback shift
//! registers.
//!
//! `lfsr::RegisterCore` is the register: a width, a tap mask and a seed, and a
//! pure single-step transition.  `analysis::SequenceAnalyzer` drives a register
//! to capture its output and to validate its period.  Everything else is
//! harness: `io` clocks registers into sinks, `config` reads register settings
//! and `parallel` runs independent registers side by side.
//!
//! # Example
//!
//! ```
//! use lfsr_rs::prelude::*;
//!
//! let mut core = RegisterCore::new(8, 0xB8_u8, 1).unwrap();
//! let analyzer = SequenceAnalyzer::new().output_mode(OutputMode::Bits);
//!
//! let record = analyzer.generate(&mut core, 255);
//! let balance = output_bit_balance(&record).unwrap();
//! assert!((balance - 0.5).abs() < 0.01);
//!
//! let period = analyzer.find_period(&mut core, 1 << 8).unwrap();
//! assert!(period.maximal);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod lfsr;
pub mod parallel;
pub mod prelude;
pub mod util;

pub use crate::error::Error;
