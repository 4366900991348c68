//! Drives a register and measures what comes out of it.
//!
//! `SequenceAnalyzer` captures the state (or output bit) stream of a register
//! into a `SequenceRecord` and finds the cycle the register settles into.  The
//! checks here are coarse sanity checks used to validate a configuration; they
//! are not a statistical test battery.  Consumers that want one should take the
//! raw stream from `io` instead.

pub mod period;

pub use self::period::PeriodStrategy;

use crate::lfsr::{ConfigError, RegisterCore, Word};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// No state recurred within the step budget.  Not fatal: retry with a
    /// larger budget.
    PeriodNotFound { max_steps: u64 },
    /// An explicit seed handed to the analysis was invalid.
    Config(ConfigError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AnalysisError::PeriodNotFound { max_steps } => write!(
                f,
                "Analysis error: no period found within {} steps",
                max_steps
            ),
            AnalysisError::Config(ref err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            AnalysisError::Config(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for AnalysisError {
    fn from(err: ConfigError) -> Self {
        AnalysisError::Config(err)
    }
}

/// What gets recorded after each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// The whole register state.
    States,
    /// Only the least significant bit of the state, as 0 or 1.
    Bits,
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::States
    }
}

/// Whether the seed itself is part of the observable sequence.
///
/// With `Include`, a register that has not been stepped since construction or
/// reset emits its seed first.  Either way a request for `N` values yields
/// exactly `N` values, and a stream split over several requests matches the
/// same stream taken in one go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedConvention {
    Exclude,
    Include,
}

impl Default for SeedConvention {
    fn default() -> Self {
        SeedConvention::Exclude
    }
}

/// Ordered values captured from a register, immutable once captured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord<T> {
    mode: OutputMode,
    width: u32,
    values: Vec<T>,
}

impl<T: Word> SequenceRecord<T> {
    pub(crate) fn new(mode: OutputMode, width: u32, values: Vec<T>) -> Self {
        SequenceRecord {
            mode,
            width,
            values,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Width of the register the record was captured from.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The output bit stream: the values themselves for a `Bits` record, the
    /// least significant bit of each state for a `States` record.
    pub fn bits<'a>(&'a self) -> impl Iterator<Item = u8> + 'a {
        self.values
            .iter()
            .map(|value| (*value & T::one()).to_word() as u8)
    }
}

/// Summary of the cycle reached from a start state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// Number of distinct states in the cycle.
    pub cycle_length: u64,
    /// The cycle covers all `2^width - 1` non-zero states.
    pub maximal: bool,
    /// Steps taken before the cycle was entered.  Zero when the start state
    /// is itself on the cycle.
    pub offset: u64,
}

impl PeriodInfo {
    pub(crate) fn new(
        cycle_length: u64,
        offset: u64,
        nonzero_states: u64,
    ) -> Self {
        PeriodInfo {
            cycle_length,
            maximal: cycle_length == nonzero_states,
            offset,
        }
    }
}

/// Captures sequences from registers and validates their periods.
///
/// # Examples
///
/// ```
/// use lfsr_rs::analysis::{SequenceAnalyzer, SeedConvention};
/// use lfsr_rs::lfsr::RegisterCore;
///
/// let mut core = RegisterCore::new(8, 0xB8_u8, 1).unwrap();
/// let analyzer =
///     SequenceAnalyzer::new().seed_convention(SeedConvention::Include);
///
/// let record = analyzer.generate(&mut core, 3);
/// assert_eq!(record.values(), &[0x01, 0x02, 0x04]);
///
/// let period = analyzer.find_period(&mut core, 1000).unwrap();
/// assert_eq!(period.cycle_length, 255);
/// assert!(period.maximal);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceAnalyzer {
    mode: OutputMode,
    convention: SeedConvention,
    strategy: PeriodStrategy,
}

impl SequenceAnalyzer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn seed_convention(mut self, convention: SeedConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn strategy(mut self, strategy: PeriodStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn convention(&self) -> SeedConvention {
        self.convention
    }

    /// Steps `core` and records `count` values in step order.
    ///
    /// The core is not reset first, so consecutive calls continue the same
    /// sequence.
    pub fn generate<T: Word>(
        &self,
        core: &mut RegisterCore<T>,
        count: usize,
    ) -> SequenceRecord<T> {
        let mut values = Vec::with_capacity(count);
        if count > 0 && self.emits_seed(core) {
            values.push(self.observe(core.current()));
        }
        while values.len() < count {
            let state = core.step();
            values.push(self.observe(state));
        }
        SequenceRecord::new(self.mode, core.width(), values)
    }

    /// Whether the next value taken from `core` is its unstepped seed.
    pub(crate) fn emits_seed<T: Word>(&self, core: &RegisterCore<T>) -> bool {
        self.convention == SeedConvention::Include && core.steps() == 0
    }

    /// Maps a state to the value recorded for it under the output mode.
    pub(crate) fn observe<T: Word>(&self, state: T) -> T {
        match self.mode {
            OutputMode::States => state,
            OutputMode::Bits => state & T::one(),
        }
    }

    /// Finds the cycle reached from the core's seed.
    ///
    /// The core is rewound to its seed before the search and again after it,
    /// whatever the outcome.  `max_steps` bounds the search; exhausting it
    /// gives `AnalysisError::PeriodNotFound`.
    pub fn find_period<T: Word>(
        &self,
        core: &mut RegisterCore<T>,
        max_steps: u64,
    ) -> Result<PeriodInfo, AnalysisError> {
        core.rewind();
        let start = core.current();
        let result = period::detect(core, start, self.strategy, max_steps);
        core.rewind();
        match result {
            Ok(ref info) => info!(
                "period from seed {:#x}: length {}, offset {}, maximal {}",
                core.seed(),
                info.cycle_length,
                info.offset,
                info.maximal
            ),
            Err(_) => warn!(
                "no period from seed {:#x} within {} steps",
                core.seed(),
                max_steps
            ),
        }
        result
    }

    /// Like `find_period`, but resets the core to `seed` first.  The core
    /// keeps `seed` as its seed afterwards.
    pub fn find_period_from<T: Word>(
        &self,
        core: &mut RegisterCore<T>,
        seed: T,
        max_steps: u64,
    ) -> Result<PeriodInfo, AnalysisError> {
        core.reset(seed)?;
        self.find_period(core, max_steps)
    }
}

/// Fraction of one bits in the record's output bit stream, or `None` for an
/// empty record.
///
/// A maximal-length sequence has exactly `2^(W-1)` ones per period of
/// `2^W - 1` bits, so the ratio sits just above one half.
pub fn output_bit_balance<T: Word>(record: &SequenceRecord<T>) -> Option<f64> {
    if record.is_empty() {
        return None;
    }
    let ones = record.bits().filter(|bit| *bit == 1).count();
    Some(ones as f64 / record.len() as f64)
}

/// Histogram of runs of identical output bits: run length to number of runs.
pub fn run_lengths<T: Word>(
    record: &SequenceRecord<T>,
) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    let mut bits = record.bits();
    let mut current = match bits.next() {
        Some(bit) => bit,
        None => return histogram,
    };
    let mut run = 1;
    for bit in bits {
        if bit == current {
            run += 1;
        } else {
            *histogram.entry(run).or_insert(0) += 1;
            current = bit;
            run = 1;
        }
    }
    *histogram.entry(run).or_insert(0) += 1;
    histogram
}
