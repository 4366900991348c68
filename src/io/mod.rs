//! The outside of the register: a driver that clocks it and sinks that take
//! the values it produces.
//!
//! A sink receives values in generation order, each tagged with its step
//! index.  Indices strictly increase and the stream is append-only; sinks
//! reject anything else with `Error::OutOfOrder`.  The `Driver` owns the
//! numbering so several runs against the same sink continue one stream.

pub mod channel;
pub mod raw;
pub mod text;

use crate::analysis::SequenceAnalyzer;
use crate::error::Error;
use crate::lfsr::{RegisterCore, Word};
use log::trace;

/// Consumer of a register's output stream.
pub trait Sink<T> {
    /// Takes the value produced at `step_index`.
    fn accept(&mut self, step_index: u64, value: T) -> Result<(), Error>;

    /// Called once the driver has nothing more to send.
    fn finish(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Tracks the last index a sink saw and rejects anything not after it.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepOrder {
    last: Option<u64>,
}

impl StepOrder {
    pub fn check(&mut self, step_index: u64) -> Result<(), Error> {
        match self.last {
            Some(last) if step_index <= last => Err(Error::OutOfOrder {
                last,
                got: step_index,
            }),
            _ => {
                self.last = Some(step_index);
                Ok(())
            }
        }
    }
}

/// Collects the stream in memory.
#[derive(Clone, Debug, Default)]
pub struct VecSink<T> {
    entries: Vec<(u64, T)>,
    order: StepOrder,
}

impl<T> VecSink<T> {
    pub fn new() -> Self {
        VecSink {
            entries: vec![],
            order: StepOrder::default(),
        }
    }

    pub fn entries(&self) -> &[(u64, T)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(u64, T)> {
        self.entries
    }
}

impl<T> Sink<T> for VecSink<T> {
    fn accept(&mut self, step_index: u64, value: T) -> Result<(), Error> {
        self.order.check(step_index)?;
        self.entries.push((step_index, value));
        Ok(())
    }
}

/// Clocks a register and forwards what it produces to a sink.
///
/// # Examples
///
/// ```
/// use lfsr_rs::io::{Driver, VecSink};
/// use lfsr_rs::analysis::SequenceAnalyzer;
/// use lfsr_rs::lfsr::RegisterCore;
///
/// let mut core = RegisterCore::new(32, 0x8020_0003_u64, 1).unwrap();
/// let mut driver = Driver::new(SequenceAnalyzer::new());
/// let mut sink = VecSink::new();
///
/// driver.run(&mut core, 2, &mut sink).unwrap();
/// driver.run(&mut core, 1, &mut sink).unwrap();
/// assert_eq!(sink.entries(), &[(0, 0x3), (1, 0x6), (2, 0xd)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Driver {
    analyzer: SequenceAnalyzer,
    next_index: u64,
}

impl Driver {
    /// The analyzer decides the output mode and seed convention.
    pub fn new(analyzer: SequenceAnalyzer) -> Self {
        Driver {
            analyzer,
            next_index: 0,
        }
    }

    /// Index the next forwarded value will carry.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Clocks `core` and forwards `count` values to `sink`.  Does not call
    /// `finish` on the sink, so a stream may span several runs.
    pub fn run<T, S>(
        &mut self,
        core: &mut RegisterCore<T>,
        count: usize,
        sink: &mut S,
    ) -> Result<(), Error>
    where
        T: Word,
        S: Sink<T> + ?Sized,
    {
        let mut sent = 0;
        if count > 0 && self.analyzer.emits_seed(core) {
            self.forward(core.current(), sink)?;
            sent += 1;
        }
        while sent < count {
            let state = core.step();
            self.forward(state, sink)?;
            sent += 1;
        }
        Ok(())
    }

    fn forward<T, S>(&mut self, state: T, sink: &mut S) -> Result<(), Error>
    where
        T: Word,
        S: Sink<T> + ?Sized,
    {
        let value = self.analyzer.observe(state);
        trace!("step {}: {:#x}", self.next_index, value);
        sink.accept(self.next_index, value)?;
        self.next_index += 1;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::analysis::{OutputMode, SeedConvention, SequenceAnalyzer};
    use crate::error::Error;
    use crate::io::*;

    #[test]
    fn test_step_order() {
        let mut order = StepOrder::default();
        assert!(order.check(0).is_ok());
        assert!(order.check(1).is_ok());
        assert!(order.check(5).is_ok());
        match order.check(5) {
            Err(Error::OutOfOrder { last: 5, got: 5 }) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert!(order.check(3).is_err());
    }

    #[test]
    fn test_vec_sink_rejects_rewind() {
        let mut sink = VecSink::new();
        sink.accept(3, 1_u8).unwrap();
        assert!(sink.accept(2, 1_u8).is_err());
        assert_eq!(sink.entries(), &[(3, 1)]);
    }

    #[test]
    // The driver and the analyzer see the same stream.
    fn test_driver_matches_analyzer() {
        let analyzer = SequenceAnalyzer::new()
            .output_mode(OutputMode::Bits)
            .seed_convention(SeedConvention::Include);

        let mut core = RegisterCore::new(16, 0xB400_u16, 0xACE1).unwrap();
        let record = analyzer.generate(&mut core, 40);

        let mut core = RegisterCore::new(16, 0xB400_u16, 0xACE1).unwrap();
        let mut driver = Driver::new(analyzer);
        let mut sink = VecSink::new();
        for _ in 0..4 {
            driver.run(&mut core, 10, &mut sink).unwrap();
        }
        assert_eq!(driver.next_index(), 40);

        let entries = sink.into_entries();
        let indices: Vec<u64> = entries.iter().map(|(ix, _)| *ix).collect();
        let values: Vec<u16> = entries.iter().map(|(_, v)| *v).collect();
        assert_eq!(indices, (0..40).collect::<Vec<u64>>());
        assert_eq!(values, record.values());
    }

    #[test]
    fn test_driver_zero_count() {
        let mut core = RegisterCore::new(8, 0xB8_u8, 1).unwrap();
        let mut driver = Driver::default();
        let mut sink = VecSink::new();
        driver.run(&mut core, 0, &mut sink).unwrap();
        assert!(sink.entries().is_empty());
        assert_eq!(core.steps(), 0);
    }
}
