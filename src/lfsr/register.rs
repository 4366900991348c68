//! The register state and its single-step transition.

use crate::lfsr::{ConfigError, Topology, Word};
use crate::util::bits::{parity, width_mask};
use log::debug;

/// A linear-feedback shift register of `width` bits stored in a `T`.
///
/// The transition is a pure function of the current state and the tap mask;
/// nothing depends on how many times the register has been stepped.  The
/// register does no locking, so a single instance must not be stepped from two
/// threads at once.  Independent instances share nothing.
///
/// # Examples
///
/// ```
/// use lfsr_rs::lfsr::RegisterCore;
///
/// let mut core = RegisterCore::new(32, 0x8020_0003_u64, 1).unwrap();
/// assert_eq!(core.step(), 0x3);
/// assert_eq!(core.step(), 0x6);
/// assert_eq!(core.current(), 0x6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterCore<T: Word = u64> {
    width: u32,
    mask: T,
    taps: T,
    seed: T,
    state: T,
    topology: Topology,
    steps: u64,
}

impl<T: Word> RegisterCore<T> {
    /// Creates a left-shifting Fibonacci register.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of register stages, `1..=` the bits of `T`.
    /// * `taps` - Polynomial bit mask selecting the stages XORed into the
    /// feedback bit.
    /// * `seed` - Initial state.  Zero is rejected.
    ///
    /// `taps` and `seed` are truncated to `width` bits before validation.
    pub fn new(width: u32, taps: T, seed: T) -> Result<Self, ConfigError> {
        Self::with_topology(width, taps, seed, Topology::default())
    }

    /// Creates a register with an explicit feedback topology.
    pub fn with_topology(
        width: u32,
        taps: T,
        seed: T,
        topology: Topology,
    ) -> Result<Self, ConfigError> {
        if width == 0 || width > T::WORD_BITS {
            return Err(ConfigError::InvalidWidth {
                width,
                max: T::WORD_BITS,
            });
        }
        let mask = width_mask::<T>(width);
        let taps = taps & mask;
        if taps.is_zero() {
            return Err(ConfigError::ZeroTaps);
        }
        let seed = Self::check_seed(seed, mask)?;
        debug!(
            "new {} register: width {}, taps {:#x}, seed {:#x}",
            topology, width, taps, seed
        );
        Ok(RegisterCore {
            width,
            mask,
            taps,
            seed,
            state: seed,
            topology,
            steps: 0,
        })
    }

    fn check_seed(seed: T, mask: T) -> Result<T, ConfigError> {
        let seed = seed & mask;
        if seed.is_zero() {
            Err(ConfigError::ZeroSeed)
        } else {
            Ok(seed)
        }
    }

    /// Reinitializes the state to `seed`.  On error the register is left
    /// untouched.
    pub fn reset(&mut self, seed: T) -> Result<(), ConfigError> {
        self.seed = Self::check_seed(seed, self.mask)?;
        self.state = self.seed;
        self.steps = 0;
        debug!("reset to seed {:#x}", self.seed);
        Ok(())
    }

    /// Returns to the seed given at construction or the last `reset`.
    pub fn rewind(&mut self) {
        self.state = self.seed;
        self.steps = 0;
    }

    /// Advances the register by one clock and returns the new state.
    pub fn step(&mut self) -> T {
        self.state = self.next_state(self.state);
        self.steps += 1;
        self.state
    }

    /// The transition function.  Pure: depends only on `state` and the
    /// register's configuration.
    pub fn next_state(&self, state: T) -> T {
        match self.topology {
            Topology::FibonacciLeft => {
                let fb_bit = parity(state & self.taps);
                ((state << 1) | fb_bit) & self.mask
            }
            Topology::FibonacciRight => {
                let fb_bit = parity(state & self.taps);
                (state >> 1) | (fb_bit << (self.width - 1) as usize)
            }
            Topology::Galois => {
                let lsb = state & T::one();
                let toggle = if lsb.is_zero() { T::zero() } else { self.taps };
                (state >> 1) ^ toggle
            }
        }
    }

    /// Current state, without stepping.
    pub fn current(&self) -> T {
        self.state
    }

    /// Least significant bit of the current state.
    pub fn output_bit(&self) -> u8 {
        (self.state & T::one()).to_word() as u8
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn taps(&self) -> T {
        self.taps
    }

    pub fn seed(&self) -> T {
        self.seed
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Transitions taken since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether the transition is a bijection on all `2^width` states.  When it
    /// is, every state lies on a cycle and the sequence has no lead-in before
    /// it starts repeating.
    pub fn is_nonsingular(&self) -> bool {
        let top = T::one() << (self.width - 1) as usize;
        match self.topology {
            Topology::FibonacciLeft | Topology::Galois => {
                !(self.taps & top).is_zero()
            }
            Topology::FibonacciRight => !(self.taps & T::one()).is_zero(),
        }
    }

    /// Number of non-zero states, `2^width - 1`.
    pub fn nonzero_states(&self) -> u64 {
        self.mask.to_word()
    }
}

/// Endless stream of states, one `step` per item.
impl<T: Word> Iterator for RegisterCore<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.step())
    }
}
