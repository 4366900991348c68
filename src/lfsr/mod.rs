//! The shift register itself.
//!
//! A linear-feedback shift register holds a word of `width` bits and, on each
//! step, computes a feedback bit as the parity of the bits selected by the tap
//! mask and shifts it back into the register.  These are very cheap to build in
//! hardware and are used for PRBS generation, scramblers, CRC-style checks and
//! built-in self-test patterns.
//!
//! [Wikipedia](https://en.wikipedia.org/wiki/Linear-feedback_shift_register)
//! covers the Fibonacci and Galois arrangements in detail.  The register here
//! defaults to a Fibonacci register shifting to the *left*, with the feedback
//! bit entering at bit 0.  This matches the feedback polynomials in their
//! standard form: tap mask bit `i` corresponds to the term `x^(i + 1)`, so the
//! classic `x^32 + x^22 + x^2 + x + 1` is the mask `0x80200003`.  The right
//! shifting Fibonacci arrangement and the Galois arrangement are available
//! through `Topology`.

pub mod register;

pub use self::register::RegisterCore;

use num::{PrimInt, Unsigned};
use serde::{Deserialize, Serialize};
use std::error;
use std::fmt;
use std::hash::Hash;
use std::mem::size_of;

/// Errors raised when a register is configured with values that would defeat
/// the feedback scheme.  These are never silently corrected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The width is zero or larger than the storage word allows.
    InvalidWidth { width: u32, max: u32 },
    /// The tap mask is zero once truncated to the register width.
    ZeroTaps,
    /// The seed is zero once truncated to the register width.  Zero is a
    /// fixed point of every topology.
    ZeroSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidWidth { width, max } => write!(
                f,
                "Config error: width {} outside supported range 1..={}",
                width, max
            ),
            ConfigError::ZeroTaps => {
                write!(f, "Config error: tap mask must be non-zero")
            }
            ConfigError::ZeroSeed => write!(
                f,
                "Config error: seed must be non-zero, zero is a fixed point"
            ),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// How the feedback bit is folded back into the register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// `state = (state << 1) | parity(state & taps)`, truncated to the width.
    FibonacciLeft,
    /// `state = (state >> 1) | (parity(state & taps) << (width - 1))`.
    FibonacciRight,
    /// `state = (state >> 1) ^ (taps if the low bit was set)`.
    Galois,
}

impl Default for Topology {
    fn default() -> Self {
        Topology::FibonacciLeft
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Topology::FibonacciLeft => "fibonacci-left",
            Topology::FibonacciRight => "fibonacci-right",
            Topology::Galois => "galois",
        };
        write!(f, "{}", name)
    }
}

/// Storage words a register can live in.
///
/// Implemented for the unsigned integer types up to 64 bits.  Be careful to
/// size the word for the register you want: the width of a register can never
/// exceed the bit count of its storage word.
pub trait Word:
    PrimInt
    + Unsigned
    + Hash
    + fmt::Debug
    + fmt::LowerHex
    + Send
    + Sync
    + 'static
{
    /// Number of bits in the storage word.
    const WORD_BITS: u32;

    fn to_word(self) -> u64;

    /// Truncating conversion from a `u64`.
    fn from_word(value: u64) -> Self;
}

macro_rules! impl_word {
    ($($t:ty),*) => {
        $(
            impl Word for $t {
                const WORD_BITS: u32 = (size_of::<$t>() * 8) as u32;

                fn to_word(self) -> u64 {
                    self as u64
                }

                fn from_word(value: u64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64);

// Fibonacci-left masks for maximal-length registers, indexed by width.  Each
// is a primitive trinomial or pentanomial; bit `i` is the `x^(i + 1)` term.
const MAXIMAL_TAPS: [u64; 64] = [
    0x1,
    0x3,
    0x6,
    0xc,
    0x1e,
    0x36,
    0x78,
    0xb8,
    0x1b0,
    0x360,
    0x740,
    0xca0,
    0x1b00,
    0x3500,
    0x7400,
    0xb400,
    0x1_e000,
    0x3_9000,
    0x7_2000,
    0xc_a000,
    0x1c_8000,
    0x27_0000,
    0x6a_0000,
    0xd8_0000,
    0x1e0_0000,
    0x388_0000,
    0x720_0000,
    0xca0_0000,
    0x1d00_0000,
    0x3280_0000,
    0x7800_0000,
    0xa300_0000,
    0x1_9400_0000,
    0x2_6200_0000,
    0x6_0c00_0000,
    0xc_1800_0000,
    0x19_4000_0000,
    0x31_8000_0000,
    0x64_8000_0000,
    0x9c_0000_0000,
    0x1e0_0000_0000,
    0x294_0000_0000,
    0x630_0000_0000,
    0xa60_0000_0000,
    0x1b00_0000_0000,
    0x20e0_0000_0000,
    0x6600_0000_0000,
    0x8940_0000_0000,
    0x1_1c00_0000_0000,
    0x2_e000_0000_0000,
    0x6_9000_0000_0000,
    0xd_2000_0000_0000,
    0x1c_4000_0000_0000,
    0x24_a000_0000_0000,
    0x71_0000_0000_0000,
    0xa9_0000_0000_0000,
    0x168_0000_0000_0000,
    0x318_0000_0000_0000,
    0x548_0000_0000_0000,
    0xac0_0000_0000_0000,
    0x1c80_0000_0000_0000,
    0x2580_0000_0000_0000,
    0x6600_0000_0000_0000,
    0xd800_0000_0000_0000,
];

/// Returns a tap mask known to give a maximal-length sequence (period
/// `2^width - 1`) for the given width and topology, or `None` if the width
/// does not fit in `T`.
///
/// The left-shifting Fibonacci and Galois arrangements share a mask; the
/// right-shifting arrangement uses the mirror image of it.
///
/// # Examples
///
/// ```
/// use lfsr_rs::lfsr::{maximal_taps, Topology};
///
/// assert_eq!(maximal_taps::<u8>(8, Topology::FibonacciLeft), Some(0xB8));
/// assert_eq!(maximal_taps::<u8>(8, Topology::FibonacciRight), Some(0x1D));
/// assert_eq!(maximal_taps::<u8>(9, Topology::Galois), None);
/// ```
pub fn maximal_taps<T: Word>(width: u32, topology: Topology) -> Option<T> {
    if width == 0 || width > T::WORD_BITS {
        return None;
    }
    let left = MAXIMAL_TAPS[(width - 1) as usize];
    let taps = match topology {
        Topology::FibonacciLeft | Topology::Galois => left,
        Topology::FibonacciRight => {
            left.reverse_bits() >> (64 - width)
        }
    };
    Some(T::from_word(taps))
}
