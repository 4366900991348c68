use crate::lfsr::Word;

/// XOR-reduction of every bit in `value`, i.e. its population count mod 2.
///
/// # Examples
///
/// ```
/// use lfsr_rs::util::bits::parity;
///
/// assert_eq!(parity(0b1011_u8), 1);
/// assert_eq!(parity(0x8000_0001_u32), 0);
/// ```
pub fn parity<T: Word>(value: T) -> T {
    if value.count_ones() % 2 == 1 {
        T::one()
    } else {
        T::zero()
    }
}

/// Mask with the low `width` bits set.  `width` must be at most the bit count
/// of `T`.
pub fn width_mask<T: Word>(width: u32) -> T {
    if width >= T::WORD_BITS {
        T::max_value()
    } else {
        (T::one() << width as usize) - T::one()
    }
}

/// Number of hex digits needed to print a `width` bit value.
pub fn hex_digits(width: u32) -> usize {
    ((width + 3) / 4) as usize
}

/// Packs a stream of 0/1 values into bytes, first bit in the most significant
/// position.  A trailing partial byte is padded with zeros.
///
/// # Examples
///
/// ```
/// use lfsr_rs::util::bits::pack_bits;
///
/// assert_eq!(pack_bits(&[1, 0, 1, 1, 0, 0, 0, 0, 1]), vec![0xB0, 0x80]);
/// ```
pub fn pack_bits(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (ix, bit)| acc | ((bit & 1) << (7 - ix)))
        })
        .collect()
}
