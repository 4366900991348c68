//! Plain-text dump of a stream: one `step_index, 0x<state>` line per value.
//!
//! The hex field is zero padded to the register width, so a 32 bit register
//! seeded with 1 starts out as
//!
//! ```text
//! 0, 0x00000003
//! 1, 0x00000006
//! ```

use crate::error::Error;
use crate::io::{Sink, StepOrder};
use crate::lfsr::Word;
use crate::util::bits::hex_digits;
use std::io::{BufRead, Write};

/// Writes each value as a `step_index, 0x<hex>` line.
pub struct HexLineSink<W: Write> {
    writer: W,
    digits: usize,
    order: StepOrder,
}

impl<W: Write> HexLineSink<W> {
    /// Makes a sink padding values to the hex digits of a `width` bit
    /// register.
    ///
    /// # Example
    ///
    /// ```
    /// use lfsr_rs::io::Sink;
    /// use lfsr_rs::io::text::HexLineSink;
    ///
    /// let mut sink = HexLineSink::new(Vec::<u8>::new(), 12);
    /// sink.accept(0, 0x3_u16).unwrap();
    /// assert_eq!(sink.into_inner(), b"0, 0x003\n");
    /// ```
    pub fn new(writer: W, width: u32) -> Self {
        HexLineSink {
            writer,
            digits: hex_digits(width),
            order: StepOrder::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T: Word, W: Write> Sink<T> for HexLineSink<W> {
    fn accept(&mut self, step_index: u64, value: T) -> Result<(), Error> {
        self.order.check(step_index)?;
        writeln!(
            self.writer,
            "{}, 0x{:0digits$x}",
            step_index,
            value.to_word(),
            digits = self.digits
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Parses a dump written by `HexLineSink` back into `(step_index, value)`
/// pairs.  Blank lines are skipped.
pub fn read_hex_lines<R: BufRead>(reader: R) -> Result<Vec<(u64, u64)>, Error> {
    let mut entries = vec![];
    for (ix, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        entries.push(parse_line(line).ok_or(Error::Format { line: ix + 1 })?);
    }
    Ok(entries)
}

fn parse_line(line: &str) -> Option<(u64, u64)> {
    let mut fields = line.splitn(2, ',');
    let index = fields.next()?.trim().parse().ok()?;
    let value = fields.next()?.trim();
    let value = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))?;
    let value = u64::from_str_radix(value, 16).ok()?;
    Some((index, value))
}
