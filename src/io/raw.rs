//! Binary forms of a stream, for tools that want raw data rather than text.
//!
//! `WordSink` writes every value as a little-endian 64 bit word regardless of
//! register width.  `PackedBitSink` writes only the output bits, eight to a
//! byte with the earliest bit in the most significant position, which is the
//! layout statistical test suites expect.  Whole records can also be stored as
//! CBOR with `write_record` and `read_record`.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::analysis::SequenceRecord;
use crate::error::Error;
use crate::io::{Sink, StepOrder};
use crate::lfsr::Word;
use crate::util::bits::pack_bits;

use std::io::{self, Read, Write};

/// Writes each value as a little-endian `u64`.
pub struct WordSink<W: Write> {
    writer: W,
    order: StepOrder,
}

impl<W: Write> WordSink<W> {
    /// # Example
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use std::io::BufWriter;
    /// use lfsr_rs::io::raw::WordSink;
    ///
    /// let file = File::create("/tmp/lfsr_words.bin").unwrap();
    /// let writer = BufWriter::new(file);
    /// let sink = WordSink::new(writer);
    /// ```
    pub fn new(writer: W) -> Self {
        WordSink {
            writer,
            order: StepOrder::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T: Word, W: Write> Sink<T> for WordSink<W> {
    fn accept(&mut self, step_index: u64, value: T) -> Result<(), Error> {
        self.order.check(step_index)?;
        self.writer.write_u64::<LittleEndian>(value.to_word())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads little-endian words until the reader runs dry.  A trailing partial
/// word is an error.
pub fn read_words<R: Read>(mut reader: R) -> Result<Vec<u64>, Error> {
    let mut words = vec![];
    let mut first = [0u8; 1];
    loop {
        // A clean end of stream falls between words.
        if reader.read(&mut first)? == 0 {
            return Ok(words);
        }
        let mut word = (&first[..]).chain(&mut reader);
        match word.read_u64::<LittleEndian>() {
            Ok(value) => words.push(value),
            Err(e) => {
                if let io::ErrorKind::UnexpectedEof = e.kind() {
                    return Err(Error::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "partial word at end of stream",
                    )));
                }
                return Err(Error::Io(e));
            }
        }
    }
}

/// Packs the low bit of each value into bytes.  `finish` writes out a final
/// partial byte padded with zeros.
pub struct PackedBitSink<W: Write> {
    writer: W,
    pending: Vec<u8>,
    order: StepOrder,
}

impl<W: Write> PackedBitSink<W> {
    pub fn new(writer: W) -> Self {
        PackedBitSink {
            writer,
            pending: Vec::with_capacity(8),
            order: StepOrder::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_pending(&mut self) -> Result<(), Error> {
        self.writer.write_all(&pack_bits(&self.pending))?;
        self.pending.clear();
        Ok(())
    }
}

impl<T: Word, W: Write> Sink<T> for PackedBitSink<W> {
    fn accept(&mut self, step_index: u64, value: T) -> Result<(), Error> {
        self.order.check(step_index)?;
        self.pending.push((value & T::one()).to_word() as u8);
        if self.pending.len() == 8 {
            self.write_pending()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        if !self.pending.is_empty() {
            self.write_pending()?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Stores a record as CBOR.
pub fn write_record<T, W>(
    mut writer: W,
    record: &SequenceRecord<T>,
) -> Result<(), Error>
where
    T: Word + Serialize,
    W: Write,
{
    let bytes = serde_cbor::to_vec(record)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Loads a record stored by `write_record`.
pub fn read_record<T, R>(mut reader: R) -> Result<SequenceRecord<T>, Error>
where
    T: Word + DeserializeOwned,
    R: Read,
{
    let mut bytes = vec![];
    reader.read_to_end(&mut bytes)?;
    Ok(serde_cbor::from_slice(&bytes)?)
}

#[cfg(test)]
mod test {
    use crate::analysis::{OutputMode, SequenceAnalyzer};
    use crate::error::Error;
    use crate::io::raw::*;
    use crate::io::Driver;
    use crate::lfsr::RegisterCore;
    use std::io::{self, Cursor};

    #[test]
    fn test_word_sink() {
        let mut core = RegisterCore::new(32, 0x8020_0003_u32, 1).unwrap();
        let mut sink = WordSink::new(Vec::<u8>::new());
        let mut driver = Driver::default();
        driver.run(&mut core, 5, &mut sink).unwrap();
        Sink::<u32>::finish(&mut sink).unwrap();

        let bytes = sink.into_inner();
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[..8], &[3, 0, 0, 0, 0, 0, 0, 0]);
        let words = read_words(Cursor::new(bytes)).unwrap();
        assert_eq!(words, vec![0x3, 0x6, 0xd, 0x1b, 0x36]);
    }

    #[test]
    fn test_read_words_partial() {
        assert!(read_words(Cursor::new(vec![1u8, 2, 3])).is_err());
        assert!(read_words(Cursor::new(Vec::<u8>::new()))
            .unwrap()
            .is_empty());

        // One whole word followed by a single stray byte.
        let mut bytes = vec![0x3, 0, 0, 0, 0, 0, 0, 0x80];
        assert_eq!(
            read_words(Cursor::new(bytes.clone())).unwrap(),
            vec![0x8000_0000_0000_0003]
        );
        bytes.push(0xff);
        match read_words(Cursor::new(bytes)) {
            Err(Error::Io(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof)
            }
            other => panic!("expected a partial word error, got {:?}", other),
        }
    }

    #[test]
    // The PRBS7 stream packs into the same bytes whether it arrives as states
    // or as bits.
    fn test_packed_bits() {
        let mut core = RegisterCore::new(7, 0x60_u8, 0x7F).unwrap();
        let mut sink = PackedBitSink::new(Vec::<u8>::new());
        let mut driver = Driver::default();
        driver.run(&mut core, 12, &mut sink).unwrap();
        Sink::<u8>::finish(&mut sink).unwrap();
        let packed = sink.into_inner();
        assert_eq!(packed.len(), 2);

        let mut core = RegisterCore::new(7, 0x60_u8, 0x7F).unwrap();
        let record = SequenceAnalyzer::new()
            .output_mode(OutputMode::Bits)
            .generate(&mut core, 12);
        assert_eq!(packed, pack_bits(record.values()));
    }

    #[test]
    fn test_record_cbor() {
        let mut core = RegisterCore::new(16, 0xB400_u16, 0xACE1).unwrap();
        let record = SequenceAnalyzer::new().generate(&mut core, 100);
        let mut buf = vec![];
        write_record(&mut buf, &record).unwrap();
        let loaded: SequenceRecord<u16> =
            read_record(Cursor::new(buf)).unwrap();
        assert_eq!(loaded, record);
    }
}
