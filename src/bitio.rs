//! Bit-level stream plumbing.
//!
//! The codec only talks to [`BitSource`] and [`BitSink`]. The implementations
//! here wrap any `Read + Seek` / `Write` with `bitstream-io`, most significant
//! bit first.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// A readable, rewindable bit stream.
pub trait BitSource {
    /// Read `bits` bits (at most 32) as an unsigned value, or `None` once the
    /// stream cannot supply that many bits.
    fn read_bits(&mut self, bits: u32) -> io::Result<Option<u32>>;

    /// Reposition to the first bit of the stream.
    fn reset(&mut self) -> io::Result<()>;

    fn read_bit(&mut self) -> io::Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|b| b == 1))
    }
}

/// An append-only bit stream.
pub trait BitSink {
    /// Write the low `bits` bits of `value`, most significant first.
    fn write_bits(&mut self, bits: u32, value: u32) -> io::Result<()>;

    /// Zero-pad to a byte boundary and flush. Consumes the sink; pending bits
    /// are lost if a sink is dropped without closing.
    fn close(self) -> io::Result<()>
    where
        Self: Sized;

    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.write_bits(1, bit as u32)
    }
}

/// [`BitSource`] over any seekable reader.
pub struct BitStreamReader<R: Read + Seek> {
    inner: Option<BitReader<R, BigEndian>>,
}

impl<R: Read + Seek> BitStreamReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: Some(BitReader::endian(reader, BigEndian)),
        }
    }

    fn reader(&mut self) -> io::Result<&mut BitReader<R, BigEndian>> {
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "bit reader lost after failed reset"))
    }
}

impl<R: Read + Seek> BitSource for BitStreamReader<R> {
    fn read_bits(&mut self, bits: u32) -> io::Result<Option<u32>> {
        match self.reader()?.read::<u32>(bits) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn reset(&mut self) -> io::Result<()> {
        // Drop any partially consumed byte along with the old reader state.
        let mut reader = self
            .inner
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "bit reader lost after failed reset"))?
            .into_reader();
        reader.seek(SeekFrom::Start(0))?;
        self.inner = Some(BitReader::endian(reader, BigEndian));
        Ok(())
    }
}

/// [`BitSink`] over any writer.
pub struct BitStreamWriter<W: Write> {
    inner: BitWriter<W, BigEndian>,
}

impl<W: Write> BitStreamWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: BitWriter::endian(writer, BigEndian),
        }
    }
}

impl<W: Write> BitSink for BitStreamWriter<W> {
    fn write_bits(&mut self, bits: u32, value: u32) -> io::Result<()> {
        let value = if bits < 32 { value & ((1 << bits) - 1) } else { value };
        self.inner.write(bits, value)
    }

    fn close(mut self) -> io::Result<()> {
        self.inner.byte_align()?;
        self.inner.into_writer().flush()
    }
}
