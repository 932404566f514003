// Avr -- An AVR audio header decoding library in Rust
// Copyright 2026 The Avr Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::io;
use std::io::{Seek, Write};
use std::path;

use log::debug;

use crate::avr::{AvrHeader, HEADER_LEN};
use crate::{Error, Result};

/// Extends the functionality of `io::Write` with additional methods.
///
/// The methods may be used on any type that implements `io::Write`.
pub trait WriteExt: io::Write {
    /// Writes an unsigned 32-bit integer in big endian format.
    fn write_be_u32(&mut self, x: u32) -> io::Result<()>;
}

impl<W> WriteExt for W where W: io::Write {
    fn write_be_u32(&mut self, x: u32) -> io::Result<()> {
        self.write_all(&x.to_be_bytes())
    }
}

/// Offset of the sample length field within the header.
const SAMPLE_LENGTH_OFFSET: u64 = 26;

/// Offset of the loop end field within the header.
const LOOP_END_OFFSET: u64 = 34;

/// A writer that writes an AVR header followed by raw sample data.
///
/// The writer does not convert samples: the bytes passed to `write_samples`
/// must already be in the layout that the header describes. The sample length
/// in the header is filled in when the file is finalized.
///
/// After all samples have been written, the file must be finalized. This can
/// be done by calling `finalize`. If `finalize` is not called, the file will
/// be finalized upon drop. However, finalization involves IO that may fail,
/// and without calling `finalize`, such a failure cannot be observed.
pub struct AvrWriter<W> where W: io::Write + io::Seek {
    /// The header as it was written, without the final sample length.
    header: AvrHeader,

    /// The stream position of the first header byte.
    header_offset: u64,

    /// The writer that will be written to.
    writer: io::BufWriter<W>,

    /// The number of bytes written after the header.
    ///
    /// This is an `u32` because the sample length field cannot describe more
    /// data.
    data_bytes_written: u32,

    /// Whether `finalize_internal` has been called.
    finalized: bool,
}

impl<W> AvrWriter<W> where W: io::Write + io::Seek {
    /// Creates a writer that writes the AVR format to the underlying writer.
    ///
    /// The header is written at the current position of the writer.
    /// `AvrWriter` employs buffering internally to avoid too many `write`
    /// calls to the underlying writer.
    pub fn new(mut writer: W, header: AvrHeader) -> Result<AvrWriter<W>> {
        let header_offset = writer.seek(io::SeekFrom::Current(0))?;
        let mut writer = io::BufWriter::new(writer);
        writer.write_all(&header.to_bytes())?;

        Ok(AvrWriter {
            header,
            header_offset,
            writer,
            data_bytes_written: 0,
            finalized: false,
        })
    }

    /// Returns the header that this writer was created with.
    pub fn header(&self) -> &AvrHeader {
        &self.header
    }

    /// Appends raw sample bytes.
    pub fn write_samples(&mut self, data: &[u8]) -> Result<()> {
        let total = (self.data_bytes_written as u64) + data.len() as u64;
        if total > u32::MAX as u64 {
            let msg = "sample data does not fit the 32-bit length field";
            return Err(Error::IoError(io::Error::new(io::ErrorKind::InvalidInput, msg)));
        }
        self.writer.write_all(data)?;
        self.data_bytes_written = total as u32;
        Ok(())
    }

    /// Performs finalization. After calling this, the writer should be destructed.
    fn finalize_internal(&mut self) -> Result<()> {
        self.finalized = true;

        // Flush remaining samples via the BufWriter.
        self.writer.flush()?;

        let bytes_per_sample = self.header.bytes_per_sample() as u32;
        let sample_length = self.data_bytes_written / bytes_per_sample;
        debug!("finalizing AVR file with {} samples", sample_length);

        // Rewind the underlying writer to update the length fields of which
        // we now know the value. A file without a loop has its loop end at
        // the end of the sample.
        let writer = self.writer.get_mut();
        writer.seek(io::SeekFrom::Start(self.header_offset + SAMPLE_LENGTH_OFFSET))?;
        writer.write_be_u32(sample_length)?;
        if !self.header.is_looping() {
            writer.seek(io::SeekFrom::Start(self.header_offset + LOOP_END_OFFSET))?;
            writer.write_be_u32(sample_length)?;
        }
        let data_end = self.header_offset + HEADER_LEN as u64 + self.data_bytes_written as u64;
        writer.seek(io::SeekFrom::Start(data_end))?;
        writer.flush()?;

        // Signal error if the last sample was not finished, but do so after
        // everything has been written, so that no data is lost, even though
        // the file is now ill-formed.
        if self.data_bytes_written % bytes_per_sample != 0 {
            return Err(Error::UnfinishedSample);
        }

        Ok(())
    }

    /// Writes the parts of the header that require knowing all samples.
    ///
    /// This method must be called after all samples have been written. If it
    /// is not called, the destructor will finalize the file, but any errors
    /// that occur in the process cannot be observed in that manner.
    pub fn finalize(mut self) -> Result<()> {
        self.finalize_internal()
    }
}

impl<W> Drop for AvrWriter<W> where W: io::Write + io::Seek {
    fn drop(&mut self) {
        // `finalize_internal` must be called only once. If that is done via
        // `finalize`, then this method is a no-op. If the user did not
        // finalize explicitly, then we should do it now. This can fail, but
        // drop should not panic, so a failure is ignored silently here.
        if !self.finalized {
            let _r = self.finalize_internal();
        }
    }
}

impl AvrWriter<fs::File> {
    /// Creates a writer that writes the AVR format to a file.
    ///
    /// This is a convenience constructor that creates the file and then
    /// constructs an `AvrWriter` from it. The file will be overwritten if it
    /// exists.
    pub fn create<P: AsRef<path::Path>>(filename: P, header: AvrHeader)
           -> Result<AvrWriter<fs::File>> {
        let file = fs::File::create(filename)?;
        AvrWriter::new(file, header)
    }
}

#[test]
fn finalize_patches_sample_length_and_loop_end() {
    let header = AvrHeader {
        bits_per_sample: 16,
        sample_rate: 11025,
        .. AvrHeader::default()
    };
    let mut buffer = io::Cursor::new(Vec::new());
    {
        let mut writer = AvrWriter::new(&mut buffer, header).unwrap();
        writer.write_samples(&[0, 1, 0, 2]).unwrap();
        writer.write_samples(&[0, 3]).unwrap();
        writer.finalize().unwrap();
    }

    let bytes = buffer.into_inner();
    assert_eq!(bytes.len(), HEADER_LEN + 6);
    assert_eq!(&bytes[26..30], &[0, 0, 0, 3]);
    assert_eq!(&bytes[34..38], &[0, 0, 0, 3]);
    assert_eq!(&bytes[HEADER_LEN..], &[0, 1, 0, 2, 0, 3]);
}

#[test]
fn looping_header_keeps_its_loop_end() {
    let header = AvrHeader {
        bits_per_sample: 8,
        loop_raw: 0xffff,
        loop_start: 1,
        loop_end: 2,
        .. AvrHeader::default()
    };
    let mut buffer = io::Cursor::new(Vec::new());
    {
        let mut writer = AvrWriter::new(&mut buffer, header).unwrap();
        writer.write_samples(&[9; 4]).unwrap();
    }

    let bytes = buffer.into_inner();
    assert_eq!(&bytes[26..30], &[0, 0, 0, 4]);
    assert_eq!(&bytes[34..38], &[0, 0, 0, 2]);
}

#[test]
fn header_is_written_at_current_position() {
    let mut buffer = io::Cursor::new(vec![0xee_u8; 10]);
    buffer.seek(io::SeekFrom::End(0)).unwrap();
    {
        let header = AvrHeader { bits_per_sample: 8, .. AvrHeader::default() };
        let mut writer = AvrWriter::new(&mut buffer, header).unwrap();
        writer.write_samples(&[1, 2]).unwrap();
        writer.finalize().unwrap();
    }

    let bytes = buffer.into_inner();
    assert_eq!(&bytes[10..14], b"2BIT");
    assert_eq!(&bytes[36..40], &[0, 0, 0, 2]);
}

#[test]
fn short_write_should_signal_error() {
    let header = AvrHeader { bits_per_sample: 16, .. AvrHeader::default() };
    let mut buffer = io::Cursor::new(Vec::new());

    // Deliberately write half of the second sample.
    let mut writer = AvrWriter::new(&mut buffer, header).unwrap();
    writer.write_samples(&[0, 1, 2]).unwrap();
    let error = writer.finalize().err().unwrap();

    match error {
        Error::UnfinishedSample => { },
        _ => panic!("UnfinishedSample error should have been returned.")
    }
}
