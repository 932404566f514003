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
use std::path;

use log::{debug, warn};

use crate::avr::{AvrHeader, HEADER_LEN};
use crate::{AudioCharacteristics, AvrInfo, Result, Warning};

/// Extends the functionality of `io::Read` with additional methods.
///
/// The methods may be used on any type that implements `io::Read`.
pub trait ReadExt: io::Read {
    /// Reads as many bytes as `buf` is long.
    ///
    /// This may issue multiple `read` calls internally. An error of kind
    /// `UnexpectedEof` is returned if `read` read 0 bytes before the buffer is
    /// full.
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

impl<R> ReadExt for R
    where R: io::Read
{
    #[inline(always)]
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let mut n = 0;
        while n < buf.len() {
            let progress = match self.read(&mut buf[n..]) {
                Ok(progress) => progress,
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if progress > 0 {
                n += progress;
            } else {
                let msg = format!("expected {} bytes, stream ended after {}", buf.len(), n);
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, msg));
            }
        }
        Ok(())
    }
}

/// The part of a stream that belongs to the AVR file.
///
/// A host library that finds an AVR file embedded in a larger stream (after a
/// tag, for instance) supplies the offset of the header and the end of the
/// sample data. For a plain file the range is the entire stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataRange {
    /// The offset of the first byte of interest.
    pub offset: u64,

    /// The offset one past the last byte of interest.
    pub end: u64,
}

impl DataRange {
    /// Returns a range that covers the entire stream.
    ///
    /// This seeks to the end of the stream to find its length.
    pub fn of_stream<S: io::Seek>(stream: &mut S) -> io::Result<DataRange> {
        let end = stream.seek(io::SeekFrom::End(0))?;
        Ok(DataRange { offset: 0, end })
    }

    /// The number of bytes in the range, 0 if the end precedes the offset.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.offset)
    }

    /// Whether the range contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the 128 header bytes that start at `offset`.
///
/// This performs exactly one seek and reads exactly 128 bytes. Afterwards,
/// the reader is positioned at the first byte of sample data.
pub fn read_raw_header<R>(reader: &mut R, offset: u64) -> Result<[u8; HEADER_LEN]>
    where R: io::Read + io::Seek
{
    reader.seek(io::SeekFrom::Start(offset))?;
    let mut raw = [0_u8; HEADER_LEN];
    reader.read_into(&mut raw)?;
    Ok(raw)
}

/// Compares the sample data that the header announces with the available data.
///
/// `data` is the region that follows the header. Returns a warning if the
/// sizes differ.
pub fn check_data_length(header: &AvrHeader, data: DataRange) -> Option<Warning> {
    let expected = header.data_len();
    let found = data.len();
    if expected != found {
        Some(Warning::TruncatedData { expected, found })
    } else {
        None
    }
}

/// Reads the AVR header at `range.offset` and derives the file's metadata.
///
/// The only fatal problems are IO errors (including a stream that ends
/// within the header) and a wrong magic. A sample rate of zero leaves the
/// characteristics undefined; it is listed in `AvrInfo::errors` and the
/// decoded header is still returned. A mismatch between the announced and
/// the available sample data is reported as a warning.
pub fn analyze<R>(reader: &mut R, range: DataRange) -> Result<AvrInfo>
    where R: io::Read + io::Seek
{
    let raw = read_raw_header(reader, range.offset)?;
    let header = AvrHeader::from_bytes_at(&raw, range.offset)?;
    debug!("decoded AVR header at offset {}: {:?}", range.offset, header);

    let data_range = DataRange {
        offset: range.offset + HEADER_LEN as u64,
        end: range.end,
    };

    let mut warnings = Vec::new();
    if let Some(warning) = check_data_length(&header, data_range) {
        warn!("{}", warning);
        warnings.push(warning);
    }

    let mut errors = Vec::new();
    let audio = match AudioCharacteristics::from_header(&header) {
        Ok(audio) => Some(audio),
        Err(err) => {
            warn!("{}", err);
            errors.push(err);
            None
        }
    };

    Ok(AvrInfo {
        midi_notes: header.midi_notes(),
        header,
        audio,
        data_range,
        errors,
        warnings,
    })
}

/// A reader that reads the AVR header from the underlying reader.
///
/// The header is read and validated on construction. Afterwards the
/// underlying reader is positioned at the start of the sample data, and it
/// can be recovered with `into_inner`. No internal buffering is performed on
/// the underlying reader; the `open` constructor wraps files in an
/// `io::BufReader`.
pub struct AvrReader<R> {
    /// Everything learned from the header.
    info: AvrInfo,

    /// The reader from which the header was read.
    reader: R,
}

impl<R> AvrReader<R>
    where R: io::Read + io::Seek
{
    /// Attempts to read an AVR header at the start of the stream.
    ///
    /// The whole stream is assumed to belong to the file. To read a header
    /// embedded somewhere in a larger stream, use `with_data_range`.
    pub fn new(mut reader: R) -> Result<AvrReader<R>> {
        let range = DataRange::of_stream(&mut reader)?;
        AvrReader::with_data_range(reader, range)
    }

    /// Attempts to read an AVR header at `range.offset`.
    ///
    /// The sample data is expected to end at `range.end`.
    pub fn with_data_range(mut reader: R, range: DataRange) -> Result<AvrReader<R>> {
        let info = analyze(&mut reader, range)?;
        Ok(AvrReader { info, reader })
    }

    /// Returns everything learned from the header.
    pub fn info(&self) -> &AvrInfo {
        &self.info
    }

    /// Returns the decoded header.
    pub fn header(&self) -> &AvrHeader {
        &self.info.header
    }

    /// Destroys the `AvrReader` and returns the metadata.
    pub fn into_info(self) -> AvrInfo {
        self.info
    }

    /// Destroys the `AvrReader` and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl AvrReader<io::BufReader<fs::File>> {
    /// Attempts to create a reader that reads from the specified file.
    ///
    /// This is a convenience constructor that opens a `File`, wraps it in a
    /// `BufReader` and then constructs an `AvrReader` from it.
    pub fn open<P: AsRef<path::Path>>(filename: P) -> Result<AvrReader<io::BufReader<fs::File>>> {
        let file = fs::File::open(filename)?;
        let buf_reader = io::BufReader::new(file);
        AvrReader::new(buf_reader)
    }
}

#[cfg(test)]
fn test_file(header: &AvrHeader, data_len: usize) -> io::Cursor<Vec<u8>> {
    let mut bytes = header.to_bytes().to_vec();
    bytes.resize(HEADER_LEN + data_len, 0);
    io::Cursor::new(bytes)
}

#[cfg(test)]
fn pcm8_header(sample_length: u32) -> AvrHeader {
    AvrHeader {
        bits_per_sample: 8,
        sample_rate: 8000,
        sample_length,
        .. AvrHeader::default()
    }
}

#[test]
fn exact_data_length_gives_no_warning() {
    let mut cursor = test_file(&pcm8_header(1000), 1000);
    let info = analyze(&mut cursor, DataRange { offset: 0, end: 1128 }).unwrap();
    assert!(info.warnings.is_empty());
    assert_eq!(info.data_range, DataRange { offset: 128, end: 1128 });
}

#[test]
fn short_data_gives_truncation_warning() {
    let mut cursor = test_file(&pcm8_header(1000), 999);
    let info = analyze(&mut cursor, DataRange { offset: 0, end: 1127 }).unwrap();
    assert_eq!(info.warnings, vec![Warning::TruncatedData { expected: 1000, found: 999 }]);
    // The warning does not affect the rest of the info.
    assert!(info.errors.is_empty());
    assert_eq!(info.audio.unwrap().playtime, 0.125);
}

#[test]
fn sixteen_bit_samples_take_two_bytes() {
    let header = AvrHeader {
        bits_per_sample: 16,
        .. pcm8_header(500)
    };
    let data = DataRange { offset: 128, end: 1128 };
    assert_eq!(check_data_length(&header, data), None);
    let data = DataRange { offset: 128, end: 628 };
    assert_eq!(check_data_length(&header, data),
               Some(Warning::TruncatedData { expected: 1000, found: 500 }));
}

#[test]
fn end_before_data_counts_as_no_data() {
    let data = DataRange { offset: 128, end: 100 };
    assert_eq!(check_data_length(&pcm8_header(4), data),
               Some(Warning::TruncatedData { expected: 4, found: 0 }));
}

#[test]
fn header_is_read_at_offset() {
    let mut bytes = vec![0xaa_u8; 64];
    bytes.extend_from_slice(&pcm8_header(16).to_bytes());
    bytes.extend_from_slice(&[0_u8; 16]);
    bytes.extend_from_slice(b"trailing tag");
    let mut cursor = io::Cursor::new(bytes);

    let info = analyze(&mut cursor, DataRange { offset: 64, end: 208 }).unwrap();
    assert!(info.warnings.is_empty());
    assert_eq!(info.data_range.offset, 192);
    assert_eq!(info.header.sample_length, 16);
}

#[test]
fn wrong_magic_reports_stream_offset() {
    let mut cursor = io::Cursor::new(vec![0xaa_u8; 300]);
    match analyze(&mut cursor, DataRange { offset: 10, end: 300 }) {
        Err(crate::Error::FormatMismatch { offset, found, .. }) => {
            assert_eq!(offset, 10);
            assert_eq!(found, [0xaa; 4]);
        }
        other => panic!("expected a format mismatch, got {:?}", other),
    }
}

#[test]
fn short_header_is_an_io_error() {
    let mut cursor = io::Cursor::new(b"2BIT and then nothing".to_vec());
    match AvrReader::new(&mut cursor) {
        Err(crate::Error::IoError(err)) => {
            assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        }
        Err(other) => panic!("expected an IO error, got {:?}", other),
        Ok(..) => panic!("a 21-byte file should not decode"),
    }
}

#[test]
fn reader_is_left_at_sample_data() {
    use std::io::Read;

    let mut bytes = pcm8_header(3).to_bytes().to_vec();
    bytes.extend_from_slice(&[1, 2, 3]);
    let reader = AvrReader::new(io::Cursor::new(bytes)).unwrap();
    assert_eq!(reader.header().sample_length, 3);

    let mut samples = Vec::new();
    reader.into_inner().read_to_end(&mut samples).unwrap();
    assert_eq!(samples, [1, 2, 3]);
}

#[test]
fn zero_header_fields_decode_without_characteristics() {
    let mut bytes = b"2BIT".to_vec();
    bytes.resize(HEADER_LEN, 0);
    let mut cursor = io::Cursor::new(bytes);

    let info = analyze(&mut cursor, DataRange { offset: 0, end: 128 }).unwrap();
    assert_eq!(info.errors, vec![crate::MetadataError::InvalidSampleRate]);
    assert_eq!(info.audio, None);
    assert!(info.warnings.is_empty());

    assert_eq!(&info.header.magic, b"2BIT");
    assert_eq!(info.header.sample_name, "");
    assert_eq!(info.header.sample_rate, 0);
    assert!(!info.header.is_stereo());
    assert!(!info.header.is_signed());
    assert!(!info.header.is_looping());
    assert_eq!(info.header.channels(), 1);
    assert_eq!(&info.midi_notes[..], &[0, 0]);
}

#[test]
fn zero_sample_rate_keeps_length_warning() {
    let header = AvrHeader { sample_rate: 0, .. pcm8_header(10) };
    let mut cursor = test_file(&header, 4);
    let info = analyze(&mut cursor, DataRange { offset: 0, end: 132 }).unwrap();
    assert_eq!(info.errors, vec![crate::MetadataError::InvalidSampleRate]);
    assert_eq!(info.warnings, vec![Warning::TruncatedData { expected: 10, found: 4 }]);
    assert_eq!(info.header.sample_length, 10);
}
