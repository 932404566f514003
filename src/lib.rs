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

//! Avr, a decoder for the header of AVR audio files.
//!
//! AVR is the sample format of Atari ST and Falcon audio software: a fixed
//! 128-byte big-endian header followed by raw sample data. This crate reads
//! the header and derives the playback characteristics from it. It does not
//! decode the samples themselves.
//!
//! Examples
//! ========
//!
//! The following example writes a one second mono file of 8-bit silence, and
//! then reads back its metadata.
//!
//! ```
//! use std::io::Cursor;
//!
//! let header = avr::AvrHeader {
//!     sample_name: "silence".to_string(),
//!     bits_per_sample: 8,
//!     sample_rate: 8000,
//!     .. avr::AvrHeader::default()
//! };
//!
//! let mut buffer = Cursor::new(Vec::new());
//! {
//!     let mut writer = avr::AvrWriter::new(&mut buffer, header).unwrap();
//!     writer.write_samples(&[0x80; 8000]).unwrap();
//!     writer.finalize().unwrap();
//! }
//!
//! let reader = avr::AvrReader::new(buffer).unwrap();
//! let info = reader.info();
//! assert_eq!(info.header.sample_name, "silence");
//! let audio = info.audio.unwrap();
//! assert_eq!(audio.channels, 1);
//! assert_eq!(audio.playtime, 1.0);
//! assert_eq!(audio.bitrate, 64000.0);
//! assert!(info.errors.is_empty());
//! assert!(info.warnings.is_empty());
//! ```

#![warn(missing_docs)]

use std::fmt;
use std::io;
use std::result;

use thiserror::Error;

mod avr;
mod read;
mod write;

pub use crate::avr::{AvrHeader, MidiNotes, ReplayFrequency, HEADER_LEN, MAGIC};
pub use crate::avr::{check_magic, midi_notes, read_be_uint};
pub use crate::read::{AvrReader, DataRange, analyze, check_data_length, read_raw_header};
pub use crate::write::AvrWriter;

/// The format tag that identifies AVR metadata in a larger media library.
pub const FILE_FORMAT: &str = "avr";

/// Formats bytes as space-separated hexadecimal pairs, for diagnostics.
fn print_hex_bytes(bytes: &[u8]) -> String {
    bytes.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn print_hex_bytes_separates_with_spaces() {
    assert_eq!(print_hex_bytes(b"2BIT"), "32 42 49 54");
    assert_eq!(print_hex_bytes(&[]), "");
}

/// The error type for operations on `AvrReader` and `AvrWriter`.
#[derive(Debug, Error)]
pub enum Error {
    /// An IO error occured in the underlying reader or writer.
    ///
    /// A header that is cut short ends up here as well.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// The data at the given offset does not start with `2BIT`.
    #[error("Ill-formed AVR file: expecting \"{}\" at offset {offset}, found \"{}\"",
            print_hex_bytes(.expected), print_hex_bytes(.found))]
    FormatMismatch {
        /// The stream offset where the header was expected.
        offset: u64,
        /// The magic that an AVR file must start with.
        expected: [u8; 4],
        /// The four bytes that were found instead.
        found: [u8; 4],
    },

    /// The number of sample bytes written is not a multiple of the sample size.
    #[error("The number of bytes written is not a multiple of the sample size.")]
    UnfinishedSample,
}

/// A type for results generated by Avr where the error type is hard-wired.
pub type Result<T> = result::Result<T, Error>;

/// A header value that rules out the derived characteristics.
///
/// Unlike `Error`, this does not stop the header from being decoded: it is
/// recorded in `AvrInfo::errors` next to the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The sample rate in the header is zero, so the playtime and bitrate of
    /// the file are undefined.
    #[error("The sample rate is 0 Hz, playtime and bitrate are undefined.")]
    InvalidSampleRate,
}

/// A problem with a file that does not prevent reading its metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// The amount of sample data after the header differs from what the
    /// header announces. Usually the file was cut short.
    TruncatedData {
        /// The number of bytes of sample data that the header announces.
        expected: u64,
        /// The number of bytes between the end of the header and the end of
        /// the data region.
        found: u64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Warning::TruncatedData { expected, found } => {
                write!(formatter,
                       "Probable truncated file: expecting {} bytes of audio data, found {}",
                       expected, found)
            }
        }
    }
}

/// How the bitrate of a stream varies over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitrateMode {
    /// Constant bitrate. Uncompressed sample data is always constant.
    Cbr,
}

/// Playback properties derived from the header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioCharacteristics {
    /// The number of channels, 1 or 2.
    pub channels: u16,

    /// The number of samples per second.
    pub sample_rate: u32,

    /// The resolution of a sample, 8, 12 or 16 bits.
    pub bits_per_sample: u16,

    /// The average number of bits per second of sample data.
    pub bitrate: f64,

    /// The duration in seconds.
    pub playtime: f64,

    /// Always true: AVR stores uncompressed samples.
    pub lossless: bool,

    /// Always `BitrateMode::Cbr`.
    pub bitrate_mode: BitrateMode,
}

impl AudioCharacteristics {
    /// Derives the playback properties of a decoded header.
    ///
    /// Returns `MetadataError::InvalidSampleRate` for a sample rate of zero,
    /// rather than an infinite playtime.
    pub fn from_header(header: &AvrHeader)
                       -> result::Result<AudioCharacteristics, MetadataError> {
        if header.sample_rate == 0 {
            return Err(MetadataError::InvalidSampleRate);
        }

        let channels = header.channels();
        let playtime = (header.sample_length as f64 / channels as f64)
                     / header.sample_rate as f64;

        // Samples wider than 8 bits occupy 16 bits in the file, 12-bit ones too.
        let container_bits = if header.bits_per_sample == 8 { 8.0 } else { 16.0 };
        let bitrate = if playtime > 0.0 {
            header.sample_length as f64 * container_bits / playtime
        } else {
            0.0
        };

        Ok(AudioCharacteristics {
            channels,
            sample_rate: header.sample_rate,
            bits_per_sample: header.bits_per_sample,
            bitrate,
            playtime,
            lossless: true,
            bitrate_mode: BitrateMode::Cbr,
        })
    }
}

/// Everything that was learned about one AVR file.
///
/// An `AvrInfo` is only ever constructed for a file that starts with the AVR
/// magic and has a complete header. Header values that rule out the derived
/// characteristics are listed in `errors` instead of failing the file.
#[derive(Clone, Debug, PartialEq)]
pub struct AvrInfo {
    /// The decoded header fields.
    pub header: AvrHeader,

    /// The MIDI notes that the sample is associated with.
    pub midi_notes: MidiNotes,

    /// Properties derived from the header, `None` when `errors` explains why
    /// they could not be computed.
    pub audio: Option<AudioCharacteristics>,

    /// The region of the stream that holds sample data. The offset is the
    /// first byte after the header.
    pub data_range: DataRange,

    /// Header values that made the characteristics undefined.
    pub errors: Vec<MetadataError>,

    /// Problems that did not prevent decoding.
    pub warnings: Vec<Warning>,
}

impl AvrInfo {
    /// Returns the format tag, always `"avr"`.
    pub fn file_format(&self) -> &'static str {
        FILE_FORMAT
    }
}

#[cfg(test)]
fn header_for_characteristics(stereo: bool, bits: u16, rate: u32, len: u32) -> AvrHeader {
    AvrHeader {
        mono_raw: if stereo { 0xffff } else { 0 },
        bits_per_sample: bits,
        sample_rate: rate,
        sample_length: len,
        .. AvrHeader::default()
    }
}

#[test]
fn characteristics_of_16_bit_mono() {
    let header = header_for_characteristics(false, 16, 8000, 16000);
    let audio = AudioCharacteristics::from_header(&header).unwrap();
    assert_eq!(audio.channels, 1);
    assert_eq!(audio.playtime, 2.0);
    assert_eq!(audio.bitrate, 128000.0);
    assert!(audio.lossless);
    assert_eq!(audio.bitrate_mode, BitrateMode::Cbr);
}

#[test]
fn characteristics_of_8_bit_stereo() {
    let header = header_for_characteristics(true, 8, 22050, 44100);
    let audio = AudioCharacteristics::from_header(&header).unwrap();
    assert_eq!(audio.channels, 2);
    assert_eq!(audio.playtime, 1.0);
    assert_eq!(audio.bitrate, 352800.0);
}

#[test]
fn twelve_bit_samples_count_as_sixteen_bits() {
    let header = header_for_characteristics(false, 12, 1000, 1000);
    let audio = AudioCharacteristics::from_header(&header).unwrap();
    assert_eq!(audio.bits_per_sample, 12);
    assert_eq!(audio.bitrate, 16000.0);
}

#[test]
fn zero_sample_rate_is_an_error() {
    let header = header_for_characteristics(false, 16, 0, 16000);
    match AudioCharacteristics::from_header(&header) {
        Err(MetadataError::InvalidSampleRate) => {}
        other => panic!("expected InvalidSampleRate, got {:?}", other),
    }
}

#[test]
fn empty_sample_has_zero_bitrate() {
    let header = header_for_characteristics(false, 16, 8000, 0);
    let audio = AudioCharacteristics::from_header(&header).unwrap();
    assert_eq!(audio.playtime, 0.0);
    assert_eq!(audio.bitrate, 0.0);
}

#[test]
fn format_mismatch_message_shows_both_magics() {
    let err = Error::FormatMismatch {
        offset: 12,
        expected: MAGIC,
        found: *b"RIFF",
    };
    assert_eq!(err.to_string(),
               "Ill-formed AVR file: expecting \"32 42 49 54\" at offset 12, \
                found \"52 49 46 46\"");
}

#[test]
fn truncation_warning_message() {
    let warning = Warning::TruncatedData { expected: 1000, found: 999 };
    assert_eq!(warning.to_string(),
               "Probable truncated file: expecting 1000 bytes of audio data, found 999");
}
