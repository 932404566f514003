// Avr -- An AVR audio header decoding library in Rust
// Copyright 2026 The Avr Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Building blocks for working with the AVR header.
//!
//! An AVR file (as written by Atari sample editors) starts with a fixed
//! 128-byte header, followed directly by the raw sample data. All integers in
//! the header are unsigned and stored big-endian ("motorola" order), regardless
//! of the platform that wrote the file. The layout is:
//!
//! ```text
//! offset  size  field
//!      0     4  magic, always "2BIT"
//!      4     8  sample name, unused space filled with 0
//!     12     2  0 = mono, 0xffff = stereo (samples alternate left/right)
//!     14     2  resolution in bits: 8, 12 or 16
//!     16     2  0 = unsigned, 0xffff = signed
//!     18     2  0 = no loop, 0xffff = loop on
//!     20     2  MIDI note 0xffnn, 0xffff means no note defined
//!     22     1  replay speed of the replay software, 0xff = undefined
//!     23     3  sample rate in Hz
//!     26     4  length in samples (twice the frames for stereo)
//!     30     4  loop begin, 0 for no loop
//!     34     4  loop end, equal to the length for no loop
//!     38     2  reserved, MIDI keyboard split
//!     40     2  reserved, sample compression
//!     42     2  reserved
//!     44    20  additional name space, used if name[7] != 0
//!     64    64  user data
//! ```
//!
//! Twelve-bit samples are stored in 16-bit containers (`0000 xxxx xxxx xxxx`).

use std::fmt;
use std::ops;

use crate::{Error, Result};

/// The magic bytes that every AVR file starts with.
pub const MAGIC: [u8; 4] = *b"2BIT";

/// The size of the AVR header in bytes. Sample data starts right after it.
pub const HEADER_LEN: usize = 128;

/// Maximum number of bytes of the sample name that fit in the short name field.
const NAME_LEN: usize = 8;

/// Decodes an unsigned big-endian integer of 1 to 4 bytes.
///
/// The width is the length of the slice. The result does not depend on the
/// byte order of the host.
#[inline(always)]
pub fn read_be_uint(bytes: &[u8]) -> u32 {
    debug_assert!(!bytes.is_empty() && bytes.len() <= 4);
    bytes.iter().fold(0_u32, |acc, &b| (acc << 8) | b as u32)
}

/// Encodes `x` as an unsigned big-endian integer filling all of `bytes`.
///
/// Bits of `x` that do not fit in the slice are dropped.
#[inline(always)]
fn write_be_uint(bytes: &mut [u8], x: u32) {
    debug_assert!(!bytes.is_empty() && bytes.len() <= 4);
    let width = bytes.len();
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = (x >> (8 * (width - 1 - i))) as u8;
    }
}

trait Bytes {
    fn read_4_bytes(&self) -> [u8; 4];
    fn read_u8(&self) -> u8;
    fn read_be_u16(&self) -> u16;
    fn read_be_u24(&self) -> u32;
    fn read_be_u32(&self) -> u32;
    fn read_text(&self) -> String;

    fn write_be_u16(&mut self, x: u16);
    fn write_be_u24(&mut self, x: u32);
    fn write_be_u32(&mut self, x: u32);
    fn write_text(&mut self, text: &str);
}

impl Bytes for [u8] {
    #[inline(always)]
    fn read_4_bytes(&self) -> [u8; 4] {
        [self[0], self[1], self[2], self[3]]
    }

    #[inline(always)]
    fn read_u8(&self) -> u8 {
        read_be_uint(&self[..1]) as u8
    }

    #[inline(always)]
    fn read_be_u16(&self) -> u16 {
        read_be_uint(&self[..2]) as u16
    }

    #[inline(always)]
    fn read_be_u24(&self) -> u32 {
        read_be_uint(&self[..3])
    }

    #[inline(always)]
    fn read_be_u32(&self) -> u32 {
        read_be_uint(&self[..4])
    }

    /// Interprets the whole slice as text, dropping trailing padding.
    fn read_text(&self) -> String {
        // Files in the wild pad with zeros as well as with spaces.
        let end = self.iter()
            .rposition(|&b| !is_padding(b))
            .map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self[..end]).into_owned()
    }

    #[inline(always)]
    fn write_be_u16(&mut self, x: u16) {
        write_be_uint(&mut self[..2], x as u32)
    }

    #[inline(always)]
    fn write_be_u24(&mut self, x: u32) {
        write_be_uint(&mut self[..3], x)
    }

    #[inline(always)]
    fn write_be_u32(&mut self, x: u32) {
        write_be_uint(&mut self[..4], x)
    }

    /// Copies as much of `text` as fits, and zero-fills the remainder.
    fn write_text(&mut self, text: &str) {
        let src = text.as_bytes();
        let n = src.len().min(self.len());
        self[..n].copy_from_slice(&src[..n]);
        for b in &mut self[n..] {
            *b = 0;
        }
    }
}

fn is_padding(b: u8) -> bool {
    match b {
        0 | b' ' | b'\t' | b'\n' | b'\r' | 0x0b => true,
        _ => false,
    }
}

/// Checks that `bytes` starts with the AVR magic.
///
/// The `offset` is the position of `bytes` in the stream, it is only used to
/// make the error more useful.
pub fn check_magic(bytes: &[u8], offset: u64) -> Result<()> {
    let mut found = [0_u8; 4];
    let n = bytes.len().min(4);
    found[..n].copy_from_slice(&bytes[..n]);
    if n < 4 || found != MAGIC {
        return Err(Error::FormatMismatch {
            offset,
            expected: MAGIC,
            found,
        });
    }
    Ok(())
}

/// The MIDI notes that a sample is associated with.
///
/// The MIDI field of the header holds two notes, one per byte. A byte of
/// `0xff` means that no note is defined for that half, so there are between
/// zero and two notes. The note from the high byte comes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiNotes {
    notes: [u8; 2],
    len: u8,
}

/// The value of a MIDI byte that does not define a note.
const NO_MIDI_NOTE: u8 = 0xff;

/// Splits the raw MIDI field into its notes.
///
/// ```
/// assert!(avr::midi_notes(0xffff).is_empty());
/// assert_eq!(&avr::midi_notes(0xff05)[..], &[5]);
/// assert_eq!(&avr::midi_notes(0x3c05)[..], &[60, 5]);
/// ```
pub fn midi_notes(midi_raw: u16) -> MidiNotes {
    let mut result = MidiNotes { notes: [0, 0], len: 0 };
    for &byte in &[(midi_raw >> 8) as u8, (midi_raw & 0xff) as u8] {
        if byte != NO_MIDI_NOTE {
            result.notes[result.len as usize] = byte;
            result.len += 1;
        }
    }
    result
}

impl ops::Deref for MidiNotes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.notes[..self.len as usize]
    }
}

/// The replay speed that the Atari replay software should use.
///
/// This is a hint for the replay hardware of the time, and it is independent
/// of the sample rate field. The frequencies are the ones that the hardware
/// could produce, in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayFrequency {
    /// 5.485 kHz.
    Hz5485,
    /// 8.084 kHz.
    Hz8084,
    /// 10.971 kHz.
    Hz10971,
    /// 16.168 kHz.
    Hz16168,
    /// 21.942 kHz.
    Hz21942,
    /// 32.336 kHz.
    Hz32336,
    /// 43.885 kHz.
    Hz43885,
    /// 47.261 kHz.
    Hz47261,
    /// The header does not define a replay speed (`0xff`).
    Undefined,
    /// A value that the format does not define.
    Unknown(u8),
}

impl ReplayFrequency {
    /// Interprets the raw replay speed byte.
    pub fn from_raw(raw: u8) -> ReplayFrequency {
        match raw {
            0 => ReplayFrequency::Hz5485,
            1 => ReplayFrequency::Hz8084,
            2 => ReplayFrequency::Hz10971,
            3 => ReplayFrequency::Hz16168,
            4 => ReplayFrequency::Hz21942,
            5 => ReplayFrequency::Hz32336,
            6 => ReplayFrequency::Hz43885,
            7 => ReplayFrequency::Hz47261,
            0xff => ReplayFrequency::Undefined,
            other => ReplayFrequency::Unknown(other),
        }
    }

    /// Returns the frequency in Hz, if the speed is defined.
    pub fn hertz(self) -> Option<u32> {
        match self {
            ReplayFrequency::Hz5485 => Some(5485),
            ReplayFrequency::Hz8084 => Some(8084),
            ReplayFrequency::Hz10971 => Some(10971),
            ReplayFrequency::Hz16168 => Some(16168),
            ReplayFrequency::Hz21942 => Some(21942),
            ReplayFrequency::Hz32336 => Some(32336),
            ReplayFrequency::Hz43885 => Some(43885),
            ReplayFrequency::Hz47261 => Some(47261),
            ReplayFrequency::Undefined => None,
            ReplayFrequency::Unknown(..) => None,
        }
    }
}

/// The decoded fields of the 128-byte AVR header.
///
/// Fields that the format defines as flags are kept as their raw 16-bit
/// values, use [`AvrHeader::is_stereo`] and friends to interpret them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvrHeader {
    /// The magic bytes, `2BIT` for every header that decoded successfully.
    pub magic: [u8; 4],

    /// The sample name, without padding.
    pub sample_name: String,

    /// Zero for mono, nonzero (normally `0xffff`) for stereo.
    pub mono_raw: u16,

    /// The resolution of a sample: 8, 12 or 16 bits.
    pub bits_per_sample: u16,

    /// Zero for unsigned samples, nonzero (normally `0xffff`) for signed.
    pub signed_raw: u16,

    /// Zero when the sample does not loop, nonzero (normally `0xffff`) when it does.
    pub loop_raw: u16,

    /// Two MIDI notes in one field, see [`midi_notes`].
    pub midi_raw: u16,

    /// The replay speed byte, see [`ReplayFrequency`].
    pub replay_freq_raw: u8,

    /// The sample rate in Hz, a 24-bit value.
    pub sample_rate: u32,

    /// The number of samples. For stereo files this counts the samples of
    /// both channels.
    pub sample_length: u32,

    /// Start of the loop, 0 when there is no loop.
    pub loop_start: u32,

    /// End of the loop, equal to `sample_length` when there is no loop.
    pub loop_end: u32,

    /// Reserved, MIDI keyboard split.
    ///
    /// Format documents disagree on the width of this field: some give it
    /// bytes 38 to 42, which would overlap `sample_compression`. It is read
    /// from the two bytes at offset 38.
    pub midi_split: u16,

    /// Reserved, sample compression. Read from the two bytes at offset 40.
    pub sample_compression: u16,

    /// Reserved.
    pub reserved: u16,

    /// Whether the last byte of the name field is nonzero, in which case the
    /// name continues in `sample_name_extra`.
    ///
    /// This is decided on the raw byte, so a name padded with spaces to the
    /// full eight bytes continues too.
    pub name_continues: bool,

    /// Continuation of the sample name, used when the name does not fit in
    /// eight bytes.
    pub sample_name_extra: String,

    /// The 64 bytes of user data, as text without padding.
    pub comment: String,
}

impl Default for AvrHeader {
    /// A blank header: valid magic, no MIDI note, undefined replay speed,
    /// and zero everywhere else.
    fn default() -> AvrHeader {
        AvrHeader {
            magic: MAGIC,
            sample_name: String::new(),
            mono_raw: 0,
            bits_per_sample: 0,
            signed_raw: 0,
            loop_raw: 0,
            midi_raw: 0xffff,
            replay_freq_raw: 0xff,
            sample_rate: 0,
            sample_length: 0,
            loop_start: 0,
            loop_end: 0,
            midi_split: 0,
            sample_compression: 0,
            reserved: 0,
            name_continues: false,
            sample_name_extra: String::new(),
            comment: String::new(),
        }
    }
}

impl AvrHeader {
    /// Decode the header fields.
    ///
    /// Fails only if the magic is wrong, every other byte pattern is a valid
    /// header.
    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Result<AvrHeader> {
        AvrHeader::from_bytes_at(bytes, 0)
    }

    /// Decode the header fields of a header that was read at `offset`.
    ///
    /// The offset only serves to report where a wrong magic was found.
    pub fn from_bytes_at(bytes: &[u8; HEADER_LEN], offset: u64) -> Result<AvrHeader> {
        check_magic(&bytes[..], offset)?;

        let header = AvrHeader {
            magic: bytes[0..4].read_4_bytes(),
            sample_name: bytes[4..12].read_text(),
            mono_raw: bytes[12..].read_be_u16(),
            bits_per_sample: bytes[14..].read_be_u16(),
            signed_raw: bytes[16..].read_be_u16(),
            loop_raw: bytes[18..].read_be_u16(),
            midi_raw: bytes[20..].read_be_u16(),
            replay_freq_raw: bytes[22..].read_u8(),
            sample_rate: bytes[23..].read_be_u24(),
            sample_length: bytes[26..].read_be_u32(),
            loop_start: bytes[30..].read_be_u32(),
            loop_end: bytes[34..].read_be_u32(),
            midi_split: bytes[38..].read_be_u16(),
            sample_compression: bytes[40..].read_be_u16(),
            reserved: bytes[42..].read_be_u16(),
            name_continues: bytes[4 + NAME_LEN - 1] != 0,
            sample_name_extra: bytes[44..64].read_text(),
            comment: bytes[64..128].read_text(),
        };
        Ok(header)
    }

    /// Serialize the header for writing to a file.
    ///
    /// Text that does not fit its field is truncated, and the sample rate is
    /// truncated to 24 bits. A name that continues is padded with spaces
    /// instead of zeros.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut result = [0_u8; HEADER_LEN];
        result[0..4].copy_from_slice(&self.magic);
        result[4..12].write_text(&self.sample_name);
        if self.name_continues {
            let used = self.sample_name.len().min(NAME_LEN);
            for b in &mut result[4 + used..12] {
                *b = b' ';
            }
        }
        result[12..].write_be_u16(self.mono_raw);
        result[14..].write_be_u16(self.bits_per_sample);
        result[16..].write_be_u16(self.signed_raw);
        result[18..].write_be_u16(self.loop_raw);
        result[20..].write_be_u16(self.midi_raw);
        result[22] = self.replay_freq_raw;
        result[23..].write_be_u24(self.sample_rate);
        result[26..].write_be_u32(self.sample_length);
        result[30..].write_be_u32(self.loop_start);
        result[34..].write_be_u32(self.loop_end);
        result[38..].write_be_u16(self.midi_split);
        result[40..].write_be_u16(self.sample_compression);
        result[42..].write_be_u16(self.reserved);
        result[44..64].write_text(&self.sample_name_extra);
        result[64..128].write_text(&self.comment);
        result
    }

    /// Whether samples alternate between a left and a right channel.
    pub fn is_stereo(&self) -> bool {
        self.mono_raw != 0
    }

    /// Whether samples are stored as signed integers.
    pub fn is_signed(&self) -> bool {
        self.signed_raw != 0
    }

    /// Whether the region between `loop_start` and `loop_end` repeats.
    pub fn is_looping(&self) -> bool {
        self.loop_raw != 0
    }

    /// The number of channels, 2 for stereo and 1 otherwise.
    pub fn channels(&self) -> u16 {
        if self.is_stereo() { 2 } else { 1 }
    }

    /// The MIDI notes that the sample is associated with.
    pub fn midi_notes(&self) -> MidiNotes {
        midi_notes(self.midi_raw)
    }

    /// The replay speed for the Atari replay software.
    pub fn replay_frequency(&self) -> ReplayFrequency {
        ReplayFrequency::from_raw(self.replay_freq_raw)
    }

    /// The number of bytes used to store one sample.
    ///
    /// Anything wider than 8 bits, 12-bit samples included, takes two bytes.
    pub fn bytes_per_sample(&self) -> u16 {
        if self.bits_per_sample == 8 { 1 } else { 2 }
    }

    /// The number of bytes of sample data that the header announces.
    pub fn data_len(&self) -> u64 {
        self.sample_length as u64 * self.bytes_per_sample() as u64
    }

    /// The complete sample name.
    ///
    /// When `name_continues` is set, the short name is padded back to the
    /// eight bytes of its field with spaces, and the extra name follows it.
    pub fn full_name(&self) -> String {
        if self.name_continues {
            let padding = NAME_LEN.saturating_sub(self.sample_name.len());
            format!("{}{:pad$}{}", self.sample_name, "", self.sample_name_extra, pad = padding)
        } else {
            self.sample_name.clone()
        }
    }
}

impl fmt::Display for ReplayFrequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.hertz(), *self) {
            (Some(hz), _) => write!(f, "{}.{:03} kHz", hz / 1000, hz % 1000),
            (None, ReplayFrequency::Unknown(raw)) => write!(f, "unknown (0x{:02x})", raw),
            (None, _) => f.write_str("undefined"),
        }
    }
}

#[cfg(test)]
fn header_with_magic() -> [u8; HEADER_LEN] {
    let mut bytes = [0_u8; HEADER_LEN];
    bytes[..4].copy_from_slice(b"2BIT");
    bytes
}

#[test]
fn read_be_uint_is_big_endian_for_all_widths() {
    assert_eq!(read_be_uint(&[0xab]), 0xab);
    assert_eq!(read_be_uint(&[0x12, 0x34]), 0x1234);
    assert_eq!(read_be_uint(&[0x00, 0xac, 0x44]), 44100);
    assert_eq!(read_be_uint(&[0xde, 0xad, 0xbe, 0xef]), 0xdeadbeef);
}

#[test]
fn write_be_uint_truncates_to_width() {
    let mut buf = [0_u8; 3];
    write_be_uint(&mut buf, 0x0102_0304);
    assert_eq!(buf, [0x02, 0x03, 0x04]);
}

#[test]
fn wrong_magic_is_rejected() {
    let mut bytes = header_with_magic();
    bytes[..4].copy_from_slice(b"RIFF");
    match AvrHeader::from_bytes(&bytes) {
        Err(Error::FormatMismatch { offset, expected, found }) => {
            assert_eq!(offset, 0);
            assert_eq!(&expected, b"2BIT");
            assert_eq!(&found, b"RIFF");
        }
        other => panic!("expected a format mismatch, got {:?}", other),
    }
}

#[test]
fn magic_with_zero_bytes_decodes() {
    let header = AvrHeader::from_bytes(&header_with_magic()).unwrap();
    assert!(!header.is_stereo());
    assert!(!header.is_signed());
    assert!(!header.is_looping());
    assert_eq!(header.channels(), 1);
    assert_eq!(header.sample_name, "");
    assert_eq!(header.comment, "");
    // A zero MIDI field holds two notes 0, only 0xff means "no note".
    assert_eq!(&header.midi_notes()[..], &[0, 0]);
    assert_eq!(header.replay_frequency(), ReplayFrequency::Hz5485);
}

#[test]
fn fields_are_read_from_their_offsets() {
    let mut bytes = header_with_magic();
    bytes[4..9].copy_from_slice(b"snare");
    bytes[12..14].copy_from_slice(&[0xff, 0xff]);
    bytes[14..16].copy_from_slice(&[0x00, 0x10]);
    bytes[16..18].copy_from_slice(&[0xff, 0xff]);
    bytes[20..22].copy_from_slice(&[0xff, 0x3c]);
    bytes[22] = 0x03;
    bytes[23..26].copy_from_slice(&[0x00, 0x7d, 0x00]);
    bytes[26..30].copy_from_slice(&[0x00, 0x01, 0x00, 0x00]);
    bytes[34..38].copy_from_slice(&[0x00, 0x01, 0x00, 0x00]);
    bytes[38..40].copy_from_slice(&[0x12, 0x34]);
    bytes[40..42].copy_from_slice(&[0x56, 0x78]);
    bytes[42..44].copy_from_slice(&[0x9a, 0xbc]);
    bytes[64..72].copy_from_slice(b"drums   ");

    let header = AvrHeader::from_bytes(&bytes).unwrap();
    assert_eq!(header.sample_name, "snare");
    assert!(header.is_stereo());
    assert!(header.is_signed());
    assert!(!header.is_looping());
    assert_eq!(header.channels(), 2);
    assert_eq!(header.bits_per_sample, 16);
    assert_eq!(&header.midi_notes()[..], &[0x3c]);
    assert_eq!(header.replay_frequency().hertz(), Some(16168));
    assert_eq!(header.sample_rate, 32000);
    assert_eq!(header.sample_length, 65536);
    assert_eq!(header.loop_start, 0);
    assert_eq!(header.loop_end, 65536);
    assert_eq!(header.midi_split, 0x1234);
    assert_eq!(header.sample_compression, 0x5678);
    assert_eq!(header.reserved, 0x9abc);
    assert_eq!(header.comment, "drums");
}

#[test]
fn midi_notes_skip_undefined_halves() {
    assert!(midi_notes(0xffff).is_empty());
    assert_eq!(&midi_notes(0xff05)[..], &[5]);
    assert_eq!(&midi_notes(0x3cff)[..], &[60]);
    assert_eq!(&midi_notes(0x3c05)[..], &[60, 5]);
    assert_eq!(midi_notes(0x3c05).len(), 2);
}

#[test]
fn text_padding_is_trimmed_only_at_the_end() {
    assert_eq!(b"kick\0\0\0\0"[..].read_text(), "kick");
    assert_eq!(b"hi hat  "[..].read_text(), "hi hat");
    assert_eq!(b"\0\0\0\0"[..].read_text(), "");
    assert_eq!(b"a\0b\0"[..].read_text(), "a\0b");
}

#[test]
fn header_survives_to_bytes_and_back() {
    let header = AvrHeader {
        sample_name: "longname".to_string(),
        mono_raw: 0xffff,
        bits_per_sample: 12,
        signed_raw: 0xffff,
        loop_raw: 0xffff,
        midi_raw: 0x3c05,
        replay_freq_raw: 7,
        sample_rate: 47261,
        sample_length: 123_456,
        loop_start: 1000,
        loop_end: 120_000,
        midi_split: 1,
        sample_compression: 2,
        reserved: 3,
        name_continues: true,
        sample_name_extra: "continues".to_string(),
        comment: "recorded on a Falcon030".to_string(),
        .. AvrHeader::default()
    };
    let decoded = AvrHeader::from_bytes(&header.to_bytes()).unwrap();
    assert_eq!(decoded, header);
    assert_eq!(decoded.full_name(), "longnamecontinues");
}

#[test]
fn short_name_ignores_extra_name() {
    let header = AvrHeader {
        sample_name: "bass".to_string(),
        sample_name_extra: "stale".to_string(),
        .. AvrHeader::default()
    };
    assert_eq!(header.full_name(), "bass");
}

#[test]
fn name_padded_with_a_space_continues() {
    let mut bytes = header_with_magic();
    bytes[4..12].copy_from_slice(b"abcdefg ");
    bytes[44..48].copy_from_slice(b"hijk");
    let header = AvrHeader::from_bytes(&bytes).unwrap();
    assert_eq!(header.sample_name, "abcdefg");
    assert!(header.name_continues);
    assert_eq!(header.full_name(), "abcdefg hijk");
    assert_eq!(&header.to_bytes()[4..12], b"abcdefg ");
}

#[test]
fn short_name_with_invalid_utf8_does_not_continue() {
    let mut bytes = header_with_magic();
    bytes[4..8].copy_from_slice(&[0xff, 0xfe, 0xfd, 0xfc]);
    bytes[44..49].copy_from_slice(b"stale");
    let header = AvrHeader::from_bytes(&bytes).unwrap();
    // Four replacement characters take twelve bytes of UTF-8.
    assert!(header.sample_name.len() > 8);
    assert!(!header.name_continues);
    assert_eq!(header.full_name(), header.sample_name);
}

#[test]
fn from_bytes_at_reports_the_given_offset() {
    let mut bytes = header_with_magic();
    bytes[0..4].copy_from_slice(b"FORM");
    match AvrHeader::from_bytes_at(&bytes, 4096) {
        Err(Error::FormatMismatch { offset, found, .. }) => {
            assert_eq!(offset, 4096);
            assert_eq!(&found, b"FORM");
        }
        other => panic!("expected a format mismatch, got {:?}", other),
    }
}

#[test]
fn replay_frequency_display() {
    assert_eq!(ReplayFrequency::from_raw(0).to_string(), "5.485 kHz");
    assert_eq!(ReplayFrequency::from_raw(0xff).to_string(), "undefined");
    assert_eq!(ReplayFrequency::from_raw(9).to_string(), "unknown (0x09)");
}
