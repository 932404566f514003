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
use std::io::{Seek, SeekFrom, Write};

use avr::{AvrHeader, AvrReader, AvrWriter, DataRange, Error, MetadataError, Warning};

fn stereo_16bit_header() -> AvrHeader {
    AvrHeader {
        sample_name: "strings".to_string(),
        mono_raw: 0xffff,
        bits_per_sample: 16,
        signed_raw: 0xffff,
        midi_raw: 0xff3c,
        replay_freq_raw: 5,
        sample_rate: 32000,
        comment: "C4 pad".to_string(),
        .. AvrHeader::default()
    }
}

#[test]
fn written_file_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strings.avr");

    // Two seconds of stereo: 64000 frames, 128000 samples, 256000 bytes.
    let mut writer = AvrWriter::create(&path, stereo_16bit_header()).unwrap();
    let frame = [0x12, 0x34, 0xed, 0xcc];
    for _ in 0..64000 {
        writer.write_samples(&frame).unwrap();
    }
    writer.finalize().unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 128 + 256000);

    let reader = AvrReader::open(&path).unwrap();
    let info = reader.info();
    assert_eq!(info.file_format(), "avr");
    assert!(info.warnings.is_empty());

    assert_eq!(info.header.sample_name, "strings");
    assert_eq!(info.header.comment, "C4 pad");
    assert_eq!(info.header.sample_length, 128000);
    assert_eq!(info.header.loop_end, 128000);
    assert!(info.header.is_stereo());
    assert!(info.header.is_signed());
    assert!(!info.header.is_looping());
    assert_eq!(&info.midi_notes[..], &[60]);
    assert_eq!(info.header.replay_frequency(), avr::ReplayFrequency::Hz32336);

    assert!(info.errors.is_empty());
    let audio = info.audio.unwrap();
    assert_eq!(audio.channels, 2);
    assert_eq!(audio.sample_rate, 32000);
    assert_eq!(audio.bits_per_sample, 16);
    assert_eq!(audio.playtime, 2.0);
    assert_eq!(audio.bitrate, 1024000.0);
    assert!(audio.lossless);
    assert_eq!(audio.bitrate_mode, avr::BitrateMode::Cbr);
}

#[test]
fn truncated_file_still_reads_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cut.avr");

    let header = AvrHeader {
        bits_per_sample: 8,
        sample_rate: 8000,
        .. AvrHeader::default()
    };
    let mut writer = AvrWriter::create(&path, header).unwrap();
    writer.write_samples(&[0x80; 1000]).unwrap();
    writer.finalize().unwrap();

    // Chop off the last byte, like an interrupted download would.
    let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(128 + 999).unwrap();
    drop(file);

    let info = AvrReader::open(&path).unwrap().into_info();
    assert_eq!(info.warnings, vec![Warning::TruncatedData { expected: 1000, found: 999 }]);
    assert_eq!(info.header.sample_length, 1000);
    assert_eq!(info.audio.unwrap().playtime, 0.125);
}

#[test]
fn wav_file_is_not_an_avr_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not.avr");

    let mut bytes = b"RIFF\x24\x00\x00\x00WAVE".to_vec();
    bytes.resize(200, 0);
    fs::write(&path, &bytes).unwrap();

    match AvrReader::open(&path) {
        Err(Error::FormatMismatch { offset, expected, found }) => {
            assert_eq!(offset, 0);
            assert_eq!(&expected, b"2BIT");
            assert_eq!(&found, b"RIFF");
        }
        Err(other) => panic!("expected a format mismatch, got {:?}", other),
        Ok(..) => panic!("a wav file should not decode as AVR"),
    }
}

#[test]
fn zero_sample_rate_reads_without_characteristics() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("norate.avr");

    let header = AvrHeader {
        bits_per_sample: 8,
        sample_name: "norate".to_string(),
        .. AvrHeader::default()
    };
    let mut writer = AvrWriter::create(&path, header).unwrap();
    writer.write_samples(&[0; 16]).unwrap();
    writer.finalize().unwrap();

    let info = AvrReader::open(&path).unwrap().into_info();
    assert_eq!(info.errors, vec![MetadataError::InvalidSampleRate]);
    assert_eq!(info.audio, None);
    assert!(info.warnings.is_empty());
    assert_eq!(info.header.sample_name, "norate");
    assert_eq!(info.header.sample_length, 16);
    assert_eq!(info.header.channels(), 1);
}

#[test]
fn header_embedded_in_larger_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("embedded.bin");

    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&[0xff; 300]).unwrap();
    {
        let header = AvrHeader {
            bits_per_sample: 8,
            sample_rate: 10000,
            .. AvrHeader::default()
        };
        let mut writer = AvrWriter::new(&mut file, header).unwrap();
        writer.write_samples(&[0x80; 5000]).unwrap();
        writer.finalize().unwrap();
    }
    file.seek(SeekFrom::End(0)).unwrap();
    file.write_all(b"TAG trailing metadata").unwrap();
    drop(file);

    let file = fs::File::open(&path).unwrap();
    let range = DataRange { offset: 300, end: 300 + 128 + 5000 };
    let info = AvrReader::with_data_range(file, range).unwrap().into_info();
    assert!(info.warnings.is_empty());
    assert_eq!(info.data_range, DataRange { offset: 428, end: 5428 });
    assert_eq!(info.audio.unwrap().playtime, 0.5);

    // A range that ends at the end of the file counts the tag as sample data.
    let info = AvrReader::with_data_range(fs::File::open(&path).unwrap(),
                                          DataRange { offset: 300, end: 5449 })
        .unwrap()
        .into_info();
    assert_eq!(info.warnings, vec![Warning::TruncatedData { expected: 5000, found: 5021 }]);
}
