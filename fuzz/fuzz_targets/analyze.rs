// Avr -- An AVR audio header decoding library in Rust
// Copyright 2026 The Avr Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::new(data);
    let info = match avr::AvrReader::new(&mut cursor) {
        Ok(reader) => reader.into_info(),
        Err(..) => return,
    };

    // Whatever the header says, the derived values must be finite, and they
    // are missing only when an error explains why.
    match info.audio {
        Some(audio) => {
            assert!(audio.playtime.is_finite());
            assert!(audio.bitrate.is_finite());
        }
        None => assert!(!info.errors.is_empty()),
    }

    // Re-encoding the decoded header must decode to the same fields.
    let bytes = info.header.to_bytes();
    let again = avr::AvrHeader::from_bytes(&bytes).unwrap();
    assert_eq!(again.sample_length, info.header.sample_length);
    assert_eq!(again.midi_raw, info.header.midi_raw);
    assert_eq!(again.name_continues, info.header.name_continues);
});
