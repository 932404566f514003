// Avr -- An AVR audio header decoding library in Rust
// Copyright 2026 The Avr Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

// Prints the metadata of the AVR files given on the command line.

// Usage: cargo run --example avrinfo -- sample.avr [more.avr ...]

use std::env;
use std::process;

fn print_info(fname: &str) -> avr::Result<()> {
    let reader = avr::AvrReader::open(fname)?;
    let info = reader.info();
    let header = &info.header;

    println!("{}", fname);
    println!("  format:          {}", info.file_format());
    println!("  name:            {}", header.full_name());
    println!("  channels:        {}", header.channels());
    println!("  sample rate:     {} Hz", header.sample_rate);
    println!("  bits per sample: {}", header.bits_per_sample);
    println!("  signed:          {}", header.is_signed());
    println!("  samples:         {}", header.sample_length);
    if header.is_looping() {
        println!("  loop:            {} - {}", header.loop_start, header.loop_end);
    }
    println!("  midi notes:      {:?}", &info.midi_notes[..]);
    println!("  replay speed:    {}", header.replay_frequency());
    if let Some(audio) = &info.audio {
        println!("  playtime:        {:.3} s", audio.playtime);
        println!("  bitrate:         {:.0} bps", audio.bitrate);
    }
    if !header.comment.is_empty() {
        println!("  comment:         {}", header.comment);
    }
    for err in &info.errors {
        println!("  error:           {}", err);
    }
    for warning in &info.warnings {
        println!("  warning:         {}", warning);
    }
    Ok(())
}

fn main() {
    let fnames: Vec<String> = env::args().skip(1).collect();
    if fnames.is_empty() {
        eprintln!("usage: avrinfo FILE...");
        process::exit(2);
    }

    let mut failed = false;
    for fname in &fnames {
        if let Err(err) = print_info(fname) {
            eprintln!("{}: {}", fname, err);
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}
