//! Fallback chime used when no alert sound file is configured.
//!
//! A soft 320 Hz sine, 1.5 s long, with a 0.3 s linear fade-in and a 0.5 s
//! linear fade-out, rendered as unsigned 8-bit mono PCM and wrapped in a WAV
//! container so any external player can handle it.

use std::f64::consts::PI;

pub const SAMPLE_RATE: u32 = 44_100;
pub const DURATION_SECS: f64 = 1.5;
pub const FREQUENCY_HZ: f64 = 320.0;
pub const AMPLITUDE: f64 = 120.0;

const FADE_IN_SECS: f64 = 0.3;
const FADE_OUT_SECS: f64 = 0.5;
const WAV_HEADER_LEN: usize = 44;

fn envelope(t: f64) -> f64 {
    if t < FADE_IN_SECS {
        t / FADE_IN_SECS
    } else if t > DURATION_SECS - FADE_OUT_SECS {
        (DURATION_SECS - t) / FADE_OUT_SECS
    } else {
        1.0
    }
}

/// Raw PCM samples, centred on 128.
pub fn chime_samples() -> Vec<u8> {
    let count = (SAMPLE_RATE as f64 * DURATION_SECS) as usize;
    (0..count)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            let value = (AMPLITUDE * envelope(t) * (t * FREQUENCY_HZ * 2.0 * PI).sin()) as i32;
            (128 + value).clamp(0, 255) as u8
        })
        .collect()
}

/// The chime as a complete RIFF/WAVE file.
pub fn chime_wav() -> Vec<u8> {
    let data = chime_samples();
    let data_len = data.len() as u32;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk: PCM, mono, 8 bits
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes()); // byte rate
    out.extend_from_slice(&1u16.to_le_bytes()); // block align
    out.extend_from_slice(&8u16.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(&data);
    out
}
