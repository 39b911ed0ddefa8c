#![allow(dead_code)]

//! Builders for synthetic device images.

use hac4::sans::{
    NEXT_FREE_POINTER, RAWDATA_OFFSET,
    check::{CHECKSUM_LENGTH, compute_checksum},
    slice::SliceDelta,
};

/// Length of an image as downloaded from the device.
pub const IMAGE_LENGTH: usize = 65_690;

pub struct Image(Vec<u8>);

impl Image {
    /// An image with a valid header and an empty ring buffer.
    pub fn new() -> Self {
        let mut data = vec![0; IMAGE_LENGTH];
        data[..4].copy_from_slice(b"AFRO");
        data[4] = 0x03;
        Self(data)
    }

    pub fn next_free(&mut self, at: u16) -> &mut Self {
        let i = RAWDATA_OFFSET + NEXT_FREE_POINTER;
        self.0[i..i + 2].copy_from_slice(&at.to_le_bytes());
        self
    }

    pub fn record(&mut self, at: u16, record: [u8; 16]) -> &mut Self {
        let i = RAWDATA_OFFSET + at as usize;
        self.0[i..i + 16].copy_from_slice(&record);
        self
    }

    /// Write a tour whose start record lies at `at`, followed by its sample
    /// records and terminal record, wrapping at the end of the ring buffer.
    ///
    /// Returns the address following the terminal record.
    pub fn tour(&mut self, at: u16, start: Start, samples: &[[u8; 16]]) -> u16 {
        let mut cursor = at;
        for record in samples {
            cursor = next(cursor);
            self.record(cursor, *record);
        }
        let terminal = next(cursor);

        self.record(at, start.record(terminal));
        self.record(terminal, terminal_record(at));

        next(terminal)
    }

    /// The image bytes, with a matching checksum appended.
    pub fn finish(&self) -> Vec<u8> {
        let mut data = self.0.clone();
        let checksum = format!("{:04X}", compute_checksum(&data));
        let i = data.len() - CHECKSUM_LENGTH;
        data[i..].copy_from_slice(checksum.as_bytes());
        data
    }
}

/// The record address following `at` in the ring buffer.
pub fn next(at: u16) -> u16 {
    if at == 0xFFF0 { 0x140 } else { at + 0x10 }
}

pub fn terminal_record(start: u16) -> [u8; 16] {
    let mut r = [0; 16];
    r[0] = 0xDD;
    r[2..4].copy_from_slice(&start.to_le_bytes());
    r
}

pub fn bcd(x: u8) -> u8 {
    (x / 10) << 4 | x % 10
}

#[derive(Debug, Clone, Copy)]
pub struct Start {
    pub profile: u8,
    pub interval_code: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub distance: u32,
    pub altitude: i16,
    pub pulse: u8,
}

impl Default for Start {
    fn default() -> Self {
        Self {
            profile: 1,
            interval_code: 2,
            month: 6,
            day: 14,
            hour: 9,
            minute: 30,
            distance: 12_345,
            altitude: 400,
            pulse: 120,
        }
    }
}

impl Start {
    pub fn record(&self, terminal: u16) -> [u8; 16] {
        let mut r = [0; 16];
        r[0] = 0xAA;
        r[1] = self.profile << 4 | self.interval_code;
        r[2..4].copy_from_slice(&terminal.to_le_bytes());
        r[4] = bcd(self.minute);
        r[5] = bcd(self.hour);
        r[6] = bcd(self.day);
        r[7] = bcd(self.month);
        r[8..12].copy_from_slice(&self.distance.to_le_bytes());
        r[12..14].copy_from_slice(&self.altitude.to_le_bytes());
        r[14] = self.pulse;
        r
    }
}

/// A sample record from decoded `(pulse, altitude, distance)` deltas.
pub fn samples(
    closing: bool,
    temperature: i8,
    cadence: u8,
    marker: u8,
    slices: &[(i16, i16, u16)],
) -> [u8; 16] {
    let mut r = [0; 16];
    r[0] = if closing { 0xCC } else { 0xBB };
    r[1] = temperature as u8;
    r[2] = cadence;
    r[3] = marker;

    for (i, &(pulse, altitude, distance)) in slices.iter().enumerate() {
        let packed = SliceDelta {
            pulse,
            altitude,
            distance,
        }
        .encode()
        .unwrap();
        r[4 + 2 * i..6 + 2 * i].copy_from_slice(&packed.to_le_bytes());
    }
    r
}
