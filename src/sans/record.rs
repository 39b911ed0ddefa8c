//! The 16-byte records stored in the ring buffer.

use thiserror::Error;
use zerocopy::FromBytes;

use super::bytes::{read_bcd_byte, read_i16_le, read_u16_le, read_u32_le};

/// Signature of a terminal ("DD") record.
pub const TERMINAL_SIGNATURE: u8 = 0xDD;
/// Signature of a start ("AA") record.
pub const START_SIGNATURE: u8 = 0xAA;
/// Signature of the last sample ("CC") record of a tour.
pub const CLOSING_SIGNATURE: u8 = 0xCC;
/// Marker byte of a sample record without a marker.
pub const NO_MARKER: u8 = 0xFF;

/// Number of time slices in a sample record.
pub const SLICES_PER_RECORD: usize = 6;

/// Bytes of a single record.
pub type RawRecord = [u8; 16];

/// A record bracketing a tour, pointing at the tour's start record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalRecord {
    /// Raw (unchecked) address of the paired start record.
    pub start: u16,
}

impl TerminalRecord {
    /// Decode a terminal record, if the bytes carry its signature.
    pub fn parse(r: &RawRecord) -> Option<Self> {
        (r[0] == TERMINAL_SIGNATURE).then(|| Self {
            start: read_u16_le(r, 2),
        })
    }
}

/// The metadata opening a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartRecord {
    /// Recording profile selected on the device.
    pub profile: u8,
    /// Sampling interval, in seconds.
    pub interval: u16,
    /// Raw (unchecked) address of the paired terminal record.
    pub terminal: u16,
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    pub month: u8,
    /// Odometer reading at the start of the tour, in metres.
    pub distance: u32,
    /// Altitude at the start of the tour, in metres.
    pub altitude: i16,
    /// Pulse at the start of the tour, in beats per minute.
    pub pulse: u8,
}

impl StartRecord {
    /// Decode a start record.
    pub fn parse(r: &RawRecord) -> Result<Self, StartRecordError> {
        if r[0] != START_SIGNATURE {
            Err(StartRecordError::Signature(r[0]))?;
        }

        let interval = match r[1] & 0xF {
            0 => 2,
            1 => 5,
            2 => 10,
            3 => 20,
            code => Err(StartRecordError::Interval(code))?,
        };

        Ok(Self {
            profile: r[1] >> 4,
            interval,
            terminal: read_u16_le(r, 2),
            minute: read_bcd_byte(r, 4),
            hour: read_bcd_byte(r, 5),
            day: read_bcd_byte(r, 6),
            month: read_bcd_byte(r, 7),
            distance: read_u32_le(r, 8),
            altitude: read_i16_le(r, 12),
            pulse: r[14],
        })
    }
}

/// An error decoding a start record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartRecordError {
    /// The record lacks the start signature.
    #[error("Found signature {0:#04X}.")]
    Signature(u8),
    /// Unknown sampling interval code.
    #[error("Unknown interval code ({0}).")]
    Interval(u8),
}

/// A record of six packed time slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRecord {
    /// Whether this is the last sample record of its tour.
    pub is_closing: bool,
    /// Temperature, in degrees Celsius.
    pub temperature: i8,
    /// Cadence, or for a closing record, the time recorded into it.
    pub cadence: u8,
    pub marker: Option<u8>,
    pub slices: [u16; SLICES_PER_RECORD],
}

impl SampleRecord {
    /// Decode a sample record. Any signature other than "CC" is a normal
    /// sample record.
    pub fn parse(r: RawRecord) -> Self {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct Layout {
            signature: u8,
            temperature: i8,
            cadence: u8,
            marker: u8,
            slices: [[u8; 2]; SLICES_PER_RECORD],
        }

        let Layout {
            signature,
            temperature,
            cadence,
            marker,
            slices,
        } = zerocopy::transmute!(r);

        Self {
            is_closing: signature == CLOSING_SIGNATURE,
            temperature,
            cadence,
            marker: (marker != NO_MARKER).then_some(marker),
            slices: slices.map(u16::from_le_bytes),
        }
    }

    /// Number of valid time slices in this record, for a tour sampled every
    /// `interval` seconds.
    pub fn slice_count(&self, interval: u16) -> usize {
        if self.is_closing {
            (usize::from(self.cadence) / usize::from(interval) + 1).min(SLICES_PER_RECORD)
        } else {
            SLICES_PER_RECORD
        }
    }

    /// Seconds recorded into the very last time slice of a tour.
    pub fn closing_remainder(&self) -> u16 {
        u16::from(self.cadence % 20)
    }
}
