//! Packed 16-bit time slices.
//!
//! Each sample record carries six time slices. A slice holds the change in
//! pulse and altitude over one sampling interval, and the distance covered:
//!
//! ```text
//! 15     12 11         6 5          0
//! [ pulse ] [ altitude  ] [ distance ]
//! ```
//!
//! Pulse and altitude are two's complement. Pulse counts in steps of two
//! beats per minute, distance in steps of ten metres. Altitude is linear up
//! to ±16 metres; beyond that every step counts seven metres.

use tartan_bitfield::bitfield;

bitfield! {
    struct PackedSlice(u16) {
        [0..6] distance: u8,
        [6..12] altitude: u8,
        [12..16] pulse: u8,
    }
}

/// Altitude steps that are stored at full resolution.
const ALTITUDE_LINEAR: i16 = 16;
/// Metres per altitude step beyond the linear range.
const ALTITUDE_COARSE: i16 = 7;

/// The deltas held by one time slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceDelta {
    /// Change in pulse, in beats per minute.
    pub pulse: i16,
    /// Change in altitude, in metres.
    pub altitude: i16,
    /// Distance covered, in metres.
    pub distance: u16,
}

impl SliceDelta {
    /// Decode a packed time slice.
    pub fn decode(r: u16) -> Self {
        let packed = PackedSlice(r);

        let pulse = sign_extend(packed.pulse(), 4) * 2;
        let altitude = expand_altitude(sign_extend(packed.altitude(), 6));
        let distance = u16::from(packed.distance()) * 10;

        Self {
            pulse,
            altitude,
            distance,
        }
    }

    /// Pack a time slice.
    ///
    /// Returns `None` if any delta cannot be represented: pulse must be even
    /// and within `-16..=14`, distance a multiple of ten up to 630, and
    /// altitude either within `-16..=16` or reachable in coarse steps up to
    /// `-128..=121`.
    pub fn encode(self) -> Option<u16> {
        if self.pulse % 2 != 0 || !(-16..=14).contains(&self.pulse) {
            return None;
        }
        if self.distance % 10 != 0 || self.distance > 630 {
            return None;
        }
        let altitude = compress_altitude(self.altitude)?;

        let mut packed = PackedSlice(0);
        packed.set_pulse((self.pulse / 2) as u8 & 0xF);
        packed.set_altitude(altitude as u8 & 0x3F);
        packed.set_distance((self.distance / 10) as u8);

        Some(packed.0)
    }
}

/// Interpret the low `bits` of `x` as a two's complement value.
fn sign_extend(x: u8, bits: u32) -> i16 {
    let shift = 8 - bits;
    i16::from(((x << shift) as i8) >> shift)
}

fn expand_altitude(v: i16) -> i16 {
    if v > ALTITUDE_LINEAR {
        ALTITUDE_LINEAR + (v - ALTITUDE_LINEAR) * ALTITUDE_COARSE
    } else if v < -ALTITUDE_LINEAR {
        -ALTITUDE_LINEAR + (v + ALTITUDE_LINEAR) * ALTITUDE_COARSE
    } else {
        v
    }
}

fn compress_altitude(v: i16) -> Option<i16> {
    let raw = if v > ALTITUDE_LINEAR {
        let excess = v - ALTITUDE_LINEAR;
        (excess % ALTITUDE_COARSE == 0).then(|| ALTITUDE_LINEAR + excess / ALTITUDE_COARSE)?
    } else if v < -ALTITUDE_LINEAR {
        let excess = v + ALTITUDE_LINEAR;
        (excess % ALTITUDE_COARSE == 0).then(|| -ALTITUDE_LINEAR + excess / ALTITUDE_COARSE)?
    } else {
        v
    };

    (-32..=31).contains(&raw).then_some(raw)
}
