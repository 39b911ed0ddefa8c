//! Record addresses within the tour-data ring buffer.

use core::fmt;

/// First address of the tour-data ring buffer.
pub const TOUR_DATA_START: u32 = 0x140;
/// Address one past the end of the tour-data ring buffer.
pub const TOUR_DATA_END: u32 = 0x10000;
/// Size of every record in the ring buffer.
pub const RECORD_LENGTH: u32 = 0x10;

/// The address of a record in the tour-data ring buffer, relative to the
/// start of the region.
///
/// Always record-aligned and within `TOUR_DATA_START..TOUR_DATA_END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordAddress(u16);

impl RecordAddress {
    /// The first record of the ring buffer.
    pub const FIRST: Self = Self(TOUR_DATA_START as u16);
    /// The last record of the ring buffer.
    pub const LAST: Self = Self((TOUR_DATA_END - RECORD_LENGTH) as u16);

    /// Check a raw pointer read from the image.
    ///
    /// Returns `None` if the pointer lies outside the ring buffer or does not
    /// point at a record boundary.
    pub fn new(raw: u16) -> Option<Self> {
        let x = u32::from(raw);

        if (TOUR_DATA_START..TOUR_DATA_END).contains(&x)
            && (x - TOUR_DATA_START) % RECORD_LENGTH == 0
        {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// The raw region offset.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Offset of this record's first byte within the whole image.
    pub fn image_offset(self) -> usize {
        super::RAWDATA_OFFSET + self.0 as usize
    }

    /// The preceding record, wrapping from the first record to the last.
    pub fn prev(self) -> Self {
        if self == Self::FIRST {
            Self::LAST
        } else {
            Self(self.0 - RECORD_LENGTH as u16)
        }
    }

    /// The following record, wrapping from the last record to the first.
    pub fn next(self) -> Self {
        if self == Self::LAST {
            Self::FIRST
        } else {
            Self(self.0 + RECORD_LENGTH as u16)
        }
    }
}

impl fmt::Display for RecordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}
