//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode a whole device image into a
//! [`TourSequence`]: every tour found in the ring buffer, most recent first.
//!
//! The device never records the year a tour was started in. It is guessed
//! from the time the image was transferred, usually the modification time of
//! the downloaded file. See the [`year`] module for the details and limits of
//! that guess.
//!
//! # Example
//!
//! ```
//! use hac4::avec::Options;
//!
//! let image = std::fs::read("tours.dat")?;
//! let modified = chrono::Local::now().naive_local();
//! let tours = hac4::avec::decode_slice(&image, modified, &Options::default())?;
//!
//! for tour in &tours.tours {
//!     println!("{:?}: {} m in {} s", tour.start.to_datetime(), tour.distance, tour.recording_time);
//! }
//! ```

use alloc::vec::Vec;

use chrono::NaiveDateTime;

use crate::sans::header::HAC4_PRO_HARDWARE_ID;

pub mod device;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;
pub mod tour;
pub mod year;

pub use device::{DeviceFormat, Hac4Pro};
#[cfg(feature = "std")]
pub use reader::{decode as decode_reader, decode_file};
pub use slice::decode as decode_slice;
pub use tour::{StartTime, TimeSlice, Tour};

/// The tours decoded from a device image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourSequence {
    /// Tours, most recent first.
    pub tours: Vec<Tour>,
    /// When the image was transferred from the device.
    pub transferred: NaiveDateTime,
}

/// Options controlling how strictly an image is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Hardware id the image header must carry.
    pub hardware_id: u8,
    /// Reject images whose declared checksum is missing or wrong.
    ///
    /// Off by default: the device software accepts such images.
    pub strict_checksum: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hardware_id: HAC4_PRO_HARDWARE_ID,
            strict_checksum: false,
        }
    }
}

impl Options {
    /// Expect images carrying another hardware id.
    pub fn with_hardware_id(self, hardware_id: u8) -> Self {
        Self {
            hardware_id,
            ..self
        }
    }

    /// Enable or disable rejecting images with a bad checksum.
    pub fn with_strict_checksum(self, strict_checksum: bool) -> Self {
        Self {
            strict_checksum,
            ..self
        }
    }
}
