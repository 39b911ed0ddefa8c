//! The fixed image header.

use thiserror::Error;
use zerocopy::FromBytes;

/// Hardware id reported by HAC4 Pro devices.
pub const HAC4_PRO_HARDWARE_ID: u8 = 0x03;

/// An error validating an image header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Incorrect file type marker.
    #[error("Incorrect file type marker.")]
    NotDeviceData,
    /// The image was written by another device family.
    #[error("Unexpected hardware id (expected {expected:#04X}, found {found:#04X}).")]
    HardwareId { expected: u8, found: u8 },
}

/// The validated fields of an image header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceHeader {
    pub hardware_id: u8,
}

impl DeviceHeader {
    /// Decode and validate an image header against the expected hardware id.
    pub fn parse(r: [u8; 6], hardware_id: u8) -> Result<Self, HeaderError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct ImageHeader {
            magic: [u8; 4],
            hardware_id: u8,
            _reserved: u8,
        }

        let ImageHeader {
            magic,
            hardware_id: found,
            ..
        } = zerocopy::transmute!(r);

        if !magic.eq_ignore_ascii_case(b"AFRO") {
            Err(HeaderError::NotDeviceData)?;
        }

        if found != hardware_id {
            Err(HeaderError::HardwareId {
                expected: hardware_id,
                found,
            })?;
        }

        Ok(Self { hardware_id: found })
    }
}
