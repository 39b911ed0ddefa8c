//! A common interface over device image formats.

use chrono::NaiveDateTime;

use crate::sans::header::DeviceHeader;

use super::{Options, TourSequence, slice};

/// An image format written by a family of devices.
pub trait DeviceFormat {
    /// The error produced while validating or decoding an image.
    type Error;

    /// Check that an image was written by this device family.
    fn validate(&self, image: &[u8]) -> Result<DeviceHeader, Self::Error>;

    /// Decode every tour of an image, transferred from the device at
    /// `modified`.
    fn decode(&self, image: &[u8], modified: NaiveDateTime)
    -> Result<TourSequence, Self::Error>;
}

/// The image format of HAC4 Pro devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hac4Pro {
    pub options: Options,
}

impl Hac4Pro {
    /// The format, validated and decoded with `options`.
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl DeviceFormat for Hac4Pro {
    type Error = slice::Error;

    fn validate(&self, image: &[u8]) -> Result<DeviceHeader, Self::Error> {
        slice::validate(image, &self.options)
    }

    fn decode(&self, image: &[u8], modified: NaiveDateTime) -> Result<TourSequence, Self::Error> {
        slice::decode(image, modified, &self.options)
    }
}
