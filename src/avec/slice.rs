//! Slice-based decoder implementation.

use alloc::vec::Vec;

use chrono::{Datelike, NaiveDateTime};
use either::Either::{Left, Right};
use thiserror::Error;
use tracing::{debug, warn};

use crate::sans::{
    NEXT_FREE_POINTER, RAWDATA_LENGTH, RAWDATA_OFFSET, Walker,
    addr::RecordAddress,
    bytes::read_u16_le,
    check::{compute_checksum, declared_checksum},
    header::{DeviceHeader, HeaderError},
    record::RawRecord,
    walker::{End, WalkError},
};

use super::{
    Options, TourSequence,
    tour::{Tour, TourAssembler},
    year::YearGuess,
};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The image is shorter than the ring buffer it must contain.
    #[error("Unexpectedly reached the end of the slice.")]
    EndOfSlice,
    /// Incorrect file type marker or hardware id.
    #[error("Incorrect image header: {0}")]
    InvalidSignature(#[from] HeaderError),
    /// Calculated and declared checksums do not match (strict mode only).
    #[error("Calculated ({calculated:#06X}) and declared ({declared:?}) checksums do not match.")]
    ChecksumMismatch {
        declared: Option<u16>,
        calculated: u16,
    },
    /// A pointer does not address a record in the ring buffer.
    #[error("Pointer {0:#06X} lies outside the tour data.")]
    InvalidAddress(u16),
    /// A record lacks the signature the chain requires.
    #[error("Record at {address} has signature {found:#04X}, expected a start record.")]
    MalformedChain { address: RecordAddress, found: u8 },
    /// A start record does not point back at its terminal record.
    #[error("Start record at {address} points back to {found:#06X}, not its terminal record.")]
    BackPointerMismatch { address: RecordAddress, found: u16 },
    /// A start record carries an unknown sampling interval.
    #[error("Start record at {address} has unknown interval code {code}.")]
    UnknownInterval { address: RecordAddress, code: u8 },
    /// A tour has no closing record.
    #[error("Tour starting at {address} has no closing record.")]
    UnterminatedTour { address: RecordAddress },
    /// The chain loops without terminating.
    #[error("Chain loops back to {address}.")]
    TraversalCycle { address: RecordAddress },
}

impl From<WalkError> for Error {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::InvalidAddress(raw) => Self::InvalidAddress(raw),
            WalkError::MalformedChain { address, found } => Self::MalformedChain { address, found },
            WalkError::BackPointerMismatch { address, found } => {
                Self::BackPointerMismatch { address, found }
            }
            WalkError::UnknownInterval { address, code } => Self::UnknownInterval { address, code },
            WalkError::UnterminatedTour { address } => Self::UnterminatedTour { address },
            WalkError::TraversalCycle { address } => Self::TraversalCycle { address },
        }
    }
}

/// Validate the header of an image.
///
/// The checksum is only enforced with [`Options::strict_checksum`].
pub fn validate(r: &[u8], options: &Options) -> Result<DeviceHeader, Error> {
    let header = DeviceHeader::parse(take(r, 0)?, options.hardware_id)?;

    let calculated = compute_checksum(r);
    let declared = declared_checksum(r);

    if declared != Some(calculated) {
        if options.strict_checksum {
            Err(Error::ChecksumMismatch {
                declared,
                calculated,
            })?;
        }

        warn!(?declared, calculated, "Image checksum does not match");
    }

    debug!(hardware_id = header.hardware_id, "Validated image header");

    Ok(header)
}

/// Decode the tours of an image, transferred from the device at `modified`.
///
/// This method is also re-exported as `hac4::avec::decode_slice`.
pub fn decode(
    r: &[u8],
    modified: NaiveDateTime,
    options: &Options,
) -> Result<TourSequence, Error> {
    validate(r, options)?;

    if r.len() < RAWDATA_OFFSET + RAWDATA_LENGTH {
        Err(Error::EndOfSlice)?;
    }

    let next_free = read_u16_le(&take::<2>(r, RAWDATA_OFFSET + NEXT_FREE_POINTER)?, 0);

    let tours = walk(r, next_free, modified.year())?;

    Ok(TourSequence {
        tours,
        transferred: modified,
    })
}

/// Walk the chain of tours, most recent first.
fn walk(r: &[u8], next_free: u16, year: i32) -> Result<Vec<Tour>, Error> {
    let mut years = YearGuess::new(year);
    let mut tours = Vec::new();

    let mut link = Walker::start(next_free)?;

    loop {
        let at = link.address();
        let start = match link.advance(&record(r, at)?)? {
            Left(start) => start,
            Right(_) => break,
        };

        let at = start.address();
        let (start_record, mut samples) = start.advance(&record(r, at)?)?;

        let mut tour = TourAssembler::new(&start_record, years.next(start_record.month));

        let closing = loop {
            let at = samples.address();
            let (sample, successor) = samples.advance(&record(r, at)?)?;
            tour.add_record(&sample);

            samples = match successor {
                Left(samples) => samples,
                Right(closing) => break closing,
            };
        };

        let tour = tour.finish();
        debug!(
            year = tour.start.year,
            month = tour.start.month,
            day = tour.start.day,
            slices = tour.slices.len(),
            distance = tour.distance,
            "Assembled tour"
        );
        tours.push(tour);

        let at = closing.address();
        link = match closing.advance(&record(r, at)?)? {
            Left(link) => link,
            Right(End::Unclosed(address)) => {
                warn!(address = address.get(), "Tour is not followed by a terminal record");
                break;
            }
            Right(End::Exhausted) => break,
        };
    }

    debug!(tours = tours.len(), "Reached the end of the chain");

    Ok(tours)
}

/// Take the record at an address of the ring buffer.
fn record(r: &[u8], at: RecordAddress) -> Result<RawRecord, Error> {
    take(r, at.image_offset())
}

/// Take an exact number of bytes from an offset in a slice.
fn take<const N: usize>(r: &[u8], i: usize) -> Result<[u8; N], Error> {
    r.get(i..i + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::EndOfSlice)
}
