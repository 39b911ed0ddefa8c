//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{fs::File, io::Read, path::Path, vec::Vec};

use chrono::{DateTime, Local, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

use super::{Options, TourSequence, slice};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error decoding the image read.
    #[error(transparent)]
    Decode(#[from] slice::Error),
}

/// Decode the tours of an image read to its end, transferred from the
/// device at `modified`.
///
/// This method is also re-exported as `hac4::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(
    r: &mut impl Read,
    modified: NaiveDateTime,
    options: &Options,
) -> Result<TourSequence, Error> {
    let mut image = Vec::new();
    r.read_to_end(&mut image)?;

    debug!(bytes = image.len(), "Read device image");

    Ok(slice::decode(&image, modified, options)?)
}

/// Decode the tours of an image file, dating the transfer to the file's
/// modification time.
///
/// _Requires Cargo feature `std`._
pub fn decode_file(path: impl AsRef<Path>, options: &Options) -> Result<TourSequence, Error> {
    let mut file = File::open(path)?;

    let modified: DateTime<Local> = file.metadata()?.modified()?.into();

    decode(&mut file, modified.naive_local(), options)
}
