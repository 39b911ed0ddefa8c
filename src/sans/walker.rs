//! States walking the chain of tours through the ring buffer.
//!
//! The walk begins at the record before the "next free block" and moves
//! backwards through the buffer, one tour per iteration:
//!
//! ```text
//! Link ─DD─▶ Start ─AA─▶ Samples ─BB─▶ Samples ─CC─▶ Closing ─DD─▶ Link
//!   │                                                    │
//!   └─other─▶ End                                        └─other─▶ End
//! ```
//!
//! Within a tour, sample records are read forwards from the start record and
//! may wrap from the end of the buffer back to its beginning.

use either::Either::{self, Left, Right};
use thiserror::Error;
use tracing::trace;

use super::{
    addr::RecordAddress,
    record::{RawRecord, SampleRecord, StartRecord, StartRecordError, TerminalRecord},
};

/// An error advancing along the tour chain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalkError {
    /// A pointer does not address a record in the ring buffer.
    #[error("Pointer {0:#06X} lies outside the tour data.")]
    InvalidAddress(u16),
    /// A record lacks the signature the chain requires.
    #[error("Record at {address} has signature {found:#04X}, expected a start record.")]
    MalformedChain { address: RecordAddress, found: u8 },
    /// A start record does not point back at the terminal record referencing it.
    #[error("Start record at {address} points back to {found:#06X}, not its terminal record.")]
    BackPointerMismatch { address: RecordAddress, found: u16 },
    /// A start record carries an unknown sampling interval.
    #[error("Start record at {address} has unknown interval code {code}.")]
    UnknownInterval { address: RecordAddress, code: u8 },
    /// The samples of a tour wrap all the way around without a closing record.
    #[error("Tour starting at {address} has no closing record.")]
    UnterminatedTour { address: RecordAddress },
    /// The chain loops without terminating.
    #[error("Chain loops back to {address}.")]
    TraversalCycle { address: RecordAddress },
}

/// State token to decode a terminal record linking to the next tour.
#[derive(Debug)]
pub struct Link {
    at: RecordAddress,
    /// Address of the first terminal record visited.
    origin: RecordAddress,
}

impl Link {
    /// Begin a walk from the raw "next free block" pointer.
    ///
    /// Returns the initial state token.
    pub fn start(next_free: u16) -> Result<Self, WalkError> {
        let next_free = RecordAddress::new(next_free).ok_or(WalkError::InvalidAddress(next_free))?;
        let at = next_free.prev();

        Ok(Self { at, origin: at })
    }

    /// The address of the record to advance with.
    pub fn address(&self) -> RecordAddress {
        self.at
    }

    /// Transition to another state by decoding a terminal record.
    ///
    /// Returns a successor state token. Reaching any other record ends the
    /// walk normally.
    pub fn advance(self, r: &RawRecord) -> Result<Either<Start, End>, WalkError> {
        let Some(TerminalRecord { start }) = TerminalRecord::parse(r) else {
            return Ok(Right(End::Exhausted));
        };

        let start_at = RecordAddress::new(start).ok_or(WalkError::InvalidAddress(start))?;

        trace!(terminal = self.at.get(), start = start, "Following chain link");

        Ok(Left(Start {
            at: start_at,
            terminal: self.at,
            origin: self.origin,
        }))
    }
}

/// State token to decode the start record of a tour.
#[derive(Debug)]
pub struct Start {
    at: RecordAddress,
    terminal: RecordAddress,
    /// Address of the first terminal record visited.
    origin: RecordAddress,
}

impl Start {
    /// The address of the record to advance with.
    pub fn address(&self) -> RecordAddress {
        self.at
    }

    /// Transition to another state by decoding a start record.
    ///
    /// Returns the start record, and a successor state token.
    pub fn advance(self, r: &RawRecord) -> Result<(StartRecord, Samples), WalkError> {
        let record = StartRecord::parse(r).map_err(|err| match err {
            StartRecordError::Signature(found) => WalkError::MalformedChain {
                address: self.at,
                found,
            },
            StartRecordError::Interval(code) => WalkError::UnknownInterval {
                address: self.at,
                code,
            },
        })?;

        if record.terminal != self.terminal.get() {
            Err(WalkError::BackPointerMismatch {
                address: self.at,
                found: record.terminal,
            })?;
        }

        let successor = Samples {
            at: self.at.next(),
            start: self.at,
            origin: self.origin,
        };

        Ok((record, successor))
    }
}

/// State token to decode a sample record.
#[derive(Debug)]
pub struct Samples {
    at: RecordAddress,
    start: RecordAddress,
    /// Address of the first terminal record visited.
    origin: RecordAddress,
}

impl Samples {
    /// The address of the record to advance with.
    pub fn address(&self) -> RecordAddress {
        self.at
    }

    /// Transition to another state by decoding a sample record.
    ///
    /// Returns the sample record, and a successor state token: another sample
    /// record, or after a closing record, the tour's terminal record.
    pub fn advance(
        self,
        r: &RawRecord,
    ) -> Result<(SampleRecord, Either<Samples, Closing>), WalkError> {
        let record = SampleRecord::parse(*r);
        let next = self.at.next();

        let successor = if record.is_closing {
            Right(Closing {
                at: next,
                start: self.start,
                origin: self.origin,
            })
        } else if next == self.start {
            return Err(WalkError::UnterminatedTour {
                address: self.start,
            });
        } else {
            Left(Samples { at: next, ..self })
        };

        Ok((record, successor))
    }
}

/// State token to decode the terminal record closing a tour.
#[derive(Debug)]
pub struct Closing {
    at: RecordAddress,
    start: RecordAddress,
    /// Address of the first terminal record visited.
    origin: RecordAddress,
}

impl Closing {
    /// The address of the record to advance with.
    pub fn address(&self) -> RecordAddress {
        self.at
    }

    /// Transition to another state by decoding the record following a tour.
    ///
    /// Returns a successor state token linking to the preceding tour. If the
    /// tour is not followed by a terminal record, the walk ends.
    pub fn advance(self, r: &RawRecord) -> Result<Either<Link, End>, WalkError> {
        if TerminalRecord::parse(r).is_none() {
            return Ok(Right(End::Unclosed(self.at)));
        }

        let at = self.start.prev();

        // Each start record claims a single terminal record, so any loop
        // passes through the first one visited.
        if at == self.origin {
            Err(WalkError::TraversalCycle { address: at })?;
        }

        Ok(Left(Link {
            at,
            origin: self.origin,
        }))
    }
}

/// Final state of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// No terminal record precedes the last tour visited.
    Exhausted,
    /// The last tour visited is not followed by a terminal record at this
    /// address.
    Unclosed(RecordAddress),
}
