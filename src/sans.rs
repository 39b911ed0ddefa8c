//! Internal finite-state machine for walking the tour chain.
//!
//! This module is intended for applications that need fine control over
//! decoder internals, for example to stop early or to inspect the raw
//! records. See [`crate::avec`] for implementations covering common decoding
//! patterns.
//!
//! # Architecture
//!
//! The ring buffer is walked backwards, one tour at a time. Every step of the
//! walk is represented by a state token which knows the [`addr::RecordAddress`]
//! it expects to be fed next. Read the 16 record bytes at that address and
//! pass them to the token's `advance` method. This returns a successor state
//! token, along with any decoded record.
//!
//! Only the initial state, re-exported for convenience as [`Walker`], can be
//! constructed.
//!
//! Some areas of the decoding process are not represented in the
//! finite-state machine and must be carefully written:
//!
//! - Validating the image header. See the [`header`] module.
//!
//! - Reading record bytes from the correct place in the image. Record
//! addresses are relative to the ring-buffer region, which begins
//! [`RAWDATA_OFFSET`] bytes into the image.
//!
//! - Applying the image checksum. A helper function is provided in the
//! [`check`] module.
//!
//! - Turning sample records into time slices. See [`crate::avec::tour`].

pub mod addr;
pub mod bytes;
pub mod check;
pub mod header;
pub mod record;
pub mod slice;
pub mod walker;

/// Entrypoint to the finite-state machine.
pub type Walker = walker::Link;

/// Image offset at which the ring-buffer region (address 0) begins.
pub const RAWDATA_OFFSET: usize = 6;

/// Size of the ring-buffer region.
pub const RAWDATA_LENGTH: usize = 0x10000;

/// Region address of the "next free block" pointer.
pub const NEXT_FREE_POINTER: usize = 0x130;
