#![no_std]

//! A decoder for the tour images downloaded from HAC4 Pro cycling computers.
//!
//! The device records tours into a fixed 64 KiB ring buffer of 16-byte
//! records. Tours are linked backwards from a "next free block" pointer,
//! may wrap around the end of the buffer, and store their samples as packed
//! deltas. This crate walks that chain and reconstructs each tour's absolute
//! pulse and altitude series, its statistics and its (inferred) start date.
//!
//! Most users should begin with the functions in the [`avec`] module. If
//! these prove insufficient, the chain can be walked step by step with the
//! finite-state machine in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader- and file-based decoding (default).
//! - `serde`: derive `Serialize` and `Deserialize` for decoded tours.

extern crate alloc;

pub mod avec;
pub mod sans;
