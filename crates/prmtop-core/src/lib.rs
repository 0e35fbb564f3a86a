//! # prmtop
//!
//! A decoder for the Amber parm7/prmtop molecular-topology text format.
//!
//! The library turns a line-oriented parm7 byte stream into a fully validated
//! in-memory [`model::Topology`] and offers read-only force-field parameter
//! lookups over the result.
//!
//! ## Architecture
//!
//! - **[`io`]: Decoding.** The `%FLAG`/`%FORMAT` section dispatcher, the
//!   fixed-column field splitter, the header resolver that defers structural
//!   validation until the `POINTERS` counts are known, and the final
//!   validator. Entry point: [`io::parm7::Parm7File`] via
//!   [`io::traits::TopologyFile`].
//!
//! - **[`model`]: The data model.** The immutable topology aggregate and the
//!   `POINTERS` header record, with 0-based indices and explicit sentinels
//!   where the format encodes absence as `0`.
//!
//! - **[`forcefield`]: Lookups.** Residue membership and Lennard-Jones
//!   pair-coefficient resolution through the triangular coefficient tables.
//!
//! Parsing is single-threaded and synchronous; each parse owns its buffers
//! exclusively, so concurrent parses of different inputs need no
//! coordination, and the produced topology is freely shareable read-only.

pub mod forcefield;
pub mod io;
pub mod model;
