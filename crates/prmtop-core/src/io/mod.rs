//! Input functionality for molecular topology file formats.
//!
//! This module provides a trait-based interface for topology decoding and the
//! implementation for the Amber parm7/prmtop format. Writing topologies back
//! out is deliberately unsupported; the decoders produce immutable aggregates
//! for downstream lookup and reporting.

pub mod parm7;
pub mod traits;
