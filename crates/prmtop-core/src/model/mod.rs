//! Data model for a decoded Amber topology.
//!
//! This module defines the immutable aggregate produced by the parm7 decoder:
//! the [`Pointers`] header record of section cardinalities, the
//! per-atom/per-residue/per-type parallel sequences, the regrouped bonded-term
//! instances, and the optional solvent/box extras. A [`Topology`] is built
//! once per parse and never mutated afterwards; the force-field lookups in
//! [`crate::forcefield`] consume it read-only.

pub mod pointers;
pub mod topology;

pub use pointers::Pointers;
pub use topology::{
    Angle, Bond, BoxDimensions, Dihedral, DihedralFlags, NO_INDEX, SolventPointers, Topology,
};
