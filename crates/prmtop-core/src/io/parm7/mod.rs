//! Decoder for the Amber parm7/prmtop topology format.
//!
//! parm7 is a line-oriented, section-tagged text format: an optional
//! `%VERSION` stamp, then repeating `%FLAG <NAME>` / `%FORMAT(...)` directive
//! pairs followed by fixed-column-width data lines. The `POINTERS` header
//! section carries the counts every other section's length derives from, so
//! structural validation is deferred until that header resolves.
//!
//! - [`format`] - `%FORMAT` directive decoding, field splitting, scalar conversion
//! - [`section`] - the closed section-name table and dispatch tag
//! - [`reader`] - the line dispatcher, header resolver, and validator
//! - [`error`] - the fatal error taxonomy of a parse

pub mod error;
pub mod format;
pub mod reader;
pub mod section;

pub use error::Parm7Error;
pub use reader::Parm7File;
pub use section::Section;

/// Amber stores charges premultiplied by `sqrt(332.0522)` (the electrostatic
/// energy conversion factor); dividing by this constant recovers elementary
/// charge units.
pub const AMBER_CHARGE_SCALE: f64 = 18.2223;
