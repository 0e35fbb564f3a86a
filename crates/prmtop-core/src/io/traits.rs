use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for decoding topology file formats.
///
/// Implementors handle format-specific parsing and produce a fully validated
/// output aggregate; decoding is all-or-nothing, so no partial output ever
/// reaches the caller.
pub trait TopologyFile {
    /// The aggregate produced by a successful parse.
    type Output;

    /// The error type for decoding operations.
    type Error: Error + From<io::Error>;

    /// Reads a topology from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Reads a topology from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
