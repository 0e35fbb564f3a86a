use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "prmtop - parse Amber parm7/prmtop topologies and print a summary."
)]
pub struct Cli {
    /// Path to the Amber parm7/prmtop topology file.
    #[arg(value_name = "PARM7")]
    pub parm7: PathBuf,

    /// Number of atoms to sample for force-field details (0 to disable).
    #[arg(short, long, value_name = "INT", default_value_t = 5)]
    pub sample: usize,

    /// Emit the full decoded topology as JSON instead of the summary.
    #[arg(long, conflicts_with = "sample")]
    pub json: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_internally_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn sample_count_defaults_to_five() {
        let cli = Cli::try_parse_from(["prmtop", "system.parm7"]).unwrap();
        assert_eq!(cli.sample, 5);
        assert!(!cli.json);
    }

    #[test]
    fn json_conflicts_with_sample() {
        let result = Cli::try_parse_from(["prmtop", "system.parm7", "--json", "--sample", "3"]);
        assert!(result.is_err());
    }
}
