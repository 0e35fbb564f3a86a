mod cli;
mod error;
mod logging;
mod summary;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use clap::Parser;
use prmtop::io::parm7::Parm7File;
use prmtop::io::traits::TopologyFile;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, &cli.log_file)?;

    info!("Reading topology from {}", cli.parm7.display());
    let topo = Parm7File::read_from_path(&cli.parm7).map_err(|source| CliError::FileParsing {
        path: cli.parm7.clone(),
        source,
    })?;
    debug!(
        "Decoded {} atoms across {} residues",
        topo.pointers.natom, topo.pointers.nres
    );

    if cli.json {
        let stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(stdout, &topo)?;
        println!();
    } else {
        summary::print_summary(&topo, cli.sample);
    }

    Ok(())
}
