use clap::Parser;
use std::path::PathBuf;
use tc_archive::{ArchiveError, load_archive};
use tc_coupling::{
    CouplingDriver, CouplingError, DriverMode, DriverOptions, ParticipantInfo, RunSummary,
    STANDALONE_HOST, SETUP_FILE, StandaloneConnector,
};
use tracing::{Level, info};

const BUILD_INFO: &str = "TD Results Reader v0.1";

#[derive(Parser, Debug)]
#[command(name = "tc-cli")]
#[command(about = "Thermal results archive as a co-simulation participant", long_about = None)]
struct Cli {
    /// Coupling service host ('#' replays the archive standalone)
    #[arg(long, default_value = STANDALONE_HOST)]
    schost: String,
    /// Coupling service port
    #[arg(long, default_value_t = 0)]
    scport: u16,
    /// Participant name
    #[arg(long, default_value = "TD")]
    scname: String,
    /// Run in setup mode: declare regions and exit
    #[arg(long)]
    scsetup: bool,
    /// In setup mode, also write the setup file
    #[arg(long)]
    writescp: bool,
    /// Path to the results archive document (.json, .yaml)
    #[arg(long)]
    input: PathBuf,
    /// Verbose logging and point cloud validity checks
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read archive {path}: {source}")]
    Archive { path: PathBuf, source: ArchiveError },

    #[error(transparent)]
    Coupling(#[from] CouplingError),
}

type CliResult<T> = Result<T, CliError>;

impl Cli {
    fn participant(&self) -> ParticipantInfo {
        ParticipantInfo::new(&self.schost, self.scport, &self.scname, BUILD_INFO)
    }

    fn driver_options(&self) -> DriverOptions {
        let mode = if self.scsetup {
            DriverMode::Setup {
                write_setup_file: self.writescp,
            }
        } else {
            DriverMode::Run
        };
        DriverOptions {
            mode,
            verify_point_clouds: self.debug,
            setup_file: PathBuf::from(SETUP_FILE),
        }
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!(
        schost = %cli.schost,
        scport = cli.scport,
        scname = %cli.scname,
        scsetup = cli.scsetup,
        input = %cli.input.display(),
        "starting"
    );

    let archive = load_archive(&cli.input).map_err(|source| CliError::Archive {
        path: cli.input.clone(),
        source,
    })?;

    let mut driver = CouplingDriver::new(&archive, cli.driver_options())?;
    let mut connector = StandaloneConnector::replaying(driver.context(), &archive);
    let summary = driver.run(&mut connector, &cli.participant())?;

    print_summary(&cli, &summary);
    Ok(())
}

fn print_summary(cli: &Cli, summary: &RunSummary) {
    if cli.scsetup {
        println!("✓ Setup complete: {} regions", summary.regions);
        if cli.writescp {
            println!("  Setup file: {}", SETUP_FILE);
        }
    } else {
        println!("✓ Run complete");
        println!("  Regions: {}", summary.regions);
        println!("  Time steps: {}", summary.time_steps);
        println!("  Iterations: {}", summary.iterations);
        println!("  Restart point: {}", summary.restart_point);
    }
}
