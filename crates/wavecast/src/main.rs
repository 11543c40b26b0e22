mod replay;

use anyhow::{Context, Error};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use wavecast_core::logging::{init_logging, shutdown_logging};
use wavecast_core::settings::{Settings, SETTINGS_PATH};
use wavecast_core::NavigationHost;

/// Replays a script of navigation commands against a fresh backstack.
#[derive(Parser, Debug)]
#[command(name = "wavecast", version)]
struct Cli {
    /// Settings file
    #[arg(short, long, default_value = SETTINGS_PATH)]
    settings: PathBuf,

    /// Deep link opened on top of home before the script runs
    #[arg(long)]
    start: Option<String>,

    /// Print the backstack as JSON instead of a breadcrumb
    #[arg(long)]
    json: bool,

    /// Script file, one `back` or deep link per line (`-` for stdin)
    script: PathBuf,
}

fn open_script(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file =
        File::open(path).with_context(|| format!("can't open script {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut settings = Settings::load_or_default(&cli.settings);
    if let Some(start) = cli.start {
        settings.navigation.start_link = Some(start);
    }

    init_logging(&settings.logging)?;

    let mut host = NavigationHost::from_settings(&settings.navigation);
    let script = open_script(&cli.script)?;
    let format = if cli.json {
        replay::Format::Json
    } else {
        replay::Format::Breadcrumb
    };

    let summary = replay::replay(&mut host, script, io::stdout().lock(), format)?;
    tracing::info!(
        commands = summary.commands,
        changes = summary.changes,
        rejected = summary.rejected,
        depth = host.backstack().len(),
        "replay finished"
    );

    Ok(())
}

fn main() -> Result<(), Error> {
    let result = run(Cli::parse());
    shutdown_logging();
    result
}
