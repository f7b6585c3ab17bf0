use clap::Parser;
use console::style;
use sizesnap::cmd;
use sizesnap::fmt::CROSSMARK;
use std::path::PathBuf;
use std::process;

/// Static site build with bundle size snapshots
///
/// Copies the asset manifest into the dist folder, reports raw, gzip and
/// brotli sizes, and asks before accepting any size change into the
/// snapshot. In CI every change is declined.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory holding the source folder and the snapshot
    #[arg(long, value_name = "DIR", default_value = ".")]
    project_root: PathBuf,

    /// Configuration file (defaults to sizesnap.toml in the project root)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    let result = cmd::cmd_build(&cli.project_root, cli.config.as_deref());

    if let Err(e) = result {
        use sizesnap::error::ErrorFormatter;
        eprintln!("{} {}", CROSSMARK, style("Build failed.").red().bold());
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
