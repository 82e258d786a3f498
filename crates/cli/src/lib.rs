use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use indexinfo_indexer::{EmitOutcome, IndexReport, IndexerConfig, InfoIndexer};
use std::io;
use std::path::PathBuf;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "indexinfo")]
#[command(about = "Generate the info directory index from a directory of manuals", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing *.info and *.info.gz manuals
    #[arg(value_name = "INFO_DIR")]
    dir: PathBuf,

    /// Name of the index file written inside INFO_DIR
    #[arg(long, default_value = "dir")]
    output_name: String,

    /// Visit manuals sorted by file name (default: directory order)
    #[arg(long)]
    sort: bool,

    /// Ignore gzip-compressed manuals
    #[arg(long)]
    no_compressed: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only errors
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn indexer_config(&self) -> IndexerConfig {
        IndexerConfig {
            output_name: self.output_name.clone(),
            sort_by_name: self.sort,
            include_compressed: !self.no_compressed,
            ..Default::default()
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let indexer = InfoIndexer::with_config(&cli.dir, cli.indexer_config())
        .context("Invalid indexinfo options")?;
    log::debug!("Indexing {} with {:?}", indexer.root().display(), indexer.config());
    let report = indexer
        .run()
        .with_context(|| format!("Failed to index {}", indexer.root().display()))?;

    if cli.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    } else {
        log_summary(&report);
    }
    Ok(())
}

fn log_summary(report: &IndexReport) {
    match &report.outcome {
        EmitOutcome::Written {
            path,
            sections,
            entries,
            ..
        } => log::info!(
            "{}: {sections} sections, {entries} entries from {} manuals",
            path.display(),
            report.stats.files_parsed
        ),
        EmitOutcome::Removed { path } => {
            log::info!("No entries found, removed stale {}", path.display())
        }
        EmitOutcome::Absent { path } => {
            log::info!("No entries found, {} not written", path.display())
        }
    }
    for error in &report.stats.errors {
        log::debug!("skipped: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_onto_indexer_config() {
        let cli = Cli::parse_from([
            "indexinfo",
            "/usr/share/info",
            "--sort",
            "--no-compressed",
            "--output-name",
            "dir.new",
        ]);
        let config = cli.indexer_config();
        assert!(config.sort_by_name);
        assert!(!config.include_compressed);
        assert_eq!(config.output_name, "dir.new");
        assert_eq!(cli.dir, PathBuf::from("/usr/share/info"));
    }

    #[test]
    fn directory_argument_is_required() {
        assert!(Cli::try_parse_from(["indexinfo"]).is_err());
        assert!(Cli::try_parse_from(["indexinfo", "a", "b"]).is_err());
    }
}
