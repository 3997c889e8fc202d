use crate::core::collector::collect;
use crate::domain::models::{CollectSummary, CollectorConfig, OutputTarget};
use crate::infra::logger::setup_logger;
use crate::infra::output::{create_writer, report_completion};
use clap::Parser;
use log::{debug, info};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "code-collect", version)]
#[command(about = "Flatten a project's source files into one delimited text file", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    #[arg(long, default_value = "app,components,hooks,lib,data,types,styles")]
    pub include: String,

    #[arg(long, default_value = "node_modules,.next,out,.git")]
    pub exclude: String,

    #[arg(long, default_value = ".ts,.tsx,.js,.jsx,.css")]
    pub ext: String,

    /// Output file, or `-` for stdout
    #[arg(short, long, default_value = "project_source_code.txt")]
    pub output: String,

    #[arg(short, long)]
    pub quiet: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn to_config(&self) -> CollectorConfig {
        CollectorConfig {
            root: self.root.clone(),
            include_dirs: parse_list(&self.include),
            exclude_dirs: parse_list(&self.exclude),
            extensions: parse_list(&self.ext),
            output: OutputTarget::from_arg(&self.output),
        }
    }
}

/// Splits a comma-separated flag value, dropping blank items.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;

    let config = cli.to_config();
    debug!("Collector config: {:?}", config);

    let summary = collect_sources(&config)?;

    if !cli.quiet {
        report_completion(&mut io::stderr(), &summary, &config.output)?;
    }
    Ok(())
}

fn collect_sources(config: &CollectorConfig) -> anyhow::Result<CollectSummary> {
    info!("Opening output {}", config.output);
    let mut writer = create_writer(&config.output)?;

    collect(config, writer.as_mut())
}
