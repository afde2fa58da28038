use clap::{Parser, Subcommand};
use repolens::{Analyzer, Reporter, ScanConfig};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "repolens")]
#[command(about = "A fast repository scanner for mapping a source tree and its dependencies")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a repository and write the analysis document
    Scan {
        /// Repository to scan
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for the analysis document
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated entry names to exclude (overrides config;
        /// the name ".hidden" also excludes every dotted entry)
        #[arg(long)]
        exclude: Option<String>,

        /// Log every discovered file
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the config file (defaults to ~/.repolens.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            path,
            config,
            output,
            exclude,
            verbose,
        } => scan_repository(path, config, output, exclude, verbose),
        Commands::Config { output } => generate_config(output),
    }
}

fn scan_repository(
    path: PathBuf,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    exclude: Option<String>,
    verbose: bool,
) -> anyhow::Result<()> {
    let mut config = if let Some(config_path) = config_path {
        ScanConfig::from_file(&config_path)?
    } else {
        ScanConfig::load()?
    };

    config.target_directory = path;
    if let Some(output) = output {
        config.output_directory = output;
    }
    if let Some(exclude) = exclude {
        config.exclude_dirs = exclude
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
    }
    config.verbose = verbose;

    println!("🔍 Scanning: {}", config.target_directory.display());
    let start = Instant::now();

    let output_directory = config.output_directory.clone();
    let analysis = Analyzer::new(config).analyze()?;

    analysis.print_summary();

    let written = Reporter::new().export(&analysis, &output_directory)?;
    println!("\n✅ Scan complete in {:.2}s", start.elapsed().as_secs_f64());
    println!("📁 Analysis written to: {}", written.display());

    Ok(())
}

fn generate_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = match output {
        Some(path) => path,
        None => ScanConfig::default_config_path()?,
    };

    std::fs::write(&config_path, ScanConfig::create_documented_config())?;
    println!("📝 Configuration file created: {}", config_path.display());

    Ok(())
}
