use clap::Parser;
use std::path::PathBuf;

/// Convert GenBank files into protein (.ptt) and RNA (.rnt) tables
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// GenBank files to convert (gzip, bzip2, xz and zstd inputs are decompressed)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory the tables are written to
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// TOML file overriding the feature-type sets and placeholder text
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}
