use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "power-tables")]
#[command(about = "Build power and Type I error tables from simulation result records")]
#[command(version)]
pub struct CliArgs {
    /// Report layout file (TOML) naming every table and its source records
    #[arg(long, short = 'l', value_name = "FILE", default_value = "report.toml")]
    pub layout: PathBuf,

    /// Directory the record paths are relative to (overrides `input_dir` in the layout)
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving one table_<N>.json per built table
    #[arg(long, short = 'o', value_name = "DIR", default_value = "results")]
    pub output_dir: PathBuf,

    /// Only build these table numbers
    /// Can specify multiple: --tables 1 7
    #[arg(long, value_name = "N", num_args = 1..)]
    pub tables: Vec<u32>,

    /// Skip the console preview of each built table
    #[arg(long)]
    pub no_preview: bool,

    /// Override console width for the preview (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        let mut args = CliArgs::parse();

        // `--tables 3 1 3` builds each table once, in number order
        args.tables.sort_unstable();
        args.tables.dedup();

        args
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if !self.layout.is_file() {
            return Err(format!("Layout file {} not found", self.layout.display()));
        }

        if let Some(dir) = &self.input_dir
            && !dir.is_dir()
        {
            return Err(format!("Input directory {} does not exist", dir.display()));
        }

        if self.console_width == Some(0) {
            return Err("--console-width must be greater than zero".to_string());
        }

        Ok(())
    }
}
