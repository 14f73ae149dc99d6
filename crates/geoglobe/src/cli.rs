//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use geoglobe_core::{Options, Result};

/// Globe viewer for loan and lender locations.
#[derive(Parser, Debug, Clone)]
#[command(name = "geoglobe", version)]
pub struct Cli {
    /// Directory holding countries.shp, loans.csv and lenders.csv.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// JSON options file; unset values keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render one frame headless to this file (.png or .jpg) and exit.
    #[arg(long)]
    pub screenshot: Option<PathBuf>,

    /// Window or screenshot width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window or screenshot height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Skip layers whose input files are missing.
    #[arg(long, default_value_t = false)]
    pub skip_missing: bool,
}

impl Cli {
    /// Loads the config file, if any, and applies the command line overrides.
    pub fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_json_file(path)?,
            None => Options::default(),
        };
        if let Some(dir) = &self.data_dir {
            options.data_dir.clone_from(dir);
        }
        if let Some(width) = self.width {
            options.window.width = width;
        }
        if let Some(height) = self.height {
            options.window.height = height;
        }
        if self.skip_missing {
            options.skip_missing_layers = true;
        }
        Ok(options)
    }
}
