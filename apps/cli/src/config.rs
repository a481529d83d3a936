// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line arguments and envelope configuration loading.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use envelope_lite::EnvelopeConfig;

/// Build a rectangular building envelope and print what was created.
#[derive(Debug, Parser)]
#[command(name = "envelope-lite", version, about)]
pub struct Args {
    /// TOML file with envelope parameters (missing keys keep their defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Footprint width in millimetres
    #[arg(long)]
    pub width_mm: Option<f64>,

    /// Footprint depth in millimetres
    #[arg(long)]
    pub depth_mm: Option<f64>,

    /// Wall thickness in millimetres
    #[arg(long)]
    pub thickness_mm: Option<f64>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Debug-level logging for envelope crates
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Args {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn envelope_config(&self) -> Result<EnvelopeConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                parse_config(&text).with_context(|| format!("parsing config {}", path.display()))?
            }
            None => EnvelopeConfig::default(),
        };

        if let Some(width) = self.width_mm {
            config.width_mm = width;
        }
        if let Some(depth) = self.depth_mm {
            config.depth_mm = depth;
        }
        if let Some(thickness) = self.thickness_mm {
            config.wall_thickness_mm = thickness;
        }
        Ok(config)
    }
}

pub fn parse_config(text: &str) -> Result<EnvelopeConfig> {
    Ok(toml::from_str(text)?)
}
