// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Envelope-Lite CLI.
//!
//! Runs the staged envelope build against an in-memory document seeded with
//! the default levels and catalog, then prints the resulting report as JSON.
//!
//! Usage:
//!   envelope-lite [--config envelope.toml] [--width-mm 10000] [--depth-mm 5000]

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use envelope_lite::{build_envelope, MemoryDocument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;

use config::Args;

fn init_logging(verbose: bool, json: bool) {
    let default = if verbose {
        "envelope_lite=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.json_logs);

    let config = args.envelope_config()?;
    tracing::info!(
        width_mm = config.width_mm,
        depth_mm = config.depth_mm,
        wall_thickness_mm = config.wall_thickness_mm,
        base_level = %config.base_level,
        top_level = %config.top_level,
        "Building envelope"
    );

    let mut doc = MemoryDocument::with_default_catalog();
    let report = build_envelope(&mut doc, &config).context("envelope build failed")?;

    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
