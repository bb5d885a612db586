// Copyright (C) 2017 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

use chrono::NaiveDate;
use clap::Parser;
use ferry_model::{configuration, gtfs, pipeline, write, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

#[derive(Debug, Parser)]
#[command(
    name = "gtfs2ferry",
    about = "Normalize the GTFS of the Halifax Transit ferries.",
    version
)]
struct Opt {
    /// Input directory or zip file.
    #[arg(short = 'i', long = "input", default_value = "input/gtfs.zip")]
    input: PathBuf,

    /// Output directory, created if needed.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// JSON file containing additional configuration.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Prefix added to the name of every output file.
    #[arg(short = 'p', long = "files-prefix")]
    files_prefix: Option<String>,

    /// Services which stopped running before this date (YYYYMMDD) are ignored.
    #[arg(short = 'd', long = "date", value_parser = parse_date)]
    date: Option<NaiveDate>,
}

fn parse_date(date: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y%m%d")
        .map_err(|e| format!("'{}' is not a YYYYMMDD date: {}", date, e))
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter_subscriber = EnvFilter::try_new(rust_log).unwrap_or_else(|e| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            e,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter_subscriber)
        .init();
}

fn run(opt: Opt) -> Result<()> {
    info!("Launching gtfs2ferry...");

    let mut configuration = configuration::read_config(opt.config)?;
    if let Some(files_prefix) = opt.files_prefix {
        configuration.files_prefix = files_prefix;
    }
    if let Some(date) = opt.date {
        configuration.reference_date = Some(date);
    }

    let feed = gtfs::read(opt.input)?;
    let output = pipeline::transform(feed, &configuration)?;
    write::write(&output, opt.output, &configuration.files_prefix)?;
    Ok(())
}

fn main() {
    init_logger();
    if let Err(err) = run(Opt::parse()) {
        for cause in err.chain() {
            eprintln!("{cause}");
        }
        std::process::exit(1);
    }
}
