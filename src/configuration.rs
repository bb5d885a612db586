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

//! Configuration of a normalization run.

use crate::{
    objects::Date,
    routes::{AGENCY_COLOR, DEFAULT_ROUTE_COLOR},
    serde_utils::de_option_from_date_string,
    Result,
};
use anyhow::Context;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Parameters of a run, all of them optional in the JSON configuration file.
///
/// ```json
/// {
///     "agency_color": "FDB714",
///     "default_route_color": "08215C",
///     "files_prefix": "ferry_",
///     "reference_date": "20240101"
/// }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Configuration {
    /// Color of the agency
    pub agency_color: String,
    /// Color of the routes which have none in the feed
    pub default_route_color: String,
    /// Prefix of every output file name
    pub files_prefix: String,
    /// Services which stopped running before this date are ignored
    #[serde(deserialize_with = "de_option_from_date_string")]
    pub reference_date: Option<Date>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            agency_color: AGENCY_COLOR.to_string(),
            default_route_color: DEFAULT_ROUTE_COLOR.to_string(),
            files_prefix: String::new(),
            reference_date: None,
        }
    }
}

/// Reads the configuration from a JSON file, the default configuration being
/// used without file.
pub fn read_config<P: AsRef<Path>>(config_path: Option<P>) -> Result<Configuration> {
    let config_path = match config_path {
        Some(config_path) => config_path,
        None => return Ok(Configuration::default()),
    };
    let config_path = config_path.as_ref();
    info!("Reading configuration from {:?}", config_path);
    let json_config_file =
        File::open(config_path).with_context(|| format!("Error reading {:?}", config_path))?;
    let configuration = serde_json::from_reader(json_config_file)
        .with_context(|| format!("Error reading {:?}", config_path))?;
    Ok(configuration)
}
