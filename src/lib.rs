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

//! The `ferry_model` crate normalizes the [GTFS](http://gtfs.org/) feed of the
//! Halifax Transit ferries.
//!
//! Each ferry route is split into exactly two canonical directional trips
//! described by a [`route_trip_spec::RouteTripSpec`]; stops, routes and
//! labels are normalized along the way.
//!
//! ```no_run
//! # fn main() -> ferry_model::Result<()> {
//! let feed = ferry_model::gtfs::read("input/gtfs.zip")?;
//! let configuration = ferry_model::configuration::Configuration::default();
//! let output = ferry_model::pipeline::transform(feed, &configuration)?;
//! ferry_model::write::write(&output, "output", &configuration.files_prefix)?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod agency;
pub mod calendars;
pub mod configuration;
mod error;
#[doc(hidden)]
pub mod feed_builder;
pub mod file_handler;
pub mod gtfs;
pub mod labels;
pub mod objects;
pub mod pipeline;
pub mod read_utils;
pub mod route_trip_spec;
pub mod routes;
pub mod serde_utils;
pub mod service_filter;
pub mod stop_identity;
#[doc(hidden)]
pub mod test_utils;
pub mod write;

pub use crate::error::Error;

/// The result type used by the feed reading and writing layers.
pub type Result<T> = anyhow::Result<T>;

/// Route type of every route of the agency (GTFS `route_type` for ferries).
pub const AGENCY_ROUTE_TYPE: u16 = 4;
