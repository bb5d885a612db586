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

//! Helpers to read CSV files out of a [`FileHandler`].

use crate::file_handler::FileHandler;
use crate::Result;
use anyhow::Context;
use std::result::Result as StdResult;
use tracing::info;
use typed_index_collection::{CollectionWithId, Id};

/// Read a vector of objects from a file_handler
pub fn read_objects<H, O>(file_handler: &mut H, file_name: &str) -> Result<Vec<O>>
where
    for<'a> &'a mut H: FileHandler,
    O: for<'de> serde::Deserialize<'de>,
{
    info!(file_name = %file_name, "Reading");
    let (reader, path) = file_handler.get_file(file_name)?;

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let objects = rdr
        .deserialize()
        .collect::<StdResult<_, _>>()
        .with_context(|| format!("Error reading {:?}", path))?;
    Ok(objects)
}

/// Read a vector of objects from a file_handler, an absent file being empty
pub fn read_opt_objects<H, O>(file_handler: &mut H, file_name: &str) -> Result<Vec<O>>
where
    for<'a> &'a mut H: FileHandler,
    O: for<'de> serde::Deserialize<'de>,
{
    if !file_handler.contains(file_name)? {
        info!(file_name = %file_name, "Skipping");
        return Ok(Vec::new());
    }
    read_objects(file_handler, file_name)
}

/// Read a CollectionWithId from a file_handler
pub fn read_collection<H, O>(file_handler: &mut H, file_name: &str) -> Result<CollectionWithId<O>>
where
    for<'a> &'a mut H: FileHandler,
    O: for<'de> serde::Deserialize<'de> + Id<O>,
{
    let vec = read_objects(file_handler, file_name)?;
    let collection =
        CollectionWithId::new(vec).with_context(|| format!("Error reading {}", file_name))?;
    Ok(collection)
}
