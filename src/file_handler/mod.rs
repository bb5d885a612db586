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

//! Access to the files of a GTFS feed, published either as a directory or as
//! a zip archive.
use crate::Result;
use anyhow::{anyhow, bail, Context};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{Read, Seek},
    path::{Path, PathBuf},
};

/// Files every feed provides.
pub const REQUIRED_FILES: [&str; 4] = ["routes.txt", "stops.txt", "trips.txt", "stop_times.txt"];

/// Files of which a feed provides at least one.
pub const CALENDAR_FILES: [&str; 2] = ["calendar.txt", "calendar_dates.txt"];

/// Source of the files of a feed.
///
/// Implemented on `&mut` handlers, so that every opened file borrows its
/// handler.
pub trait FileHandler: Sized {
    /// Reader of one file
    type Reader: Read;

    /// Opens `name`, with `None` when the feed has no such file. The path
    /// names the file in messages.
    fn open(self, name: &str) -> Result<(Option<Self::Reader>, PathBuf)>;

    /// Whether the feed has a file named `name`
    fn contains(self, name: &str) -> Result<bool> {
        Ok(self.open(name)?.0.is_some())
    }

    /// Opens `name`, failing when the feed has no such file
    fn get_file(self, name: &str) -> Result<(Self::Reader, PathBuf)> {
        match self.open(name)? {
            (Some(reader), path) => Ok((reader, path)),
            (None, path) => Err(anyhow!("file {:?} not found", path)),
        }
    }
}

/// Fails, naming every missing file, when the feed lacks a required file or
/// has neither `calendar.txt` nor `calendar_dates.txt`.
pub fn check_feed_files<H>(file_handler: &mut H) -> Result<()>
where
    for<'a> &'a mut H: FileHandler,
{
    let mut missing = Vec::new();
    for name in REQUIRED_FILES.iter() {
        if !file_handler.contains(name)? {
            missing.push(name.to_string());
        }
    }
    let mut has_calendar = false;
    for name in CALENDAR_FILES.iter() {
        has_calendar |= file_handler.contains(name)?;
    }
    if !has_calendar {
        missing.push("calendar_dates.txt or calendar.txt".to_string());
    }
    if !missing.is_empty() {
        bail!("{} not found", missing.join(", "));
    }
    Ok(())
}

/// Feed stored as plain files in a directory
pub struct PathFileHandler<P: AsRef<Path>> {
    feed_dir: P,
}

impl<P: AsRef<Path>> PathFileHandler<P> {
    /// Reads the feed stored in `feed_dir`
    pub fn new(feed_dir: P) -> Self {
        PathFileHandler { feed_dir }
    }
}

impl<'a, P: AsRef<Path>> FileHandler for &'a mut PathFileHandler<P> {
    type Reader = File;
    fn open(self, name: &str) -> Result<(Option<Self::Reader>, PathBuf)> {
        let path = self.feed_dir.as_ref().join(name);
        if !path.is_file() {
            return Ok((None, path));
        }
        let file = File::open(&path).with_context(|| format!("Error reading {:?}", path))?;
        Ok((Some(file), path))
    }
}

/// Feed stored in a zip archive.
///
/// Files are found by base name, wherever they are in the archive, since
/// some agencies publish their feed in a sub directory.
pub struct ZipHandler<R: Seek + Read> {
    archive: zip::ZipArchive<R>,
    archive_path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl<R: Seek + Read> ZipHandler<R> {
    /// Reads the archive from `reader`, `archive_path` only naming it in
    /// messages
    pub fn new<P: AsRef<Path>>(reader: R, archive_path: P) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)?;
        let entries = archive
            .file_names()
            .filter_map(|entry| {
                let base_name = Path::new(entry).file_name()?.to_str()?;
                Some((base_name.to_string(), entry.to_string()))
            })
            .collect();
        Ok(ZipHandler {
            archive,
            archive_path: archive_path.as_ref().to_path_buf(),
            entries,
        })
    }
}

impl<'a, R: Seek + Read> FileHandler for &'a mut ZipHandler<R> {
    type Reader = zip::read::ZipFile<'a>;
    fn open(self, name: &str) -> Result<(Option<Self::Reader>, PathBuf)> {
        let path = self.archive_path.join(name);
        let ZipHandler {
            archive, entries, ..
        } = self;
        match entries.get(name) {
            None => Ok((None, path)),
            Some(entry) => {
                let file = archive
                    .by_name(entry)
                    .with_context(|| format!("Error reading {:?}", path))?;
                Ok((Some(file), path))
            }
        }
    }
}
