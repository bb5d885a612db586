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

//! Inclusion predicates over the active service identities.
//!
//! Excluded records are expected and are dropped without any log.

use crate::gtfs::{Calendar, CalendarDate, Trip};
use std::collections::BTreeSet;

/// Keeps the records whose service is part of the active service set.
///
/// The set is computed once before the filter is built and is never modified
/// afterwards. Without a set, every record is included.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    service_ids: Option<BTreeSet<String>>,
}

impl ServiceFilter {
    /// Builds the filter over the active service identities.
    pub fn new(service_ids: Option<BTreeSet<String>>) -> Self {
        ServiceFilter { service_ids }
    }

    /// True when there is an active service set and it is empty: nothing in
    /// the feed is worth processing.
    pub fn is_feed_empty(&self) -> bool {
        self.service_ids
            .as_ref()
            .map(BTreeSet::is_empty)
            .unwrap_or(false)
    }

    fn includes(&self, service_id: &str) -> bool {
        self.service_ids
            .as_ref()
            .map(|service_ids| service_ids.contains(service_id))
            .unwrap_or(true)
    }

    /// Should the service validity window be kept
    pub fn include_calendar(&self, calendar: &Calendar) -> bool {
        self.includes(&calendar.service_id)
    }

    /// Should the service exception be kept
    pub fn include_calendar_date(&self, calendar_date: &CalendarDate) -> bool {
        self.includes(&calendar_date.service_id)
    }

    /// Should the trip be kept
    pub fn include_trip(&self, trip: &Trip) -> bool {
        self.includes(&trip.service_id)
    }
}
