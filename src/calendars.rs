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

//! Computation of the active service identities of a feed.

use crate::gtfs::{Calendar, CalendarDate, ExceptionType, Trip};
use crate::objects::Date;
use std::collections::BTreeSet;
use tracing::info;
use typed_index_collection::CollectionWithId;

/// Services with at least one running day, referenced by at least one trip.
///
/// With a `reference_date`, services that stopped running before that date
/// are left out.
pub fn useful_service_ids(
    calendars: &[Calendar],
    calendar_dates: &[CalendarDate],
    trips: &CollectionWithId<Trip>,
    reference_date: Option<Date>,
) -> BTreeSet<String> {
    let is_current = |date: Date| reference_date.map(|r| date >= r).unwrap_or(true);
    let referenced: BTreeSet<&str> = trips.values().map(|t| t.service_id.as_str()).collect();
    let windows = calendars
        .iter()
        .filter(|c| c.has_active_day() && is_current(c.end_date))
        .map(|c| c.service_id.as_str());
    let added_dates = calendar_dates
        .iter()
        .filter(|cd| cd.exception_type == ExceptionType::Add && is_current(cd.date))
        .map(|cd| cd.service_id.as_str());
    let service_ids: BTreeSet<String> = windows
        .chain(added_dates)
        .filter(|service_id| referenced.contains(service_id))
        .map(str::to_string)
        .collect();
    info!("{} useful service(s) found", service_ids.len());
    service_ids
}
