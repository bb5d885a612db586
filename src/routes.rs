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

//! Canonical identity of the agency routes.

use crate::{gtfs, objects::RouteId, Error};
use lazy_static::lazy_static;
use std::collections::BTreeMap;

/// Color of the agency.
pub const AGENCY_COLOR: &str = "FDB714";
/// Color of the routes which have none in the feed.
pub const DEFAULT_ROUTE_COLOR: &str = "08215C";

/// Canonical identifier of the Alderney ferry.
pub const RID_ALD: RouteId = 100_001;
/// Canonical identifier of the Woodside ferry.
pub const RID_WS: RouteId = 100_002;

/// Canonical identity of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteIdentity {
    /// Canonical numeric identifier
    pub id: RouteId,
    /// Canonical short name
    pub short_name: &'static str,
    /// Canonical long name
    pub long_name: &'static str,
}

lazy_static! {
    static ref ROUTE_IDENTITIES: BTreeMap<&'static str, RouteIdentity> = {
        let mut m = BTreeMap::new();
        m.insert(
            "FerD",
            RouteIdentity {
                id: RID_ALD,
                short_name: "ALD",
                long_name: "Alderney",
            },
        );
        m.insert(
            "FerW",
            RouteIdentity {
                id: RID_WS,
                short_name: "WS",
                long_name: "Woodside",
            },
        );
        m
    };
}

/// Looks up the canonical identity of a raw route from its short name.
///
/// The lookup is exact and case-sensitive.
pub fn resolve(route: &gtfs::Route) -> Result<RouteIdentity, Error> {
    ROUTE_IDENTITIES
        .get(route.short_name.as_str())
        .copied()
        .ok_or_else(|| Error::UnknownRoute {
            route_id: route.id.clone(),
            short_name: route.short_name.clone(),
        })
}

/// Color of a raw route, `default_color` when the feed has none.
pub fn route_color(route: &gtfs::Route, default_color: &str) -> String {
    match route.color.as_deref().map(str::trim) {
        Some(color) if !color.is_empty() => color.to_string(),
        _ => default_color.to_string(),
    }
}
