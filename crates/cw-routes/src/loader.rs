//! CSV route loader.
//!
//! # CSV format
//!
//! One row per route, in the order the routes should be reported.
//!
//! ```csv
//! route_id,length_km,capacity
//! Route A,2.5,5000
//! Route B,3.0,7000
//! ```
//!
//! Values that parse as numbers but break a route invariant (a capacity that
//! is zero, negative or above `u32::MAX`, a non-positive length, a repeated
//! id) are reported as [`RegistryError::Configuration`] naming the route;
//! malformed rows are [`RegistryError::Parse`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{RegistryBuilder, RegistryError, RegistryResult, RouteRegistry};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RouteRecord {
    route_id:  String,
    length_km: f64,
    capacity:  i64,
}

impl RouteRecord {
    fn capacity(&self) -> RegistryResult<u32> {
        if self.capacity <= 0 {
            return Err(RegistryError::config(&self.route_id, "capacity must be positive"));
        }
        u32::try_from(self.capacity).map_err(|_| {
            RegistryError::config(&self.route_id, format!("capacity {} is too large", self.capacity))
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RouteRegistry`] from a CSV file.
pub fn load_routes_csv(path: &Path) -> RegistryResult<RouteRegistry> {
    let file = std::fs::File::open(path).map_err(RegistryError::Io)?;
    load_routes_reader(file)
}

/// Like [`load_routes_csv`] but accepts any `Read` source.
pub fn load_routes_reader<R: Read>(reader: R) -> RegistryResult<RouteRegistry> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = RegistryBuilder::new();
    for (line, result) in csv_reader.deserialize::<RouteRecord>().enumerate() {
        let row = result.map_err(|e| RegistryError::Parse(format!("row {}: {e}", line + 1)))?;
        let capacity = row.capacity()?;
        builder = builder.add_route(row.route_id, row.length_km, capacity);
    }
    builder.build()
}
