//! Route definitions.

use std::fmt;

use crate::{RegistryError, RegistryResult};

// ── RouteId ───────────────────────────────────────────────────────────────────

/// Unique, human-readable route identifier (e.g. `"Route A"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        RouteId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        RouteId(s.to_owned())
    }
}

impl From<String> for RouteId {
    fn from(s: String) -> Self {
        RouteId(s)
    }
}

impl PartialEq<str> for RouteId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A pedestrian corridor with a fixed crowd capacity.
///
/// Immutable once built.  Fields are private so that the validation in
/// [`Route::new`] cannot be bypassed: every `Route` in existence has a
/// non-empty id, a finite positive length, and a capacity of at least one.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    id:        RouteId,
    length_km: f64,
    capacity:  u32,
}

impl Route {
    /// Validate and construct a route.
    ///
    /// # Errors
    /// [`RegistryError::Configuration`] naming the route if the id is blank,
    /// the length is not a positive finite number, or the capacity is zero.
    pub fn new(id: impl Into<RouteId>, length_km: f64, capacity: u32) -> RegistryResult<Route> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(RegistryError::config(id.as_str(), "route id must not be blank"));
        }
        if !length_km.is_finite() || length_km <= 0.0 {
            return Err(RegistryError::config(
                id.as_str(),
                format!("length_km must be positive, got {length_km}"),
            ));
        }
        if capacity == 0 {
            return Err(RegistryError::config(id.as_str(), "capacity must be positive, got 0"));
        }
        Ok(Route { id, length_km, capacity })
    }

    #[inline]
    pub fn id(&self) -> &RouteId {
        &self.id
    }

    #[inline]
    pub fn length_km(&self) -> f64 {
        self.length_km
    }

    /// Maximum sustainable simultaneous occupants.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
