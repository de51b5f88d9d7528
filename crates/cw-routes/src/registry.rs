//! The ordered route registry and its builder.

use std::collections::HashSet;

use tracing::info;

use crate::{RegistryError, RegistryResult, Route, RouteId};

// ── Built-in route table ──────────────────────────────────────────────────────

/// `(id, length_km, capacity)` for the routes monitored out of the box.
const DEFAULT_ROUTES: &[(&str, f64, u32)] = &[
    ("Route A", 2.5, 5_000),
    ("Route B", 3.0, 7_000),
    ("Route C", 1.8, 4_000),
    ("Route D", 2.2, 6_000),
];

// ── RouteRegistry ─────────────────────────────────────────────────────────────

/// Ordered, immutable collection of [`Route`]s.
///
/// Iteration order is definition order.  There are no mutation methods; build
/// a new registry with [`RegistryBuilder`] to change the route set.
#[derive(Clone, Debug)]
pub struct RouteRegistry {
    routes: Vec<Route>,
}

impl RouteRegistry {
    /// The built-in pilgrimage route table.
    pub fn default_routes() -> RegistryResult<RouteRegistry> {
        DEFAULT_ROUTES
            .iter()
            .fold(RegistryBuilder::new(), |b, &(id, len, cap)| b.add_route(id, len, cap))
            .build()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in definition order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by id.
    ///
    /// # Errors
    /// [`RegistryError::NotFound`] if no route has this id.
    pub fn get(&self, id: &str) -> RegistryResult<&Route> {
        self.routes
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_owned()))
    }

    /// Route ids in definition order.
    pub fn ids(&self) -> impl Iterator<Item = &RouteId> + '_ {
        self.routes.iter().map(Route::id)
    }
}

impl<'a> IntoIterator for &'a RouteRegistry {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

// ── RegistryBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`RouteRegistry`].
///
/// Validation is deferred to [`build`](RegistryBuilder::build) so that a
/// whole route table can be declared in one expression and the first invalid
/// entry reported with its name.
///
/// # Example
///
/// ```rust
/// use cw_routes::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .add_route("A", 1.0, 4_000)
///     .add_route("B", 2.5, 7_000)
///     .build()
///     .unwrap();
/// let ids: Vec<&str> = registry.ids().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["A", "B"]);
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    pending: Vec<(RouteId, f64, u32)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route definition.  Order of calls is iteration order.
    pub fn add_route(mut self, id: impl Into<RouteId>, length_km: f64, capacity: u32) -> Self {
        self.pending.push((id.into(), length_km, capacity));
        self
    }

    /// Validate every route and freeze the registry.
    ///
    /// # Errors
    /// - [`RegistryError::Configuration`] for the first route with a blank id,
    ///   non-positive length, zero capacity, or an id already used earlier.
    /// - [`RegistryError::Empty`] if no routes were added.
    pub fn build(self) -> RegistryResult<RouteRegistry> {
        if self.pending.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen: HashSet<RouteId> = HashSet::with_capacity(self.pending.len());
        let mut routes = Vec::with_capacity(self.pending.len());

        for (id, length_km, capacity) in self.pending {
            if !seen.insert(id.clone()) {
                return Err(RegistryError::config(id.as_str(), "duplicate route id"));
            }
            routes.push(Route::new(id, length_km, capacity)?);
        }

        info!(routes = routes.len(), "route registry built");
        Ok(RouteRegistry { routes })
    }
}
