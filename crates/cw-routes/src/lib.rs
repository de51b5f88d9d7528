//! `cw-routes` - the route registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`route`]    | `RouteId`, `Route`                                         |
//! | [`registry`] | `RouteRegistry`, `RegistryBuilder`                         |
//! | [`loader`]   | `load_routes_csv`, `load_routes_reader`                    |
//! | [`error`]    | `RegistryError`, `RegistryResult<T>`                       |
//!
//! # Ordering
//!
//! Routes are held in a `Vec` in definition order.  Every iteration over a
//! registry visits routes in that order, and the order never changes after
//! [`RegistryBuilder::build`].  Lookups by id are a linear scan; registries
//! hold a handful of corridors, not thousands.

pub mod error;
pub mod loader;
pub mod registry;
pub mod route;


pub use error::{RegistryError, RegistryResult};
pub use loader::{load_routes_csv, load_routes_reader};
pub use registry::{RegistryBuilder, RouteRegistry};
pub use route::{Route, RouteId};
