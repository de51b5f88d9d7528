//! The per-route evaluation seam.

use cw_core::Hour;
use cw_estimate::{BaselineSource, EstimateResult, Estimator, RouteStatus};
use cw_routes::Route;

/// Turns one route at one hour into a [`RouteStatus`].
///
/// [`Estimator`] is the production implementation.  The trait exists so the
/// loop's failure handling can be driven by a model that fails on demand.
pub trait RouteEvaluator {
    fn evaluate(
        &self,
        route:  &Route,
        hour:   Hour,
        source: &mut dyn BaselineSource,
    ) -> EstimateResult<RouteStatus>;
}

impl RouteEvaluator for Estimator {
    #[inline]
    fn evaluate(
        &self,
        route:  &Route,
        hour:   Hour,
        source: &mut dyn BaselineSource,
    ) -> EstimateResult<RouteStatus> {
        self.evaluate_route(route, hour, source)
    }
}
