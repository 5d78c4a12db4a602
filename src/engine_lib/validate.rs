// src/engine_lib/validate.rs

use super::chain::Chain;
use super::cog::{Cog, CogId, SurfaceBounds, MIN_RADIUS, OVERLAP_MARGIN, RADIUS_JITTER, SILHOUETTE_FACTOR};

/// Whether `candidate` may join the chain meshed against `parent_id`.
///
/// Checks run cheapest-first and short-circuit, but the order does not
/// affect the outcome:
/// 1. minimum legible radius,
/// 2. radius within the jitter band of the parent,
/// 3. full silhouette (tooth tips included) on screen,
/// 4. clear air against every cog except the parent.
///
/// The candidate is not yet in the chain when this runs; it is committed
/// only on success.
pub fn is_valid(candidate: &Cog, parent_id: CogId, chain: &Chain, bounds: &SurfaceBounds) -> bool {
    if candidate.radius < MIN_RADIUS {
        return false;
    }

    let Some(parent) = chain.get(parent_id) else {
        return false;
    };
    if candidate.radius < parent.radius * (1.0 - RADIUS_JITTER)
        || candidate.radius > parent.radius * (1.0 + RADIUS_JITTER)
    {
        return false;
    }

    let inset = candidate.radius * SILHOUETTE_FACTOR;
    if candidate.center.x < inset
        || candidate.center.y < inset
        || candidate.center.x > bounds.width - inset
        || candidate.center.y > bounds.height - inset
    {
        return false;
    }

    // The parent is expected to sit close (they mesh); everything else must
    // keep clear air between tooth tips.
    for (id, other) in chain.iter() {
        if id == parent_id {
            continue;
        }
        let spacing = candidate.center.distance(other.center);
        if spacing < OVERLAP_MARGIN * (candidate.radius + other.radius) {
            return false;
        }
    }

    true
}
