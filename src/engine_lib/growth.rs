// src/engine_lib/growth.rs

use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::chain::Chain;
use super::cog::{
    Cog, CogId, SurfaceBounds, MAX_TOOTH_COUNT, MESH_SPOKE_RANGE, MIN_RADIUS, MIN_TOOTH_COUNT,
    PALETTE, RADIUS_DECREMENT, RADIUS_JITTER, SEED_RADIUS_MAX, SEED_RADIUS_MIN, SEED_SPOKE_RANGE,
    SEED_TOOTH_RANGE, SILHOUETTE_FACTOR,
};
use super::kinematics::mesh_placement;
use super::trig::AngleTable;
use super::validate::is_valid;

/// Grows the chain one cog at a time: random parameter draws, kinematic
/// placement, then a backtracking sweep over the parent's mesh slots and a
/// shrinking radius until a valid spot is found or the attempt is abandoned.
/// Growing never fails outward; an unplaceable candidate simply does not
/// enter the chain.
pub struct GrowthEngine {
    rng: StdRng,
    /// Last successfully grown cog; the chain extends linearly from here.
    /// `None` after a failed attempt, which re-targets a uniformly random
    /// cog on the next try.
    preferred_parent: Option<CogId>,
}

impl GrowthEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            preferred_parent: None,
        }
    }

    /// Deterministic engine for tests and benches.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            preferred_parent: None,
        }
    }

    /// One growth attempt. Appends at most one cog.
    pub fn grow(&mut self, chain: &mut Chain, bounds: &SurfaceBounds, trig: &AngleTable) {
        if chain.is_empty() {
            self.grow_seed(chain, bounds);
        } else {
            self.grow_meshed(chain, bounds, trig);
        }
    }

    fn grow_seed(&mut self, chain: &mut Chain, bounds: &SurfaceBounds) {
        // Cap the draw so the inset placement range below stays non-empty
        // on small surfaces.
        let radius_cap =
            SEED_RADIUS_MAX.min(bounds.width.min(bounds.height) / (2.0 * SILHOUETTE_FACTOR));
        let radius = self.rng.gen_range(SEED_RADIUS_MIN..radius_cap);
        let inset = radius * SILHOUETTE_FACTOR;
        let center = DVec2::new(
            self.rng.gen_range(inset..bounds.width - inset),
            self.rng.gen_range(inset..bounds.height - inset),
        );
        let tooth_count = self.rng.gen_range(SEED_TOOTH_RANGE);
        let spoke_count = self.rng.gen_range(SEED_SPOKE_RANGE);
        let color = self.pick_color();

        let id = chain.push(Cog::seed(center, radius, tooth_count, spoke_count, color));
        self.preferred_parent = Some(id);
        log::debug!("seeded chain: cog {:?} r={:.1} at {:?}", id, radius, center);
    }

    fn grow_meshed(&mut self, chain: &mut Chain, bounds: &SurfaceBounds, trig: &AngleTable) {
        let Some(parent_id) = self.choose_parent(chain) else {
            return;
        };
        let Some(parent) = chain.get(parent_id).cloned() else {
            return;
        };

        let jitter = self.rng.gen_range(-RADIUS_JITTER..RADIUS_JITTER);
        let mut radius = parent.radius * (1.0 + jitter);
        let tooth_count = (parent.tooth_count + 1 - self.rng.gen_range(0..3))
            .clamp(MIN_TOOTH_COUNT, MAX_TOOTH_COUNT);
        let spoke_count = self.rng.gen_range(MESH_SPOKE_RANGE);
        let mut tooth_index = self.rng.gen_range(0..parent.tooth_count);
        let color = self.pick_color();

        // Sweep every mesh slot at the current radius; after a full
        // revolution without a fit, shrink and sweep again. Candidates are
        // built as values and only committed once valid.
        while radius >= MIN_RADIUS {
            for _ in 0..parent.tooth_count {
                let placement = mesh_placement(radius, tooth_index, tooth_count, &parent, trig);
                let candidate = Cog::meshed(
                    placement.center,
                    radius,
                    tooth_count,
                    tooth_index,
                    placement.ratio,
                    placement.angle_start,
                    spoke_count,
                    color,
                    parent_id,
                );
                if is_valid(&candidate, parent_id, chain, bounds) {
                    let id = chain.push(candidate);
                    self.preferred_parent = Some(id);
                    log::debug!(
                        "grew cog {:?} from {:?} at tooth {} r={:.1}",
                        id,
                        parent_id,
                        tooth_index,
                        radius
                    );
                    return;
                }
                tooth_index = (tooth_index + 1) % parent.tooth_count;
            }
            radius -= RADIUS_DECREMENT;
        }

        // This parent is structurally exhausted in every direction; try a
        // random one next time.
        self.preferred_parent = None;
        log::debug!("no placement around {:?}, will re-target", parent_id);
    }

    fn choose_parent(&mut self, chain: &Chain) -> Option<CogId> {
        match self.preferred_parent {
            Some(id) if chain.contains(id) => Some(id),
            // Preferred parent faded out: extend from the newest cog.
            Some(_) => chain.newest().map(|(id, _)| id),
            None => {
                let index = self.rng.gen_range(0..chain.len());
                chain.ids().get(index).copied()
            }
        }
    }

    fn pick_color(&mut self) -> [f32; 4] {
        PALETTE[self.rng.gen_range(0..PALETTE.len())]
    }
}

impl Default for GrowthEngine {
    fn default() -> Self {
        Self::new()
    }
}
