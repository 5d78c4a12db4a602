// src/engine_lib/lifecycle.rs

use super::chain::Chain;
use super::cog::{SurfaceBounds, ALPHA_DELTA, ANGLE_STEP, PRIMING_ATTEMPTS, SPAWN_INTERVAL};
use super::growth::GrowthEngine;
use super::trig::AngleTable;

/// Frame-driven owner of the simulation: the chain, the growth engine, the
/// spawn countdown and the global rotation driver. One `tick` per display
/// refresh, strictly before stroke generation reads the chain.
pub struct Lifecycle {
    chain: Chain,
    growth: GrowthEngine,
    trig: AngleTable,
    bounds: SurfaceBounds,
    countdown: u32,
    global_angle: f64,
}

impl Lifecycle {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_engine(width, height, GrowthEngine::new())
    }

    /// Deterministic lifecycle for tests and benches.
    pub fn seeded(width: f64, height: f64, seed: u64) -> Self {
        Self::with_engine(width, height, GrowthEngine::seeded(seed))
    }

    fn with_engine(width: f64, height: f64, growth: GrowthEngine) -> Self {
        let mut lifecycle = Self {
            chain: Chain::new(),
            growth,
            trig: AngleTable::new(),
            bounds: SurfaceBounds::new(width, height),
            countdown: SPAWN_INTERVAL,
            global_angle: 0.0,
        };
        // Prime the chain so the first frame is already populated.
        for _ in 0..PRIMING_ATTEMPTS {
            lifecycle.grow_now();
        }
        log::info!(
            "lifecycle ready: {} cogs on a {:.0}x{:.0} surface",
            lifecycle.chain.len(),
            width,
            height
        );
        lifecycle
    }

    /// Advances the simulation by one frame: spawn countdown, expiry of the
    /// oldest cog, reseed if empty, global rotation, fade. The chain is
    /// guaranteed non-empty when this returns.
    pub fn tick(&mut self) {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.grow_now();
        }

        // Cogs fade strictly in creation order, so only the front can
        // expire.
        if self.chain.front().is_some_and(|cog| cog.alpha <= 0.0) {
            if let Some((id, _)) = self.chain.pop_front() {
                log::debug!("cog {:?} faded out", id);
            }
        }
        if self.chain.is_empty() {
            self.grow_now();
        }

        self.global_angle += ANGLE_STEP;

        for cog in self.chain.cogs_mut() {
            cog.alpha -= ALPHA_DELTA;
        }
    }

    fn grow_now(&mut self) {
        self.growth.grow(&mut self.chain, &self.bounds, &self.trig);
        self.countdown = SPAWN_INTERVAL;
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn global_angle(&self) -> f64 {
        self.global_angle
    }

    pub fn trig(&self) -> &AngleTable {
        &self.trig
    }

    pub fn bounds(&self) -> &SurfaceBounds {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primes_a_populated_chain() {
        let lifecycle = Lifecycle::seeded(800.0, 600.0, 1);
        assert!(!lifecycle.chain().is_empty());
    }

    #[test]
    fn chain_is_never_empty_after_a_tick() {
        let mut lifecycle = Lifecycle::seeded(800.0, 600.0, 2);
        for _ in 0..1500 {
            lifecycle.tick();
            assert!(lifecycle.chain().len() >= 1);
        }
    }

    #[test]
    fn alpha_fades_by_exactly_one_delta_per_tick() {
        let mut lifecycle = Lifecycle::seeded(800.0, 600.0, 3);
        let tracked: Vec<_> = lifecycle
            .chain()
            .iter()
            .map(|(id, cog)| (id, cog.alpha))
            .collect();
        lifecycle.tick();
        for (id, alpha_before) in tracked {
            if let Some(cog) = lifecycle.chain().get(id) {
                assert!((cog.alpha - (alpha_before - ALPHA_DELTA)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn oldest_cog_expires_first() {
        let mut lifecycle = Lifecycle::seeded(800.0, 600.0, 4);
        let first_front_alpha = lifecycle.chain().front().map(|c| c.alpha);
        // Every cog fades at the same rate, so the front always has the
        // lowest (or tied) alpha.
        for _ in 0..2000 {
            lifecycle.tick();
            let front = lifecycle.chain().front().expect("chain never empties");
            for cog in lifecycle.chain().cogs() {
                assert!(front.alpha <= cog.alpha + 1e-12);
            }
        }
        assert!(first_front_alpha.is_some());
    }

    #[test]
    fn global_angle_advances_by_the_fixed_step() {
        let mut lifecycle = Lifecycle::seeded(800.0, 600.0, 5);
        let start = lifecycle.global_angle();
        lifecycle.tick();
        lifecycle.tick();
        assert_eq!(lifecycle.global_angle(), start + 2.0 * ANGLE_STEP);
    }
}
