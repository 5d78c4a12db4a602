// tests/chain_ticks.rs
//
// Long-running soak over the frame lifecycle: every structural invariant of
// the chain must hold after every tick.

use gearchain::engine_lib::cog::{
    MAX_TOOTH_COUNT, MIN_RADIUS, MIN_TOOTH_COUNT, OVERLAP_MARGIN, SILHOUETTE_FACTOR,
};
use gearchain::engine_lib::Lifecycle;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const TICKS: usize = 3000;

#[test]
fn invariants_hold_over_many_ticks() {
    for seed in [1u64, 42, 1234] {
        let mut lifecycle = Lifecycle::seeded(WIDTH, HEIGHT, seed);
        for tick in 0..TICKS {
            lifecycle.tick();
            let chain = lifecycle.chain();

            assert!(chain.len() >= 1, "seed {seed}: empty chain at tick {tick}");

            for (_, cog) in chain.iter() {
                assert!(cog.radius >= MIN_RADIUS);
                assert!(cog.tooth_count >= MIN_TOOTH_COUNT);
                assert!(cog.tooth_count <= MAX_TOOTH_COUNT);
                assert!(cog.spoke_count >= 2);

                let inset = cog.radius * SILHOUETTE_FACTOR;
                assert!(cog.center.x >= inset && cog.center.x <= WIDTH - inset);
                assert!(cog.center.y >= inset && cog.center.y <= HEIGHT - inset);
            }

            // Cogs that do not mesh with each other keep clear air.
            let entries: Vec<_> = chain.iter().collect();
            for (i, (id_a, a)) in entries.iter().enumerate() {
                for (id_b, b) in entries.iter().skip(i + 1) {
                    if a.parent == Some(*id_b) || b.parent == Some(*id_a) {
                        continue;
                    }
                    let spacing = a.center.distance(b.center);
                    assert!(
                        spacing >= OVERLAP_MARGIN * (a.radius + b.radius) - 1e-9,
                        "seed {seed}: cogs {id_a:?}/{id_b:?} overlap at tick {tick}"
                    );
                }
            }

            // Meshing law, whenever the parent is still alive.
            for (_, cog) in chain.iter() {
                if let Some(parent) = cog.parent.and_then(|id| chain.get(id)) {
                    let expected =
                        -parent.ratio * parent.tooth_count as f64 / cog.tooth_count as f64;
                    assert!((cog.ratio - expected).abs() < 1e-12);
                }
            }
        }
    }
}

#[test]
fn cogs_are_removed_in_creation_order() {
    let mut lifecycle = Lifecycle::seeded(WIDTH, HEIGHT, 9);
    let mut last_removed = None;
    for _ in 0..TICKS {
        let front_id = lifecycle.chain().iter().next().map(|(id, _)| id);
        lifecycle.tick();
        let new_front_id = lifecycle.chain().iter().next().map(|(id, _)| id);
        if front_id != new_front_id {
            let removed = front_id.unwrap();
            if let Some(previous) = last_removed {
                assert!(removed > previous, "removal out of creation order");
            }
            last_removed = Some(removed);
        }
    }
    assert!(last_removed.is_some(), "no cog ever expired during the soak");
}
