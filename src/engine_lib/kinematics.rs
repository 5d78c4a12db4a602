// src/engine_lib/kinematics.rs

use glam::DVec2;

use super::cog::{Cog, MESH_CLEARANCE};
use super::trig::AngleTable;

/// Kinematic state for a cog meshed into its parent: everything the growth
/// engine needs beyond the drawn parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub ratio: f64,
    pub center: DVec2,
    pub angle_start: f64,
}

/// Places a candidate cog against `parent` at mesh slot `tooth_index`.
///
/// - The ratio flips sign at every mesh and scales inversely with tooth
///   count, so tangential tooth speed matches at the pitch circles.
/// - The center sits at (r_parent + r_child) * 1.25 from the parent along
///   the mesh-slot direction.
/// - The phase offset turns the new cog's tooth into the parent's gap at
///   the mesh point, compensating for the parent's own phase within one
///   parent-tooth span.
///
/// Pure function of its arguments; tooth counts are already clamped to
/// [6, 24] by the growth engine, so the divisions cannot degenerate.
pub fn mesh_placement(
    radius: f64,
    tooth_index: i32,
    tooth_count: i32,
    parent: &Cog,
    trig: &AngleTable,
) -> Placement {
    let ratio = -parent.ratio * (parent.tooth_count as f64 / tooth_count as f64);

    let center_distance = (parent.radius + radius) * MESH_CLEARANCE;
    let parent_tooth_span = 360.0 / parent.tooth_count as f64;
    let angle = tooth_index as f64 * parent_tooth_span;
    let center = parent.center
        + center_distance * DVec2::new(trig.cos_deg(angle), trig.sin_deg(angle));

    let angle_start =
        angle - 180.0 - 180.0 / tooth_count as f64 - parent.angle_start % parent_tooth_span;

    Placement {
        ratio,
        center,
        angle_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    const EPS: f64 = 1e-9;

    fn parent_cog() -> Cog {
        Cog::seed(DVec2::new(400.0, 300.0), 50.0, 15, 7, [0.0, 0.0, 0.0, 1.0])
    }

    #[test]
    fn places_the_reference_candidate_exactly() {
        let trig = AngleTable::new();
        let parent = parent_cog();
        let placement = mesh_placement(45.0, 3, 14, &parent, &trig);

        // ratio = -1.0 * 15 / 14
        assert!((placement.ratio - (-15.0 / 14.0)).abs() < EPS);

        // mesh angle 3 * 24 = 72 degrees, center distance 95 * 1.25
        let r = (50.0 + 45.0) * 1.25;
        assert!((placement.center.x - (400.0 + r * trig.cos_deg(72.0))).abs() < EPS);
        assert!((placement.center.y - (300.0 + r * trig.sin_deg(72.0))).abs() < EPS);

        // 72 - 180 - 180/14 - 0
        assert!((placement.angle_start - (72.0 - 180.0 - 180.0 / 14.0)).abs() < EPS);
    }

    #[test]
    fn ratio_alternates_sign_along_the_chain() {
        let trig = AngleTable::new();
        let parent = parent_cog();
        let first = mesh_placement(45.0, 0, 10, &parent, &trig);
        assert!(first.ratio < 0.0);

        let mut second_parent = parent_cog();
        second_parent.ratio = first.ratio;
        second_parent.tooth_count = 10;
        let second = mesh_placement(45.0, 0, 12, &second_parent, &trig);
        assert!(second.ratio > 0.0);
        assert!((second.ratio - (-first.ratio * 10.0 / 12.0)).abs() < EPS);
    }

    #[test]
    fn phase_compensates_for_parent_phase() {
        let trig = AngleTable::new();
        let mut parent = parent_cog();
        parent.angle_start = 30.0; // 30 % 24 = 6 within one tooth span
        let placement = mesh_placement(45.0, 0, 12, &parent, &trig);
        assert!((placement.angle_start - (0.0 - 180.0 - 15.0 - 6.0)).abs() < EPS);
    }

    #[test]
    fn negative_parent_phase_keeps_sign() {
        let trig = AngleTable::new();
        let mut parent = parent_cog();
        parent.angle_start = -30.0; // truncating remainder: -6
        let placement = mesh_placement(45.0, 0, 12, &parent, &trig);
        assert!((placement.angle_start - (0.0 - 180.0 - 15.0 + 6.0)).abs() < EPS);
    }
}
