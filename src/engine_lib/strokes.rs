// src/engine_lib/strokes.rs

use glam::DVec2;

use super::chain::Chain;
use super::cog::{Cog, BACKGROUND_COLOR, SILHOUETTE_FACTOR};
use super::trig::AngleTable;

const TOOTH_LINE_WIDTH: f32 = 2.0;
const DETAIL_LINE_WIDTH: f32 = 1.0;
const DETAIL_GRAY: [f32; 3] = [0.55, 0.55, 0.55];

const HUB_RADIUS_FACTOR: f64 = 0.2;
const RIM_RADIUS_FACTOR: f64 = 0.9;
const HUB_STEP_DEGREES: i32 = 10;
const RIM_STEP_DEGREES: i32 = 5;

/// One stroked polyline: consecutive points are joined by line segments.
pub struct Stroke {
    pub points: Vec<DVec2>,
    pub width: f32,
    pub color: [f32; 4],
}

/// Everything the drawing backend needs for one frame: a full-surface
/// background fill followed by the cog strokes in chain order.
pub struct StrokeFrame {
    pub background: [f64; 4],
    pub strokes: Vec<Stroke>,
}

/// Builds the frame's stroke geometry from the current chain and global
/// rotation angle. Read-only over the chain; no placement or lifecycle
/// logic lives here.
pub fn build_frame(chain: &Chain, global_angle: f64, trig: &AngleTable) -> StrokeFrame {
    let mut strokes = Vec::with_capacity(chain.len() * 4);
    for cog in chain.cogs() {
        let alpha = cog.alpha.max(0.0) as f32;
        strokes.push(teeth_stroke(cog, global_angle, trig, alpha));
        strokes.push(circle_stroke(cog, HUB_RADIUS_FACTOR, HUB_STEP_DEGREES, trig, alpha));
        strokes.push(circle_stroke(cog, RIM_RADIUS_FACTOR, RIM_STEP_DEGREES, trig, alpha));
        spoke_strokes(cog, global_angle, trig, alpha, &mut strokes);
    }
    StrokeFrame {
        background: BACKGROUND_COLOR,
        strokes,
    }
}

fn point_at(cog: &Cog, radius: f64, angle: f64, trig: &AngleTable) -> DVec2 {
    cog.center + radius * DVec2::new(trig.cos_deg(angle), trig.sin_deg(angle))
}

/// Closed tooth polygon: per tooth, six points alternating between the tip
/// radius (1.3 r) and the root radius (r) at fixed fractions of one tooth's
/// angular span, wrapped back to the first point.
fn teeth_stroke(cog: &Cog, global_angle: f64, trig: &AngleTable, alpha: f32) -> Stroke {
    let rotation = cog.angle_start + cog.ratio * global_angle;
    let tooth_span = 360.0 / cog.tooth_count as f64;
    let step = tooth_span / 8.0;
    let tip_radius = cog.radius * SILHOUETTE_FACTOR;

    let mut points = Vec::with_capacity(cog.tooth_count as usize * 6 + 1);
    for tooth in 0..cog.tooth_count {
        let center_angle = rotation + tooth as f64 * tooth_span;
        for (offset, radius) in [
            (-4.0, tip_radius),
            (-3.0, tip_radius),
            (-1.0, cog.radius),
            (1.0, cog.radius),
            (3.0, tip_radius),
            (4.0, tip_radius),
        ] {
            points.push(point_at(cog, radius, center_angle + offset * step, trig));
        }
    }
    if let Some(&first) = points.first() {
        points.push(first);
    }

    Stroke {
        points,
        width: TOOTH_LINE_WIDTH,
        color: [cog.color[0], cog.color[1], cog.color[2], alpha],
    }
}

fn circle_stroke(
    cog: &Cog,
    radius_factor: f64,
    step_degrees: i32,
    trig: &AngleTable,
    alpha: f32,
) -> Stroke {
    let radius = cog.radius * radius_factor;
    let points = (0..=360)
        .step_by(step_degrees as usize)
        .map(|angle| point_at(cog, radius, angle as f64, trig))
        .collect();
    Stroke {
        points,
        width: DETAIL_LINE_WIDTH,
        color: [DETAIL_GRAY[0], DETAIL_GRAY[1], DETAIL_GRAY[2], alpha],
    }
}

/// Per spoke, two radial ticks from the rim circle down to the hub circle,
/// splayed so each spoke widens toward the hub, rotating with the gear.
fn spoke_strokes(
    cog: &Cog,
    global_angle: f64,
    trig: &AngleTable,
    alpha: f32,
    out: &mut Vec<Stroke>,
) {
    let rim_radius = cog.radius * RIM_RADIUS_FACTOR;
    let hub_radius = cog.radius * HUB_RADIUS_FACTOR;
    let splay = 180.0 / cog.spoke_count as f64;
    let color = [DETAIL_GRAY[0], DETAIL_GRAY[1], DETAIL_GRAY[2], alpha];

    for spoke in 0..cog.spoke_count {
        let angle = 360.0 * spoke as f64 / cog.spoke_count as f64 + cog.ratio * global_angle;
        for side in [-1.0, 1.0] {
            out.push(Stroke {
                points: vec![
                    point_at(cog, rim_radius, angle + side * 5.0, trig),
                    point_at(cog, hub_radius, angle + side * splay, trig),
                ],
                width: DETAIL_LINE_WIDTH,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_cog_chain() -> Chain {
        let mut chain = Chain::new();
        chain.push(Cog::seed(
            DVec2::new(400.0, 300.0),
            50.0,
            15,
            4,
            [0.1, 0.1, 0.1, 1.0],
        ));
        chain
    }

    #[test]
    fn emits_teeth_circles_and_spokes_per_cog() {
        let chain = one_cog_chain();
        let trig = AngleTable::new();
        let frame = build_frame(&chain, 0.0, &trig);
        // teeth + hub + rim + 2 ticks per spoke
        assert_eq!(frame.strokes.len(), 3 + 2 * 4);
        assert_eq!(frame.background, BACKGROUND_COLOR);
    }

    #[test]
    fn tooth_polygon_is_closed_and_bounded_by_the_tip_radius() {
        let chain = one_cog_chain();
        let trig = AngleTable::new();
        let frame = build_frame(&chain, 0.0, &trig);
        let teeth = &frame.strokes[0];

        assert_eq!(teeth.points.len(), 15 * 6 + 1);
        assert_eq!(teeth.points.first(), teeth.points.last());

        let center = DVec2::new(400.0, 300.0);
        for point in &teeth.points {
            let distance = point.distance(center);
            assert!(distance <= 50.0 * 1.3 + 1e-9);
            assert!(distance >= 50.0 - 1e-9);
        }
    }

    #[test]
    fn faded_out_cogs_clamp_to_zero_alpha() {
        let mut chain = Chain::new();
        let mut cog = Cog::seed(DVec2::new(400.0, 300.0), 50.0, 15, 4, [0.1, 0.1, 0.1, 1.0]);
        cog.alpha = -0.01;
        chain.push(cog);
        let trig = AngleTable::new();
        let frame = build_frame(&chain, 0.0, &trig);
        for stroke in &frame.strokes {
            assert_eq!(stroke.color[3], 0.0);
        }
    }

    #[test]
    fn rotation_moves_the_teeth() {
        let chain = one_cog_chain();
        let trig = AngleTable::new();
        let still = build_frame(&chain, 0.0, &trig);
        let turned = build_frame(&chain, 10.0, &trig);
        assert_ne!(still.strokes[0].points[0], turned.strokes[0].points[0]);
    }
}
