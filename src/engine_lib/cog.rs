// src/engine_lib/cog.rs

use glam::DVec2;

// Tuning constants for the whole simulation. None of these are
// user-configurable; the ranges below are the contract the validator and
// the tests rely on.
pub const MIN_RADIUS: f64 = 30.0;
pub const MIN_TOOTH_COUNT: i32 = 6;
pub const MAX_TOOTH_COUNT: i32 = 24;

/// Teeth tips extend to radius * 1.3; the same factor insets on-screen-fit
/// checks so the full silhouette stays visible.
pub const SILHOUETTE_FACTOR: f64 = 1.3;
/// Center distance of meshed cogs: (r_parent + r_child) * 1.25.
pub const MESH_CLEARANCE: f64 = 1.25;
/// Non-meshing cogs keep at least 1.5 * (r_a + r_b) between centers.
pub const OVERLAP_MARGIN: f64 = 1.5;
/// Candidate radius is drawn within +/- 20% of the parent's.
pub const RADIUS_JITTER: f64 = 0.2;
/// Backtracking shrinks the candidate by this much per failed tooth sweep.
pub const RADIUS_DECREMENT: f64 = 5.0;

pub const SEED_RADIUS_MIN: f64 = 30.0;
pub const SEED_RADIUS_MAX: f64 = 130.0;
pub const SEED_TOOTH_RANGE: std::ops::Range<i32> = 10..20;
pub const SEED_SPOKE_RANGE: std::ops::Range<i32> = 2..12;
pub const MESH_SPOKE_RANGE: std::ops::Range<i32> = 3..13;

pub const ALPHA_DELTA: f64 = 0.005;
pub const ANGLE_STEP: f64 = 2.0;
pub const SPAWN_INTERVAL: u32 = 5;
/// Growth attempts run at startup so the first frame shows a populated chain.
pub const PRIMING_ATTEMPTS: u32 = 20;

/// Stroke colors picked uniformly at cog creation. Dark hues against the
/// light background fill.
pub const PALETTE: [[f32; 4]; 5] = [
    [0.10, 0.10, 0.12, 1.0], // charcoal
    [0.45, 0.10, 0.10, 1.0], // oxblood
    [0.10, 0.18, 0.42, 1.0], // navy
    [0.10, 0.32, 0.16, 1.0], // pine
    [0.38, 0.24, 0.10, 1.0], // umber
];

pub const BACKGROUND_COLOR: [f64; 4] = [0.95, 0.95, 0.93, 1.0];

/// Stable, non-owning handle to a cog. Ids are handed out monotonically by
/// the chain and stay valid across front removals, unlike a raw position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CogId(pub u64);

/// One gear of the chain. Geometry is in display coordinates, angles in
/// degrees.
#[derive(Clone, Debug)]
pub struct Cog {
    pub center: DVec2,
    pub radius: f64,
    pub tooth_count: i32,
    /// Mesh slot on the parent; only meaningful during initialization.
    pub tooth_index: i32,
    /// Signed angular-velocity multiplier against the global rotation
    /// driver. Alternates sign at every mesh.
    pub ratio: f64,
    /// Phase offset (degrees) aligning teeth with the parent's gap at the
    /// mesh point.
    pub angle_start: f64,
    pub spoke_count: i32,
    pub alpha: f64,
    pub color: [f32; 4],
    /// Parent at creation time; resolved through the chain's id table and
    /// never updated, even if the parent expires first.
    pub parent: Option<CogId>,
}

impl Cog {
    /// First cog of a chain: placed freely, driven at unit ratio.
    pub fn seed(center: DVec2, radius: f64, tooth_count: i32, spoke_count: i32, color: [f32; 4]) -> Self {
        Self {
            center,
            radius,
            tooth_count,
            tooth_index: 0,
            ratio: 1.0,
            angle_start: 0.0,
            spoke_count,
            alpha: 1.0,
            color,
            parent: None,
        }
    }

    /// A cog meshed into `parent` at `tooth_index`, with kinematics already
    /// computed by the initializer.
    #[allow(clippy::too_many_arguments)]
    pub fn meshed(
        center: DVec2,
        radius: f64,
        tooth_count: i32,
        tooth_index: i32,
        ratio: f64,
        angle_start: f64,
        spoke_count: i32,
        color: [f32; 4],
        parent: CogId,
    ) -> Self {
        Self {
            center,
            radius,
            tooth_count,
            tooth_index,
            ratio,
            angle_start,
            spoke_count,
            alpha: 1.0,
            color,
            parent: Some(parent),
        }
    }
}

/// Drawing-surface extent, captured once at construction.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceBounds {
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
