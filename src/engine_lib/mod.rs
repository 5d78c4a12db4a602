// src/engine_lib/mod.rs
pub mod chain;
pub mod cog;
pub mod growth;
pub mod kinematics;
pub mod lifecycle;
pub mod strokes;
pub mod trig;
pub mod validate;

pub use chain::Chain;
pub use cog::{Cog, CogId, SurfaceBounds};
pub use growth::GrowthEngine;
pub use lifecycle::Lifecycle;
pub use strokes::{build_frame, Stroke, StrokeFrame};
pub use trig::AngleTable;
