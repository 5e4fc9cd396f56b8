#![forbid(unsafe_code)]

//! Seamlessly looping wave section dividers.
//!
//! A divider is two overlapping wave outlines anchored to the bottom of a
//! page section, each sliding sideways at its own speed and wrapping without
//! a visible seam. This crate models that strip declaratively, as a shape
//! catalog keyed by section boundary with a loop expression per layer, and
//! rasterizes any frame of it on the CPU. Animation is pure data: nothing
//! ticks, and a strip's cost is zero between the frames you ask for.

pub mod anim;
pub mod catalog;
pub mod core;
pub mod divider;
pub mod error;
pub mod eval;
pub mod model;
pub mod motion;
pub mod pipeline;
pub mod render;
pub mod render_cpu;

pub use anim::{Anim, Ease, Expr, InterpMode, Keyframe, Keyframes, LoopMode, SampleCtx};
pub use catalog::{
    AUTHORED_HEIGHT, AUTHORED_WIDTH, ShapeEntry, SpeedEntry, TILE_WIDTH, WaveVariant, lookup,
};
pub use crate::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8Premul, Transform2D,
    Vec2,
};
pub use divider::{BACK_OPACITY, BACK_PHASE, FRONT_PHASE, WaveDividerConfig, build_strip};
pub use error::{SeamwaveError, SeamwaveResult};
pub use eval::{EvaluatedNode, EvaluatedStrip, Evaluator};
pub use model::{Layer, Strip};
pub use motion::{EnvMotion, MotionPrefs, REDUCED_MOTION_ENV, StaticMotion};
pub use pipeline::{RenderThreading, render_frame, render_frames};
pub use render::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use render_cpu::CpuBackend;
