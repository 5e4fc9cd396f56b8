use crate::{
    anim::{Anim, Ease, Expr, InterpMode, Keyframe, Keyframes, LoopMode},
    catalog::{self, AUTHORED_HEIGHT, TILE_WIDTH, WaveVariant},
    core::{Canvas, Fps, FrameIndex, Rgba8Premul, Transform2D, Vec2},
    error::SeamwaveResult,
    model::{Layer, Strip},
    motion::MotionPrefs,
};

/// Back layer opacity; the front layer is fully opaque. The difference is
/// part of the depth illusion, together with the speed split.
pub const BACK_OPACITY: f64 = 0.45;

/// Starting phase of each layer, as a fraction of one tile of travel. The
/// front layer starts a quarter period in so the two outlines are never in
/// lock-step.
pub const BACK_PHASE: f64 = 0.0;
pub const FRONT_PHASE: f64 = 0.25;

/// Per-mount configuration of one divider. Built fresh for every strip and
/// discarded afterwards; nothing here is shared or mutated.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WaveDividerConfig {
    /// Fill color as a hex string. Should match the next section's
    /// background so the divider reads as a seam, not a box. An unparsable
    /// value degrades to transparent; it is never an error.
    pub fill: String,
    pub variant: WaveVariant,
    /// Strip height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Mirror the whole strip horizontally.
    #[serde(default)]
    pub flip_x: bool,
}

fn default_height() -> u32 {
    60
}

impl WaveDividerConfig {
    pub fn new(variant: WaveVariant) -> Self {
        Self {
            fill: variant.suggested_fill().to_string(),
            variant,
            height: default_height(),
            flip_x: false,
        }
    }

    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn flip_x(mut self, flip: bool) -> Self {
        self.flip_x = flip;
        self
    }
}

/// Assemble the divider strip for one section boundary.
///
/// `width_px` is the horizontal size of the raster target; the authored
/// 2880-unit box maps to twice that, so one tile of travel is exactly one
/// target width. The motion preference is read here, once per build: under
/// reduced motion each layer gets a constant transform held at its phase
/// offset and no loop expression exists at all.
pub fn build_strip(
    config: &WaveDividerConfig,
    width_px: u32,
    fps: Fps,
    prefs: &dyn MotionPrefs,
) -> SeamwaveResult<Strip> {
    let (shape, speed) = catalog::lookup(config.variant);
    let reduced = prefs.reduced_motion();

    let fill = Rgba8Premul::parse_hex(&config.fill).unwrap_or_else(|| {
        tracing::warn!(fill = %config.fill, "unparsable fill color, rendering transparent");
        Rgba8Premul::transparent()
    });

    let scale = Vec2::new(
        f64::from(width_px) / TILE_WIDTH,
        f64::from(config.height) / AUTHORED_HEIGHT,
    );

    let layer = |name: &str, path_d: &str, opacity: f64, secs: f64, phase: f64| -> Layer {
        Layer {
            name: name.to_string(),
            path_d: path_d.to_string(),
            fill,
            opacity,
            transform: layer_transform(secs, phase, scale, fps, reduced),
        }
    };

    let strip = Strip {
        fps,
        canvas: Canvas {
            width: width_px,
            height: config.height,
        },
        flip_x: config.flip_x,
        layers: vec![
            layer("back", shape.back, BACK_OPACITY, speed.back_secs, BACK_PHASE),
            layer("front", shape.front, 1.0, speed.front_secs, FRONT_PHASE),
        ],
    };

    strip.validate()?;
    Ok(strip)
}

/// The loop driver: one tile of leftward travel per `secs`, linear, forever.
///
/// The whole animation is two keyframes under a repeat expression; sampling
/// frame `f` and frame `f + period` yields bit-identical transforms, which
/// is the seamless-loop property in vector form.
fn layer_transform(
    secs: f64,
    phase: f64,
    scale: Vec2,
    fps: Fps,
    reduced: bool,
) -> Anim<Transform2D> {
    let start_x = -phase * TILE_WIDTH * scale.x;

    let at = |x: f64| Transform2D {
        translate: Vec2::new(x, 0.0),
        scale,
        ..Transform2D::default()
    };

    if reduced {
        return Anim::constant(at(start_x));
    }

    let period = fps.secs_to_frames_floor(secs);
    Anim::Expr(Expr::Loop {
        inner: Box::new(Anim::Keyframes(Keyframes {
            keys: vec![
                Keyframe {
                    frame: FrameIndex(0),
                    value: at(start_x),
                    ease: Ease::Linear,
                },
                Keyframe {
                    frame: FrameIndex(period),
                    value: at(start_x - TILE_WIDTH * scale.x),
                    ease: Ease::Linear,
                },
            ],
            mode: InterpMode::Linear,
        })),
        period,
        mode: LoopMode::Repeat,
    })
}
