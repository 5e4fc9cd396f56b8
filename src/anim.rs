use crate::{
    core::{Fps, FrameIndex, Transform2D, Vec2},
    error::{SeamwaveError, SeamwaveResult},
};

/// Context handed to every animation sample.
///
/// Sampling is a pure function of this context: the same `SampleCtx` always
/// yields the same value, which is what lets many dividers run side by side
/// without any shared animation state.
#[derive(Clone, Copy, Debug)]
pub struct SampleCtx {
    pub frame: FrameIndex, // global frame
    pub fps: Fps,          // global fps
    pub local: FrameIndex, // frame relative to the animation's own start
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    OutQuad,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            rotation_rad: a.rotation_rad + (b.rotation_rad - a.rotation_rad) * t,
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
            anchor: <Vec2 as Lerp>::lerp(&a.anchor, &b.anchor, t),
        }
    }
}

/// A value animated over frames, described entirely as data.
///
/// The whole animation is declared up front and evaluated anywhere on its
/// timeline; nothing ticks, nothing mutates. `Expr::Loop` is how the wave
/// layers repeat forever without accumulating per-frame cost.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Anim<T> {
    Keyframes(Keyframes<T>),
    Expr(Expr<T>),
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self::Keyframes(Keyframes {
            keys: vec![Keyframe {
                frame: FrameIndex(0),
                value,
                ease: Ease::Linear,
            }],
            mode: InterpMode::Hold,
        })
    }

    pub fn sample(&self, ctx: SampleCtx) -> SeamwaveResult<T> {
        match self {
            Self::Keyframes(kf) => kf.sample(ctx),
            Self::Expr(expr) => expr.sample(ctx),
        }
    }

    pub fn validate(&self) -> SeamwaveResult<()> {
        match self {
            Self::Keyframes(kf) => kf.validate(),
            Self::Expr(expr) => expr.validate(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by frame
    pub mode: InterpMode,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    pub fn validate(&self) -> SeamwaveResult<()> {
        if self.keys.is_empty() {
            return Err(SeamwaveError::animation(
                "Keyframes must have at least one key",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].frame.0 <= w[1].frame.0) {
            return Err(SeamwaveError::animation(
                "Keyframes keys must be sorted by frame",
            ));
        }
        Ok(())
    }

    pub fn sample(&self, ctx: SampleCtx) -> SeamwaveResult<T> {
        if self.keys.is_empty() {
            return Err(SeamwaveError::animation("Keyframes has no keys"));
        }

        let f = ctx.local.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame.0.saturating_sub(a.frame.0);
        if denom == 0 {
            return Ok(a.value.clone());
        }

        let t = ((f - a.frame.0) as f64) / (denom as f64);
        let te = a.ease.apply(t);
        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => Ok(T::lerp(&a.value, &b.value, te)),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub frame: FrameIndex,
    pub value: T,
    pub ease: Ease, // ease applied toward next key
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    Hold,
    Linear,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Expr<T> {
    /// Repeat `inner` forever with the given period in frames.
    ///
    /// `Repeat` restarts from the first frame (seamless when the inner
    /// animation's end lands one period of travel away from its start);
    /// `PingPong` mirrors every other cycle.
    Loop {
        inner: Box<Anim<T>>,
        period: u64,
        mode: LoopMode,
    },
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    Repeat,
    PingPong,
}

impl<T> Expr<T>
where
    T: Lerp + Clone,
{
    pub fn validate(&self) -> SeamwaveResult<()> {
        match self {
            Self::Loop {
                inner,
                period,
                mode: _,
            } => {
                if *period == 0 {
                    return Err(SeamwaveError::animation("Loop period must be > 0"));
                }
                inner.validate()
            }
        }
    }

    pub fn sample(&self, ctx: SampleCtx) -> SeamwaveResult<T> {
        fn with_local(mut ctx: SampleCtx, local: FrameIndex) -> SampleCtx {
            let delta = local.0 as i128 - ctx.local.0 as i128;
            let new_frame = if delta >= 0 {
                ctx.frame.0.saturating_add(delta as u64)
            } else {
                ctx.frame.0.saturating_sub((-delta) as u64)
            };
            ctx.frame = FrameIndex(new_frame);
            ctx.local = local;
            ctx
        }

        match self {
            Self::Loop {
                inner,
                period,
                mode,
            } => {
                if *period == 0 {
                    return Err(SeamwaveError::animation("Loop period must be > 0"));
                }
                let f = ctx.local.0;
                let mapped = match mode {
                    LoopMode::Repeat => FrameIndex(f % period),
                    LoopMode::PingPong => {
                        if *period == 1 {
                            FrameIndex(0)
                        } else {
                            let cycle = 2 * (period - 1);
                            let pos = f % cycle;
                            if pos < *period {
                                FrameIndex(pos)
                            } else {
                                FrameIndex(cycle - pos)
                            }
                        }
                    }
                };
                inner.sample(with_local(ctx, mapped))
            }
        }
    }
}
