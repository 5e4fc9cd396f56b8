use crate::{
    anim::Anim,
    core::{BezPath, Canvas, Fps, Rgba8Premul, Transform2D},
    error::{SeamwaveError, SeamwaveResult},
};

/// A fully described divider strip: everything the evaluator and renderer
/// need, with no reference back to the config that built it.
///
/// Layers render in order; index is the z order, so the back wave comes
/// first. All animation lives in the per-layer transforms.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Strip {
    pub fps: Fps,
    pub canvas: Canvas,
    /// Static horizontal mirror of the whole strip. Applied uniformly at
    /// evaluation time, never animated.
    pub flip_x: bool,
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub name: String,
    /// SVG path data in the catalog's authored coordinate space.
    pub path_d: String,
    pub fill: Rgba8Premul,
    pub opacity: f64, // 0..1, clamped in eval
    pub transform: Anim<Transform2D>,
}

impl Layer {
    pub fn bez_path(&self) -> SeamwaveResult<BezPath> {
        let d = self.path_d.trim();
        if d.is_empty() {
            return Err(SeamwaveError::validation(
                "layer path_d must be non-empty",
            ));
        }
        BezPath::from_svg(d)
            .map_err(|e| SeamwaveError::validation(format!("invalid layer path_d: {e}")))
    }
}

impl Strip {
    pub fn validate(&self) -> SeamwaveResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SeamwaveError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SeamwaveError::validation("canvas width/height must be > 0"));
        }
        if self.layers.is_empty() {
            return Err(SeamwaveError::validation("strip must have layers"));
        }

        for layer in &self.layers {
            if layer.name.trim().is_empty() {
                return Err(SeamwaveError::validation("layer name must be non-empty"));
            }
            layer.bez_path()?;
            layer.transform.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;

    fn basic_strip() -> Strip {
        Strip {
            fps: Fps::new(30, 1).unwrap(),
            canvas: Canvas {
                width: 1440,
                height: 60,
            },
            flip_x: false,
            layers: vec![Layer {
                name: "back".to_string(),
                path_d: "M0,10 L40,10 L40,40 L0,40 Z".to_string(),
                fill: Rgba8Premul::from_straight_rgba(255, 240, 246, 255),
                opacity: 0.45,
                transform: Anim::constant(Transform2D {
                    translate: Vec2::new(-10.0, 0.0),
                    ..Transform2D::default()
                }),
            }],
        }
    }

    #[test]
    fn json_roundtrip() {
        let strip = basic_strip();
        let s = serde_json::to_string_pretty(&strip).unwrap();
        let de: Strip = serde_json::from_str(&s).unwrap();
        assert_eq!(de.canvas.width, 1440);
        assert_eq!(de.layers.len(), 1);
        de.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_canvas() {
        let mut strip = basic_strip();
        strip.canvas.height = 0;
        assert!(strip.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_path() {
        let mut strip = basic_strip();
        strip.layers[0].path_d = "  ".to_string();
        assert!(strip.validate().is_err());
    }

    #[test]
    fn validate_rejects_garbage_path() {
        let mut strip = basic_strip();
        strip.layers[0].path_d = "not a path".to_string();
        assert!(strip.validate().is_err());
    }

    #[test]
    fn validate_rejects_layerless_strip() {
        let mut strip = basic_strip();
        strip.layers.clear();
        assert!(strip.validate().is_err());
    }
}
