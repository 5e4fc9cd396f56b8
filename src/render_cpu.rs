use crate::{
    core::Canvas,
    error::{SeamwaveError, SeamwaveResult},
    eval::EvaluatedStrip,
    render::{FrameRGBA, RenderBackend, RenderSettings},
};

/// CPU rasterizer on `vello_cpu`. Owns nothing frame-persistent; each render
/// builds a fresh context, so dropping the backend tears everything down.
pub struct CpuBackend {
    settings: RenderSettings,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }
}

impl RenderBackend for CpuBackend {
    fn render(&mut self, canvas: Canvas, eval: &EvaluatedStrip) -> SeamwaveResult<FrameRGBA> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SeamwaveError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SeamwaveError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(SeamwaveError::render("canvas must be non-empty"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);

        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(canvas.width),
                f64::from(canvas.height),
            ));
        }

        for node in &eval.nodes {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(affine_to_cpu(node.transform));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                node.fill.r,
                node.fill.g,
                node.fill.b,
                node.fill.a,
            ));

            let opacity = node.opacity as f32;
            if opacity <= 0.0 {
                continue;
            }
            if opacity < 1.0 {
                ctx.push_opacity_layer(opacity);
            }
            let cpu_path = bezpath_to_cpu(&node.path);
            ctx.fill_path(&cpu_path);
            if opacity < 1.0 {
                ctx.pop_layer();
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn affine_to_cpu(a: crate::core::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: crate::core::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &crate::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
