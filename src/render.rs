use crate::{core::Canvas, error::SeamwaveResult, eval::EvaluatedStrip};

/// One rasterized frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Background flattened under the strip, straight-alpha RGBA8.
    /// `None` leaves the frame transparent outside the waves.
    pub clear_rgba: Option<[u8; 4]>,
}

pub trait RenderBackend {
    fn render(&mut self, canvas: Canvas, eval: &EvaluatedStrip) -> SeamwaveResult<FrameRGBA>;

    /// Settings a parallel pipeline can use to spin up per-worker backends.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    Cpu,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> SeamwaveResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render_cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}
