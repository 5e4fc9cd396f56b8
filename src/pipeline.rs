use rayon::prelude::*;

use crate::{
    core::{FrameIndex, FrameRange},
    error::{SeamwaveError, SeamwaveResult},
    eval::Evaluator,
    model::Strip,
    render::{FrameRGBA, RenderBackend},
};

/// Evaluate + rasterize a single frame of a strip.
#[tracing::instrument(skip(strip, backend))]
pub fn render_frame(
    strip: &Strip,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> SeamwaveResult<FrameRGBA> {
    let eval = Evaluator::eval_frame(strip, frame)?;
    backend.render(strip.canvas, &eval)
}

#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

/// Render a range of frames (inclusive start, exclusive end).
///
/// With `threading.parallel` the frames are rendered on a rayon pool with
/// one CPU backend per worker; frame order in the result is preserved.
pub fn render_frames(
    strip: &Strip,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> SeamwaveResult<Vec<FrameRGBA>> {
    if range.is_empty() {
        return Err(SeamwaveError::validation("render range must be non-empty"));
    }

    if !threading.parallel {
        let mut out = Vec::with_capacity(range.len_frames() as usize);
        for f in range.start.0..range.end.0 {
            out.push(render_frame(strip, FrameIndex(f), backend)?);
        }
        return Ok(out);
    }

    let worker_settings = backend.worker_render_settings().ok_or_else(|| {
        SeamwaveError::render("parallel render requires backend worker settings support")
    })?;
    let pool = build_thread_pool(threading.threads)?;

    let rendered = pool.install(|| {
        (range.start.0..range.end.0)
            .into_par_iter()
            .map_init(
                || crate::render_cpu::CpuBackend::new(worker_settings.clone()),
                |worker, f| render_frame(strip, FrameIndex(f), worker),
            )
            .collect::<Vec<_>>()
    });

    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> SeamwaveResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(SeamwaveError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SeamwaveError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::WaveVariant,
        core::Fps,
        divider::{WaveDividerConfig, build_strip},
        motion::StaticMotion,
        render::{BackendKind, RenderSettings, create_backend},
    };

    fn small_strip() -> Strip {
        let config = WaveDividerConfig::new(WaveVariant::Events).height(30);
        build_strip(&config, 96, Fps::new(30, 1).unwrap(), &StaticMotion(false)).unwrap()
    }

    #[test]
    fn empty_range_is_rejected() {
        let strip = small_strip();
        let mut backend = create_backend(BackendKind::Cpu, &RenderSettings::default()).unwrap();
        let range = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
        assert!(render_frames(&strip, range, backend.as_mut(), &RenderThreading::default()).is_err());
    }

    #[test]
    fn zero_threads_is_rejected() {
        let strip = small_strip();
        let mut backend = create_backend(BackendKind::Cpu, &RenderSettings::default()).unwrap();
        let range = FrameRange::new(FrameIndex(0), FrameIndex(2)).unwrap();
        let threading = RenderThreading {
            parallel: true,
            threads: Some(0),
        };
        assert!(render_frames(&strip, range, backend.as_mut(), &threading).is_err());
    }

    #[test]
    fn parallel_matches_sequential() {
        let strip = small_strip();
        let settings = RenderSettings::default();
        let range = FrameRange::new(FrameIndex(0), FrameIndex(6)).unwrap();

        let mut backend = create_backend(BackendKind::Cpu, &settings).unwrap();
        let seq =
            render_frames(&strip, range, backend.as_mut(), &RenderThreading::default()).unwrap();

        let mut backend = create_backend(BackendKind::Cpu, &settings).unwrap();
        let par = render_frames(
            &strip,
            range,
            backend.as_mut(),
            &RenderThreading {
                parallel: true,
                threads: Some(2),
            },
        )
        .unwrap();

        assert_eq!(seq.len(), par.len());
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(a.data, b.data);
        }
    }
}
