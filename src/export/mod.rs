//! Export — the render-to-file playback driver.
//!
//! Plays a scene from the first frame to the last without pacing, handing
//! every rendered grid to an `Encoder` in presentation order with the frame
//! index as its timestamp. Nothing is skipped or reordered, so two passes
//! over the same scene produce the same output.

mod error;
pub mod presentation;

pub use error::ExportError;
pub use presentation::PresentationEncoder;

use log::{debug, info};

use crate::engine::Scene;
use crate::renderer::Renderer;
use crate::types::Grid;

/// Sink for rendered frames.
pub trait Encoder {
    /// Accept one frame. `pts` must increase from call to call.
    fn encode(&mut self, frame: &Grid, pts: usize) -> Result<(), ExportError>;
    /// Flush everything and close the container.
    fn finish(&mut self) -> Result<(), ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub frames: usize,
}

/// Render every frame of `scene` into `encoder`.
///
/// The scene is finalized and rewound first; encoder errors abort the pass.
pub fn render_to_file<E: Encoder + ?Sized>(
    scene: &mut Scene,
    renderer: &Renderer,
    encoder: &mut E,
) -> Result<ExportSummary, ExportError> {
    scene.finalize();
    scene.rewind();

    let total = scene.length_in_frames();
    info!("rendering {total} frames");

    for t in 0..total {
        scene.tick(t);
        let grid = renderer.render(&scene.resolve(t));
        encoder.encode(&grid, t)?;
        debug!("encoded frame {}/{}", t + 1, total);
    }

    encoder.finish()?;
    info!("render finished");
    Ok(ExportSummary { frames: total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::assets::Assets;
    use crate::types::{Point, Rgba, TerminalContract};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(usize, Grid)>,
        finished: bool,
        fail_at: Option<usize>,
    }

    impl Encoder for Recorder {
        fn encode(&mut self, frame: &Grid, pts: usize) -> Result<(), ExportError> {
            if self.fail_at == Some(pts) {
                return Err(ExportError::Io(std::io::Error::other("disk full")));
            }
            self.frames.push((pts, frame.clone()));
            Ok(())
        }

        fn finish(&mut self) -> Result<(), ExportError> {
            self.finished = true;
            Ok(())
        }
    }

    fn scene() -> (Scene, Renderer) {
        let mut scene = Scene::new(80, 40, Rgba::new(0, 0, 0, 255));
        scene
            .draw_line(Rgba::WHITE, Point::new(0, 0), Point::new(79, 0), 0, 0, 10)
            .unwrap();
        let contract = TerminalContract {
            width: 10,
            height: 5,
        };
        (scene, Renderer::new(contract, (80, 40), Assets::new()))
    }

    #[test]
    fn every_frame_in_order() {
        let (mut scene, renderer) = scene();
        let mut rec = Recorder::default();
        let summary = render_to_file(&mut scene, &renderer, &mut rec).unwrap();

        assert_eq!(summary.frames, 10);
        assert!(rec.finished);
        let pts: Vec<usize> = rec.frames.iter().map(|(t, _)| *t).collect();
        assert_eq!(pts, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn passes_are_deterministic() {
        let (mut scene, renderer) = scene();
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        render_to_file(&mut scene, &renderer, &mut first).unwrap();
        render_to_file(&mut scene, &renderer, &mut second).unwrap();
        assert_eq!(first.frames, second.frames);
    }

    #[test]
    fn encoder_errors_abort_the_pass() {
        let (mut scene, renderer) = scene();
        let mut rec = Recorder {
            fail_at: Some(3),
            ..Default::default()
        };
        assert!(render_to_file(&mut scene, &renderer, &mut rec).is_err());
        assert_eq!(rec.frames.len(), 3);
        assert!(!rec.finished);
    }
}
