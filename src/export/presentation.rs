//! Diff-compressed JSON frame container.
//!
//! The first frame is stored in full. Every following frame stores only the
//! cells that changed since the previous one. Frames are written when the
//! encoder is finished.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::renderer::Renderer;
use crate::types::{CellChange, Grid, TerminalContract};

use super::{Encoder, ExportError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    Full { cells: Grid },
    Diff { changes: Vec<CellChange> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedFrame {
    pub pts: usize,
    #[serde(flatten)]
    pub frame: Frame,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    pub contract: TerminalContract,
    pub fps: u32,
    pub frames: Vec<EncodedFrame>,
}

impl Presentation {
    /// Reconstruct the full grid of every frame.
    pub fn grids(&self) -> Vec<Grid> {
        let mut grids: Vec<Grid> = Vec::with_capacity(self.frames.len());
        for encoded in &self.frames {
            let grid = match &encoded.frame {
                Frame::Full { cells } => cells.clone(),
                Frame::Diff { changes } => {
                    let mut grid = grids.last().cloned().unwrap_or_default();
                    for change in changes {
                        if let Some(cell) = grid
                            .get_mut(change.y as usize)
                            .and_then(|row| row.get_mut(change.x as usize))
                        {
                            *cell = change.cell;
                        }
                    }
                    grid
                }
            };
            grids.push(grid);
        }
        grids
    }
}

pub struct PresentationEncoder<W: Write> {
    writer: W,
    presentation: Presentation,
    previous: Option<Grid>,
    finished: bool,
}

impl PresentationEncoder<BufWriter<File>> {
    /// Open `path` for writing. Fails before any frame is rendered if the
    /// file cannot be created.
    pub fn create(
        path: impl AsRef<Path>,
        contract: TerminalContract,
        fps: u32,
    ) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ExportError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file), contract, fps))
    }
}

impl<W: Write> PresentationEncoder<W> {
    pub fn new(writer: W, contract: TerminalContract, fps: u32) -> Self {
        PresentationEncoder {
            writer,
            presentation: Presentation {
                contract,
                fps,
                frames: Vec::new(),
            },
            previous: None,
            finished: false,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    fn check_size(&self, frame: &Grid) -> Result<(), ExportError> {
        let expected = self.presentation.contract;
        let height = frame.len();
        let width = frame.first().map_or(0, Vec::len);
        let rows_ok = frame.iter().all(|row| row.len() == expected.width as usize);
        if height != expected.height as usize || !rows_ok {
            return Err(ExportError::SizeMismatch {
                width,
                height,
                expected,
            });
        }
        Ok(())
    }
}

impl<W: Write> Encoder for PresentationEncoder<W> {
    fn encode(&mut self, frame: &Grid, pts: usize) -> Result<(), ExportError> {
        if self.finished {
            return Err(ExportError::Finished);
        }
        self.check_size(frame)?;
        if let Some(last) = self.presentation.frames.last() {
            if pts <= last.pts {
                return Err(ExportError::NonMonotonicTimestamp {
                    pts,
                    previous: last.pts,
                });
            }
        }

        let encoded = match &self.previous {
            None => Frame::Full {
                cells: frame.clone(),
            },
            Some(prev) => Frame::Diff {
                changes: Renderer::diff(prev, frame),
            },
        };
        self.presentation.frames.push(EncodedFrame {
            pts,
            frame: encoded,
        });
        self.previous = Some(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        if self.finished {
            return Err(ExportError::Finished);
        }
        self.finished = true;
        serde_json::to_writer(&mut self.writer, &self.presentation)?;
        self.writer.flush()?;
        Ok(())
    }
}
