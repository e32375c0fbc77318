//! Headless surface for native runs and tests

use super::scene::{Frame, Readout};
use super::surface::{FrameSurface, Presented};
use crate::error::EngineError;

/// Records what would have been drawn instead of drawing it
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub size: (u32, u32),
    pub frames_presented: u64,
    pub last_vertex_count: usize,
    pub last_readouts: Vec<Readout>,
    /// Fail with `SurfaceLost` once this many frames have been presented
    pub lose_after: Option<u64>,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }

    pub fn losing_after(mut self, frames: u64) -> Self {
        self.lose_after = Some(frames);
        self
    }
}

impl FrameSurface for HeadlessSurface {
    fn present(&mut self, frame: &Frame) -> Result<Presented, EngineError> {
        if self.lose_after.is_some_and(|n| self.frames_presented >= n) {
            return Err(EngineError::SurfaceLost);
        }
        self.frames_presented += 1;
        self.last_vertex_count = frame.vertices.len();
        self.last_readouts = frame.readouts.clone();
        Ok(Presented::Shown)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.size = (width, height);
        }
    }
}
