//! Drawing surface capability
//!
//! The host owns the canvas; the engine borrows a surface for the session
//! and drops it on stop.

use super::scene::Frame;
use crate::error::EngineError;

/// Result of presenting a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presented {
    Shown,
    /// Frame skipped without losing the surface (timeout, outdated swapchain)
    Dropped,
}

pub trait FrameSurface {
    /// Draw one frame. Errors are fatal for the session.
    fn present(&mut self, frame: &Frame) -> Result<Presented, EngineError>;

    /// Backing size in physical pixels
    fn resize(&mut self, width: u32, height: u32);
}
