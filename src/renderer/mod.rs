//! Rendering module
//!
//! `scene` builds world-space triangles from the math snapshot; `pipeline`
//! draws them with WebGPU; `headless` stands in where there is no GPU.

pub mod headless;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use headless::HeadlessSurface;
pub use pipeline::RenderState;
pub use scene::{Frame, FrameRenderer, Readout};
pub use surface::{FrameSurface, Presented};
pub use vertex::{Vertex, colors};
