//! Canvas 2D rendering module
//!
//! Replays a simulated `Frame` onto a `CanvasRenderingContext2d`.

pub mod canvas;

pub use canvas::CanvasRenderer;
