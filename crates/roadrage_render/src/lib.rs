//! Rendering front-end for RoadRage
//!
//! This crate owns the [`Camera`] and turns a [`roadrage_core::World`] into a
//! list of [`DrawCall`]s. Anything implementing [`RenderSink`] can consume
//! them: a GPU backend in the windowed build, or a [`FrameRecorder`] when
//! running headless.

pub mod camera;
pub mod renderable;

pub use camera::Camera;
pub use renderable::{DrawCall, FrameRecorder, RenderSink, Renderable};
