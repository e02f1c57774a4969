//! A small 2D drawing surface for the carbonzero landing page.
//!
//! [`Surface`] exposes the subset of canvas-style primitives the page draws
//! with: clearing, filled rectangles/circles/ellipses, stroked circles, solid
//! and radial-gradient paints, and a save/restore transform stack.
//!
//! [`RasterCanvas`] rasterizes into a premultiplied RGBA backing store sized
//! for a device pixel ratio, [`Recording`] captures draw calls for inspection,
//! and [`CanvasView`] blits a raster canvas into terminal cells.

mod paint;
mod raster;
mod recording;
mod surface;
mod transform;
mod widget;

pub use paint::{ColorStop, Paint, RadialGradient};
pub use raster::RasterCanvas;
pub use recording::{DrawCommand, Recording};
pub use surface::{Ellipse, Surface, TransformStack};
pub use transform::Affine;
pub use widget::CanvasView;
