//! Software renderer for the vitrine portfolio deck.
//!
//! Everything here paints into a CPU [`Surface`] that the window shell hands
//! to `minifb` unchanged. The overall flow per frame:
//!
//! ```text
//!   CLI / vitrine
//!        │ configs + TextLayout
//!        ▼
//!   FrameLoop::tick ──▶ DotGrid::advance_and_paint ──▶ Surface
//!        │                    TextLayout::paint    ──▶ Surface
//!        │                    Pixelate::frame      ──▶ composite
//!        ▼
//!   Shell::present
//! ```
//!
//! The [`FrameLoop`] owns pacing and the cancellation token; effects own
//! their per-point state (a flat arena for the dot grid, offscreen buffers
//! for the pixelation) and mutate it in place each frame. All state is
//! transient: rebuilt on resize, discarded on teardown.

pub mod color;
pub mod dotgrid;
pub mod frame;
pub mod pixelate;
pub mod surface;
pub mod text;
pub mod window;

pub use color::{Rgb, FALLBACK_DOT, FALLBACK_GLOW};
pub use dotgrid::{DotGrid, DotGridConfig, DotPoint};
pub use frame::{FrameLoop, FramePacer, StopHandle, Tick};
pub use pixelate::{Pixelate, PixelateConfig};
pub use surface::Surface;
pub use text::{TextAlign, TextLayout, TextSpan};
pub use window::{PointerState, PointerTransition, Shell, ShellError};
