//! Veneer turns a declarative style configuration plus an opaque payload
//! string into a composed, pixel-accurate visual for a scannable matrix
//! code.
//!
//! # Pipeline overview
//!
//! 1. **Composite**: flatten the logo and its background shape into one
//!    square image sized for the code's logo slot ([`logo_composite`])
//! 2. **Map**: resolve semantic style enums and gradient fills into the
//!    option groups the external renderer consumes ([`style_map`],
//!    [`gradient`], [`gradient_raster`])
//! 3. **Render**: invoke the out-of-scope matrix renderer ([`renderer`])
//! 4. **Normalize**: repair the renderer's injected white background
//!    ([`normalize`])
//! 5. **Overlay**: attach the decorative frame layer ([`frame_overlay`])
//!
//! [`pipeline::RenderOrchestrator`] sequences these stages per pass and
//! enforces last-trigger-wins: only the most recently triggered pass may
//! commit to the live output.

#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod frame_overlay;
pub mod gradient;
pub mod gradient_raster;
pub mod logo_composite;
pub mod normalize;
pub mod pipeline;
pub mod renderer;
pub mod style;
pub mod style_map;
pub mod surface;

pub use color::Rgba8;
pub use error::{VeneerError, VeneerResult};
pub use frame_overlay::FrameLayer;
pub use gradient::{css_string, sorted_stops};
pub use gradient_raster::{RasterFill, raster_fill};
pub use logo_composite::{CompositeLogo, composite, decode_logo};
pub use normalize::normalize;
pub use pipeline::{PassId, PassState, RenderOrchestrator, RenderPass, RenderRequest};
pub use renderer::MatrixRenderer;
pub use style::{
    CenterDotShape, ColorOrGradient, ColorStop, DotPattern, FrameSpec, GradientKind, GradientSpec,
    LinearDirection, LogoBackgroundSpec, LogoShape, LogoSpec, MarkerColorPair, MarkerColors,
    MarkerShape, RadialAnchor, RadialShape, StyleConfig,
};
pub use style_map::{RendererOptions, renderer_options, resolved_background};
pub use surface::{OutputContainer, RasterSurface, RenderSurface, SvgNode, VectorSurface};
