//! Seam to the out-of-scope code-matrix encoder/renderer.

use crate::{error::VeneerResult, style_map::RendererOptions, surface::RenderSurface};

/// External collaborator that turns a payload string plus geometry/color
/// options into a scannable visual. Implementations live outside this
/// crate; the engine only depends on this contract.
///
/// A renderer whose drawing surface cannot be acquired returns
/// [`crate::VeneerError::RendererUnavailable`]; the orchestrator aborts
/// that pass only and keeps the previously committed output visible.
pub trait MatrixRenderer {
    fn render(&self, options: &RendererOptions) -> VeneerResult<RenderSurface>;
}

impl<T: MatrixRenderer + ?Sized> MatrixRenderer for &T {
    fn render(&self, options: &RendererOptions) -> VeneerResult<RenderSurface> {
        (**self).render(options)
    }
}

impl<T: MatrixRenderer + ?Sized> MatrixRenderer for Box<T> {
    fn render(&self, options: &RendererOptions) -> VeneerResult<RenderSurface> {
        (**self).render(options)
    }
}
