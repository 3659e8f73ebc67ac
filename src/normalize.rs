//! Post-render background correction.
//!
//! The external renderer unconditionally paints a full-bleed background
//! rectangle, sometimes opaque white, regardless of the requested
//! background. This pass locates that shape and rewrites its fill to the
//! resolved background value. It is idempotent and a no-op when the
//! defect is absent.

use crate::{
    color::Rgba8,
    surface::{RenderSurface, SvgNode},
};

/// Rewrites the renderer-injected background in place. `background` of
/// `None` requests transparency.
pub fn normalize(surface: &mut RenderSurface, background: Option<&str>) {
    let resolved = background.unwrap_or("transparent");
    match surface {
        RenderSurface::Raster(raster) => {
            // Canvas-level background property: repair only a white-ish
            // value left by the renderer.
            if let Some(prop) = &raster.background {
                if fill_is_near_white(prop) {
                    raster.background = Some(resolved.to_string());
                }
            } else {
                tracing::debug!("raster surface has no background property; normalization skipped");
            }
        }
        RenderSurface::Vector(vector) => {
            let w = f64::from(vector.width);
            let h = f64::from(vector.height);
            let target = vector.nodes.iter_mut().find(|node| match node {
                SvgNode::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => {
                    *x == 0.0
                        && *y == 0.0
                        && *width == w
                        && *height == h
                        && fill_is_near_white(fill)
                }
                _ => false,
            });
            match target {
                Some(SvgNode::Rect { fill, .. }) => *fill = resolved.to_string(),
                _ => {
                    tracing::debug!("no full-bleed near-white rect found; normalization skipped");
                }
            }
        }
    }
}

/// Whether a fill string reads as white or near-white.
fn fill_is_near_white(fill: &str) -> bool {
    let fill = fill.trim();
    if fill.eq_ignore_ascii_case("white") {
        return true;
    }
    Rgba8::parse_hex(fill).is_ok_and(Rgba8::is_near_white)
}
