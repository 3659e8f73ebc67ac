//! Decorative border frame drawn around the composed output. The frame is
//! purely a presentation layer: it never participates in scan geometry or
//! the renderer's own box.

use kurbo::{Point, RoundedRect, Shape as _};

use crate::{
    color::Rgba8,
    error::VeneerResult,
    gradient_raster::RasterFill,
    style::FrameSpec,
    surface::OutputContainer,
};

/// Frame layer attached to an [`OutputContainer`], sized to wrap the
/// code's bounding box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLayer {
    pub color: String,
    pub thickness_px: u32,
    pub corner_radius_px: u32,
    /// Outer side length: code size plus the frame on both sides.
    pub outer_size_px: u32,
}

/// Attaches the frame layer when enabled; no-op otherwise.
pub fn overlay(container: &mut OutputContainer, frame: &FrameSpec) {
    if !frame.enabled {
        return;
    }
    let code_size = container.surface.width();
    container.frame = Some(FrameLayer {
        color: frame.color.clone(),
        thickness_px: frame.thickness_px,
        corner_radius_px: frame.corner_radius_px,
        outer_size_px: code_size + 2 * frame.thickness_px,
    });
}

impl FrameLayer {
    /// Rasterizes the border ring (transparent inside) so raster exports
    /// can flatten the overlay on top of the code.
    pub fn rasterize(&self) -> VeneerResult<RasterFill> {
        let side = self.outer_size_px;
        let s = f64::from(side);
        let t = f64::from(self.thickness_px);
        let radius = f64::from(self.corner_radius_px);

        let outer = RoundedRect::new(0.0, 0.0, s, s, radius);
        let inner = RoundedRect::new(t, t, s - t, s - t, (radius - t).max(0.0));
        let color = Rgba8::parse_hex(&self.color)?;
        let px = [color.r, color.g, color.b, color.a];

        let mut pixels = vec![0u8; (side * side * 4) as usize];
        for y in 0..side {
            for x in 0..side {
                let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if outer.contains(p) && !inner.contains(p) {
                    let i = ((y * side + x) * 4) as usize;
                    pixels[i..i + 4].copy_from_slice(&px);
                }
            }
        }

        Ok(RasterFill {
            width: side,
            height: side,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RenderSurface, SvgNode, VectorSurface};

    fn container(size: u32) -> OutputContainer {
        OutputContainer {
            surface: RenderSurface::Vector(VectorSurface {
                width: size,
                height: size,
                nodes: vec![SvgNode::Path {
                    d: "M0 0h1v1h-1z".to_string(),
                    fill: "#000000".to_string(),
                }],
            }),
            frame: None,
        }
    }

    #[test]
    fn disabled_frame_is_a_noop() {
        let mut c = container(100);
        overlay(&mut c, &FrameSpec::default());
        assert!(c.frame.is_none());
    }

    #[test]
    fn enabled_frame_wraps_the_code_box() {
        let mut c = container(100);
        overlay(
            &mut c,
            &FrameSpec {
                enabled: true,
                color: "#ff0000".to_string(),
                thickness_px: 6,
                corner_radius_px: 12,
            },
        );
        let frame = c.frame.expect("frame layer attached");
        assert_eq!(frame.outer_size_px, 112);
        assert_eq!(frame.color, "#ff0000");
    }

    #[test]
    fn overlay_never_touches_the_surface() {
        let mut c = container(64);
        let before = c.surface.clone();
        overlay(
            &mut c,
            &FrameSpec {
                enabled: true,
                color: "#00ff00".to_string(),
                thickness_px: 3,
                corner_radius_px: 0,
            },
        );
        assert_eq!(c.surface, before);
    }

    #[test]
    fn rasterized_ring_is_hollow() {
        let frame = FrameLayer {
            color: "#112233".to_string(),
            thickness_px: 5,
            corner_radius_px: 0,
            outer_size_px: 40,
        };
        let fill = frame.rasterize().unwrap();
        assert_eq!((fill.width, fill.height), (40, 40));
        // Border band is opaque frame color.
        assert_eq!(fill.pixel(2, 20).to_hex_string(), "#112233");
        assert_eq!(fill.pixel(20, 37).to_hex_string(), "#112233");
        // Interior stays transparent for the code underneath.
        assert_eq!(fill.pixel(20, 20).a, 0);
    }

    #[test]
    fn rounded_ring_clears_the_corner() {
        let frame = FrameLayer {
            color: "#000000".to_string(),
            thickness_px: 4,
            corner_radius_px: 16,
            outer_size_px: 64,
        };
        let fill = frame.rasterize().unwrap();
        // Outside the outer rounding the corner pixel stays empty.
        assert_eq!(fill.pixel(0, 0).a, 0);
        // Edge midpoints are solid.
        assert_eq!(fill.pixel(0, 32).a, 255);
    }
}
