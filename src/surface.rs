//! Output surface model: what the external renderer hands back and what
//! the export collaborator eventually captures.

use std::fmt::Write as _;

use crate::frame_overlay::FrameLayer;

/// Raster output: straight RGBA8 pixels plus the canvas-level background
/// property as the renderer left it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    /// Canvas background fill; `None` when the renderer set no property.
    pub background: Option<String>,
}

/// Minimal vector node set produced by matrix renderers.
#[derive(Clone, Debug, PartialEq)]
pub enum SvgNode {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Path {
        d: String,
        fill: String,
    },
    Image {
        href: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct VectorSurface {
    pub width: u32,
    pub height: u32,
    pub nodes: Vec<SvgNode>,
}

impl VectorSurface {
    /// Serializes the node list as a standalone SVG document.
    pub fn to_svg_string(&self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            self.width, self.height, self.width, self.height
        );
        for node in &self.nodes {
            match node {
                SvgNode::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => {
                    let _ = write!(
                        out,
                        "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
                        xml_escape(fill)
                    );
                }
                SvgNode::Path { d, fill } => {
                    let _ = write!(
                        out,
                        "<path d=\"{}\" fill=\"{}\"/>",
                        xml_escape(d),
                        xml_escape(fill)
                    );
                }
                SvgNode::Image {
                    href,
                    x,
                    y,
                    width,
                    height,
                } => {
                    let _ = write!(
                        out,
                        "<image href=\"{}\" x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\"/>",
                        xml_escape(href)
                    );
                }
            }
        }
        out.push_str("</svg>");
        out
    }
}

/// Either kind of renderer output.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderSurface {
    Raster(RasterSurface),
    Vector(VectorSurface),
}

impl RenderSurface {
    pub fn width(&self) -> u32 {
        match self {
            Self::Raster(s) => s.width,
            Self::Vector(s) => s.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Raster(s) => s.height,
            Self::Vector(s) => s.height,
        }
    }
}

/// The final composed visual: the normalized surface plus an optional
/// decorative frame layer. Exclusively owned by the most recent pass.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputContainer {
    pub surface: RenderSurface,
    pub frame: Option<FrameLayer>,
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
