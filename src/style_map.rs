//! Pure, total mapping from semantic style enums to the geometry/color
//! option groups consumed by the external matrix renderer.

use crate::style::{
    CenterDotShape, DotPattern, MarkerColors, MarkerShape, StyleConfig,
};

/// Geometry names understood by the external renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotType {
    Square,
    Dots,
    Rounded,
    ExtraRounded,
    Classy,
    ClassyRounded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerSquareType {
    Square,
    ExtraRounded,
    Dot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerDotType {
    Dot,
    Square,
}

/// The three positional markers of a code matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerCorner {
    TopLeft,
    TopRight,
    BottomLeft,
}

/// One flattened color per positional marker.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerColorTriple {
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
}

impl CornerColorTriple {
    pub fn uniform(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            top_left: color.clone(),
            top_right: color.clone(),
            bottom_left: color,
        }
    }

    pub fn get(&self, corner: MarkerCorner) -> &str {
        match corner {
            MarkerCorner::TopLeft => &self.top_left,
            MarkerCorner::TopRight => &self.top_right,
            MarkerCorner::BottomLeft => &self.bottom_left,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotsOptions {
    #[serde(rename = "type")]
    pub dot_type: DotType,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundOptions {
    /// `None` requests a transparent background.
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornersSquareOptions {
    #[serde(rename = "type")]
    pub corner_type: CornerSquareType,
    pub colors: CornerColorTriple,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornersDotOptions {
    #[serde(rename = "type")]
    pub corner_type: CornerDotType,
    pub colors: CornerColorTriple,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    /// Logo side as a fraction of the code's render size.
    pub size: f64,
    pub margin: u32,
    pub hide_background_dots: bool,
}

/// Passthrough knobs owned by the external encoder, never computed here.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrOptions {
    pub margin: u32,
}

/// Everything the external renderer consumes for one pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererOptions {
    pub width: u32,
    pub height: u32,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub qr_options: QrOptions,
    pub image_options: ImageOptions,
    pub dots_options: DotsOptions,
    pub background_options: BackgroundOptions,
    pub corners_square_options: CornersSquareOptions,
    pub corners_dot_options: CornersDotOptions,
}

/// Builds the full renderer option set from one immutable style snapshot.
/// Total: every enum value has a mapping, unknown values fall back to the
/// renderer defaults, and gradient foregrounds resolve to their flattened
/// CSS string.
pub fn renderer_options(
    payload: &str,
    size_px: u32,
    style: &StyleConfig,
    image: Option<String>,
) -> RendererOptions {
    let foreground = style.foreground.resolve();
    let (border_colors, center_colors) = marker_colors(style, &foreground);

    let logo_fraction = style
        .logo
        .as_ref()
        .map(|l| f64::from(l.size_percent) / 100.0)
        .unwrap_or(0.0);

    RendererOptions {
        width: size_px,
        height: size_px,
        data: payload.to_string(),
        image,
        qr_options: QrOptions::default(),
        image_options: ImageOptions {
            size: logo_fraction,
            margin: 0,
            hide_background_dots: style.logo.is_some(),
        },
        dots_options: DotsOptions {
            dot_type: dot_type(style.pattern),
            color: foreground.clone(),
        },
        background_options: BackgroundOptions {
            color: resolved_background(style),
            image: style.background_image.clone(),
        },
        corners_square_options: CornersSquareOptions {
            corner_type: corner_square_type(style.marker),
            colors: border_colors,
        },
        corners_dot_options: CornersDotOptions {
            corner_type: corner_dot_type(style.center_dot),
            colors: center_colors,
        },
    }
}

/// Resolved background layer: `None` means transparent, which also holds
/// whenever a backdrop image is configured.
pub fn resolved_background(style: &StyleConfig) -> Option<String> {
    if style.background_image.is_some() {
        return None;
    }
    style.background.as_ref().map(|bg| bg.resolve())
}

fn marker_colors(style: &StyleConfig, foreground: &str) -> (CornerColorTriple, CornerColorTriple) {
    match &style.marker_colors {
        None => (
            CornerColorTriple::uniform(foreground),
            CornerColorTriple::uniform(foreground),
        ),
        Some(MarkerColors::Uniform { border, center }) => (
            CornerColorTriple::uniform(border.clone()),
            CornerColorTriple::uniform(center.clone()),
        ),
        Some(MarkerColors::PerCorner {
            top_left,
            top_right,
            bottom_left,
        }) => {
            // Corners without a declared pair (the data model has no slot
            // for a fourth) reuse the top-left pair.
            let tr = top_right.as_ref().unwrap_or(top_left);
            let bl = bottom_left.as_ref().unwrap_or(top_left);
            (
                CornerColorTriple {
                    top_left: top_left.border.clone(),
                    top_right: tr.border.clone(),
                    bottom_left: bl.border.clone(),
                },
                CornerColorTriple {
                    top_left: top_left.center.clone(),
                    top_right: tr.center.clone(),
                    bottom_left: bl.center.clone(),
                },
            )
        }
    }
}

fn dot_type(pattern: DotPattern) -> DotType {
    match pattern {
        DotPattern::Square | DotPattern::Unknown => DotType::Square,
        DotPattern::Dots => DotType::Dots,
        DotPattern::Rounded => DotType::Rounded,
        DotPattern::Smooth => DotType::ExtraRounded,
        DotPattern::Classy => DotType::Classy,
        DotPattern::ClassySmooth => DotType::ClassyRounded,
    }
}

fn corner_square_type(marker: MarkerShape) -> CornerSquareType {
    match marker {
        MarkerShape::Square | MarkerShape::Unknown => CornerSquareType::Square,
        MarkerShape::Rounded => CornerSquareType::ExtraRounded,
        MarkerShape::Circle => CornerSquareType::Dot,
    }
}

fn corner_dot_type(center_dot: CenterDotShape) -> CornerDotType {
    match center_dot {
        CenterDotShape::Dot | CenterDotShape::Unknown => CornerDotType::Dot,
        CenterDotShape::Square => CornerDotType::Square,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{
        ColorOrGradient, ColorStop, GradientKind, GradientSpec, LinearDirection, MarkerColorPair,
    };

    #[test]
    fn mapping_is_deterministic() {
        let style = StyleConfig::default();
        let a = renderer_options("payload", 300, &style, None);
        let b = renderer_options("payload", 300, &style, None);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn solid_style_maps_plain_colors() {
        let style = StyleConfig::default();
        let opts = renderer_options("hello", 300, &style, None);
        assert_eq!(opts.dots_options.color, "#000000");
        assert_eq!(opts.background_options.color.as_deref(), Some("#ffffff"));
        assert!(opts.image.is_none());
        assert_eq!(opts.dots_options.dot_type, DotType::Square);
    }

    #[test]
    fn unknown_enums_fall_back_to_defaults() {
        let style = StyleConfig {
            pattern: DotPattern::Unknown,
            marker: MarkerShape::Unknown,
            center_dot: CenterDotShape::Unknown,
            ..StyleConfig::default()
        };
        let opts = renderer_options("x", 100, &style, None);
        assert_eq!(opts.dots_options.dot_type, DotType::Square);
        assert_eq!(
            opts.corners_square_options.corner_type,
            CornerSquareType::Square
        );
        assert_eq!(opts.corners_dot_options.corner_type, CornerDotType::Dot);
    }

    #[test]
    fn gradient_foreground_flattens_to_css_string() {
        let style = StyleConfig {
            foreground: ColorOrGradient::Gradient {
                spec: GradientSpec {
                    kind: GradientKind::Linear {
                        direction: LinearDirection::ToRight,
                    },
                    stops: vec![
                        ColorStop::new("#007b5c", 0.0),
                        ColorStop::new("#00a86b", 100.0),
                    ],
                },
                css: None,
            },
            marker_colors: None,
            ..StyleConfig::default()
        };
        let opts = renderer_options("x", 300, &style, None);
        let expected = "linear-gradient(to right, #007b5c 0%, #00a86b 100%)";
        assert_eq!(opts.dots_options.color, expected);
        for corner in [
            MarkerCorner::TopLeft,
            MarkerCorner::TopRight,
            MarkerCorner::BottomLeft,
        ] {
            assert_eq!(opts.corners_square_options.colors.get(corner), expected);
            assert_eq!(opts.corners_dot_options.colors.get(corner), expected);
        }
    }

    #[test]
    fn per_corner_missing_pairs_reuse_top_left() {
        let style = StyleConfig {
            marker_colors: Some(MarkerColors::PerCorner {
                top_left: MarkerColorPair {
                    border: "#101010".to_string(),
                    center: "#202020".to_string(),
                },
                top_right: Some(MarkerColorPair {
                    border: "#303030".to_string(),
                    center: "#404040".to_string(),
                }),
                bottom_left: None,
            }),
            ..StyleConfig::default()
        };
        let opts = renderer_options("x", 300, &style, None);
        let squares = &opts.corners_square_options.colors;
        assert_eq!(squares.top_right, "#303030");
        assert_eq!(squares.bottom_left, "#101010");
        let dots = &opts.corners_dot_options.colors;
        assert_eq!(dots.top_right, "#404040");
        assert_eq!(dots.bottom_left, "#202020");
    }

    #[test]
    fn background_image_forces_transparent_background() {
        let style = StyleConfig {
            background_image: Some("data:image/png;base64,".to_string()),
            ..StyleConfig::default()
        };
        let opts = renderer_options("x", 300, &style, None);
        assert!(opts.background_options.color.is_none());
        assert!(opts.background_options.image.is_some());
    }

    #[test]
    fn options_serialize_with_renderer_field_names() {
        let opts = renderer_options("x", 10, &StyleConfig::default(), None);
        let json = serde_json::to_value(&opts).unwrap();
        assert!(json.get("dotsOptions").is_some());
        assert!(json.get("cornersSquareOptions").is_some());
        assert!(json["dotsOptions"].get("type").is_some());
    }
}
