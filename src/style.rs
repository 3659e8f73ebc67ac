use crate::{
    color::Rgba8,
    error::{VeneerError, VeneerResult},
};

/// Bounds enforced by [`StyleConfig::validate`].
pub const LOGO_SIZE_PERCENT_RANGE: std::ops::RangeInclusive<u32> = 10..=50;
pub const FRAME_THICKNESS_RANGE: std::ops::RangeInclusive<u32> = 1..=20;
pub const FRAME_CORNER_RADIUS_MAX: u32 = 50;

/// A fill that is either one solid color or an N-stop gradient.
///
/// When a gradient carries a pre-flattened `css` expression, that string is
/// the authoritative display value; the structured stops stay editable but
/// are only re-flattened when `css` is absent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorOrGradient {
    Solid {
        color: String,
    },
    Gradient {
        spec: GradientSpec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        css: Option<String>,
    },
}

impl ColorOrGradient {
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid {
            color: color.into(),
        }
    }

    /// The single flattened value fed to renderers and CSS consumers.
    pub fn resolve(&self) -> String {
        match self {
            Self::Solid { color } => color.clone(),
            Self::Gradient { css: Some(css), .. } => css.clone(),
            Self::Gradient { spec, css: None } => crate::gradient::css_for_spec(spec),
        }
    }

    pub fn validate(&self) -> VeneerResult<()> {
        match self {
            Self::Solid { color } => {
                Rgba8::parse_hex(color)?;
            }
            Self::Gradient { spec, .. } => {
                for stop in &spec.stops {
                    Rgba8::parse_hex(&stop.color)?;
                    if !(0.0..=100.0).contains(&stop.position) {
                        return Err(VeneerError::validation(format!(
                            "gradient stop position {} outside 0..100",
                            stop.position
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientSpec {
    #[serde(flatten)]
    pub kind: GradientKind,
    pub stops: Vec<ColorStop>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GradientKind {
    Linear {
        direction: LinearDirection,
    },
    Radial {
        shape: RadialShape,
        #[serde(default)]
        anchor: RadialAnchor,
    },
    Conic,
}

/// One of the 8 named corner/edge directions, or an explicit degree angle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearDirection {
    ToTop,
    ToTopRight,
    ToRight,
    ToBottomRight,
    ToBottom,
    ToBottomLeft,
    ToLeft,
    ToTopLeft,
    Degrees(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialShape {
    Circle,
    Ellipse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialAnchor {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

/// `position` is a percentage in `0..=100`. Stops need not arrive sorted;
/// consumers stable-sort ascending before use. Duplicates are permitted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorStop {
    pub color: String,
    pub position: f32,
}

impl ColorStop {
    pub fn new(color: impl Into<String>, position: f32) -> Self {
        Self {
            color: color.into(),
            position,
        }
    }
}

/// Semantic dot pattern names chosen by the merchant. Legacy or unknown
/// values deserialize to [`DotPattern::Unknown`] and map to the renderer's
/// default square geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotPattern {
    #[default]
    Square,
    Dots,
    Rounded,
    Smooth,
    Classy,
    ClassySmooth,
    #[serde(other)]
    Unknown,
}

/// Positional marker (locator square) outline shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerShape {
    #[default]
    Square,
    Rounded,
    Circle,
    #[serde(other)]
    Unknown,
}

/// Shape of the dot inside each positional marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CenterDotShape {
    #[default]
    Dot,
    Square,
    #[serde(other)]
    Unknown,
}

/// Custom coloring for the three positional markers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MarkerColors {
    /// One border + center pair applied to all three markers.
    Uniform { border: String, center: String },
    /// Independent pairs per corner. The data model has no slot for a
    /// fourth corner; unspecified corners reuse the top-left pair.
    PerCorner {
        top_left: MarkerColorPair,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        top_right: Option<MarkerColorPair>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bottom_left: Option<MarkerColorPair>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarkerColorPair {
    pub border: String,
    pub center: String,
}

impl MarkerColors {
    fn validate(&self) -> VeneerResult<()> {
        let pairs: Vec<(&str, &str)> = match self {
            Self::Uniform { border, center } => vec![(border, center)],
            Self::PerCorner {
                top_left,
                top_right,
                bottom_left,
            } => [Some(top_left), top_right.as_ref(), bottom_left.as_ref()]
                .into_iter()
                .flatten()
                .map(|p| (p.border.as_str(), p.center.as_str()))
                .collect(),
        };
        for (border, center) in pairs {
            Rgba8::parse_hex(border)?;
            Rgba8::parse_hex(center)?;
        }
        Ok(())
    }
}

/// Decorative shape drawn behind the logo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogoBackgroundSpec {
    pub color: String,
    pub shape: LogoShape,
    pub padding_px: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoShape {
    Circle,
    #[default]
    Square,
    Rounded,
    Diamond,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogoSpec {
    /// Image handed in by the form layer, as a `data:` URL.
    pub source: String,
    /// Logo side length as a percentage of the code's render size.
    pub size_percent: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<LogoBackgroundSpec>,
}

/// Decorative border drawn around the composed output. Never affects the
/// renderer's own geometry or scan-area padding.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSpec {
    pub enabled: bool,
    pub color: String,
    pub thickness_px: u32,
    pub corner_radius_px: u32,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            enabled: false,
            color: "#000000".to_string(),
            thickness_px: 4,
            corner_radius_px: 0,
        }
    }
}

/// Full declarative description of one code's visual appearance.
/// Immutable for the duration of one render pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleConfig {
    pub foreground: ColorOrGradient,
    /// `None` means a transparent background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorOrGradient>,
    /// Opaque reference (data URL) to a backdrop image supplied by an
    /// external collaborator; when present the background layer resolves
    /// to transparent so the image shows through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default)]
    pub pattern: DotPattern,
    #[serde(default)]
    pub marker: MarkerShape,
    #[serde(default)]
    pub center_dot: CenterDotShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_colors: Option<MarkerColors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoSpec>,
    #[serde(default)]
    pub frame: FrameSpec,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            foreground: ColorOrGradient::solid("#000000"),
            background: Some(ColorOrGradient::solid("#ffffff")),
            background_image: None,
            pattern: DotPattern::default(),
            marker: MarkerShape::default(),
            center_dot: CenterDotShape::default(),
            marker_colors: None,
            logo: None,
            frame: FrameSpec::default(),
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> VeneerResult<()> {
        self.foreground.validate()?;
        if let Some(bg) = &self.background {
            bg.validate()?;
        }
        if let Some(colors) = &self.marker_colors {
            colors.validate()?;
        }

        if let Some(logo) = &self.logo {
            if !LOGO_SIZE_PERCENT_RANGE.contains(&logo.size_percent) {
                return Err(VeneerError::validation(format!(
                    "logo size_percent {} outside {:?}",
                    logo.size_percent, LOGO_SIZE_PERCENT_RANGE
                )));
            }
            if let Some(bg) = &logo.background {
                Rgba8::parse_hex(&bg.color)?;
            }
        }

        if self.frame.enabled {
            Rgba8::parse_hex(&self.frame.color)?;
            if !FRAME_THICKNESS_RANGE.contains(&self.frame.thickness_px) {
                return Err(VeneerError::validation(format!(
                    "frame thickness_px {} outside {:?}",
                    self.frame.thickness_px, FRAME_THICKNESS_RANGE
                )));
            }
            if self.frame.corner_radius_px > FRAME_CORNER_RADIUS_MAX {
                return Err(VeneerError::validation(format!(
                    "frame corner_radius_px {} exceeds {}",
                    self.frame.corner_radius_px, FRAME_CORNER_RADIUS_MAX
                )));
            }
        }

        Ok(())
    }
}
