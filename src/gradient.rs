//! CSS-side gradient flattening: a [`GradientSpec`] becomes a
//! `linear-gradient(..)` / `radial-gradient(..)` / `conic-gradient(..)`
//! expression with stops in stable ascending position order.

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::style::{
    ColorOrGradient, ColorStop, GradientKind, GradientSpec, LinearDirection, RadialAnchor,
    RadialShape,
};

/// Stable ascending sort by stop position. Duplicate positions keep their
/// relative order; the caller is never required to pre-sort.
pub fn sorted_stops(stops: &[ColorStop]) -> Vec<ColorStop> {
    let mut sorted = stops.to_vec();
    sorted.sort_by(|a, b| {
        a.position
            .partial_cmp(&b.position)
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// Flattened CSS value for any fill. Solid colors pass through unchanged.
pub fn css_string(value: &ColorOrGradient) -> String {
    value.resolve()
}

pub(crate) fn css_for_spec(spec: &GradientSpec) -> String {
    let stops = sorted_stops(&spec.stops);
    if stops.len() < 2 {
        // Degenerate gradients collapse to a solid fill of the first stop.
        return stops
            .first()
            .map(|s| s.color.clone())
            .unwrap_or_else(|| "transparent".to_string());
    }

    let mut out = String::new();
    match &spec.kind {
        GradientKind::Linear { direction } => {
            let _ = write!(out, "linear-gradient({}", direction_css(direction));
        }
        GradientKind::Radial { shape, anchor } => {
            let _ = write!(
                out,
                "radial-gradient({} at {}",
                radial_shape_css(*shape),
                radial_anchor_css(*anchor)
            );
        }
        GradientKind::Conic => out.push_str("conic-gradient("),
    }
    let mut first = matches!(spec.kind, GradientKind::Conic);
    for stop in &stops {
        if !first {
            out.push_str(", ");
        }
        first = false;
        let _ = write!(out, "{} {}%", stop.color, format_position(stop.position));
    }
    out.push(')');
    out
}

fn direction_css(direction: &LinearDirection) -> String {
    match direction {
        LinearDirection::ToTop => "to top".to_string(),
        LinearDirection::ToTopRight => "to top right".to_string(),
        LinearDirection::ToRight => "to right".to_string(),
        LinearDirection::ToBottomRight => "to bottom right".to_string(),
        LinearDirection::ToBottom => "to bottom".to_string(),
        LinearDirection::ToBottomLeft => "to bottom left".to_string(),
        LinearDirection::ToLeft => "to left".to_string(),
        LinearDirection::ToTopLeft => "to top left".to_string(),
        LinearDirection::Degrees(deg) => format!("{}deg", trim_float(*deg)),
    }
}

fn radial_shape_css(shape: RadialShape) -> &'static str {
    match shape {
        RadialShape::Circle => "circle",
        RadialShape::Ellipse => "ellipse",
    }
}

fn radial_anchor_css(anchor: RadialAnchor) -> &'static str {
    match anchor {
        RadialAnchor::Center => "center",
        RadialAnchor::Top => "top",
        RadialAnchor::Bottom => "bottom",
        RadialAnchor::Left => "left",
        RadialAnchor::Right => "right",
    }
}

fn format_position(p: f32) -> String {
    if p.fract() == 0.0 {
        format!("{}", p as i64)
    } else {
        format!("{p}")
    }
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
