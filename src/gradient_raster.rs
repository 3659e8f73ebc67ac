//! Pixel-side gradient rasterization: a fill value becomes a straight
//! RGBA8 buffer usable by any drawing surface.
//!
//! Linear degree angles reproduce the preview's ellipse-normalized
//! projection (endpoints `(w/2, h/2)` and `(w/2 + cos*w, h/2 + sin*h)`),
//! not true CSS angle semantics. The two sides must stay in visual parity,
//! so the approximation is load-bearing here.

use kurbo::{Point, Vec2};
use rayon::prelude::*;

use crate::{
    color::Rgba8,
    error::{VeneerError, VeneerResult},
    gradient::sorted_stops,
    style::{ColorOrGradient, GradientKind, GradientSpec, LinearDirection},
};

/// Row count below which rasterization stays serial.
const PARALLEL_MIN_PIXELS: usize = 256 * 256;

/// A rasterized fill: straight RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterFill {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterFill {
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = ((y * self.width + x) * 4) as usize;
        Rgba8 {
            r: self.pixels[i],
            g: self.pixels[i + 1],
            b: self.pixels[i + 2],
            a: self.pixels[i + 3],
        }
    }
}

/// Rasterizes any fill value into a `width x height` buffer.
pub fn raster_fill(value: &ColorOrGradient, width: u32, height: u32) -> VeneerResult<RasterFill> {
    if width == 0 || height == 0 {
        return Err(VeneerError::validation(
            "raster fill dimensions must be > 0",
        ));
    }

    match value {
        ColorOrGradient::Solid { color } => {
            let c = Rgba8::parse_hex(color)?;
            Ok(solid_fill(width, height, c))
        }
        ColorOrGradient::Gradient { spec, .. } => raster_gradient(spec, width, height),
    }
}

fn raster_gradient(spec: &GradientSpec, width: u32, height: u32) -> VeneerResult<RasterFill> {
    let stops = resolve_stops(spec)?;
    if stops.len() < 2 {
        // Degenerate gradients rasterize as a solid fill of the first stop.
        let c = stops.first().copied().map_or(Rgba8::TRANSPARENT, |s| s.1);
        return Ok(solid_fill(width, height, c));
    }

    let w = f64::from(width);
    let h = f64::from(height);
    match &spec.kind {
        GradientKind::Linear { direction } => {
            let (start, end) = linear_endpoints(direction, w, h);
            let axis = end - start;
            let len_sq = axis.hypot2().max(f64::EPSILON);
            Ok(fill_with(width, height, &stops, move |p| {
                ((p - start).dot(axis) / len_sq) as f32
            }))
        }
        GradientKind::Radial { .. } => {
            let center = Point::new(w / 2.0, h / 2.0);
            let radius = (w.min(h) / 2.0).max(f64::EPSILON);
            Ok(fill_with(width, height, &stops, move |p| {
                ((p - center).hypot() / radius) as f32
            }))
        }
        GradientKind::Conic => {
            let center = Point::new(w / 2.0, h / 2.0);
            Ok(fill_with(width, height, &stops, move |p| {
                let d = p - center;
                let turn = d.y.atan2(d.x) / std::f64::consts::TAU;
                turn.rem_euclid(1.0) as f32
            }))
        }
    }
}

/// Fixed endpoint pairs for the 8 named directions; degree angles project
/// from the rectangle center with ellipse-normalized magnitude.
fn linear_endpoints(direction: &LinearDirection, w: f64, h: f64) -> (Point, Point) {
    match direction {
        LinearDirection::ToRight => (Point::new(0.0, h / 2.0), Point::new(w, h / 2.0)),
        LinearDirection::ToLeft => (Point::new(w, h / 2.0), Point::new(0.0, h / 2.0)),
        LinearDirection::ToBottom => (Point::new(w / 2.0, 0.0), Point::new(w / 2.0, h)),
        LinearDirection::ToTop => (Point::new(w / 2.0, h), Point::new(w / 2.0, 0.0)),
        LinearDirection::ToBottomRight => (Point::new(0.0, 0.0), Point::new(w, h)),
        LinearDirection::ToBottomLeft => (Point::new(w, 0.0), Point::new(0.0, h)),
        LinearDirection::ToTopRight => (Point::new(0.0, h), Point::new(w, 0.0)),
        LinearDirection::ToTopLeft => (Point::new(w, h), Point::new(0.0, 0.0)),
        LinearDirection::Degrees(deg) => {
            let theta = deg.to_radians();
            let start = Point::new(w / 2.0, h / 2.0);
            let end = start + Vec2::new(theta.cos() * w, theta.sin() * h);
            (start, end)
        }
    }
}

fn resolve_stops(spec: &GradientSpec) -> VeneerResult<Vec<(f32, Rgba8)>> {
    sorted_stops(&spec.stops)
        .iter()
        .map(|s| Ok((s.position / 100.0, Rgba8::parse_hex(&s.color)?)))
        .collect()
}

/// Samples the stop ramp at `t`. Outside the covered range the nearest
/// stop clamps; a zero-width segment yields its later stop.
fn sample(stops: &[(f32, Rgba8)], t: f32) -> Rgba8 {
    let (first_pos, first_color) = stops[0];
    if t <= first_pos {
        return first_color;
    }
    for pair in stops.windows(2) {
        let (a_pos, a_color) = pair[0];
        let (b_pos, b_color) = pair[1];
        if t <= b_pos {
            let span = b_pos - a_pos;
            if span <= f32::EPSILON {
                return b_color;
            }
            return a_color.lerp(b_color, (t - a_pos) / span);
        }
    }
    stops[stops.len() - 1].1
}

fn solid_fill(width: u32, height: u32, color: Rgba8) -> RasterFill {
    let px = [color.r, color.g, color.b, color.a];
    RasterFill {
        width,
        height,
        pixels: px.repeat((width * height) as usize),
    }
}

/// Evaluates `project` at each pixel center and samples the stop ramp,
/// row-parallel for large targets.
fn fill_with(
    width: u32,
    height: u32,
    stops: &[(f32, Rgba8)],
    project: impl Fn(Point) -> f32 + Sync,
) -> RasterFill {
    let row_bytes = width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * height as usize];

    let fill_row = |y: usize, row: &mut [u8]| {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let t = project(p).clamp(0.0, 1.0);
            let c = sample(stops, t);
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    };

    if (width as usize) * (height as usize) >= PARALLEL_MIN_PIXELS {
        pixels
            .par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    } else {
        for (y, row) in pixels.chunks_exact_mut(row_bytes).enumerate() {
            fill_row(y, row);
        }
    }

    RasterFill {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ColorStop;

    fn linear_spec(direction: LinearDirection, stops: Vec<ColorStop>) -> ColorOrGradient {
        ColorOrGradient::Gradient {
            spec: GradientSpec {
                kind: GradientKind::Linear { direction },
                stops,
            },
            css: None,
        }
    }

    fn bw_stops() -> Vec<ColorStop> {
        vec![
            ColorStop::new("#000000", 0.0),
            ColorStop::new("#ffffff", 100.0),
        ]
    }

    #[test]
    fn solid_fill_is_uniform() {
        let fill = raster_fill(&ColorOrGradient::solid("#112233"), 4, 3).unwrap();
        let expected = Rgba8::opaque(0x11, 0x22, 0x33);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(fill.pixel(x, y), expected);
            }
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(raster_fill(&ColorOrGradient::solid("#000000"), 0, 8).is_err());
    }

    #[test]
    fn one_stop_gradient_matches_solid() {
        let gradient = linear_spec(
            LinearDirection::ToRight,
            vec![ColorStop::new("#112233", 0.0)],
        );
        let as_gradient = raster_fill(&gradient, 16, 16).unwrap();
        let as_solid = raster_fill(&ColorOrGradient::solid("#112233"), 16, 16).unwrap();
        assert_eq!(as_gradient, as_solid);
    }

    #[test]
    fn to_right_ramps_left_to_right() {
        let fill = raster_fill(&linear_spec(LinearDirection::ToRight, bw_stops()), 64, 8).unwrap();
        assert!(fill.pixel(0, 4).r < 8);
        assert!(fill.pixel(63, 4).r > 247);
        assert!(fill.pixel(15, 4).r < fill.pixel(48, 4).r);
        // Columns are constant for a horizontal axis.
        assert_eq!(fill.pixel(20, 0), fill.pixel(20, 7));
    }

    #[test]
    fn to_left_is_mirror_of_to_right() {
        let right = raster_fill(&linear_spec(LinearDirection::ToRight, bw_stops()), 32, 4).unwrap();
        let left = raster_fill(&linear_spec(LinearDirection::ToLeft, bw_stops()), 32, 4).unwrap();
        for x in 0..32 {
            assert_eq!(right.pixel(x, 2), left.pixel(31 - x, 2));
        }
    }

    #[test]
    fn unsorted_stops_rasterize_identically() {
        let sorted = linear_spec(LinearDirection::ToBottom, bw_stops());
        let shuffled = linear_spec(
            LinearDirection::ToBottom,
            vec![
                ColorStop::new("#ffffff", 100.0),
                ColorStop::new("#000000", 0.0),
            ],
        );
        assert_eq!(
            raster_fill(&sorted, 8, 32).unwrap(),
            raster_fill(&shuffled, 8, 32).unwrap()
        );
    }

    #[test]
    fn degree_zero_ramps_along_positive_x() {
        let fill = raster_fill(
            &linear_spec(LinearDirection::Degrees(0.0), bw_stops()),
            64,
            8,
        )
        .unwrap();
        // Axis starts at the center, so the left half sits at the first stop.
        assert_eq!(fill.pixel(0, 4), Rgba8::BLACK);
        assert!(fill.pixel(63, 4).r > fill.pixel(40, 4).r);
    }

    #[test]
    fn radial_is_darkest_at_center() {
        let value = ColorOrGradient::Gradient {
            spec: GradientSpec {
                kind: GradientKind::Radial {
                    shape: crate::style::RadialShape::Circle,
                    anchor: Default::default(),
                },
                stops: bw_stops(),
            },
            css: None,
        };
        let fill = raster_fill(&value, 33, 33).unwrap();
        assert!(fill.pixel(16, 16).r < 16);
        assert!(fill.pixel(0, 16).r > 240);
        assert!(fill.pixel(16, 0).r > 240);
    }

    #[test]
    fn conic_sweeps_full_turn() {
        let value = ColorOrGradient::Gradient {
            spec: GradientSpec {
                kind: GradientKind::Conic,
                stops: bw_stops(),
            },
            css: None,
        };
        let fill = raster_fill(&value, 33, 33).unwrap();
        // Just right of center is the angle origin; just below is a quarter turn.
        assert!(fill.pixel(30, 17).r < 40);
        let quarter = fill.pixel(16, 30).r;
        assert!((40..180).contains(&(quarter as i32)));
    }

    #[test]
    fn duplicate_position_uses_later_stop_beyond_boundary() {
        let value = linear_spec(
            LinearDirection::ToRight,
            vec![
                ColorStop::new("#000000", 0.0),
                ColorStop::new("#ff0000", 50.0),
                ColorStop::new("#0000ff", 50.0),
                ColorStop::new("#0000ff", 100.0),
            ],
        );
        let fill = raster_fill(&value, 100, 2).unwrap();
        // Just past the shared position the later stop's color holds.
        let px = fill.pixel(60, 0);
        assert_eq!((px.r, px.b), (0, 255));
    }
}
