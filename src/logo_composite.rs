//! Flattens a logo image and its decorative background shape into one
//! square PNG sized for the target code's logo slot.

use anyhow::Context as _;
use base64::Engine as _;
use image::RgbaImage;
use kurbo::{Circle, Point, RoundedRect, Shape as _};

use crate::{
    color::Rgba8,
    error::{VeneerError, VeneerResult},
    style::{LogoBackgroundSpec, LogoShape},
};

/// Derived artifact of one render pass. Its pixel dimensions depend on the
/// target render size, so it is recomputed per pass and never reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeLogo {
    pub data_url: String,
    pub size_px: u32,
}

/// Extracts the base64 payload of a `data:` URL. The engine performs no
/// network or file IO, so a data URL is the only accepted logo transport.
pub fn decode_data_url(source: &str) -> VeneerResult<Vec<u8>> {
    let rest = source
        .strip_prefix("data:")
        .ok_or_else(|| VeneerError::image_decode("logo source must be a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| VeneerError::image_decode("data URL has no payload separator"))?;
    if !meta.ends_with(";base64") {
        return Err(VeneerError::image_decode(
            "only base64 data URLs are supported",
        ));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| VeneerError::image_decode(format!("invalid base64 payload: {e}")))
}

/// Decodes a logo handed in as a data URL into straight RGBA8.
pub fn decode_logo(source: &str) -> VeneerResult<RgbaImage> {
    let bytes = decode_data_url(source)?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| VeneerError::image_decode(format!("decode logo image: {e}")))?;
    Ok(img.to_rgba8())
}

/// Composites `logo` over its background shape, scaled for a code of
/// `target_code_size_px`. Output is always square with the logo centered.
pub fn composite(
    logo: &RgbaImage,
    bg: &LogoBackgroundSpec,
    target_code_size_px: u32,
    logo_size_percent: u32,
) -> VeneerResult<CompositeLogo> {
    let canvas = composite_image(logo, bg, target_code_size_px, logo_size_percent)?;
    let side = canvas.width();

    let mut png = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png);
    image::ImageEncoder::write_image(
        encoder,
        canvas.as_raw(),
        side,
        side,
        image::ExtendedColorType::Rgba8,
    )
    .context("encode composite logo png")?;

    Ok(CompositeLogo {
        data_url: format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&png)
        ),
        size_px: side,
    })
}

/// The flattened pixels behind [`composite`], exposed for pixel-level
/// inspection.
pub fn composite_image(
    logo: &RgbaImage,
    bg: &LogoBackgroundSpec,
    target_code_size_px: u32,
    logo_size_percent: u32,
) -> VeneerResult<RgbaImage> {
    let logo_px = (target_code_size_px * logo_size_percent + 50) / 100;
    if logo_px == 0 {
        return Err(VeneerError::validation(
            "composite logo size rounds to zero pixels",
        ));
    }

    // Base side: logo box plus padding on every side. The diamond canvas
    // doubles so the rhombus touching its edge midpoints circumscribes the
    // padded logo box instead of clipping its corners.
    let base = logo_px + 2 * bg.padding_px;
    let side = match bg.shape {
        LogoShape::Diamond => 2 * base,
        _ => base,
    };

    let color = Rgba8::parse_hex(&bg.color)?;
    let mut canvas = RgbaImage::from_pixel(side, side, image::Rgba([0, 0, 0, 0]));
    fill_shape(&mut canvas, bg.shape, base, color);

    let scaled = image::imageops::resize(
        logo,
        logo_px,
        logo_px,
        image::imageops::FilterType::Triangle,
    );
    let offset = i64::from((side - logo_px) / 2);
    image::imageops::overlay(&mut canvas, &scaled, offset, offset);

    Ok(canvas)
}

fn fill_shape(canvas: &mut RgbaImage, shape: LogoShape, base: u32, color: Rgba8) {
    let side = canvas.width();
    let s = f64::from(side);
    let center = s / 2.0;
    let px = image::Rgba([color.r, color.g, color.b, color.a]);

    let covered: Box<dyn Fn(Point) -> bool> = match shape {
        LogoShape::Square => Box::new(|_| true),
        LogoShape::Circle => {
            let disk = Circle::new((center, center), f64::from(base) / 2.0);
            Box::new(move |p| disk.contains(p))
        }
        LogoShape::Rounded => {
            let radius = 0.2 * (f64::from(base) / 2.0);
            let rect = RoundedRect::new(0.0, 0.0, s, s, radius);
            Box::new(move |p| rect.contains(p))
        }
        LogoShape::Diamond => {
            let half_diag = f64::from(base);
            Box::new(move |p| (p.x - center).abs() + (p.y - center).abs() <= half_diag)
        }
    };

    for y in 0..side {
        for x in 0..side {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if covered(p) {
                canvas.put_pixel(x, y, px);
            }
        }
    }
}
