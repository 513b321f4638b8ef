//! Offline CPU rendition of the ripple filter chain.
//!
//! The noise texture is produced by rasterizing an `feTurbulence` filter through `resvg`; the
//! displacement step is applied here, following `feDisplacementMap`: each output pixel samples
//! the source at `p + scale * (C(p) - 0.5)` where `C` is the chosen noise channel.

use std::path::Path;

use anyhow::Context;

use crate::{
    effects::ripple::{DisplacementFilter, NoiseKind, TurbulenceParams},
    foundation::error::{AtelierError, AtelierResult},
};

const MAX_DIM: u32 = 16_384;

/// Standalone SVG whose only content is the noise texture for `params`.
pub fn noise_svg(width: u32, height: u32, params: TurbulenceParams, filter: &DisplacementFilter) -> String {
    let kind = match filter.noise {
        NoiseKind::FractalNoise => "fractalNoise",
        NoiseKind::Turbulence => "turbulence",
    };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
<filter id="ripple-noise" filterUnits="userSpaceOnUse" x="0" y="0" width="{width}" height="{height}" color-interpolation-filters="sRGB">
<feTurbulence type="{kind}" baseFrequency="{fx} {fy}" numOctaves="{octaves}" seed="0"/>
</filter>
<rect width="{width}" height="{height}" filter="url(#ripple-noise)"/>
</svg>"#,
        fx = params.base_frequency_x,
        fy = params.base_frequency_y,
        octaves = filter.octaves,
    )
}

/// Straight-alpha RGBA noise texture.
pub fn render_noise(
    width: u32,
    height: u32,
    params: TurbulenceParams,
    filter: &DisplacementFilter,
) -> AtelierResult<Vec<u8>> {
    if width > MAX_DIM || height > MAX_DIM {
        return Err(AtelierError::render(format!(
            "ripple raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let svg = noise_svg(width, height, params, filter);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).context("parse noise svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| AtelierError::render("failed to allocate noise pixmap"))?;
    resvg::render(&tree, resvg::tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut rgba = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    Ok(rgba)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Warp `source` by `noise` (same dimensions, straight RGBA).
///
/// Samples that land outside the source are transparent.
pub fn displace(
    source: &image::RgbaImage,
    noise: &[u8],
    filter: &DisplacementFilter,
) -> AtelierResult<image::RgbaImage> {
    let (w, h) = source.dimensions();
    if noise.len() != (w as usize) * (h as usize) * 4 {
        return Err(AtelierError::render(format!(
            "noise buffer has {} bytes, expected {}x{}x4",
            noise.len(),
            w,
            h
        )));
    }
    let (cx, cy) = (filter.x_channel.index(), filter.y_channel.index());

    let mut out = image::RgbaImage::new(w, h);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let i = ((y as usize) * (w as usize) + x as usize) * 4;
        let dx = filter.scale * (f64::from(noise[i + cx]) / 255.0 - 0.5);
        let dy = filter.scale * (f64::from(noise[i + cy]) / 255.0 - 0.5);
        let sx = (f64::from(x) + dx).round();
        let sy = (f64::from(y) + dy).round();
        if sx >= 0.0 && sy >= 0.0 && sx < f64::from(w) && sy < f64::from(h) {
            *px = *source.get_pixel(sx as u32, sy as u32);
        }
    }
    Ok(out)
}

/// Apply the full noise + displacement chain to `source`.
#[tracing::instrument(skip(source, filter), fields(width = source.width(), height = source.height()))]
pub fn render_ripple(
    source: &image::RgbaImage,
    params: TurbulenceParams,
    filter: &DisplacementFilter,
) -> AtelierResult<image::RgbaImage> {
    let (w, h) = source.dimensions();
    if w == 0 || h == 0 {
        return Err(AtelierError::render("cannot ripple an empty image"));
    }
    if filter.scale == 0.0 {
        return Ok(source.clone());
    }
    let noise = render_noise(w, h, params, filter)?;
    displace(source, &noise, filter)
}

/// Read `input`, ripple it, and write the result to `output` (format from the extension).
pub fn render_ripple_file(
    input: &Path,
    output: &Path,
    params: TurbulenceParams,
    filter: &DisplacementFilter,
) -> AtelierResult<()> {
    let source = image::open(input)
        .with_context(|| format!("open image '{}'", input.display()))?
        .to_rgba8();
    let out = render_ripple(&source, params, filter)?;
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    out.save(output)
        .with_context(|| format!("write image '{}'", output.display()))?;
    Ok(())
}
