use crate::{ChartSpec, ColorToken, Failure, Renderer, Viewport};
use chartsvg_render::backend;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Convert(#[from] Failure),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Painted under the chart. The chart's own background rect still covers it.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

impl Renderer {
    pub fn convert_png(
        &self,
        spec: &ChartSpec,
        viewport: Viewport,
        raster: &RasterOptions,
    ) -> Result<Vec<u8>> {
        let svg = self.convert(spec, viewport)?;
        svg_to_png(&svg, raster)
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    if let Some(family) = backend::defaults().font_families.first() {
        opt.font_family = family.clone();
    }

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // Chart SVGs always carry an explicit size with a zero-origin viewBox.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// Background for the pixmap: `transparent`, `white`, `black`, or a 3/6/8-digit hex color.
fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::TRANSPARENT),
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        _ => {}
    }
    let ColorToken::Hex(hex) = ColorToken::parse(&s) else {
        return None;
    };

    let digits: Vec<u8> = hex
        .trim_start_matches('#')
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    let channels: Vec<u8> = match digits.len() {
        3 => digits.iter().map(|d| (d << 4) | d).chain([255]).collect(),
        6 | 8 => digits.chunks(2).map(|p| (p[0] << 4) | p[1]).collect(),
        _ => return None,
    };
    let alpha = channels.get(3).copied().unwrap_or(255);
    Some(tiny_skia::Color::from_rgba8(
        channels[0],
        channels[1],
        channels[2],
        alpha,
    ))
}
