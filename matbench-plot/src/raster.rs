//! Pixel canvas for the chart
//!
//! [`Raster`] draws straight into a trueno-viz [`Framebuffer`] with the
//! crate's rasterizers. Only text is hand-drawn, from the bitmap font.

use std::path::Path;

use trueno_viz::color::Rgba;
use trueno_viz::framebuffer::Framebuffer;
use trueno_viz::output::SvgEncoder;
use trueno_viz::render::{draw_circle, draw_line, draw_rect, draw_rect_outline};

use crate::error::{PlotError, Result};
use crate::font::{self, GLYPH_ADVANCE, GLYPH_HEIGHT};

/// Resolution recorded in encoded images unless set otherwise
pub const DEFAULT_DPI: u32 = 72;

const METERS_PER_INCH: f64 = 0.0254;

/// Opaque color from `0xRRGGBB`
#[must_use]
pub const fn rgb_hex(hex: u32) -> Rgba {
    Rgba::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Direction text runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Left to right
    #[default]
    Horizontal,
    /// Bottom to top (rotated 90 degrees counter-clockwise)
    Vertical,
}

/// How a run of text is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Pixels per font cell
    pub scale: u32,
    /// Ink color
    pub color: Rgba,
    /// Double-struck horizontally
    pub bold: bool,
    /// Reading direction
    pub orientation: Orientation,
}

impl TextStyle {
    /// Horizontal, regular weight
    pub fn new(scale: u32, color: Rgba) -> Self {
        Self {
            scale: scale.max(1),
            color,
            bold: false,
            orientation: Orientation::Horizontal,
        }
    }

    /// Switch to bold
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Switch to bottom-to-top text
    #[must_use]
    pub fn vertical(mut self) -> Self {
        self.orientation = Orientation::Vertical;
        self
    }

    /// Extent along the reading direction, in pixels
    pub fn run_length(&self, text: &str) -> u32 {
        let cells = font::text_cells(text);
        if cells == 0 {
            return 0;
        }
        cells * self.scale + self.bold_offset()
    }

    /// Extent across the reading direction, in pixels
    pub fn thickness(&self) -> u32 {
        GLYPH_HEIGHT * self.scale
    }

    /// `(width, height)` of the box the text occupies on the canvas
    pub fn size(&self, text: &str) -> (u32, u32) {
        match self.orientation {
            Orientation::Horizontal => (self.run_length(text), self.thickness()),
            Orientation::Vertical => (self.thickness(), self.run_length(text)),
        }
    }

    fn bold_offset(&self) -> u32 {
        if self.bold {
            (self.scale / 2).max(1)
        } else {
            0
        }
    }
}

/// Chart canvas over a trueno-viz framebuffer
///
/// Coordinates are signed so callers can place shapes partly off the canvas;
/// everything is clipped to the framebuffer.
#[derive(Debug, Clone)]
pub struct Raster {
    fb: Framebuffer,
    dpi: u32,
}

impl Raster {
    /// Create a canvas filled with `background`
    ///
    /// # Errors
    ///
    /// `Render` if either dimension is zero.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
        let mut fb = Framebuffer::new(width, height)?;
        fb.clear(background);
        Ok(Self {
            fb,
            dpi: DEFAULT_DPI,
        })
    }

    /// Set the resolution written into PNG metadata
    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.fb.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.fb.height()
    }

    /// Resolution recorded on encode
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Underlying framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Color at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.fb.get_pixel(x, y)
    }

    /// Number of pixels exactly equal to `color`
    pub fn count_pixels(&self, color: Rgba) -> usize {
        (0..self.height())
            .flat_map(|y| (0..self.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| self.fb.get_pixel(x, y) == Some(color))
            .count()
    }

    /// Intersection of the rectangle with the canvas as `(x, y, w, h)`
    fn clip(&self, x: i64, y: i64, width: i64, height: i64) -> Option<(u32, u32, u32, u32)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width).min(i64::from(self.width()));
        let y1 = y.saturating_add(height).min(i64::from(self.height()));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }

    /// Fill the axis-aligned rectangle with top-left (x, y)
    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Rgba) {
        if let Some((x, y, w, h)) = self.clip(x, y, width, height) {
            draw_rect(&mut self.fb, x as i32, y as i32, w, h, color);
        }
    }

    /// Composite a translucent `color` over the rectangle
    pub fn blend_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Rgba) {
        if let Some((x, y, w, h)) = self.clip(x, y, width, height) {
            for py in y..y + h {
                for px in x..x + w {
                    self.fb.blend_pixel(px, py, color);
                }
            }
        }
    }

    /// Outline the rectangle with a border `thickness` pixels wide, drawn inwards
    pub fn stroke_rect(
        &mut self,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        thickness: i64,
        color: Rgba,
    ) {
        if let Some((x, y, w, h)) = self.clip(x, y, width, height) {
            let t = thickness.clamp(1, i64::from(u32::MAX)) as u32;
            draw_rect_outline(&mut self.fb, x as i32, y as i32, w, h, color, t);
        }
    }

    /// Fill a disc centred on (cx, cy)
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        draw_circle(
            &mut self.fb,
            cx.round() as i32,
            cy.round() as i32,
            radius.round().max(0.0) as i32,
            color,
        );
    }

    /// Draw a straight segment `width` pixels thick
    ///
    /// Thin segments use Bresenham; wider ones stamp discs along the path,
    /// which also gives round caps and joins. Endpoints are expected on or
    /// near the canvas since the walk covers every pixel step between them.
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64, color: Rgba) {
        if width <= 1.5 {
            draw_line(
                &mut self.fb,
                x0.round() as i32,
                y0.round() as i32,
                x1.round() as i32,
                y1.round() as i32,
                color,
            );
            return;
        }

        let radius = width / 2.0;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.fill_circle(x0 + dx * t, y0 + dy * t, radius, color);
        }
    }

    /// Draw `text` with the top-left corner of its box at (x, y)
    ///
    /// Characters the font lacks are drawn as their `\u{..}` escape.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, style: TextStyle) {
        let text = font::displayable(text);
        let run = i64::from(style.run_length(&text));
        let scale = i64::from(style.scale);
        let strike_offset = i64::from(style.bold_offset());
        let strikes = if style.bold { 2 } else { 1 };

        for (index, c) in text.chars().enumerate() {
            let origin = index as i64 * i64::from(GLYPH_ADVANCE) * scale;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..font::GLYPH_WIDTH {
                    if !font::is_set(c, col, row) {
                        continue;
                    }
                    for strike in (0..strikes).map(|s| s * strike_offset) {
                        // Cell position before rotation
                        let tx = origin + i64::from(col) * scale + strike;
                        let ty = i64::from(row) * scale;
                        let (px, py) = match style.orientation {
                            Orientation::Horizontal => (x + tx, y + ty),
                            Orientation::Vertical => (x + ty, y + run - tx - scale),
                        };
                        self.fill_rect(px, py, scale, scale, style.color);
                    }
                }
            }
        }
    }

    /// Encode as PNG with a pHYs chunk carrying the canvas dpi
    ///
    /// # Errors
    ///
    /// `PngEncoding` if the encoder rejects the image.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let pixels_per_meter = (f64::from(self.dpi) / METERS_PER_INCH).round() as u32;
        let mut bytes = Vec::new();

        let mut encoder = png::Encoder::new(&mut bytes, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: pixels_per_meter,
            yppu: pixels_per_meter,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.fb.to_compact_pixels())?;
        writer.finish()?;

        Ok(bytes)
    }

    /// SVG document embedding the canvas as an image
    ///
    /// # Errors
    ///
    /// `Render` if trueno-viz cannot encode the embedded raster.
    pub fn encode_svg(&self) -> Result<String> {
        Ok(SvgEncoder::from_framebuffer(&self.fb)?.render())
    }

    /// Encode in `format` and write to `path`
    ///
    /// # Errors
    ///
    /// Encoding errors as for [`Raster::encode_png`] and [`Raster::encode_svg`];
    /// `Io` if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: ImageFormat) -> Result<()> {
        let path = path.as_ref();
        let bytes = match format {
            ImageFormat::Png => self.encode_png()?,
            ImageFormat::Svg => self.encode_svg()?.into_bytes(),
        };
        std::fs::write(path, bytes).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Image formats the plotter can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// Scalable Vector Graphics wrapping the rendered raster
    Svg,
}

impl ImageFormat {
    /// Picks the format from the file extension; no extension means PNG
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for any extension other than `png` or `svg`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let Some(ext) = path.as_ref().extension() else {
            return Ok(Self::Png);
        };
        let ext = ext.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(PlotError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const INK: Rgba = Rgba::BLACK;

    fn canvas(width: u32, height: u32) -> Raster {
        Raster::new(width, height, Rgba::WHITE).unwrap()
    }

    fn assert_ink_inside(r: &Raster, (x, y, w, h): (u32, u32, u32, u32)) {
        for py in 0..r.height() {
            for px in 0..r.width() {
                if r.pixel(px, py) == Some(INK) {
                    assert!(
                        px >= x && px < x + w && py >= y && py < y + h,
                        "ink at ({px}, {py})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb_hex(0xE24A33), Rgba::new(0xE2, 0x4A, 0x33, 255));
    }

    #[test]
    fn test_zero_sized_canvas_rejected() {
        assert!(matches!(
            Raster::new(0, 10, Rgba::WHITE),
            Err(PlotError::Render(_))
        ));
    }

    #[test]
    fn test_new_clears_to_background() {
        let r = canvas(4, 3);
        assert_eq!(r.count_pixels(Rgba::WHITE), 12);
        assert_eq!(r.pixel(3, 2), Some(Rgba::WHITE));
        assert_eq!(r.pixel(4, 2), None);
    }

    #[test]
    fn test_fill_rect_clipped_area() {
        let mut r = canvas(10, 10);
        r.fill_rect(-5, -5, 8, 8, INK);
        assert_eq!(r.count_pixels(INK), 9);
        r.fill_rect(8, 8, 100, 100, INK);
        assert_eq!(r.count_pixels(INK), 13);
        r.fill_rect(20, 20, 5, 5, INK);
        assert_eq!(r.count_pixels(INK), 13);
    }

    #[test]
    fn test_blend_rect_composites_over_background() {
        let background = rgb_hex(0xE5E5E5);
        let mut r = Raster::new(6, 6, background).unwrap();
        r.blend_rect(0, 0, 3, 6, Rgba::BLACK.with_alpha(51));

        let blended = r.pixel(1, 1).unwrap();
        assert!(blended.r < background.r && blended.r > 170, "{blended:?}");
        assert_eq!((blended.r, blended.g), (blended.g, blended.b));
        assert_eq!(r.pixel(4, 1), Some(background));
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut r = canvas(10, 10);
        r.stroke_rect(0, 0, 10, 10, 1, INK);
        assert_eq!(r.count_pixels(INK), 36);
        assert_eq!(r.pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_line_connects_endpoints() {
        let mut r = canvas(20, 20);
        r.draw_line(1.0, 1.0, 18.0, 18.0, 1.0, INK);
        assert_eq!(r.pixel(1, 1), Some(INK));
        assert_eq!(r.pixel(18, 18), Some(INK));
        assert_eq!(r.pixel(10, 10), Some(INK));
    }

    #[test]
    fn test_thick_line_is_wider() {
        let mut thin = canvas(40, 40);
        thin.draw_line(5.0, 20.0, 35.0, 20.0, 1.0, INK);
        let mut thick = canvas(40, 40);
        thick.draw_line(5.0, 20.0, 35.0, 20.0, 6.0, INK);
        assert!(thick.count_pixels(INK) > 4 * thin.count_pixels(INK));
    }

    #[test]
    fn test_fill_circle_area() {
        let mut r = canvas(50, 50);
        r.fill_circle(25.0, 25.0, 10.0, INK);
        let area = r.count_pixels(INK) as f64;
        let expected = std::f64::consts::PI * 100.0;
        assert!((area - expected).abs() / expected < 0.1);
    }

    #[test]
    fn test_text_size() {
        let style = TextStyle::new(2, INK);
        assert_eq!(style.size("AB"), (22, 14));
        assert_eq!(style.vertical().size("AB"), (14, 22));
        assert_eq!(style.bold().size("AB"), (23, 14));
        assert_eq!(style.size(""), (0, 14));
    }

    #[test]
    fn test_draw_text_stays_in_box() {
        let style = TextStyle::new(3, INK).bold();
        let (w, h) = style.size("Hi!");
        let mut r = canvas(100, 100);
        r.draw_text(10, 20, "Hi!", style);

        assert!(r.count_pixels(INK) > 0);
        assert_ink_inside(&r, (10, 20, w, h));
    }

    #[test]
    fn test_vertical_text_stays_in_box() {
        let style = TextStyle::new(2, INK).vertical();
        let (w, h) = style.size("Time");
        let mut r = canvas(60, 80);
        r.draw_text(5, 5, "Time", style);

        assert!(r.count_pixels(INK) > 0);
        assert_ink_inside(&r, (5, 5, w, h));
    }

    #[test]
    fn test_non_ascii_text_drawn_as_escape() {
        let style = TextStyle::new(1, INK);
        let mut escaped = canvas(200, 10);
        escaped.draw_text(0, 0, "\\u{e9}", style);
        let mut accented = canvas(200, 10);
        accented.draw_text(0, 0, "é", style);

        assert_eq!(accented.count_pixels(INK), escaped.count_pixels(INK));
        assert_eq!(style.size("é"), style.size("\\u{e9}"));
    }

    #[test]
    fn test_encode_png_header() {
        let mut r = canvas(8, 6);
        r.fill_rect(2, 2, 3, 3, rgb_hex(0x348ABD));
        let bytes = r.encode_png().unwrap();
        assert!(bytes.len() > PNG_HEADER.len());
        assert_eq!(bytes[..8], PNG_HEADER);
    }

    #[test]
    fn test_encode_png_records_dpi() {
        let bytes = canvas(8, 6).with_dpi(300).encode_png().unwrap();
        let at = bytes
            .windows(4)
            .position(|w| w == b"pHYs")
            .expect("pHYs chunk present");
        let data = &bytes[at + 4..at + 13];

        let x_ppm = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let y_ppm = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        assert_eq!((x_ppm, y_ppm), (11811, 11811));
        // Unit byte 1 means metres
        assert_eq!(data[8], 1);
    }

    #[test]
    fn test_encode_svg_embeds_raster() {
        let svg = canvas(8, 6).encode_svg().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="8" height="6""#));
        assert!(svg.contains("data:image/png;base64,"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_image_format_from_path() {
        assert_eq!(ImageFormat::from_path("plot.png").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("plot.PNG").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("plot").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("plot.svg").unwrap(), ImageFormat::Svg);
        assert!(matches!(
            ImageFormat::from_path("plot.jpg"),
            Err(PlotError::UnsupportedFormat(ext)) if ext == "jpg"
        ));
    }
}
