//! Log-log line chart of execution time against matrix size
//!
//! One series per `(env_name, install_type)` group, a bold title and axis
//! labels, a light grid on major and minor ticks, and a legend outside the
//! axes anchored at their top-right corner. The canvas is cropped to its
//! content plus a small pad.

use tracing::debug;
use trueno_viz::color::Rgba;
use trueno_viz::scale::{LogScale, Scale};

use crate::axis::{format_tick, is_plottable, LogAxis};
use crate::error::Result;
use crate::raster::{rgb_hex, Raster, TextStyle};
use crate::records::{group_records, Group, ResultRecord};

/// ggplot colour cycle used for successive series
pub const GGPLOT_PALETTE: [Rgba; 7] = [
    rgb_hex(0xE24A33),
    rgb_hex(0x348ABD),
    rgb_hex(0x988ED5),
    rgb_hex(0x777777),
    rgb_hex(0xFBC15E),
    rgb_hex(0x8EBA42),
    rgb_hex(0xFFB5B8),
];

const FIGURE_BACKGROUND: Rgba = Rgba::WHITE;
const AXES_BACKGROUND: Rgba = rgb_hex(0xE5E5E5);
const GRID_INK: Rgba = Rgba::BLACK;
const TITLE_COLOR: Rgba = rgb_hex(0x222222);
const LABEL_COLOR: Rgba = rgb_hex(0x333333);
const TICK_COLOR: Rgba = rgb_hex(0x555555);
const LEGEND_BACKGROUND: Rgba = rgb_hex(0xF7F7F7);
const LEGEND_EDGE: Rgba = rgb_hex(0xCCCCCC);

/// Fraction of the figure the axes occupy (matplotlib subplot defaults)
const AXES_WIDTH_FRACTION: f64 = 0.775;
const AXES_HEIGHT_FRACTION: f64 = 0.77;

/// Tight bounding box padding (0.1 inch)
const TIGHT_PAD_PT: f64 = 7.2;
const TITLE_PAD_PT: f64 = 20.0;
const TICK_LENGTH_PT: f64 = 3.5;
const MINOR_TICK_LENGTH_PT: f64 = 2.0;
const LABEL_GAP_PT: f64 = 3.5;
const MAJOR_GRID_PT: f64 = 0.8;
const MINOR_GRID_PT: f64 = 0.5;
const LEGEND_EDGE_PT: f64 = 0.8;
const LEGEND_PAD_PT: f64 = 5.0;

/// Rendering knobs; `Default` is the fixed cosmetic policy of the plotter
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Output resolution
    pub dpi: u32,
    /// Chart title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Heading inside the legend box
    pub legend_title: String,
    /// Title font size in points
    pub title_size_pt: f64,
    /// Axis label font size in points
    pub label_size_pt: f64,
    /// Tick label font size in points
    pub tick_size_pt: f64,
    /// Legend entry font size in points
    pub legend_size_pt: f64,
    /// Legend heading font size in points
    pub legend_title_size_pt: f64,
    /// Series line width in points
    pub line_width_pt: f64,
    /// Marker diameter in points
    pub marker_size_pt: f64,
    /// Grid line opacity over the axes background
    pub grid_alpha: f64,
    /// Series colours, cycled
    pub palette: Vec<Rgba>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_in: 12.0,
            height_in: 8.0,
            dpi: 300,
            title: "Matrix Multiplication Benchmark".to_string(),
            x_label: "Matrix Size".to_string(),
            y_label: "Execution Time (seconds)".to_string(),
            legend_title: "Environment (Install Type)".to_string(),
            title_size_pt: 16.0,
            label_size_pt: 14.0,
            tick_size_pt: 12.0,
            legend_size_pt: 10.0,
            legend_title_size_pt: 12.0,
            line_width_pt: 2.0,
            marker_size_pt: 8.0,
            grid_alpha: 0.2,
            palette: GGPLOT_PALETTE.to_vec(),
        }
    }
}

impl ChartConfig {
    /// Set output resolution
    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    /// Set chart title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set figure size in inches
    #[must_use]
    pub fn with_figure_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.width_in = width_in;
        self.height_in = height_in;
        self
    }

    /// Points to pixels at the configured resolution
    pub fn px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    /// Bitmap font scale whose cap height roughly matches `points`
    pub fn font_scale(&self, points: f64) -> u32 {
        ((self.px(points) / 10.0).round() as u32).max(1)
    }

    /// Translucent grid ink for alpha blending
    fn grid_color(&self) -> Rgba {
        GRID_INK.with_alpha((self.grid_alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    fn color(&self, index: usize) -> Rgba {
        if self.palette.is_empty() {
            GGPLOT_PALETTE[index % GGPLOT_PALETTE.len()]
        } else {
            self.palette[index % self.palette.len()]
        }
    }
}

/// One plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label
    pub label: String,
    /// Line and marker colour
    pub color: Rgba,
    /// `(matrix_size, time)` pairs in input order
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Matrix sizes in plotting order
    pub fn matrix_sizes(&self) -> Vec<f64> {
        self.points.iter().map(|&(x, _)| x).collect()
    }

    /// Runs of consecutive plottable points; a masked point breaks the line
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            if is_plottable(x) && is_plottable(y) {
                current.push((x, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Pixel rectangle with top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge
    pub x: i64,
    /// Top edge
    pub y: i64,
    /// Width
    pub width: i64,
    /// Height
    pub height: i64,
}

impl Rect {
    /// One past the right edge
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    /// One past the bottom edge
    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }
}

/// Data-to-pixel scales for the axes rectangle
#[derive(Debug, Clone, Copy)]
struct Projection {
    x: LogScale,
    y: LogScale,
}

impl Projection {
    fn x(&self, value: f64) -> f64 {
        f64::from(self.x.scale(value as f32))
    }

    fn y(&self, value: f64) -> f64 {
        f64::from(self.y.scale(value as f32))
    }
}

/// Where everything goes on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Canvas width after tight cropping
    pub width: u32,
    /// Canvas height after tight cropping
    pub height: u32,
    /// Plot area
    pub axes: Rect,
    /// Legend box
    pub legend: Rect,
    /// Height of one legend entry row
    pub legend_row: i64,
}

/// A configured chart over grouped benchmark results
#[derive(Debug, Clone)]
pub struct Chart {
    config: ChartConfig,
    series: Vec<Series>,
    x_axis: LogAxis,
    y_axis: LogAxis,
}

impl Chart {
    /// Groups `records` and builds one series per group
    pub fn new(records: &[ResultRecord], config: ChartConfig) -> Self {
        Self::from_groups(group_records(records), config)
    }

    /// Builds one series per group, in the order given
    pub fn from_groups(groups: Vec<Group>, config: ChartConfig) -> Self {
        let series: Vec<Series> = groups
            .into_iter()
            .enumerate()
            .map(|(i, group)| Series {
                label: group.label(),
                color: config.color(i),
                points: group.points,
            })
            .collect();

        let x_axis =
            LogAxis::from_values(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
        let y_axis =
            LogAxis::from_values(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));

        debug!(
            series = series.len(),
            x_limits = ?x_axis.limits(),
            y_limits = ?y_axis.limits(),
            "chart assembled"
        );

        Self {
            config,
            series,
            x_axis,
            y_axis,
        }
    }

    /// Rendering configuration
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Plotted series in legend order
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Legend labels, one per series
    pub fn legend_entries(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    /// Horizontal axis (matrix size)
    pub fn x_axis(&self) -> &LogAxis {
        &self.x_axis
    }

    /// Vertical axis (time)
    pub fn y_axis(&self) -> &LogAxis {
        &self.y_axis
    }

    fn style(&self, points: f64, color: Rgba) -> TextStyle {
        TextStyle::new(self.config.font_scale(points), color)
    }

    fn title_style(&self) -> TextStyle {
        self.style(self.config.title_size_pt, TITLE_COLOR).bold()
    }

    fn label_style(&self) -> TextStyle {
        self.style(self.config.label_size_pt, LABEL_COLOR).bold()
    }

    fn tick_style(&self) -> TextStyle {
        self.style(self.config.tick_size_pt, TICK_COLOR)
    }

    fn legend_style(&self) -> TextStyle {
        self.style(self.config.legend_size_pt, LABEL_COLOR)
    }

    fn legend_title_style(&self) -> TextStyle {
        self.style(self.config.legend_title_size_pt, LABEL_COLOR)
    }

    fn pt(&self, points: f64) -> i64 {
        self.config.px(points).round().max(1.0) as i64
    }

    /// Computes the tight layout of axes and legend
    pub fn layout(&self) -> Layout {
        let cfg = &self.config;
        let pad = self.pt(TIGHT_PAD_PT);
        let gap = self.pt(LABEL_GAP_PT);
        let tick_len = self.pt(TICK_LENGTH_PT);

        let title_h = i64::from(self.title_style().thickness());
        let label_h = i64::from(self.label_style().thickness());
        let tick = self.tick_style();
        let y_tick_w = self
            .y_axis
            .labeled_ticks()
            .iter()
            .map(|&v| i64::from(tick.run_length(&format_tick(v))))
            .max()
            .unwrap_or(0);

        let axes = Rect {
            x: pad + label_h + 2 * gap + y_tick_w + gap + tick_len,
            y: pad + title_h + self.pt(TITLE_PAD_PT),
            width: (cfg.width_in * f64::from(cfg.dpi) * AXES_WIDTH_FRACTION).round().max(1.0)
                as i64,
            height: (cfg.height_in * f64::from(cfg.dpi) * AXES_HEIGHT_FRACTION)
                .round()
                .max(1.0) as i64,
        };
        let content_bottom =
            axes.bottom() + tick_len + gap + i64::from(tick.thickness()) + 2 * gap + label_h + pad;

        let legend_style = self.legend_style();
        let legend_title = self.legend_title_style();
        let inner = self.pt(LEGEND_PAD_PT);
        let handle = self.pt(2.0 * cfg.legend_size_pt);
        let marker = self.pt(cfg.marker_size_pt);
        let legend_row = i64::from(legend_style.thickness()).max(marker) + gap;
        let label_w = self
            .series
            .iter()
            .map(|s| i64::from(legend_style.run_length(&s.label)))
            .max()
            .unwrap_or(0);
        let entries_w = if self.series.is_empty() {
            0
        } else {
            handle + 2 * gap + label_w
        };
        let content_w = i64::from(legend_title.run_length(&cfg.legend_title)).max(entries_w);
        let entries_h = if self.series.is_empty() {
            0
        } else {
            gap + legend_row * self.series.len() as i64
        };

        let legend = Rect {
            x: axes.right() + self.pt(0.5 * cfg.legend_size_pt),
            y: axes.y,
            width: 2 * inner + content_w,
            height: 2 * inner + i64::from(legend_title.thickness()) + entries_h,
        };

        let title_w = i64::from(self.title_style().run_length(&cfg.title));
        let title_right = axes.x + (axes.width + title_w) / 2;
        let width = (legend.right() + pad).max(title_right + pad);
        let height = content_bottom.max(legend.bottom() + pad);

        Layout {
            width: width.max(1) as u32,
            height: height.max(1) as u32,
            axes,
            legend,
            legend_row,
        }
    }

    fn projection(&self, axes: &Rect) -> Result<Projection> {
        Ok(Projection {
            x: self.x_axis.pixel_scale(axes.x as f64, axes.right() as f64)?,
            y: self.y_axis.pixel_scale(axes.bottom() as f64, axes.y as f64)?,
        })
    }

    /// Draws the chart onto a fresh canvas at the configured dpi
    ///
    /// # Errors
    ///
    /// `Render` if the canvas or the axis scales cannot be built.
    pub fn render(&self) -> Result<Raster> {
        let layout = self.layout();
        let axes = layout.axes;
        let proj = self.projection(&axes)?;
        let mut raster =
            Raster::new(layout.width, layout.height, FIGURE_BACKGROUND)?.with_dpi(self.config.dpi);
        debug!(width = layout.width, height = layout.height, "rendering chart");

        raster.fill_rect(axes.x, axes.y, axes.width, axes.height, AXES_BACKGROUND);
        self.draw_grid(&mut raster, &axes, &proj);
        self.draw_ticks(&mut raster, &axes, &proj);
        self.draw_labels(&mut raster, &layout);
        self.draw_series(&mut raster, &proj);
        self.draw_legend(&mut raster, &layout);

        Ok(raster)
    }

    fn draw_grid(&self, raster: &mut Raster, axes: &Rect, proj: &Projection) {
        let grid = self.config.grid_color();
        for (ticks_x, ticks_y, pt) in [
            (self.x_axis.minor_ticks(), self.y_axis.minor_ticks(), MINOR_GRID_PT),
            (self.x_axis.major_ticks(), self.y_axis.major_ticks(), MAJOR_GRID_PT),
        ] {
            let w = self.pt(pt);
            for v in ticks_x {
                let x = proj.x(v).round() as i64;
                raster.blend_rect(x - w / 2, axes.y, w, axes.height, grid);
            }
            for v in ticks_y {
                let y = proj.y(v).round() as i64;
                raster.blend_rect(axes.x, y - w / 2, axes.width, w, grid);
            }
        }
    }

    fn draw_ticks(&self, raster: &mut Raster, axes: &Rect, proj: &Projection) {
        let tick_len = self.pt(TICK_LENGTH_PT);
        let minor_len = self.pt(MINOR_TICK_LENGTH_PT);
        let w = self.pt(MAJOR_GRID_PT);
        let gap = self.pt(LABEL_GAP_PT);
        let style = self.tick_style();

        for v in self.x_axis.minor_ticks() {
            let x = proj.x(v).round() as i64;
            raster.fill_rect(x - w / 2, axes.bottom(), w, minor_len, TICK_COLOR);
        }
        for v in self.y_axis.minor_ticks() {
            let y = proj.y(v).round() as i64;
            raster.fill_rect(axes.x - minor_len, y - w / 2, minor_len, w, TICK_COLOR);
        }
        for v in self.x_axis.major_ticks() {
            let x = proj.x(v).round() as i64;
            raster.fill_rect(x - w / 2, axes.bottom(), w, tick_len, TICK_COLOR);
        }
        for v in self.y_axis.major_ticks() {
            let y = proj.y(v).round() as i64;
            raster.fill_rect(axes.x - tick_len, y - w / 2, tick_len, w, TICK_COLOR);
        }

        for v in self.x_axis.labeled_ticks() {
            let text = format_tick(v);
            let (tw, _) = style.size(&text);
            let x = proj.x(v).round() as i64;
            let y = axes.bottom() + tick_len + gap;
            raster.draw_text(x - i64::from(tw) / 2, y, &text, style);
        }
        for v in self.y_axis.labeled_ticks() {
            let text = format_tick(v);
            let (tw, th) = style.size(&text);
            let y = proj.y(v).round() as i64;
            raster.draw_text(
                axes.x - tick_len - gap - i64::from(tw),
                y - i64::from(th) / 2,
                &text,
                style,
            );
        }
    }

    fn draw_labels(&self, raster: &mut Raster, layout: &Layout) {
        let cfg = &self.config;
        let axes = layout.axes;
        let pad = self.pt(TIGHT_PAD_PT);
        let gap = self.pt(LABEL_GAP_PT);

        let title = self.title_style();
        let (tw, _) = title.size(&cfg.title);
        raster.draw_text(axes.x + (axes.width - i64::from(tw)) / 2, pad, &cfg.title, title);

        let label = self.label_style();
        let (lw, _) = label.size(&cfg.x_label);
        let label_y = axes.bottom()
            + self.pt(TICK_LENGTH_PT)
            + gap
            + i64::from(self.tick_style().thickness())
            + 2 * gap;
        let label_x = axes.x + (axes.width - i64::from(lw)) / 2;
        raster.draw_text(label_x, label_y, &cfg.x_label, label);

        let vertical = label.vertical();
        let (_, vh) = vertical.size(&cfg.y_label);
        let label_y = axes.y + (axes.height - i64::from(vh)) / 2;
        raster.draw_text(pad, label_y, &cfg.y_label, vertical);
    }

    fn draw_series(&self, raster: &mut Raster, proj: &Projection) {
        let line_width = self.config.px(self.config.line_width_pt);
        let marker_radius = self.config.px(self.config.marker_size_pt) / 2.0;

        for series in &self.series {
            for segment in series.segments() {
                let pixels: Vec<(f64, f64)> = segment
                    .iter()
                    .map(|&(x, y)| (proj.x(x), proj.y(y)))
                    .collect();
                for pair in pixels.windows(2) {
                    let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
                    raster.draw_line(x0, y0, x1, y1, line_width, series.color);
                }
                for &(x, y) in &pixels {
                    raster.fill_circle(x, y, marker_radius, series.color);
                }
            }
        }
    }

    fn draw_legend(&self, raster: &mut Raster, layout: &Layout) {
        let cfg = &self.config;
        let legend = layout.legend;
        let inner = self.pt(LEGEND_PAD_PT);
        let gap = self.pt(LABEL_GAP_PT);
        let handle = self.pt(2.0 * cfg.legend_size_pt);

        raster.fill_rect(legend.x, legend.y, legend.width, legend.height, LEGEND_BACKGROUND);
        raster.stroke_rect(
            legend.x,
            legend.y,
            legend.width,
            legend.height,
            self.pt(LEGEND_EDGE_PT),
            LEGEND_EDGE,
        );

        let heading = self.legend_title_style();
        let (hw, hh) = heading.size(&cfg.legend_title);
        raster.draw_text(
            legend.x + (legend.width - i64::from(hw)) / 2,
            legend.y + inner,
            &cfg.legend_title,
            heading,
        );

        let style = self.legend_style();
        let line_width = cfg.px(cfg.line_width_pt);
        let marker_radius = cfg.px(cfg.marker_size_pt) / 2.0;
        let rows_top = legend.y + inner + i64::from(hh) + gap;

        for (i, series) in self.series.iter().enumerate() {
            let row_top = rows_top + layout.legend_row * i as i64;
            let center_y = (row_top + layout.legend_row / 2) as f64;
            let x0 = (legend.x + inner) as f64;
            let x1 = x0 + handle as f64;
            raster.draw_line(x0, center_y, x1, center_y, line_width, series.color);
            raster.fill_circle((x0 + x1) / 2.0, center_y, marker_radius, series.color);

            let (_, th) = style.size(&series.label);
            raster.draw_text(
                legend.x + inner + handle + 2 * gap,
                center_y as i64 - i64::from(th) / 2,
                &series.label,
                style,
            );
        }
    }
}
