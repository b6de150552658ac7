//! matbench-plot: log-log chart of matrix benchmark results
//!
//! Reads a CSV with `env_name`, `install_type`, `matrix_size` and `time`
//! columns, draws one line per `(env_name, install_type)` pair on shared
//! logarithmic axes, and writes a PNG (or an SVG wrapping it).
//!
//! # Example
//!
//! ```rust
//! use matbench_plot::{read_records, Chart, ChartConfig};
//!
//! let csv = "env_name,install_type,matrix_size,time\n\
//!            py312,pip,100,0.001\n\
//!            py312,pip,1000,0.05\n\
//!            py312,conda,1000,0.04\n";
//! let records = read_records(csv.as_bytes()).unwrap();
//!
//! let chart = Chart::new(&records, ChartConfig::default().with_dpi(30));
//! assert_eq!(chart.legend_entries(), vec!["py312 (conda)", "py312 (pip)"]);
//!
//! let raster = chart.render().unwrap();
//! assert_eq!(raster.dpi(), 30);
//! assert!(!raster.encode_png().unwrap().is_empty());
//! ```

pub mod axis;
pub mod chart;
pub mod error;
pub mod font;
pub mod raster;
pub mod records;

use std::path::{Path, PathBuf};

use tracing::info;

pub use axis::{format_tick, LogAxis};
pub use chart::{Chart, ChartConfig, Layout, Series, GGPLOT_PALETTE};
pub use error::{PlotError, Result};
pub use raster::{rgb_hex, ImageFormat, Raster};
pub use records::{group_records, load_records, read_records, Group, ResultRecord};

/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "benchmark_plot.png";

/// Loads `csv_file`, renders the chart and writes it to `output`
///
/// Returns the path written.
///
/// # Errors
///
/// `UnsupportedFormat` unless `output` ends in `.png`, `.svg` or has no
/// extension. `Io`/`Csv` if the results cannot be read. `Render`,
/// `PngEncoding` or `Io` if the image cannot be produced.
pub fn plot_benchmark_results<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_file: P,
    output: Q,
    config: &ChartConfig,
) -> Result<PathBuf> {
    let output = output.as_ref();
    let format = ImageFormat::from_path(output)?;

    let records = load_records(csv_file)?;
    let chart = Chart::new(&records, config.clone());
    let raster = chart.render()?;
    raster.save(output, format)?;

    info!(
        path = %output.display(),
        ?format,
        width = raster.width(),
        height = raster.height(),
        series = chart.series().len(),
        "plot written"
    );
    Ok(output.to_path_buf())
}
