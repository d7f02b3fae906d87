//! Comparison charts built from the stored result artifacts.
//!
//! One chart is drawn per operation with a line for every (scheme, curve)
//! pair that has an artifact. Schemes are told apart by marker shape, curves
//! by dash pattern.
use std::{collections::BTreeMap, fmt::Display, path::PathBuf};
use plotters::coord::{combinators::IntoLogRange, Shift};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::{info, warn};
use crate::error::BenchError;
use crate::record::{Operation, ResultRecord};
use crate::store::{ResultStore, RunKey};

/// Smallest value drawn on the logarithmic axis.
const LOG_FLOOR_MS: f64 = 1e-6;

/// How many schemes get a distinct marker before the shapes repeat.
const MARKERS: usize = 6;

/// Dash and gap length in pixels per curve; curve 0 is drawn solid.
const DASHES: [(u32, u32); 3] = [(12, 6), (2, 4), (12, 4)];

/// The line pattern of the curve at `curve_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinePattern {
    Solid,
    Dashed { dash: u32, gap: u32 },
}

impl LinePattern {
    pub fn for_curve(curve_index: usize) -> Self {
        match curve_index % (DASHES.len() + 1) {
            0 => LinePattern::Solid,
            i => {
                let (dash, gap) = DASHES[i - 1];
                LinePattern::Dashed { dash, gap }
            }
        }
    }
}

/// The records that could be loaded, and why the others were skipped.
#[derive(Debug, Default)]
pub struct LoadedResults {
    pub records: BTreeMap<RunKey, ResultRecord>,
    pub skipped: Vec<BenchError>,
}

/// Loads every artifact of the (scheme x curve) product, skipping the
/// missing and malformed ones with a warning.
pub fn load_all(store: &ResultStore, schemes: &[String], curves: &[String]) -> LoadedResults {
    let mut loaded = LoadedResults::default();
    for scheme in schemes {
        for curve in curves {
            let key = RunKey::new(scheme, curve);
            match store.load(&key) {
                Ok(record) => {
                    loaded.records.insert(key, record);
                }
                Err(e) => {
                    warn!(%key, error = %e, "skipping result");
                    loaded.skipped.push(e);
                }
            }
        }
    }
    loaded
}

/// One line of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub key: RunKey,
    pub scheme_index: usize,
    pub curve_index: usize,
    pub points: Vec<(usize, f64)>,
}

impl Series {
    pub fn label(&self) -> String {
        format!("{} ({})", self.key.scheme, self.key.curve)
    }
}

/// The lines of the `operation` chart, in configured scheme and curve order.
pub fn collect_series(
    records: &BTreeMap<RunKey, ResultRecord>,
    schemes: &[String],
    curves: &[String],
    operation: Operation,
) -> Vec<Series> {
    let mut series = Vec::new();
    for (scheme_index, scheme) in schemes.iter().enumerate() {
        for (curve_index, curve) in curves.iter().enumerate() {
            let key = RunKey::new(scheme, curve);
            if let Some(record) = records.get(&key) {
                let points = record
                    .attributes
                    .iter()
                    .copied()
                    .zip(record.series(operation).iter().map(|ms| ms.max(LOG_FLOOR_MS)))
                    .collect();
                series.push(Series {
                    key,
                    scheme_index,
                    curve_index,
                    points,
                });
            }
        }
    }
    series
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub prefix: String,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            prefix: String::from("cp-abe"),
            output_dir: PathBuf::from("."),
            width: 1024,
            height: 768,
        }
    }
}

impl RenderOptions {
    pub fn file_name(&self, operation: Operation, extension: &str) -> String {
        format!("{}-{}-performance.{}", self.prefix, operation.name(), extension)
    }
}

fn render_error<E: Display>(e: E) -> BenchError {
    BenchError::Render(e.to_string())
}

/// Draws the keygen, encrypt and decrypt charts as SVG and PNG and returns the written paths.
pub fn render(
    results: &LoadedResults,
    schemes: &[String],
    curves: &[String],
    options: &RenderOptions,
) -> Result<Vec<PathBuf>, BenchError> {
    if results.records.is_empty() {
        warn!("no results to render");
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(&options.output_dir).map_err(|source| BenchError::Io {
        path: options.output_dir.clone(),
        source,
    })?;
    let size = (options.width, options.height);
    let mut written = Vec::new();
    for operation in Operation::ALL {
        let series = collect_series(&results.records, schemes, curves, operation);
        if series.is_empty() {
            continue;
        }
        let svg = options.output_dir.join(options.file_name(operation, "svg"));
        draw(SVGBackend::new(&svg, size).into_drawing_area(), operation, &series)?;
        let png = options.output_dir.join(options.file_name(operation, "png"));
        draw(BitMapBackend::new(&png, size).into_drawing_area(), operation, &series)?;
        info!(operation = operation.name(), svg = %svg.display(), png = %png.display(), "chart written");
        written.push(svg);
        written.push(png);
    }
    Ok(written)
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    operation: Operation,
    series: &[Series],
) -> Result<(), BenchError>
where
    DB::ErrorType: 'static,
{
    let values = series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
    let (low, high) = values.fold((f64::INFINITY, 0.0f64), |(low, high), v| (low.min(v), high.max(v)));
    let (low, high) = (low / 2.0, high * 2.0);
    let max_x = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .max()
        .unwrap_or(1);

    root.fill(&WHITE).map_err(render_error)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} Performance Comparison", operation.title()), ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(1usize..max_x + 1, (low..high).log_scale())
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .x_desc("Number of Attributes")
        .y_desc("Time (milliseconds, log scale)")
        .x_labels(max_x.min(30))
        .draw()
        .map_err(render_error)?;

    for (index, line) in series.iter().enumerate() {
        let color = Palette99::pick(index);
        let style = ShapeStyle::from(&color).stroke_width(2);
        let points = line.points.iter().copied();
        let drawn = match LinePattern::for_curve(line.curve_index) {
            LinePattern::Solid => chart.draw_series(LineSeries::new(points, style)),
            LinePattern::Dashed { dash, gap } => chart.draw_series(DashedLineSeries::new(points, dash, gap, style)),
        };
        drawn
            .map_err(render_error)?
            .label(line.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        let points = line.points.iter().copied();
        let markers = match line.scheme_index % MARKERS {
            0 => chart.draw_series(points.map(|p| Circle::new(p, 4, style.filled()))),
            1 => chart.draw_series(points.map(|p| TriangleMarker::new(p, 5, style.filled()))),
            2 => chart.draw_series(points.map(|p| Cross::new(p, 4, style))),
            3 => chart.draw_series(
                points.map(|p| EmptyElement::at(p) + Rectangle::new([(-4, -4), (4, 4)], style.filled())),
            ),
            4 => chart.draw_series(points.map(|p| Circle::new(p, 4, style))),
            _ => chart.draw_series(points.map(|p| EmptyElement::at(p) + Rectangle::new([(-4, -4), (4, 4)], style))),
        };
        markers.map_err(render_error)?;
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_error)?;
    root.present().map_err(render_error)?;
    Ok(())
}
