use std::{
    fs::File,
    io::{self, ErrorKind, Write},
    path::Path,
};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use plotly::{
    common::{DashType, Line, Mode, Title},
    layout::{Axis, Legend},
    Configuration, Layout, Plot, Scatter,
};

use crate::data::{Dataset, DistanceKey, RecordSeries, ValueMode};

/// Default HTML template for all charts.
/// Replicates the behavior of plotly.rs's to_html() method while keeping the
/// page title and generation time under our control.
const DEFAULT_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="generated" content="{{TIMESTAMP}}">
    <title>{{TITLE}}</title>
    {{PLOTLY_HEAD}}
</head>
<body>
    {{PLOTLY_BODY}}
</body>
</html>"#;

/// Number of decimals written for years and values in tab-separated output.
const EXPORT_PRECISION: usize = 4;

/// Marker style shared by all record charts: points joined by a dotted line.
pub(crate) fn record_trace(xs: Vec<f64>, ys: Vec<f64>) -> Box<Scatter<f64, f64>> {
    Scatter::new(xs, ys)
        .mode(Mode::LinesMarkers)
        .line(Line::new().dash(DashType::Dot))
}

/// A plot with the configuration used for every chart of this crate.
pub(crate) fn new_plot() -> Plot {
    let config = Configuration::default().responsive(true).fill_frame(false);
    let mut plot = Plot::new();
    plot.set_configuration(config);
    plot
}

/// Escape text for use inside an HTML element. Braces are escaped as well so
/// the result can never form a template placeholder.
fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

/// Render a plot into a standalone HTML page.
pub fn render_html(plot: &Plot, title: &str) -> Vec<u8> {
    // Script tags loading plotly.js from the CDN, and the plot's div + script.
    let plotly_head = Plot::online_cdn_js();
    let plotly_body = plot.to_inline_html(None);

    // The plot body holds labels from the input and is substituted last.
    DEFAULT_HTML_TEMPLATE
        .replace("{{TITLE}}", &escape_text(title))
        .replace(
            "{{TIMESTAMP}}",
            &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        )
        .replace("{{PLOTLY_HEAD}}", &plotly_head)
        .replace("{{PLOTLY_BODY}}", &plotly_body)
        .into_bytes()
}

/// Write to the given file, or to stdout for "-". A closed stdout pipe is not an error.
pub fn write_output(output: &Path, bytes: &[u8]) -> Result<()> {
    if output == Path::new("-") {
        match io::stdout().write_all(bytes) {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            res => res,
        }?;
    } else {
        File::create(output)
            .and_then(|mut f| f.write_all(bytes))
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }
    Ok(())
}

/// Turn a free-text label into something usable as a file name.
pub fn sanitize_file_stem(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

trait Reporter<'a> {
    fn add_series(&mut self, key: &'a DistanceKey, series: &'a RecordSeries);
    fn as_bytes(&self) -> Result<Vec<u8>>;
}

struct PlotlyReporter {
    plot: Plot,
    title: String,
}

impl PlotlyReporter {
    fn new(mode: ValueMode) -> PlotlyReporter {
        let title = format!("World record progression ({})", mode.unit());
        let mut plot = new_plot();
        let layout = Layout::new()
            .title(Title::from(title.as_str()))
            .x_axis(Axis::new().title(Title::from("year")))
            .y_axis(Axis::new().title(Title::from(mode.unit())))
            .legend(Legend::new().orientation(plotly::common::Orientation::Horizontal));
        plot.set_layout(layout);
        PlotlyReporter { plot, title }
    }
}

impl<'a> Reporter<'a> for PlotlyReporter {
    fn add_series(&mut self, key: &'a DistanceKey, series: &'a RecordSeries) {
        let (xs, ys) = series.iter().map(|p| (p.year, p.val)).unzip();
        let trace = record_trace(xs, ys)
            .name(key.to_string())
            .legend_group(&key.gender);
        self.plot.add_trace(trace);
    }

    fn as_bytes(&self) -> Result<Vec<u8>> {
        Ok(render_html(&self.plot, &self.title))
    }
}

struct CsvReporter<'a> {
    series: Vec<(&'a DistanceKey, &'a RecordSeries)>,
}

impl CsvReporter<'_> {
    fn new() -> Self {
        CsvReporter { series: Vec::new() }
    }
}

impl<'a> Reporter<'a> for CsvReporter<'a> {
    fn add_series(&mut self, key: &'a DistanceKey, series: &'a RecordSeries) {
        self.series.push((key, series));
    }

    fn as_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(vec![]);

        writer.write_record(["distance", "gender", "year", "value"])?;
        for (key, series) in &self.series {
            for point in series.iter() {
                let year = format!("{:.*}", EXPORT_PRECISION, point.year);
                let val = format!("{:.*}", EXPORT_PRECISION, point.val);
                writer.write_record([
                    key.distance.as_str(),
                    key.gender.as_str(),
                    year.as_str(),
                    val.as_str(),
                ])?;
            }
        }

        writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush tab-separated output: {}", e.error()))
    }
}

struct ReporterFactory {}

impl ReporterFactory {
    fn from_file_name<'a>(path: &Path, mode: ValueMode) -> Option<Box<dyn Reporter<'a> + 'a>> {
        if path == Path::new("-") {
            return Some(Box::new(CsvReporter::new()) as Box<dyn Reporter<'a> + 'a>);
        }
        let extension = path.extension()?.to_ascii_lowercase().into_string().ok()?;
        match extension.as_str() {
            "html" => Some(Box::new(PlotlyReporter::new(mode)) as Box<dyn Reporter<'a> + 'a>),
            "csv" => Some(Box::new(CsvReporter::new()) as Box<dyn Reporter<'a> + 'a>),
            _ => None,
        }
    }
}

/// Write every series of the dataset to `output` in the format its extension names.
pub fn export(dataset: &Dataset, mode: ValueMode, output: &Path) -> Result<()> {
    let mut reporter = ReporterFactory::from_file_name(output, mode).ok_or(anyhow!(
        "Could not infer output format of {}, use '-', '.csv' or '.html'",
        output.display()
    ))?;

    for (key, series) in dataset.iter() {
        reporter.add_series(key, series);
    }

    write_output(output, &reporter.as_bytes()?)?;
    log::info!("Exported {} series to {}", dataset.len(), output.display());
    Ok(())
}
