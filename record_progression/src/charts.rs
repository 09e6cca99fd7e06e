//! Record progression charts.
//!
//! Times are drawn as one chart per distance, speeds as a single chart with
//! one panel per distance from the miles table.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use plotly::{
    common::{DashType, Line, Mode, Title},
    layout::{Axis, GridPattern, LayoutGrid},
    Layout, Plot, Scatter,
};

use crate::data::{Dataset, DistanceKey, RecordSeries};
use crate::defaults::{
    SPEED_CHART_COLUMNS, SPEED_CHART_EXCLUDED_DISTANCE, SPEED_CHART_ROWS,
};
use crate::miles::distances_by_length;
use crate::reporting::{new_plot, record_trace, render_html, sanitize_file_stem, write_output};

/// File the speed chart is written to.
const SPEED_CHART_FILE: &str = "world_record_speed.html";

/// Height in pixels of the speed chart.
const SPEED_CHART_HEIGHT: usize = 1200;

fn unzip_series(series: &RecordSeries) -> (Vec<f64>, Vec<f64>) {
    series.iter().map(|p| (p.year, p.val)).unzip()
}

/// Write one minutes-over-years chart per distance of `gender`.
///
/// Returns the written files, named after the sanitized distance label. Labels
/// that sanitize to the same name share one file, the later series wins.
pub fn plot_times(dataset: &Dataset, gender: &str, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (key, series) in dataset.for_gender(gender) {
        let title = format!("{} world record progression", key.distance);
        let path = output_dir.join(format!(
            "world_record_{}.html",
            sanitize_file_stem(&key.distance)
        ));

        let overwrites = written.contains(&path);
        if overwrites {
            log::warn!(
                "Chart of {} overwrites an earlier chart in {}, distance labels differ only in case or punctuation",
                key,
                path.display()
            );
        }

        write_output(&path, &render_html(&times_chart(series, &title), &title))?;
        log::info!("Wrote {} records of {} to {}", series.len(), key, path.display());
        if !overwrites {
            written.push(path);
        }
    }

    if written.is_empty() {
        log::warn!("No record series for gender '{}', nothing plotted", gender);
    }
    Ok(written)
}

fn times_chart(series: &RecordSeries, title: &str) -> Plot {
    let (xs, ys) = unzip_series(series);
    let mut plot = new_plot();
    plot.add_trace(record_trace(xs, ys));
    plot.set_layout(
        Layout::new()
            .title(Title::from(title))
            .x_axis(Axis::new().title(Title::from("year")))
            .y_axis(Axis::new().title(Title::from("minutes")))
            .show_legend(false),
    );
    plot
}

/// Write a single chart with one speed panel per known distance of `gender`.
///
/// The dataset is expected to hold speeds (miles per hour). In every panel the
/// latest record is extended as a horizontal line up to `present`.
pub fn plot_speeds(
    dataset: &Dataset,
    gender: &str,
    output_dir: &Path,
    present: f64,
) -> Result<PathBuf> {
    let distances = distances_by_length()
        .into_iter()
        .filter(|d| *d != SPEED_CHART_EXCLUDED_DISTANCE);

    let mut plot = new_plot();
    let mut panels = 0;
    for (index, distance) in distances.enumerate() {
        let key = DistanceKey::new(distance, gender);
        let Some(series) = dataset.get(&key).filter(|s| !s.is_empty()) else {
            log::warn!("No records for {}, leaving its panel empty", key);
            continue;
        };

        let (x_axis, y_axis) = panel_axes(index);
        for trace in speed_panel_traces(distance, series, present) {
            plot.add_trace(trace.x_axis(&x_axis).y_axis(&y_axis));
        }
        panels += 1;
    }

    if panels == 0 {
        bail!("No speed records for gender '{}'", gender);
    }

    let title = format!("World record speeds ({})", gender);
    plot.set_layout(
        Layout::new()
            .title(Title::from(title.as_str()))
            .grid(
                LayoutGrid::new()
                    .rows(SPEED_CHART_ROWS)
                    .columns(SPEED_CHART_COLUMNS)
                    .pattern(GridPattern::Independent),
            )
            .height(SPEED_CHART_HEIGHT),
    );

    let path = output_dir.join(SPEED_CHART_FILE);
    write_output(&path, &render_html(&plot, &title))?;
    log::info!("Wrote {} speed panels to {}", panels, path.display());
    Ok(path)
}

/// Axis ids of the grid cell at `index`, counted row by row from the top left.
fn panel_axes(index: usize) -> (String, String) {
    match index {
        0 => ("x".to_string(), "y".to_string()),
        i => (format!("x{}", i + 1), format!("y{}", i + 1)),
    }
}

fn speed_panel_traces(
    distance: &str,
    series: &RecordSeries,
    present: f64,
) -> Vec<Box<Scatter<f64, f64>>> {
    let (xs, ys) = unzip_series(series);
    let mut traces = vec![record_trace(xs, ys).name(distance).legend_group(distance)];

    if let Some(current) = series.last() {
        if present > current.year {
            traces.push(
                Scatter::new(vec![current.year, present], vec![current.val, current.val])
                    .mode(Mode::Lines)
                    .line(Line::new().dash(DashType::Dot))
                    .name(format!("{} (current record)", distance))
                    .legend_group(distance)
                    .show_legend(false),
            );
        }
    }

    traces
}
