//! Simulation of how records progress when ability is limited by its weakest factor.
//!
//! Every simulated person draws a number of standard normal factors and is only
//! as good as the logistic transform of the worst one. Walking through the
//! population in order, every new maximum is a new world record.

use std::path::{Path, PathBuf};

use anyhow::Result;
use itertools::Itertools;
use plotly::{
    common::{Mode, Title},
    layout::{Axis, AxisType},
    Layout, Scatter,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::reporting::{new_plot, render_html, write_output};

/// File the transformed distribution of abilities is written to.
pub const SIMULATION_CDF_FILE: &str = "record_simulation_cdf.html";

/// File the simulated record progression is written to.
pub const SIMULATION_PROGRESSION_FILE: &str = "record_simulation.html";

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    /// Ability of every simulated person, in the order they were generated.
    pub persons: Vec<f64>,
    /// `(share of population seen, record)` for every new record.
    pub records: Vec<(f64, f64)>,
}

pub fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Ability of one person: the weakest of `factors` logistic factors.
pub fn generate_person<R: Rng>(rng: &mut R, factors: u32) -> f64 {
    (0..factors)
        .map(|_| logistic(rng.sample(StandardNormal)))
        .fold(f64::INFINITY, f64::min)
}

/// Generate `trials` persons and collect the records set along the way.
pub fn world_record<R: Rng>(rng: &mut R, trials: u32, factors: u32) -> Simulation {
    let mut persons = Vec::with_capacity(trials as usize);
    let mut records = Vec::new();
    let mut best = 0.0;

    for i in 0..trials {
        let person = generate_person(rng, factors);
        persons.push(person);
        if person > best {
            best = person;
            records.push((f64::from(i) / f64::from(trials), best));
        }
    }

    Simulation { persons, records }
}

/// Random source for a simulation, reproducible when a seed is given.
pub fn simulation_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Empirical CDF of `values` as `(x, ln(-ln(F(x))))`.
///
/// Points where F is 0 or 1 have no finite transform and are left out.
pub fn transformed_cdf(values: &[f64]) -> Vec<(f64, f64)> {
    let n = values.len() as f64;
    let sorted: Vec<f64> = values
        .iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect();

    let mut points = Vec::new();
    for (i, x) in sorted.iter().enumerate() {
        // Only the last of equal values carries the full cumulative share.
        if sorted.get(i + 1) == Some(x) {
            continue;
        }
        let f = (i + 1) as f64 / n;
        if f <= 0.0 || f >= 1.0 {
            continue;
        }
        points.push((*x, (-f.ln()).ln()));
    }
    points
}

/// Run the simulation and write both of its charts to `output_dir`.
pub fn simulate(
    trials: u32,
    factors: u32,
    seed: Option<u64>,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut rng = simulation_rng(seed);
    let simulation = world_record(&mut rng, trials, factors);
    log::info!(
        "Simulated {} persons with {} factors each, {} records",
        trials,
        factors,
        simulation.records.len()
    );

    let cdf_path = output_dir.join(SIMULATION_CDF_FILE);
    let (xs, ys): (Vec<f64>, Vec<f64>) = transformed_cdf(&simulation.persons).into_iter().unzip();
    let title = "Distribution of simulated abilities";
    let mut plot = new_plot();
    plot.add_trace(Scatter::new(xs, ys).mode(Mode::Lines));
    plot.set_layout(
        Layout::new()
            .title(Title::from(title))
            .x_axis(Axis::new().title(Title::from("ability")))
            .y_axis(Axis::new().title(Title::from("ln(-ln(CDF))"))),
    );
    write_output(&cdf_path, &render_html(&plot, title))?;

    let progression_path = output_dir.join(SIMULATION_PROGRESSION_FILE);
    let (xs, ys): (Vec<f64>, Vec<f64>) = simulation.records.iter().copied().unzip();
    let title = "Simulated world record progression";
    let mut plot = new_plot();
    plot.add_trace(Scatter::new(xs, ys).mode(Mode::Markers));
    plot.set_layout(
        Layout::new()
            .title(Title::from(title))
            .x_axis(
                Axis::new()
                    .title(Title::from("share of population"))
                    .type_(AxisType::Log),
            )
            .y_axis(Axis::new().title(Title::from("record"))),
    );
    write_output(&progression_path, &render_html(&plot, title))?;

    Ok(vec![cdf_path, progression_path])
}
