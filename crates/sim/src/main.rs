//! Integrates SEIR and SIRD outbreaks and plots their trajectories.
//!
//! # Usage
//!
//! ```text
//! cargo run -p outbreak-sim
//! cargo run -p outbreak-sim -- --config scenario.toml --log-level debug
//! cargo run -p outbreak-sim -- --no-plot
//! ```
//!
//! Without a scenario file the driver runs the built-in outbreak three times:
//! forward Euler on SEIR with per-day progress, then the adaptive solver on
//! SEIR and on SIRD. All trajectories open together in one plot window.

mod config;
mod logging;

use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::{LevelFilter, info};
use outbreak_core::Components;
use outbreak_models::{Compartmental, Trajectory, simulate};
use outbreak_observers::{Chart, ProgressLogger};

use config::{RunSpec, Scenario};

#[derive(Debug, Parser)]
#[command(name = "outbreak", version)]
#[command(about = "Integrate SEIR and SIRD epidemic models and plot the results")]
struct Cli {
    /// Scenario file overriding the built-in parameters and runs
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Console log level
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Skip the plot window
    #[arg(long)]
    no_plot: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _handle = logging::init(cli.log_level)?;

    let scenario = match &cli.config {
        Some(path) => {
            info!("loading scenario from {}", path.display());
            Scenario::load(path)?
        }
        None => Scenario::default(),
    };

    let charts = run_all(&scenario)?;

    if cli.no_plot {
        return Ok(());
    }
    show(charts)
}

/// Runs every integration in the scenario in order and collects their charts.
fn run_all(scenario: &Scenario) -> Result<Vec<Chart>, Box<dyn Error>> {
    let grid = scenario.time_grid()?;
    let params = scenario.model_params()?;
    let solver = scenario.solver_config()?;
    let initial = scenario.initial_state();
    info!(
        "{} points from t={} to t={}, dt={}",
        grid.len(),
        grid.start(),
        grid.end(),
        grid.step()
    );

    let mut charts = Vec::with_capacity(scenario.runs.len());
    for entry in &scenario.runs {
        let model = Compartmental::new(entry.model, params);
        let progress = entry
            .progress
            .then(|| ProgressLogger::new(&entry.model.labels()));

        let run = simulate::run(entry.method, &model, initial, &grid, &solver, progress)?;
        summarize(entry, &run);
        charts.push(chart(&entry.title, &run.trajectory));
    }
    Ok(charts)
}

fn summarize(entry: &RunSpec, run: &simulate::Run) {
    let trajectory = &run.trajectory;
    info!(
        "{}: {} by {}, {} points, {} model calls{}",
        entry.title,
        entry.model,
        entry.method,
        trajectory.len(),
        run.evaluations,
        if run.stopped_early { ", stopped early" } else { "" }
    );

    if let (Some(&time), Some(state)) = (trajectory.times().last(), trajectory.last()) {
        let line = ProgressLogger::new(&trajectory.labels()).line(time, state.components());
        info!("{}: final {line}", entry.title);
    }
}

/// One trace per compartment, labeled for the legend.
fn chart(title: &str, trajectory: &Trajectory) -> Chart {
    let mut chart = Chart::new(&trajectory.labels())
        .title(title)
        .legend()
        .x_label("day");
    for (time, state) in trajectory.iter() {
        chart.record(time, state.components());
    }
    chart
}

#[cfg(feature = "plot")]
fn show(charts: Vec<Chart>) -> Result<(), Box<dyn Error>> {
    outbreak_observers::show_all("Outbreak", charts)?;
    Ok(())
}

#[cfg(not(feature = "plot"))]
fn show(_charts: Vec<Chart>) -> Result<(), Box<dyn Error>> {
    log::warn!("built without the `plot` feature, skipping the plot window");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["outbreak"]);
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert!(cli.config.is_none());
        assert!(!cli.no_plot);

        let cli = Cli::parse_from(["outbreak", "--log-level", "debug", "--no-plot"]);
        assert_eq!(cli.log_level, LevelFilter::Debug);
        assert!(cli.no_plot);
    }

    #[test]
    fn default_scenario_produces_three_charts() {
        let charts = run_all(&Scenario::default()).unwrap();

        let titles: Vec<_> = charts.iter().map(Chart::title_text).collect();
        assert_eq!(titles, ["Euler", "ODE: SEIR", "ODE: SIRD"]);

        for chart in &charts {
            assert!(chart.has_legend());
            assert_eq!(chart.traces().len(), 4);
            assert!(chart.traces().iter().all(|t| t.points.len() == 101));
        }
        assert_eq!(charts[2].traces()[3].name, "D");
    }

    #[test]
    fn first_euler_day_matches_the_update_rule() {
        let charts = run_all(&Scenario::default()).unwrap();
        let euler = &charts[0];

        // S*I is zero on day 0, so only E -> I moves.
        let [day, s] = euler.traces()[0].points[1];
        assert_relative_eq!(day, 1.0);
        assert_relative_eq!(s, 997.0);
        assert_relative_eq!(euler.traces()[1].points[1][1], 2.4);
        assert_relative_eq!(euler.traces()[2].points[1][1], 0.6);
    }
}
