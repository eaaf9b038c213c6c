use outbreak_core::{Components, Observer};

use crate::traits::StateEvent;

/// A named line series.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// Collects one trace per compartment and describes how to render them.
///
/// A chart can be filled directly with [`record`](Chart::record) or used as
/// a solver observer, in which case each event adds its time and input
/// components. With the `plot` feature charts are rendered together in one
/// window with [`show_all`].
///
/// # Example
///
/// ```ignore
/// let mut chart = Chart::new(&["S", "E", "I", "R"]).title("Euler").legend();
/// euler::solve(&model, &problem, initial, &grid, &mut chart)?;
/// show_all("Outbreak", vec![chart])?;
/// ```
///
/// [`show_all`]: crate::show_all
#[derive(Debug, Clone)]
pub struct Chart {
    pub(crate) title: String,
    pub(crate) legend: bool,
    pub(crate) x_label: Option<String>,
    pub(crate) traces: Vec<Trace>,
}

impl Chart {
    /// Creates an empty chart with one trace per name.
    #[must_use]
    pub fn new(names: &[&str]) -> Self {
        Self {
            title: String::new(),
            legend: false,
            x_label: None,
            traces: names
                .iter()
                .map(|&name| Trace {
                    name: name.to_owned(),
                    points: Vec::new(),
                })
                .collect(),
        }
    }

    /// Sets the chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Sets the x-axis label.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Records one x value against the next value of every trace.
    ///
    /// Values beyond the number of traces are ignored; traces without a value
    /// are left unchanged.
    pub fn record(&mut self, x: f64, values: impl IntoIterator<Item = f64>) {
        for (trace, y) in self.traces.iter_mut().zip(values) {
            trace.points.push([x, y]);
        }
    }

    /// Returns the chart title.
    #[must_use]
    pub fn title_text(&self) -> &str {
        &self.title
    }

    /// Returns whether a legend is shown.
    #[must_use]
    pub fn has_legend(&self) -> bool {
        self.legend
    }

    /// Returns the collected traces in order.
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }
}

impl<E: StateEvent, A> Observer<E, A> for Chart {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.time(), event.input().components());
        None
    }
}

/// Allows `&mut Chart` to be passed to solvers that take an observer by value,
/// so the chart can be shown after the solve completes.
impl<E: StateEvent, A> Observer<E, A> for &mut Chart {
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Event {
        time: f64,
        values: [f64; 2],
    }

    impl StateEvent for Event {
        type Input = [f64; 2];

        fn step(&self) -> usize {
            0
        }

        fn time(&self) -> f64 {
            self.time
        }

        fn input(&self) -> &[f64; 2] {
            &self.values
        }
    }

    fn points(chart: &Chart, trace: usize) -> &[[f64; 2]] {
        &chart.traces()[trace].points
    }

    // Helper to call observe without needing to specify the action type at each call site.
    fn feed(chart: &mut Chart, time: f64, values: [f64; 2]) {
        let _: Option<()> = chart.observe(&Event { time, values });
    }

    #[test]
    fn builder_sets_presentation() {
        let chart = Chart::new(&["S", "I"]).title("SIRD").legend().x_label("day");
        assert_eq!(chart.title_text(), "SIRD");
        assert!(chart.has_legend());
        assert_eq!(chart.x_label.as_deref(), Some("day"));
        assert_eq!(chart.traces().len(), 2);
        assert_eq!(chart.traces()[1].name, "I");
    }

    #[test]
    fn observing_events_fills_every_trace() {
        let mut chart = Chart::new(&["a", "b"]);
        feed(&mut chart, 0.0, [10.0, 20.0]);
        feed(&mut chart, 1.0, [11.0, 21.0]);

        assert_eq!(points(&chart, 0), [[0.0, 10.0], [1.0, 11.0]]);
        assert_eq!(points(&chart, 1), [[0.0, 20.0], [1.0, 21.0]]);
    }

    #[test]
    fn record_ignores_extra_values_and_tolerates_missing_ones() {
        let mut chart = Chart::new(&["a", "b"]);
        chart.record(1.0, [1.0, 2.0, 3.0]);
        chart.record(2.0, [5.0]);

        assert_eq!(points(&chart, 0), [[1.0, 1.0], [2.0, 5.0]]);
        assert_eq!(points(&chart, 1), [[1.0, 2.0]]);
    }

    #[test]
    fn never_returns_an_action() {
        let mut chart = Chart::new(&["a", "b"]);
        let action: Option<()> = chart.observe(&Event {
            time: 0.0,
            values: [0.0, 0.0],
        });
        assert!(action.is_none());
    }
}
