//! ## lossim-telemetry::metrics
//! **Prometheus counters and histograms for simulation runs**

use lossim_core::summary::RunSummary;
use prometheus::{Gauge, Histogram, HistogramOpts, IntCounter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub runs: IntCounter,
    pub customers_served: IntCounter,
    pub customers_lost: IntCounter,
    pub blocking_probability: Histogram,
    pub utilization: Gauge,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let runs = IntCounter::new("lossim_runs_total", "Completed simulation runs")?;
        let customers_served = IntCounter::new(
            "lossim_customers_served_total",
            "Arrivals that found an idle server",
        )?;
        let customers_lost = IntCounter::new(
            "lossim_customers_lost_total",
            "Arrivals lost because every server was busy",
        )?;
        let blocking_probability = Histogram::with_opts(
            HistogramOpts::new(
                "lossim_blocking_probability",
                "Blocking probability per completed run",
            )
            .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0]),
        )?;
        let utilization = Gauge::new(
            "lossim_last_utilization",
            "Server utilization of the most recent run",
        )?;

        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(customers_served.clone()))?;
        registry.register(Box::new(customers_lost.clone()))?;
        registry.register(Box::new(blocking_probability.clone()))?;
        registry.register(Box::new(utilization.clone()))?;

        Ok(Self {
            registry,
            runs,
            customers_served,
            customers_lost,
            blocking_probability,
            utilization,
        })
    }

    /// Folds one finished run into the metrics.
    pub fn record_summary(&self, summary: &RunSummary) {
        self.runs.inc();
        self.customers_served.inc_by(summary.customers_served);
        self.customers_lost.inc_by(summary.customers_lost);
        if let Some(probability) = summary.blocking_probability() {
            self.blocking_probability.observe(probability);
        }
        if let Some(utilization) = summary.utilization() {
            self.utilization.set(utilization);
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
