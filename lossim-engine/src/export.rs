//! CSV sink for parameter sweeps.

use std::io::Write;

use lossim_simulator::sweep::SweepRow;

use crate::EngineError;

/// Fixed header of the sweep file. The first column holds the realized mean
/// interarrival time of each run.
pub const SWEEP_HEADER: [&str; 3] = [
    "Interarrival rate",
    "Blocking probability",
    "Server utilisation",
];

/// Writes one row per sweep run; undefined ratios become empty fields.
pub struct SweepCsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SweepCsvWriter<W> {
    pub fn new(sink: W) -> Result<Self, EngineError> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(SWEEP_HEADER)?;
        Ok(Self { writer })
    }

    pub fn write_row(&mut self, row: &SweepRow) -> Result<(), EngineError> {
        let summary = &row.summary;
        self.writer.write_record([
            field(summary.mean_interarrival()),
            field(summary.blocking_probability()),
            field(summary.utilization()),
        ])?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn finish(mut self) -> Result<W, EngineError> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| EngineError::Io(std::io::Error::other(e.to_string())))
    }
}

fn field(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lossim_core::summary::RunSummary;

    fn row(served: u64, lost: u64, duration: f64) -> SweepRow {
        SweepRow {
            iteration: 0,
            mean_interarrival: 1.0,
            seed: 1,
            summary: RunSummary {
                customers_served: served,
                customers_lost: lost,
                busy_time_area: duration,
                cumulative_interarrival_sum: (served + lost) as f64 * 1.5,
                server_count: 4,
                duration,
            },
            digest: String::new(),
        }
    }

    #[test]
    fn test_header_and_rows() {
        let mut writer = SweepCsvWriter::new(Vec::new()).unwrap();
        writer.write_row(&row(3, 1, 8.0)).unwrap();
        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Interarrival rate,Blocking probability,Server utilisation"
        );
        assert_eq!(lines[1], "1.500000,0.250000,0.250000");
    }

    #[test]
    fn test_undefined_fields_are_empty() {
        let mut writer = SweepCsvWriter::new(Vec::new()).unwrap();
        writer.write_row(&row(0, 0, 0.0)).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text.lines().nth(1), Some(",,"));
    }
}
