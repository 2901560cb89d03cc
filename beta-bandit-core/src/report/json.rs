use std::io::{self, Write};

use super::{ExperimentReport, ReportError, Reporter};

/// A reporter that emits the report as JSON, for machine consumption.
#[derive(Debug, Clone, Default)]
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Emit indented JSON instead of a single line.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Serialize the report to the given writer.
    pub fn write_report(
        &self,
        writer: &mut impl Write,
        report: &ExperimentReport,
    ) -> Result<(), ReportError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, report)?;
        } else {
            serde_json::to_writer(&mut *writer, report)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Reporter for JsonReporter {
    fn report(&self, report: &ExperimentReport) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.write_report(&mut writer, report)
    }
}
