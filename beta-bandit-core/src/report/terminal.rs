use std::io::{self, Write};

use colored::Colorize;

use super::{ArmSummary, ControlComparison, ExperimentReport, ReportError, Reporter};

/// A reporter that renders a selection run to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Format an arm's summary line.
    fn format_arm(summary: &ArmSummary) -> String {
        format!(
            "{:>24} succ {:>10} trials {:>10}\tmean {:.6} +/- {:.6}",
            summary.name, summary.successes, summary.trials, summary.mean, summary.std_dev
        )
    }

    fn print_header(&self, writer: &mut impl Write, report: &ExperimentReport) -> io::Result<()> {
        let title = format!(
            "experiment \"{}\", {} arms",
            report.experiment_name, report.arm_count
        );
        if self.use_colors {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{}", title)?;
        }
        writeln!(writer, "observations: {}", report.observations)?;
        writeln!(
            writer,
            "potential value remaining: {:.6}",
            report.potential_value_remaining
        )?;
        writeln!(writer)?;
        Ok(())
    }

    fn print_winner(&self, writer: &mut impl Write, report: &ExperimentReport) -> io::Result<()> {
        if let Some(optimal) = report.optimal() {
            let line = Self::format_arm(optimal);
            if self.use_colors {
                writeln!(writer, "win:\t{}", line.green().bold())?;
            } else {
                writeln!(writer, "win:\t{}", line)?;
            }
        }
        Ok(())
    }

    fn print_comparison(
        &self,
        writer: &mut impl Write,
        comparison: &ControlComparison,
    ) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "\t         ntile: {:>8} {:>8} {:>8}",
            5, 50, 95
        )?;
        writeln!(
            writer,
            "\trel to control: {:.6} {:.6} {:.6}",
            comparison.relative.p5, comparison.relative.p50, comparison.relative.p95
        )?;
        writeln!(
            writer,
            "\t           abs: {:.6} {:.6} {:.6}",
            comparison.absolute.p5, comparison.absolute.p50, comparison.absolute.p95
        )?;
        writeln!(writer)?;
        Ok(())
    }

    fn print_arms(&self, writer: &mut impl Write, report: &ExperimentReport) -> io::Result<()> {
        for summary in report.arms.iter().filter(|arm| !arm.optimal) {
            writeln!(writer, "arm:\t{}", Self::format_arm(summary))?;
        }
        Ok(())
    }

    /// Render the whole report to the given writer.
    pub fn write_report(
        &self,
        writer: &mut impl Write,
        report: &ExperimentReport,
    ) -> io::Result<()> {
        self.print_header(writer, report)?;
        self.print_winner(writer, report)?;
        if let Some(comparison) = &report.comparison {
            self.print_comparison(writer, comparison)?;
        }
        self.print_arms(writer, report)?;
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &ExperimentReport) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.write_report(&mut writer, report)?;
        Ok(())
    }
}
