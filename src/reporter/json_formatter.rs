use crate::render::DisplayLine;

use super::{ColorMarker, Formatter, Outcome};

#[derive(Default)]
pub struct JsonFormatter {
    lines: Vec<DisplayLine>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(serde::Serialize)]
struct ReportJson<'a> {
    success: bool,
    num_passed: usize,
    num_failed: usize,
    num_skipped: usize,
    lines: &'a Vec<DisplayLine>,
}

impl Formatter for JsonFormatter {
    fn on_report_start(
        &mut self,
        _w: &mut dyn std::io::Write,
        _cm: &ColorMarker,
    ) -> Result<(), String> {
        self.lines.clear();
        Ok(())
    }

    fn on_line(
        &mut self,
        _w: &mut dyn std::io::Write,
        _cm: &ColorMarker,
        line: &DisplayLine,
    ) -> Result<(), String> {
        self.lines.push(line.clone());
        Ok(())
    }

    fn on_report_end(
        &mut self,
        w: &mut dyn std::io::Write,
        _cm: &ColorMarker,
        outcome: &Outcome,
    ) -> Result<(), String> {
        let report = ReportJson {
            success: outcome.verdict,
            num_passed: outcome.tally.passed,
            num_failed: outcome.tally.failed,
            num_skipped: outcome.tally.skipped,
            lines: &self.lines,
        };

        let json = serde_json::to_string(&report).map_err(|err| err.to_string())?;

        write!(w, "{}", json).map_err(|err| err.to_string())
    }
}
