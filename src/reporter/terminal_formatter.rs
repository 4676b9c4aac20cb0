use crate::render::DisplayLine;

use super::{ColorMarker, Formatter, Outcome};

pub struct TerminalFormatter {}

impl Formatter for TerminalFormatter {
    fn on_report_start(
        &mut self,
        _w: &mut dyn std::io::Write,
        _cm: &ColorMarker,
    ) -> Result<(), String> {
        Ok(())
    }

    fn on_line(
        &mut self,
        w: &mut dyn std::io::Write,
        cm: &ColorMarker,
        line: &DisplayLine,
    ) -> Result<(), String> {
        writeln!(w, "{}", cm.styled(line.style, &line.text)).map_err(|err| err.to_string())
    }

    fn on_report_end(
        &mut self,
        w: &mut dyn std::io::Write,
        cm: &ColorMarker,
        outcome: &Outcome,
    ) -> Result<(), String> {
        let tally = &outcome.tally;
        let verdict = if outcome.verdict {
            cm.green("PASSED")
        } else {
            cm.red("FAILED")
        };

        write!(
            w,
            "\n{} passed, {} failed, {} skipped\n{}\n",
            tally.passed, tally.failed, tally.skipped, verdict
        )
        .map_err(|err| err.to_string())
    }
}
