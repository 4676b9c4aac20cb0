use crate::render::DisplayLine;

use super::{ColorMarker, Formatter, Outcome};

const STYLESHEET: &str = "body{font-family: monospace; font-size: 12px; white-space: pre;} \
h1 {font-size: 16px; }\
.passed{color: green;} \
.failed{color: red;} \
.skipped{color: grey;} \
body.passed {color: black; background-color: #eefff3;} \
body.failed {color: black; background-color: #ffd3ce;} ";

/// Writes a standalone HTML page.
///
/// Lines are buffered until the verdict is known, since it decides the class
/// of `<body>`.
#[derive(Default)]
pub struct HtmlFormatter {
    body: Vec<String>,
}

impl HtmlFormatter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn escape(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
        out
    })
}

impl Formatter for HtmlFormatter {
    fn on_report_start(
        &mut self,
        _w: &mut dyn std::io::Write,
        _cm: &ColorMarker,
    ) -> Result<(), String> {
        self.body.clear();
        Ok(())
    }

    fn on_line(
        &mut self,
        _w: &mut dyn std::io::Write,
        _cm: &ColorMarker,
        line: &DisplayLine,
    ) -> Result<(), String> {
        self.body.push(match line.style.class_name() {
            Some(class) => format!("<div class=\"{}\">{}</div>", class, escape(&line.text)),
            None => format!("<div>{}</div>", escape(&line.text)),
        });
        Ok(())
    }

    fn on_report_end(
        &mut self,
        w: &mut dyn std::io::Write,
        _cm: &ColorMarker,
        outcome: &Outcome,
    ) -> Result<(), String> {
        let body_class = if outcome.verdict { "passed" } else { "failed" };

        let mut write_document = || -> std::io::Result<()> {
            writeln!(w, "<!DOCTYPE html>")?;
            writeln!(w, "<html>")?;
            writeln!(
                w,
                "<head><meta charset=\"utf-8\"><style>{}</style></head>",
                STYLESHEET
            )?;
            writeln!(w, "<body class=\"{}\">", body_class)?;
            for div in &self.body {
                writeln!(w, "{}", div)?;
            }
            writeln!(w, "</body>")?;
            writeln!(w, "</html>")
        };

        write_document().map_err(|err| err.to_string())
    }
}
