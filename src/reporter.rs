mod html_formatter;
mod json_formatter;
mod terminal_formatter;

use std::io::Write;

use crate::{
    render::{DisplayLine, Style},
    verdict::Tally,
};

pub use html_formatter::HtmlFormatter;
pub use json_formatter::JsonFormatter;
pub use terminal_formatter::TerminalFormatter;

pub enum Color {
    Red,
    Green,
    Grey,
    Reset,
}

impl Color {
    pub fn to_ansi(&self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Grey => "\x1b[90m",
            Color::Reset => "\x1b[0m",
        }
    }
}

/// Final state of a report, passed to [`Formatter::on_report_end`].
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Outcome {
    pub verdict: bool,
    pub tally: Tally,
}

pub trait Formatter {
    fn on_report_start(&mut self, w: &mut dyn Write, cm: &ColorMarker) -> Result<(), String>;
    fn on_line(
        &mut self,
        w: &mut dyn Write,
        cm: &ColorMarker,
        line: &DisplayLine,
    ) -> Result<(), String>;
    fn on_report_end(
        &mut self,
        w: &mut dyn Write,
        cm: &ColorMarker,
        outcome: &Outcome,
    ) -> Result<(), String>;
}

pub struct ColorMarker {
    use_color: bool,
}

impl ColorMarker {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn wrap<S: AsRef<str>>(&self, color: Color, s: S) -> String {
        if self.use_color {
            format!(
                "{}{}{}",
                color.to_ansi(),
                s.as_ref(),
                Color::Reset.to_ansi()
            )
        } else {
            s.as_ref().to_string()
        }
    }

    pub fn red<S: AsRef<str>>(&self, s: S) -> String {
        self.wrap(Color::Red, s)
    }

    pub fn green<S: AsRef<str>>(&self, s: S) -> String {
        self.wrap(Color::Green, s)
    }

    pub fn grey<S: AsRef<str>>(&self, s: S) -> String {
        self.wrap(Color::Grey, s)
    }

    /// Paints `s` in the color of `style`. Neutral text is left as-is.
    pub fn styled<S: AsRef<str>>(&self, style: Style, s: S) -> String {
        match style {
            Style::Neutral => s.as_ref().to_string(),
            Style::Passed => self.green(s),
            Style::Failed => self.red(s),
            Style::Skipped => self.grey(s),
        }
    }
}

pub struct Reporter<'a, W: Write> {
    w: &'a mut W,
    use_color: bool,
    formatter: Box<dyn Formatter>,
}

impl<'a, W: Write> Reporter<'a, W> {
    pub fn new(w: &'a mut W, use_color: bool, formatter: Box<dyn Formatter>) -> Self {
        Self {
            w,
            use_color,
            formatter,
        }
    }

    pub fn report(
        &mut self,
        verdict: bool,
        lines: &[DisplayLine],
        tally: Tally,
    ) -> Result<(), String> {
        let cm = ColorMarker::new(self.use_color);
        let w: &mut dyn Write = &mut *self.w;

        self.formatter.on_report_start(w, &cm)?;
        lines
            .iter()
            .try_for_each(|line| self.formatter.on_line(w, &cm, line))?;
        self.formatter
            .on_report_end(w, &cm, &Outcome { verdict, tally })?;

        w.flush().map_err(|err| err.to_string())
    }
}
