/// Console formatting module - Pure rendering concerns
///
/// This module handles the plain-text table preview:
/// - Grid layout and borders
/// - Column bands when a table is wider than the console
/// - Text truncation and padding
/// - Color terminal output for titles
///
/// It accepts built tables and renders them to any `std::io::Write`
/// destination (stdout for the preview, string buffers in tests).
use crate::assemble::PowerReport;
use crate::error::Axis;
use crate::runner::BuiltTable;
use crate::table::{AlphaErrorTable, Key, Table};
use crate::types::RateValue;
use std::io::{self, Write};
use std::sync::OnceLock;
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MIN_CELL: usize = 6;
const MAX_CELL: usize = 24;
const MAX_LABEL: usize = 40;
const INDENT: &str = "  ";

/// One line of a grid body
#[derive(Debug, Clone, PartialEq)]
enum BodyLine {
    Separator,
    /// Label with empty cells (segment or family heading)
    Heading(String),
    Values(String, Vec<String>),
}

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
    console_width: usize,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer sized to the console
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self::with_width(writer, use_colors, get_console_width())
    }

    pub fn with_width(writer: W, use_colors: bool, console_width: usize) -> Self {
        Self { writer, use_colors, console_width }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write formatted text, optionally with color
    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors
            && let Some(ref mut t) = term::stdout()
        {
            let _ = t.fg(color);
            let _ = t.attr(term::Attr::Bold);
            let _ = t.write_all(text.as_bytes());
            let _ = t.reset();
            return Ok(());
        }
        write!(self.writer, "{}", text)
    }

    /// Write "Table N: caption" with an optional period
    pub fn write_title(&mut self, number: u32, caption: &str, period: Option<&str>) -> io::Result<()> {
        let mut title = format!("Table {}", number);
        if !caption.is_empty() {
            title.push_str(&format!(": {}", caption));
        }
        if let Some(period) = period {
            title.push_str(&format!(" [{}]", period));
        }
        self.write_colored(&title, term::color::BRIGHT_CYAN)?;
        writeln!(self.writer)
    }

    /// Write a power report: one block per method segment, rows grouped by
    /// effect family.
    pub fn write_power_report(&mut self, report: &PowerReport) -> io::Result<()> {
        let mut body = Vec::new();
        for segment in report.segments() {
            body.push(BodyLine::Separator);
            let method = segment.level_values(Axis::Columns, 0).first().map(|m| m.to_string()).unwrap_or_default();
            body.push(BodyLine::Heading(method));
            push_family_rows(&mut body, segment.table());
        }
        self.write_grid(report.header(), &body)
    }

    /// Write a Type I error table
    pub fn write_alpha_table(&mut self, table: &AlphaErrorTable) -> io::Result<()> {
        let mut body = vec![BodyLine::Separator];
        for (key, values) in table.iter_rows() {
            body.push(BodyLine::Values(key.to_string(), values.iter().map(format_rate).collect()));
        }
        self.write_grid(table.columns(), &body)
    }

    /// Lay out headers and body, splitting columns into bands that fit the console
    fn write_grid(&mut self, headers: &[Key], body: &[BodyLine]) -> io::Result<()> {
        let widths = GridWidths::measure(self.console_width, headers, body);
        let depth = headers.iter().map(|k| k.depth()).max().unwrap_or(0);

        let mut start = 0;
        while start < headers.len() {
            let end = (start + widths.per_band).min(headers.len());
            if start > 0 {
                writeln!(self.writer)?;
            }
            self.write_band(&widths, headers, depth, start..end, body)?;
            start = end;
        }
        Ok(())
    }

    fn write_band(
        &mut self,
        widths: &GridWidths,
        headers: &[Key],
        depth: usize,
        band: std::ops::Range<usize>,
        body: &[BodyLine],
    ) -> io::Result<()> {
        let columns = band.len();
        writeln!(self.writer, "{}", border('┌', '┬', '┐', widths, columns))?;

        for level in 0..depth {
            let mut line = format!("│ {} │", " ".repeat(widths.label));
            for c in band.clone() {
                // repeated upper-level labels are shown once
                let repeated = level + 1 < depth
                    && c > band.start
                    && headers[c].parts()[..=level] == headers[c - 1].parts()[..=level];
                let text = if repeated { "" } else { headers[c].level(level).unwrap_or("") };
                line.push_str(&format!(" {} │", truncate_with_padding(text, widths.cell)));
            }
            writeln!(self.writer, "{}", line)?;
        }

        for item in body {
            match item {
                BodyLine::Separator => writeln!(self.writer, "{}", border('├', '┼', '┤', widths, columns))?,
                BodyLine::Heading(label) => {
                    let mut line = format!("│ {} │", truncate_with_padding(label, widths.label));
                    for _ in band.clone() {
                        line.push_str(&format!(" {} │", " ".repeat(widths.cell)));
                    }
                    writeln!(self.writer, "{}", line)?;
                }
                BodyLine::Values(label, values) => {
                    let mut line = format!("│ {} │", truncate_with_padding(label, widths.label));
                    for c in band.clone() {
                        let text = values.get(c).map(String::as_str).unwrap_or("");
                        line.push_str(&format!(" {} │", pad_left(text, widths.cell)));
                    }
                    writeln!(self.writer, "{}", line)?;
                }
            }
        }

        writeln!(self.writer, "{}", border('└', '┴', '┘', widths, columns))
    }
}

/// Family heading followed by its magnitude rows
fn push_family_rows(body: &mut Vec<BodyLine>, table: &Table) {
    for family in table.level_values(Axis::Rows, 0) {
        body.push(BodyLine::Heading(format!("{}{}", INDENT, family)));
        if let Some(rows) = table.select_rows(&[family]) {
            for (key, values) in rows.iter_rows() {
                let label = format!("{}{}{}", INDENT, INDENT, key);
                body.push(BodyLine::Values(label, values.iter().map(format_rate).collect()));
            }
        }
    }
}

/// Column widths for one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWidths {
    pub label: usize,
    pub cell: usize,
    /// Value columns per band
    pub per_band: usize,
}

impl GridWidths {
    pub fn new(console_width: usize, label: usize, cell: usize, n_columns: usize) -> Self {
        let label = label.clamp(1, MAX_LABEL);
        let cell = cell.clamp(MIN_CELL, MAX_CELL);

        // "│ label │" then " cell │" per column
        let fixed = label + 4;
        let per_column = cell + 3;
        let fit = console_width.saturating_sub(fixed) / per_column;
        let per_band = fit.clamp(1, n_columns.max(1));

        GridWidths { label, cell, per_band }
    }

    /// Total line width of a band with `columns` value columns
    pub fn line_width(&self, columns: usize) -> usize {
        self.label + 4 + columns * (self.cell + 3)
    }

    fn measure(console_width: usize, headers: &[Key], body: &[BodyLine]) -> Self {
        let mut label = 0;
        let mut cell = headers.iter().flat_map(|k| k.parts().iter()).map(|p| display_width(p)).max().unwrap_or(0);
        for item in body {
            match item {
                BodyLine::Separator => {}
                BodyLine::Heading(l) => label = label.max(display_width(l)),
                BodyLine::Values(l, values) => {
                    label = label.max(display_width(l));
                    cell = values.iter().map(|v| display_width(v)).fold(cell, usize::max);
                }
            }
        }
        GridWidths::new(console_width, label, cell, headers.len())
    }
}

fn border(left: char, mid: char, right: char, widths: &GridWidths, columns: usize) -> String {
    let mut line = String::new();
    line.push(left);
    line.push_str(&"─".repeat(widths.label + 2));
    for _ in 0..columns {
        line.push(mid);
        line.push_str(&"─".repeat(widths.cell + 2));
    }
    line.push(right);
    line
}

/// Preview text of one rate: floats at four digits, everything else verbatim
pub fn format_rate(value: &RateValue) -> String {
    match value {
        RateValue::Float(x) => format!("{:.4}", x),
        other => other.to_string(),
    }
}

/// Get terminal width or default to 120
fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        120 // Default width
    }
}

static CONSOLE_WIDTH: OnceLock<usize> = OnceLock::new();

/// Override the detected console width (first call wins)
pub fn set_console_width(width: usize) {
    let _ = CONSOLE_WIDTH.set(width);
}

pub fn get_console_width() -> usize {
    *CONSOLE_WIDTH.get_or_init(get_terminal_width)
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        let mut result = String::new();
        let mut current_width = 0;

        // Reserve space for "..."
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
            if current_width + c_width > target_width {
                break;
            }
            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        format!("{}{}", s, " ".repeat(width - display_w))
    }
}

/// Right-align within `width`, truncating like [`truncate_with_padding`] when too long
pub fn pad_left(s: &str, width: usize) -> String {
    let display_w = display_width(s);
    if display_w > width {
        truncate_with_padding(s, width)
    } else {
        format!("{}{}", " ".repeat(width - display_w), s)
    }
}

/// Print a built table's preview to stdout
pub fn print_table_preview(number: u32, caption: &str, table: &BuiltTable) {
    let mut writer = TableWriter::new(io::stdout(), true);
    let result = match table {
        BuiltTable::Power(report) => writer
            .write_title(number, caption, Some(report.period()))
            .and_then(|_| writer.write_power_report(report)),
        BuiltTable::AlphaError(alpha) => {
            writer.write_title(number, caption, None).and_then(|_| writer.write_alpha_table(alpha))
        }
    };
    let _ = result.and_then(|_| writeln!(writer.writer));
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
