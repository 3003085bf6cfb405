//! CLI command implementations
//!
//! Each subcommand prints its results as a box-drawn table on stdout.

pub mod european;
pub mod parity;
pub mod perpetual;
pub mod sweep;

/// Renders `rows` under `headers` as a box-drawn table.
///
/// Columns are as wide as their widest cell; short rows are padded.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |cells: &[&str]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| format!(" {:<w$} ", cells.get(i).copied().unwrap_or(""), w = w))
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = rule("┌", "┬", "┐");
    out.push_str(&line(headers));
    out.push_str(&rule("├", "┼", "┤"));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

/// Formats a value for a table cell.
pub fn fmt_value(value: f64) -> String {
    format!("{:.6}", value)
}
