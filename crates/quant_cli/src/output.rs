//! Result rendering for stdout.

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Two-column box table.
    #[default]
    Table,
}

/// A result that can be shown as label/value rows.
pub trait Tabular {
    /// Rows in display order.
    fn rows(&self) -> Vec<(String, String)>;
}

/// Fixed-precision number cell.
pub fn num(value: f64) -> String {
    format!("{:.6}", value)
}

/// Renders `value` in the requested format.
pub fn render<T: Serialize + Tabular>(format: OutputFormat, value: &T) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(table(&value.rows())),
    }
}

/// Prints `value` to stdout.
pub fn emit<T: Serialize + Tabular>(format: OutputFormat, value: &T) -> Result<()> {
    println!("{}", render(format, value)?);
    Ok(())
}

fn table(rows: &[(String, String)]) -> String {
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut lines = vec![rule("┌", "┬", "┐")];
    for (key, value) in rows {
        lines.push(format!(
            "│ {:<kw$} │ {:>vw$} │",
            key,
            value,
            kw = key_width,
            vw = value_width
        ));
    }
    lines.push(rule("└", "┴", "┘"));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Pair {
        call: f64,
        put: f64,
    }

    impl Tabular for Pair {
        fn rows(&self) -> Vec<(String, String)> {
            vec![("Call".into(), num(self.call)), ("Put".into(), num(self.put))]
        }
    }

    #[test]
    fn test_table_layout() {
        let text = render(OutputFormat::Table, &Pair { call: 10.5, put: 5.25 }).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "│ Call │ 10.500000 │");
        assert_eq!(lines[2], "│ Put  │  5.250000 │");
        assert!(lines[0].starts_with('┌') && lines[3].ends_with('┘'));
    }

    #[test]
    fn test_json_output() {
        let text = render(OutputFormat::Json, &Pair { call: 1.0, put: 2.0 }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["put"], 2.0);
    }
}
