//! Display formatting for terminal output
//!
//! Shared helpers for report titles and tables.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

/// Render rows as a table, right-aligning every column from `first_numeric` on
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>, first_numeric: usize) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(first_numeric..), Alignment::right());
    table.to_string()
}

/// A title line underlined to its own width
pub fn title(text: &str) -> String {
    format!("{}\n{}\n", text, double_separator(text.chars().count()))
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct Row {
        name: &'static str,
        value: i32,
    }

    #[test]
    fn test_table_renders_headers_and_rows() {
        let out = table(
            vec![
                Row { name: "jan", value: 1 },
                Row { name: "fev", value: 20 },
            ],
            1,
        );
        assert!(out.contains("name"));
        assert!(out.contains("fev"));
        assert!(out.contains("20"));
    }

    #[test]
    fn test_title() {
        assert_eq!(title("Periods"), "Periods\n═══════\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("açúcar e café", 8), "açúca...");
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(3).chars().count(), 3);
    }
}
