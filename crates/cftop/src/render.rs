//! One-shot table output for a terminal or a pipe.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use crossterm::style::{Color, StyledContent, Stylize};

use cftop_core::attention::Attention;
use cftop_core::view::{TableViewModel, ViewCell};

/// Column separator.
const GAP: &str = " ";

fn styled_cell(cell: &ViewCell) -> StyledContent<&str> {
    let content = cell.text.as_str().stylize();
    match cell.attention {
        Some(Attention::Hot) => content.with(Color::Red).bold(),
        Some(Attention::Warm) => content.with(Color::Yellow),
        _ => content,
    }
}

/// Writes the title, the header and one line per row.
///
/// With `color`, warm and hot cells are colored and the header is bold with
/// the active sort column underlined.
pub fn write_table<W: Write, Id>(
    out: &mut W,
    vm: &TableViewModel<Id>,
    collected_at: Option<DateTime<Utc>>,
    color: bool,
) -> io::Result<()> {
    match collected_at {
        Some(ts) => writeln!(
            out,
            "{} at {}",
            vm.title.trim(),
            ts.format("%Y-%m-%d %H:%M:%S UTC")
        )?,
        None => writeln!(out, "{}", vm.title.trim())?,
    }

    for (i, header) in vm.headers.iter().enumerate() {
        if i > 0 {
            write!(out, "{GAP}")?;
        }
        if !color {
            write!(out, "{header}")?;
        } else if Some(i) == vm.sort_column {
            write!(out, "{}", header.as_str().bold().underlined())?;
        } else {
            write!(out, "{}", header.as_str().bold())?;
        }
    }
    writeln!(out)?;

    for row in &vm.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if i > 0 {
                write!(out, "{GAP}")?;
            }
            if color {
                write!(out, "{}", styled_cell(cell))?;
            } else {
                write!(out, "{}", cell.text)?;
            }
        }
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cftop_core::attention::AttentionThresholds;
    use cftop_core::fmt::display_width;
    use cftop_core::models::SpaceRow;
    use cftop_core::view::{SpaceViewOptions, build_space_view, space_registry};

    fn view() -> TableViewModel<String> {
        let rows = vec![
            SpaceRow {
                name: "dev".into(),
                number_of_apps: 2,
                total_reporting_containers: 1,
                total_cpu_percentage: 5.5,
                memory_limit_in_bytes: 1024,
                total_reserved_memory_percent_of_space_quota: 95.0,
                ..Default::default()
            },
            SpaceRow {
                name: "qa".into(),
                ..Default::default()
            },
        ];
        let options = SpaceViewOptions {
            columns: Some(vec!["spaceName".into(), "CPU".into(), "S_MEM_PER".into()]),
            ..Default::default()
        };
        let registry = space_registry(&AttentionThresholds::default()).unwrap();
        build_space_view(&registry, &rows, &options).unwrap()
    }

    #[test]
    fn test_write_plain_table() {
        let mut out = Vec::new();
        let ts = DateTime::from_timestamp(1_700_000_000, 0);
        write_table(&mut out, &view(), ts, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Spaces [2 rows] at 2023-11-14 22:13:20 UTC");
        assert_eq!(lines[1], format!("{:<25}   CPU%  S_MEM%", "SPACE"));
        assert_eq!(lines[2], format!("{:<25}   5.50    95.0", "dev"));
        assert_eq!(lines[3], format!("{:<25}     --      --", "qa"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_write_colored_table() {
        let mut out = Vec::new();
        write_table(&mut out, &view(), None, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Spaces [2 rows]\n"));
        let cell = ViewCell::with_attention("   95.0".into(), Attention::Hot);
        let hot = styled_cell(&cell).to_string();
        assert!(text.contains(&hot));
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_write_table_keeps_one_line_per_row() {
        let rows: Vec<SpaceRow> = ["e\u{301}quipe", "数据库服务", "a\nb", "tab\there"]
            .iter()
            .map(|name| SpaceRow {
                name: name.to_string(),
                number_of_apps: 3,
                ..Default::default()
            })
            .collect();
        let options = SpaceViewOptions {
            columns: Some(vec!["spaceName".into(), "APPS".into()]),
            ..Default::default()
        };
        let registry = space_registry(&AttentionThresholds::default()).unwrap();
        let vm = build_space_view(&registry, &rows, &options).unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &vm, None, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // title and header, then one line per space
        assert_eq!(lines.len(), 2 + 4);
        for line in &lines[1..] {
            assert_eq!(display_width(line), 25 + 1 + 7, "{:?}", line);
            assert!(line.ends_with("      3") || line.ends_with("   APPS"));
        }
        assert!(!text.contains('\t'));
    }
}
