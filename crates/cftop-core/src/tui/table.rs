//! [`TableViewModel`] → ratatui [`Table`].

use ratatui::layout::Constraint;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Row, Table};

use crate::attention::Attention;
use crate::tui::style::Styles;
use crate::view::common::TableViewModel;

/// Builds a bordered table widget from a view model.
///
/// Cells flagged warm or hot carry their own color; the active sort column
/// header is underlined.
pub fn to_table<Id>(vm: &TableViewModel<Id>) -> Table<'static> {
    let headers: Vec<Span<'static>> = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let style = if Some(i) == vm.sort_column {
                Styles::sorted_header()
            } else {
                Styles::table_header()
            };
            Span::styled(h.clone(), style)
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row<'static>> = vm
        .rows
        .iter()
        .map(|vr| {
            let cells = vr.cells.iter().map(|c| match c.attention {
                Some(a) if a > Attention::Normal => {
                    Span::styled(c.text.clone(), Styles::from_attention(a))
                }
                _ => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(Styles::default()).height(1)
        })
        .collect();

    let widths: Vec<Constraint> = vm.widths.iter().map(|&w| Constraint::Length(w)).collect();

    Table::new(rows, widths).header(header).block(
        Block::default()
            .title(vm.title.clone())
            .borders(Borders::ALL)
            .style(Styles::default()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::common::{ViewCell, ViewRow};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::{Color, Modifier};
    use ratatui::widgets::Widget;

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    /// Buffer x of `needle` on row `y`; border glyphs are multi-byte, so
    /// count cells, not bytes.
    fn x_of(buf: &Buffer, y: u16, needle: &str) -> u16 {
        let text = line(buf, y);
        let byte = text.find(needle).unwrap();
        text[..byte].chars().count() as u16
    }

    fn view() -> TableViewModel<String> {
        TableViewModel {
            title: " Spaces [2 rows] ".into(),
            headers: vec!["NAME  ".into(), "S_MEM%".into()],
            widths: vec![6, 6],
            rows: vec![
                ViewRow {
                    id: "prod".into(),
                    cells: vec![
                        ViewCell::plain("prod  ".into()),
                        ViewCell::with_attention("  95.0".into(), Attention::Hot),
                    ],
                    style: Attention::Hot,
                },
                ViewRow {
                    id: "dev".into(),
                    cells: vec![
                        ViewCell::plain("dev   ".into()),
                        ViewCell::with_attention("  10.0".into(), Attention::Normal),
                    ],
                    style: Attention::Normal,
                },
            ],
            sort_column: Some(1),
            sort_ascending: false,
        }
    }

    #[test]
    fn test_to_table_renders_cells_and_attention() {
        let area = Rect::new(0, 0, 24, 5);
        let mut buf = Buffer::empty(area);
        to_table(&view()).render(area, &mut buf);

        assert!(line(&buf, 0).contains("Spaces [2 rows]"));
        let header = line(&buf, 1);
        assert!(header.contains("NAME"));
        assert!(header.contains("S_MEM%"));

        let x = x_of(&buf, 2, "95.0");
        assert_eq!(buf[(x, 2)].symbol(), "9");
        assert_eq!(buf[(x, 2)].fg, Color::Red);
        assert!(buf[(x, 2)].modifier.contains(Modifier::BOLD));
        let name_x = x_of(&buf, 2, "prod");
        assert_eq!(buf[(name_x, 2)].symbol(), "p");
        assert_eq!(buf[(name_x, 2)].fg, Color::Reset);

        let x = x_of(&buf, 3, "10.0");
        assert_eq!(buf[(x, 3)].symbol(), "1");
        assert_eq!(buf[(x, 3)].fg, Color::Reset);
    }

    #[test]
    fn test_to_table_underlines_sort_header() {
        let area = Rect::new(0, 0, 24, 5);
        let mut buf = Buffer::empty(area);
        to_table(&view()).render(area, &mut buf);

        let sorted = x_of(&buf, 1, "S_MEM%");
        let other = x_of(&buf, 1, "NAME");
        assert_eq!(buf[(sorted, 1)].symbol(), "S");
        assert!(buf[(sorted, 1)].modifier.contains(Modifier::UNDERLINED));
        assert!(!buf[(other, 1)].modifier.contains(Modifier::UNDERLINED));
    }
}
