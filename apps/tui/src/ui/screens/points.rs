use crate::app::App;
use crate::ui::widgets::charts::point_color;
use crate::ui::widgets::tables::{scroll_offset, truncate};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_points_view(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    let visible = app.store.visible();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    if visible.is_empty() {
        let block = Block::default()
            .title("Visible Screens")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new("No visible screens.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, chunks[0]);
    } else {
        let header = Row::new(vec![
            Cell::from(" "),
            Cell::from("Tissue"),
            Cell::from("Cell Line"),
            Cell::from("DepMap ID"),
            Cell::from("Disease"),
            Cell::from("Gene Effect"),
            Cell::from("Expression"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let total_rows = visible.len();
        let max_visible_rows = chunks[0].height.saturating_sub(3) as usize;
        let offset = scroll_offset(total_rows, max_visible_rows, app.table_index);

        let rows = visible
            .iter()
            .enumerate()
            .skip(offset)
            .take(max_visible_rows)
            .map(|(index, visible)| {
                let point = visible.point;
                let style = if index == app.table_index {
                    Style::default()
                        .bg(Color::Rgb(0, 0, 238))
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(point_color(visible.style.color))
                };
                let marker = if app.store.view().is_pinned(point) {
                    "*"
                } else {
                    ""
                };

                Row::new(vec![
                    Cell::from(marker),
                    Cell::from(truncate(&point.tissue, 20)),
                    Cell::from(point.cell_line.clone()),
                    Cell::from(point.depmap_id.clone()),
                    Cell::from(truncate(&point.disease, 28)),
                    Cell::from(format!("{:.2}", point.x)),
                    Cell::from(
                        point
                            .expression
                            .map_or_else(|| "N/A".to_string(), |value| format!("{value:.2}")),
                    ),
                ])
                .style(style)
            });

        let widths = [
            Constraint::Length(1),
            Constraint::Length(20),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Min(12),
            Constraint::Length(11),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(format!(
                        "Visible Screens ({} of {total_rows})",
                        app.table_index + 1
                    ))
                    .borders(Borders::ALL),
            )
            .column_spacing(1);

        f.render_widget(table, chunks[0]);
    }

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![
        Span::styled("ESC", key_style),
        Span::raw(": Back   "),
        Span::styled("↑/↓", key_style),
        Span::raw(": Navigate   "),
        Span::styled("PgUp/PgDn", key_style),
        Span::raw(": Jump 5 rows   "),
        Span::styled("Enter", key_style),
        Span::raw(": Pin   "),
        Span::styled("u", key_style),
        Span::raw(": Unpin   "),
        Span::styled("e", key_style),
        Span::raw(": Export   "),
        Span::styled("q", key_style),
        Span::raw(": Quit"),
    ];

    let help_paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(help_paragraph, chunks[1]);
}
