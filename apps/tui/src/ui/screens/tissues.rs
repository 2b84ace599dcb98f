use crate::app::App;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_tissue_menu(app: &App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let query_block = Block::default()
        .title(" Filter tissues (type to narrow) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let query = Paragraph::new(TextLine::from(Span::styled(
        format!("> {}", app.tissue_query),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .block(query_block);
    f.render_widget(query, chunks[0]);

    let tissues = app.menu_tissues();
    let selected_count = app.store.view().selected_tissues.len();
    let list_block = Block::default()
        .title(format!(
            " Tissues ({} shown, {selected_count} selected) ",
            tissues.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if tissues.is_empty() {
        let message = if app.store.tissues().is_empty() {
            "No tissues loaded."
        } else {
            "No tissue matches the filter."
        };
        let paragraph = Paragraph::new(message)
            .block(list_block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, chunks[1]);
    } else {
        let max_visible_rows = chunks[1].height.saturating_sub(2) as usize;
        let offset = scroll_offset(tissues.len(), max_visible_rows, app.tissue_menu_index);

        let lines: Vec<TextLine<'_>> = tissues
            .iter()
            .enumerate()
            .skip(offset)
            .take(max_visible_rows)
            .map(|(index, tissue)| {
                let checked = if app.store.view().is_tissue_selected(tissue) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let style = if index == app.tissue_menu_index {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let prefix = if index == app.tissue_menu_index { ">" } else { " " };
                TextLine::from(Span::styled(format!("{prefix} {checked} {tissue}"), style))
            })
            .collect();

        f.render_widget(Paragraph::new(Text::from(lines)).block(list_block), chunks[1]);
    }

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![
        Span::styled("↑/↓", key_style),
        Span::raw(": Navigate   "),
        Span::styled("Enter", key_style),
        Span::raw(": Toggle   "),
        Span::styled("Delete", key_style),
        Span::raw(": Clear all   "),
        Span::styled("Esc", key_style),
        Span::raw(": Clear filter / Back"),
    ];
    let help_paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);
    f.render_widget(help_paragraph, chunks[2]);
}
