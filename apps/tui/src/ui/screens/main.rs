use crate::app::{App, InputState};
use crate::data::PointColor;
use crate::domain::Category;
use crate::ui::widgets::charts::{point_color, render_essentiality_scatter, render_summary_barchart};
use crate::ui::widgets::details::detail_lines;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

pub fn render_main(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(8),    // Chart and side panel
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title_section(app, f, main_layout[0]);
    render_content_section(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Gene Essentiality Map ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let throbber = Throbber::default().throbber_set(BRAILLE_SIX);
    let label_style = Style::default().fg(Color::Gray);
    let mut spans = vec![Span::styled("Gene: ", label_style)];

    if app.input_state == InputState::EditingGene {
        let cursor = cursor_char(app.animation_counter);
        spans.push(Span::styled(
            format!("{}{cursor}", app.current_input),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            app.store.gene_id().unwrap_or("(none)").to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if app.store.is_loading() {
        spans.push(Span::raw("  "));
        spans.push(throbber.to_symbol_span(&app.throbber_state));
        spans.push(Span::styled(" loading", label_style));
    } else if app.store.dataset().is_some() {
        spans.push(Span::styled(
            format!(
                "  {} of {} screens | {} tissues",
                app.visible_count(),
                app.store.points().len(),
                app.store.tissues().len()
            ),
            label_style,
        ));
    }

    let title = Paragraph::new(TextLine::from(spans)).block(title_block);
    f.render_widget(title, area);
}

fn render_content_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chart_percent = 100 - app.side_panel_percent;
    let horizontal_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(chart_percent),
            Constraint::Percentage(app.side_panel_percent),
        ])
        .split(area);

    render_essentiality_scatter(app, f, horizontal_split[0]);
    render_side_panel(app, f, horizontal_split[1]);
}

fn render_side_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let side_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Length(3), // Tissue chips
            Constraint::Length(7), // Legend
            Constraint::Length(8), // Point details
            Constraint::Min(4),    // Per-tissue summary
        ])
        .split(area);

    render_search_box(app, f, side_split[0]);
    render_tissue_chips(app, f, side_split[1]);
    render_legend(app, f, side_split[2]);
    render_point_details(app, f, side_split[3]);
    render_summary_barchart(&app.store.summary(), f, side_split[4]);
}

fn render_search_box(app: &App, f: &mut Frame<'_>, area: Rect) {
    let view = app.store.view();
    let editing = app.input_state == InputState::EditingSearch;
    let border_color = if editing { Color::Yellow } else { Color::Green };

    let block = Block::default()
        .title(format!(" Search: {} (Tab) ", view.search_field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let cursor = if editing {
        cursor_char(app.animation_counter)
    } else {
        ""
    };
    let text = if view.search_term.is_empty() && !editing {
        Span::styled("press / to search", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            format!("> {}{cursor}", view.search_term),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };

    f.render_widget(Paragraph::new(TextLine::from(text)).block(block), area);
}

fn render_tissue_chips(app: &App, f: &mut Frame<'_>, area: Rect) {
    let selected = &app.store.view().selected_tissues;
    let block = Block::default()
        .title(format!(" Tissues ({}) ", selected.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let line = if selected.is_empty() {
        TextLine::from(Span::styled(
            "All tissues (t to filter)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let chip_style = Style::default().fg(Color::Black).bg(Color::Cyan);
        let mut spans = Vec::with_capacity(selected.len() * 2);
        for tissue in selected {
            spans.push(Span::styled(format!(" {tissue} "), chip_style));
            spans.push(Span::raw(" "));
        }
        TextLine::from(spans)
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}

const fn category_color(category: Category) -> PointColor {
    match category {
        Category::Neutral => PointColor::Neutral,
        Category::Dependency => PointColor::Dependency,
        Category::SelectedNeutral => PointColor::HighlightedNeutral,
        Category::SelectedDependency => PointColor::HighlightedDependency,
    }
}

fn render_legend(app: &App, f: &mut Frame<'_>, area: Rect) {
    let view = app.store.view();
    let block = Block::default()
        .title(" Categories ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let mut lines: Vec<TextLine<'_>> = Category::ALL
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let checked = if view.is_category_selected(*category) {
                "[x]"
            } else {
                "[ ]"
            };
            TextLine::from(vec![
                Span::styled(
                    format!("{} ", index + 1),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(format!("{checked} ")),
                Span::styled(
                    "●",
                    Style::default().fg(point_color(category_color(*category))),
                ),
                Span::raw(format!(" {}", category.label())),
            ])
        })
        .collect();

    let context = if view.show_context { "on" } else { "off" };
    lines.push(TextLine::from(Span::styled(
        format!("x  context: {context}"),
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_point_details(app: &App, f: &mut Frame<'_>, area: Rect) {
    let pinned = app.store.view().pinned_point.as_ref();
    let (title, point) = match pinned {
        Some(point) => (" Pinned Point ", Some(point.clone())),
        None => (" Cursor Point ", app.cursor_point()),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let text = point.as_ref().map_or_else(
        || {
            Text::from(Span::styled(
                "No point selected",
                Style::default().fg(Color::DarkGray),
            ))
        },
        |point| Text::from(detail_lines(point)),
    );

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status_paragraph = Paragraph::new(Span::styled(app.status_message.as_str(), style))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    let shortcuts = [
        ("F1", "Help"),
        ("g", "Gene"),
        ("/", "Search"),
        ("t", "Tissues"),
        ("1-4", "Categories"),
        ("←/→", "Cursor"),
        ("Enter", "Pin"),
        ("l", "Table"),
        ("e", "Export"),
        ("q", "Quit"),
    ];

    let mut spans = Vec::with_capacity(shortcuts.len() * 2);
    for (index, (key, label)) in shortcuts.iter().enumerate() {
        spans.push(Span::styled(*key, key_style));
        let separator = if index + 1 == shortcuts.len() { "" } else { " | " };
        spans.push(Span::styled(format!(": {label}{separator}"), text_style));
    }

    let shortcuts_paragraph = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}

fn cursor_char(animation_counter: f64) -> &'static str {
    let blink = (animation_counter * 2.0).sin() > 0.0;
    if blink {
        "█"
    } else {
        " "
    }
}
