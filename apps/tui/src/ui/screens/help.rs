use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const KEYS: [(&str, &str); 16] = [
    ("F1", "Toggle this help popup"),
    ("g", "Enter an Ensembl gene id (Enter loads it)"),
    ("/", "Search; the highlight updates as you type"),
    ("Tab", "Cycle the searched field"),
    ("t", "Open the tissue filter menu"),
    ("c", "Clear the tissue filter"),
    ("1-4", "Toggle Neutral / Dependency / Selected Neutral / Selected Dependency"),
    ("x", "Fade points outside the selected categories instead of hiding them"),
    ("←/→", "Move the point cursor"),
    ("Enter", "Pin the point under the cursor"),
    ("u", "Unpin"),
    ("l", "Table of visible screens"),
    ("e", "Export visible screens as CSV"),
    ("< / >", "Shrink / grow the side panel"),
    ("Esc", "Leave input or go back"),
    ("q", "Quit"),
];

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        TextLine::from(Span::styled(
            "Gene Essentiality Map",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Each point is one DepMap screen: gene effect on the x axis, tissue on the y axis. \
             Points at or below -1.0 are dependencies.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled("Keyboard Shortcuts:", bold)),
    ];

    lines.extend(KEYS.iter().map(|(key, description)| {
        TextLine::from(vec![
            Span::styled(format!("  {key}"), key_style),
            Span::raw(format!(" - {description}")),
        ])
    }));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled("CLI Options:", bold)));

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
