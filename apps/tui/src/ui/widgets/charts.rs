use crate::app::App;
use crate::data::{PointColor, TissueSummary, VisiblePoint, DEFAULT_RADIUS, HIGHLIGHTED_RADIUS};
use crate::domain::ESSENTIALITY_THRESHOLD;
use crate::ui::widgets::tables::truncate;
use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap,
};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

const TISSUE_LABEL_WIDTH: usize = 18;
const X_PADDING: f64 = 0.25;

pub const fn point_color(color: PointColor) -> Color {
    let (r, g, b, _) = color.rgba();
    Color::Rgb(r, g, b)
}

/// Terminal markers stand in for point radius.
const fn marker_for(radius: u8) -> Marker {
    if radius > HIGHLIGHTED_RADIUS {
        Marker::Block
    } else if radius > DEFAULT_RADIUS {
        Marker::Dot
    } else {
        Marker::Braille
    }
}

/// Gene effect range of the loaded points, padded and always showing the threshold.
pub fn x_bounds(points: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let (min, max) = points
        .into_iter()
        .fold((ESSENTIALITY_THRESHOLD, 0.0_f64), |(min, max), x| {
            (min.min(x), max.max(x))
        });
    [min - X_PADDING, max + X_PADDING]
}

/// One label per tissue slot plus an empty label at each padded end, thinned
/// to fit `rows`.
pub fn tissue_axis_labels(tissues: &[String], rows: usize) -> Vec<String> {
    let stride = if rows == 0 {
        1
    } else {
        tissues.len().div_ceil(rows).max(1)
    };

    let mut labels = Vec::with_capacity(tissues.len() + 2);
    labels.push(String::new());
    labels.extend(tissues.iter().enumerate().map(|(index, tissue)| {
        if index % stride == 0 {
            truncate(tissue, TISSUE_LABEL_WIDTH)
        } else {
            String::new()
        }
    }));
    labels.push(String::new());
    labels
}

/// Group visible points into one series per color and marker.
#[allow(clippy::cast_precision_loss)]
fn series(visible: &[VisiblePoint<'_>]) -> Vec<(PointColor, Marker, Vec<(f64, f64)>)> {
    let mut groups: Vec<(PointColor, Marker, Vec<(f64, f64)>)> = Vec::new();

    for color in PointColor::ALL {
        for marker in [Marker::Braille, Marker::Dot, Marker::Block] {
            let data: Vec<(f64, f64)> = visible
                .iter()
                .filter(|v| v.style.color == color && marker_for(v.style.radius) == marker)
                .map(|v| (v.point.x, v.point.y as f64))
                .collect();
            if !data.is_empty() {
                groups.push((color, marker, data));
            }
        }
    }

    groups
}

#[allow(clippy::cast_precision_loss)]
pub fn render_essentiality_scatter(app: &App, f: &mut Frame<'_>, area: Rect) {
    let tissues = app.store.tissues();
    let block = Block::default()
        .title(" Gene Effect by Tissue ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if tissues.is_empty() {
        let message = if app.store.is_loading() {
            "Loading essentiality data...".to_string()
        } else if let Some(error) = app.store.error() {
            error.to_string()
        } else {
            "No data loaded. Press g to enter an Ensembl gene id.".to_string()
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let visible = app.store.visible();
    let groups = series(&visible);
    let top = tissues.len() as f64;
    let threshold = [
        (ESSENTIALITY_THRESHOLD, -0.5),
        (ESSENTIALITY_THRESHOLD, top - 0.5),
    ];
    let cursor: Vec<(f64, f64)> = visible
        .get(app.point_cursor)
        .map(|v| (v.point.x, v.point.y as f64))
        .into_iter()
        .collect();

    let mut datasets = vec![Dataset::default()
        .name("Threshold")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::DarkGray))
        .data(&threshold)];

    datasets.extend(groups.iter().map(|(color, marker, data)| {
        Dataset::default()
            .name(color.label())
            .marker(*marker)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(point_color(*color)))
            .data(data)
    }));

    datasets.push(
        Dataset::default()
            .name("Cursor")
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::White))
            .data(&cursor),
    );

    let [x_min, x_max] = x_bounds(app.store.points().iter().map(|p| p.x));
    let x_labels = vec![
        Span::raw(format!("{x_min:.1}")),
        Span::raw(format!("{ESSENTIALITY_THRESHOLD:.1}")),
        Span::raw(format!("{x_max:.1}")),
    ];
    let rows = area.height.saturating_sub(4) as usize;

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(None)
        .x_axis(
            Axis::default()
                .title("Gene Effect")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([-1.0, top])
                .labels(tissue_axis_labels(tissues, rows)),
        );

    f.render_widget(chart, area);

    if let Ok(mut effect) = app.load_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            let buffer = f.buffer_mut();
            buffer.render_effect(effect, area, app.last_tick);
        }
    }
}

pub fn render_summary_barchart(summary: &[TissueSummary], f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Per Tissue ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if summary.is_empty() {
        let paragraph = Paragraph::new("No visible screens")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let dependency_style = Style::default().fg(point_color(PointColor::Dependency));
    let neutral_style = Style::default().fg(point_color(PointColor::Neutral));
    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let max_value = summary
        .iter()
        .map(|s| s.dependency.max(s.neutral))
        .max()
        .unwrap_or(0)
        .max(1);

    let mut chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1)
        .max(max_value as u64);

    for tissue in summary {
        let bars = [
            Bar::default()
                .value(tissue.dependency as u64)
                .style(dependency_style)
                .value_style(value_style),
            Bar::default()
                .value(tissue.neutral as u64)
                .style(neutral_style)
                .value_style(value_style),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(TextLine::from(truncate(&tissue.tissue, TISSUE_LABEL_WIDTH)))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}
