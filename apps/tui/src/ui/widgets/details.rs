use crate::data::DataPoint;
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};

/// Label and value rows describing one point.
pub fn detail_fields(point: &DataPoint) -> [(&'static str, String); 6] {
    [
        ("Tissue", point.tissue.clone()),
        ("Cell Line", point.cell_line.clone()),
        ("Gene Effect", format!("{:.2}", point.x)),
        ("Disease", point.disease.clone()),
        (
            "Expression",
            point
                .expression
                .map_or_else(|| "N/A".to_string(), |value| format!("{value:.2}")),
        ),
        ("DepMap ID", point.depmap_id.clone()),
    ]
}

pub fn detail_lines(point: &DataPoint) -> Vec<TextLine<'static>> {
    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::White);

    detail_fields(point)
        .into_iter()
        .map(|(label, value)| {
            TextLine::from(vec![
                Span::styled(format!("{label}: "), label_style),
                Span::styled(value, value_style),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numbers_to_two_places() {
        let point = DataPoint {
            x: -1.23456,
            y: 0,
            tissue: "Lung".to_string(),
            cell_line: "A549".to_string(),
            depmap_id: "ACH-000001".to_string(),
            disease: "NSCLC".to_string(),
            expression: Some(3.1),
        };

        let fields = detail_fields(&point);

        assert_eq!(fields[2], ("Gene Effect", "-1.23".to_string()));
        assert_eq!(fields[4], ("Expression", "3.10".to_string()));
        assert_eq!(detail_lines(&point).len(), 6);
    }

    #[test]
    fn missing_expression_is_na() {
        let point = DataPoint {
            x: 0.0,
            y: 0,
            tissue: String::new(),
            cell_line: String::new(),
            depmap_id: String::new(),
            disease: String::new(),
            expression: None,
        };
        assert_eq!(detail_fields(&point)[4].1, "N/A");
    }
}
