//! Visible subset and per-point styling for the scatter chart.
//!
//! Always computed from the full base point list, so removing a filter brings
//! every excluded point back.

use std::collections::HashSet;

use serde::Serialize;

use crate::data::normalize::DataPoint;
use crate::data::view_state::ViewState;
use crate::domain::SearchField;

pub const PINNED_RADIUS: u8 = 8;
pub const HIGHLIGHTED_RADIUS: u8 = 6;
pub const DEFAULT_RADIUS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PointColor {
    Dependency,
    Neutral,
    Faded,
    HighlightedDependency,
    HighlightedNeutral,
}

impl PointColor {
    pub const ALL: [Self; 5] = [
        Self::Faded,
        Self::Neutral,
        Self::Dependency,
        Self::HighlightedNeutral,
        Self::HighlightedDependency,
    ];

    /// RGB triple and alpha for the color.
    pub const fn rgba(self) -> (u8, u8, u8, f32) {
        match self {
            Self::Dependency => (239, 68, 68, 0.6),
            Self::Neutral => (59, 130, 246, 0.6),
            Self::Faded => (156, 163, 175, 0.2),
            Self::HighlightedDependency => (245, 158, 11, 0.9),
            Self::HighlightedNeutral => (34, 197, 94, 0.9),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dependency => "Dependency",
            Self::Neutral => "Neutral",
            Self::Faded => "Other",
            Self::HighlightedDependency => "Selected Dependency",
            Self::HighlightedNeutral => "Selected Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointStyle {
    pub color: PointColor,
    pub radius: u8,
    pub border_width: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePoint<'a> {
    pub point: &'a DataPoint,
    pub highlighted: bool,
    pub style: PointStyle,
}

/// Counts of visible points in one tissue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TissueSummary {
    pub tissue: String,
    pub total: usize,
    pub dependency: usize,
    pub neutral: usize,
}

/// Case-insensitive substring match of the search term on `field`.
/// An empty term highlights nothing.
pub fn is_highlighted(point: &DataPoint, term: &str, field: SearchField) -> bool {
    if term.is_empty() {
        return false;
    }
    let needle = term.to_lowercase();
    point
        .field_text(field)
        .is_some_and(|text| text.to_lowercase().contains(&needle))
}

pub fn point_style(point: &DataPoint, highlighted: bool, faded: bool, pinned: bool) -> PointStyle {
    let dependency = point.is_dependency();
    let color = match (highlighted, faded, dependency) {
        (true, _, true) => PointColor::HighlightedDependency,
        (true, _, false) => PointColor::HighlightedNeutral,
        (false, true, _) => PointColor::Faded,
        (false, false, true) => PointColor::Dependency,
        (false, false, false) => PointColor::Neutral,
    };

    let radius = if pinned {
        PINNED_RADIUS
    } else if highlighted {
        HIGHLIGHTED_RADIUS
    } else {
        DEFAULT_RADIUS
    };

    let border_width = if pinned || highlighted {
        2
    } else if faded {
        0
    } else {
        1
    };

    PointStyle {
        color,
        radius,
        border_width,
    }
}

/// Narrow `points` by tissue, then by category, and style what remains.
pub fn visible_points<'a>(points: &'a [DataPoint], view: &ViewState) -> Vec<VisiblePoint<'a>> {
    let tissues: HashSet<&str> = view.selected_tissues.iter().map(String::as_str).collect();
    let categories_active = !view.selected_categories.is_empty();

    points
        .iter()
        .filter(|point| tissues.is_empty() || tissues.contains(point.tissue.as_str()))
        .filter_map(|point| {
            let highlighted = is_highlighted(point, &view.search_term, view.search_field);
            let in_category = !categories_active
                || view
                    .selected_categories
                    .iter()
                    .any(|category| category.matches(point.x, highlighted));

            if !in_category && !view.show_context {
                return None;
            }

            Some(VisiblePoint {
                point,
                highlighted,
                style: point_style(point, highlighted, !in_category, view.is_pinned(point)),
            })
        })
        .collect()
}

/// Per-tissue counts of `visible`, in axis order, skipping empty tissues.
pub fn summarize(tissues: &[String], visible: &[VisiblePoint<'_>]) -> Vec<TissueSummary> {
    let mut summaries: Vec<TissueSummary> = tissues
        .iter()
        .map(|tissue| TissueSummary {
            tissue: tissue.clone(),
            total: 0,
            dependency: 0,
            neutral: 0,
        })
        .collect();

    for visible_point in visible {
        if let Some(summary) = summaries.get_mut(visible_point.point.y) {
            summary.total += 1;
            if visible_point.point.is_dependency() {
                summary.dependency += 1;
            } else {
                summary.neutral += 1;
            }
        }
    }

    summaries.retain(|summary| summary.total > 0);
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn point(tissue: &str, y: usize, x: f64, cell_line: &str, id: &str) -> DataPoint {
        DataPoint {
            x,
            y,
            tissue: tissue.to_string(),
            cell_line: cell_line.to_string(),
            depmap_id: id.to_string(),
            disease: "Carcinoma".to_string(),
            expression: None,
        }
    }

    fn lung_liver() -> Vec<DataPoint> {
        vec![
            point("Lung", 0, -2.0, "A549", "ACH-1"),
            point("Liver", 1, 0.5, "HELA-1", "ACH-2"),
        ]
    }

    #[test]
    fn empty_filters_return_everything() {
        let points = lung_liver();
        let visible = visible_points(&points, &ViewState::default());

        assert_eq!(visible.len(), points.len());
        for (visible, original) in visible.iter().zip(&points) {
            assert_eq!(visible.point, original);
        }
    }

    #[test]
    fn tissue_filter_keeps_only_selected_tissue() {
        let points = lung_liver();
        let mut view = ViewState::default();
        view.toggle_tissue("Liver");

        let visible = visible_points(&points, &view);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].point.tissue, "Liver");
        assert_eq!(visible[0].point.x, 0.5);
    }

    #[test]
    fn retoggling_tissue_restores_points() {
        let points = lung_liver();
        let mut view = ViewState::default();
        view.toggle_tissue("Liver");
        assert_eq!(visible_points(&points, &view).len(), 1);

        view.toggle_tissue("Liver");
        assert_eq!(visible_points(&points, &view).len(), 2);
    }

    #[test]
    fn search_highlights_case_insensitive_substring() {
        let points = lung_liver();
        assert!(is_highlighted(&points[1], "HELA", SearchField::CellLineName));
        assert!(is_highlighted(&points[1], "hela", SearchField::CellLineName));
        assert!(!is_highlighted(&points[0], "HELA", SearchField::CellLineName));
    }

    #[test]
    fn empty_search_term_highlights_nothing() {
        let points = lung_liver();
        assert!(points
            .iter()
            .all(|p| !is_highlighted(p, "", SearchField::CellLineName)));
    }

    #[test]
    fn absent_expression_never_matches() {
        let points = lung_liver();
        assert!(!is_highlighted(&points[0], "n", SearchField::Expression));
    }

    #[test]
    fn category_filter_keeps_matching_points() {
        let points = lung_liver();
        let mut view = ViewState::default();
        view.toggle_category(Category::Dependency);

        let visible = visible_points(&points, &view);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].point.depmap_id, "ACH-1");
        assert_eq!(visible[0].style.color, PointColor::Dependency);
    }

    #[test]
    fn selected_category_requires_search_match() {
        let points = lung_liver();
        let mut view = ViewState::default();
        view.toggle_category(Category::SelectedNeutral);
        assert!(visible_points(&points, &view).is_empty());

        view.set_search("hela", SearchField::CellLineName);
        let visible = visible_points(&points, &view);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].style.color, PointColor::HighlightedNeutral);
    }

    #[test]
    fn context_mode_fades_instead_of_removing() {
        let points = lung_liver();
        let mut view = ViewState::default();
        view.toggle_category(Category::Dependency);
        view.toggle_context();

        let visible = visible_points(&points, &view);

        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].style.color, PointColor::Dependency);
        assert_eq!(visible[1].style.color, PointColor::Faded);
        assert_eq!(visible[1].style.border_width, 0);
    }

    #[test]
    fn highlight_overrides_fade() {
        let points = lung_liver();
        let style = point_style(&points[1], true, true, false);
        assert_eq!(style.color, PointColor::HighlightedNeutral);

        let style = point_style(&points[0], true, false, false);
        assert_eq!(style.color, PointColor::HighlightedDependency);
    }

    #[test]
    fn radius_prefers_pin_over_highlight() {
        let points = lung_liver();
        let mut view = ViewState::default();
        view.set_search("549", SearchField::CellLineName);
        view.set_pinned_point(Some(points[0].clone()));

        let visible = visible_points(&points, &view);

        assert_eq!(visible[0].style.radius, PINNED_RADIUS);
        assert_eq!(visible[1].style.radius, DEFAULT_RADIUS);
        assert!(!visible[1].highlighted);

        view.set_search("hela", SearchField::CellLineName);
        let visible = visible_points(&points, &view);
        assert_eq!(visible[1].style.radius, HIGHLIGHTED_RADIUS);
    }

    #[test]
    fn threshold_point_is_dependency_colored() {
        let boundary = point("Lung", 0, -1.0, "X", "ACH-9");
        assert_eq!(
            point_style(&boundary, false, false, false).color,
            PointColor::Dependency
        );
    }

    #[test]
    fn summary_counts_in_axis_order() {
        let mut points = lung_liver();
        points.push(point("Lung", 0, 0.1, "H1299", "ACH-3"));
        let tissues = vec!["Lung".to_string(), "Liver".to_string(), "Skin".to_string()];

        let visible = visible_points(&points, &ViewState::default());
        let summary = summarize(&tissues, &visible);

        assert_eq!(
            summary,
            vec![
                TissueSummary {
                    tissue: "Lung".to_string(),
                    total: 2,
                    dependency: 1,
                    neutral: 1,
                },
                TissueSummary {
                    tissue: "Liver".to_string(),
                    total: 1,
                    dependency: 0,
                    neutral: 1,
                },
            ]
        );
    }

    #[test]
    fn empty_dataset_yields_empty_output() {
        assert!(visible_points(&[], &ViewState::default()).is_empty());
        assert!(summarize(&[], &[]).is_empty());
    }
}
