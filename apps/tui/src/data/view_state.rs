use std::collections::BTreeSet;

use crate::data::normalize::DataPoint;
use crate::domain::{Category, SearchField};

/// User-selected filters for the current dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Newest selection first
    pub selected_tissues: Vec<String>,
    pub search_term: String,
    pub search_field: SearchField,
    pub selected_categories: BTreeSet<Category>,
    pub pinned_point: Option<DataPoint>,
    /// Fade points outside the selected categories instead of hiding them
    pub show_context: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tissue` at the front, or remove it if already selected.
    pub fn toggle_tissue(&mut self, tissue: &str) {
        if let Some(index) = self.selected_tissues.iter().position(|t| t == tissue) {
            self.selected_tissues.remove(index);
        } else {
            self.selected_tissues.insert(0, tissue.to_string());
        }
    }

    pub fn is_tissue_selected(&self, tissue: &str) -> bool {
        self.selected_tissues.iter().any(|t| t == tissue)
    }

    pub fn clear_tissues(&mut self) {
        self.selected_tissues.clear();
    }

    pub fn set_search(&mut self, term: &str, field: SearchField) {
        term.clone_into(&mut self.search_term);
        self.search_field = field;
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.selected_categories.remove(&category) {
            self.selected_categories.insert(category);
        }
    }

    pub fn is_category_selected(&self, category: Category) -> bool {
        self.selected_categories.contains(&category)
    }

    pub fn set_pinned_point(&mut self, point: Option<DataPoint>) {
        self.pinned_point = point;
    }

    pub fn is_pinned(&self, point: &DataPoint) -> bool {
        self.pinned_point
            .as_ref()
            .is_some_and(|pinned| pinned.same_cell_line(point))
    }

    pub fn toggle_context(&mut self) {
        self.show_context = !self.show_context;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
