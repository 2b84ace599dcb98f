//! Session store: the dataset for the current gene and the filters over it.
//!
//! Filters never touch the base dataset; every read recomputes the visible
//! subset from it.

use tracing::{debug, info, warn};

use crate::api::FetchResult;
use crate::data::{
    summarize, visible_points, DataPoint, NormalizedDataset, TissueSummary, ViewState,
    VisiblePoint,
};
use crate::domain::{Category, SearchField};

#[derive(Debug, Default)]
pub struct SessionStore {
    gene_id: Option<String>,
    dataset: Option<NormalizedDataset>,
    view: ViewState,
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gene_id(&self) -> Option<&str> {
        self.gene_id.as_deref()
    }

    pub const fn dataset(&self) -> Option<&NormalizedDataset> {
        self.dataset.as_ref()
    }

    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Tissue names in axis order.
    pub fn tissues(&self) -> &[String] {
        self.dataset
            .as_ref()
            .map_or(&[], |dataset| dataset.tissues.as_slice())
    }

    pub fn points(&self) -> &[DataPoint] {
        self.dataset
            .as_ref()
            .map_or(&[], |dataset| dataset.points.as_slice())
    }

    pub fn set_tissue_filter(&mut self, tissue: &str) {
        self.view.toggle_tissue(tissue);
        debug!(tissue, selected = self.view.selected_tissues.len(), "tissue filter toggled");
    }

    pub fn clear_tissue_filters(&mut self) {
        self.view.clear_tissues();
    }

    pub fn set_search(&mut self, term: &str, field: SearchField) {
        self.view.set_search(term, field);
    }

    pub fn toggle_category(&mut self, category: Category) {
        self.view.toggle_category(category);
        debug!(category = category.as_str(), "category filter toggled");
    }

    pub fn set_pinned_point(&mut self, point: Option<DataPoint>) {
        self.view.set_pinned_point(point);
    }

    pub fn toggle_context(&mut self) {
        self.view.toggle_context();
    }

    /// Drop the dataset and every filter, search, category and pin.
    pub fn reset_for_new_fetch(&mut self) {
        self.view.reset();
        self.dataset = None;
        self.error = None;
    }

    /// Start a fetch for `gene_id`; the returned generation tags its outcome.
    pub fn begin_fetch(&mut self, gene_id: &str) -> u64 {
        self.reset_for_new_fetch();
        self.generation += 1;
        self.gene_id = Some(gene_id.trim().to_string());
        self.loading = true;
        debug!(gene_id, generation = self.generation, "fetch started");
        self.generation
    }

    /// Apply a fetch outcome if it belongs to the latest fetch.
    /// Returns `false` and changes nothing when the outcome is stale.
    pub fn commit_fetch(
        &mut self,
        generation: u64,
        outcome: FetchResult<NormalizedDataset>,
    ) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "discarding stale fetch outcome"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(dataset) => {
                info!(
                    tissues = dataset.tissues.len(),
                    points = dataset.points.len(),
                    "dataset loaded"
                );
                self.dataset = Some(dataset);
                self.error = None;
            }
            Err(error) => {
                warn!(%error, "fetch failed");
                self.dataset = None;
                self.error = Some(error.to_string());
            }
        }
        true
    }

    pub fn visible(&self) -> Vec<VisiblePoint<'_>> {
        visible_points(self.points(), &self.view)
    }

    /// Tissue names sorted for menus; the axis keeps first-seen order.
    pub fn sorted_tissues(&self) -> Vec<&str> {
        let mut tissues: Vec<&str> = self.tissues().iter().map(String::as_str).collect();
        tissues.sort_unstable_by_key(|tissue| tissue.to_lowercase());
        tissues
    }

    pub fn summary(&self) -> Vec<TissueSummary> {
        summarize(self.tissues(), &self.visible())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;

    fn dataset() -> NormalizedDataset {
        let point = |tissue: &str, y, x, cell_line: &str, id: &str| DataPoint {
            x,
            y,
            tissue: tissue.to_string(),
            cell_line: cell_line.to_string(),
            depmap_id: id.to_string(),
            disease: String::new(),
            expression: None,
        };
        NormalizedDataset {
            tissues: vec!["Lung".to_string(), "Liver".to_string()],
            points: vec![
                point("Lung", 0, -2.0, "A549", "ACH-1"),
                point("Liver", 1, 0.5, "HELA-1", "ACH-2"),
            ],
        }
    }

    fn loaded_store() -> SessionStore {
        let mut store = SessionStore::new();
        let generation = store.begin_fetch("ENSG00000139618");
        assert!(store.commit_fetch(generation, Ok(dataset())));
        store
    }

    #[test]
    fn reset_clears_view_state_before_new_data() {
        let mut store = loaded_store();
        store.set_tissue_filter("Lung");
        store.toggle_category(Category::Neutral);
        store.set_search("a549", SearchField::CellLineName);
        store.set_pinned_point(store.points().first().cloned());

        store.begin_fetch("ENSG00000141510");

        assert!(store.view().selected_tissues.is_empty());
        assert!(store.view().selected_categories.is_empty());
        assert!(store.view().search_term.is_empty());
        assert!(store.view().pinned_point.is_none());
        assert!(store.dataset().is_none());
        assert!(store.is_loading());
        assert_eq!(store.gene_id(), Some("ENSG00000141510"));
    }

    #[test]
    fn liver_filter_scenario() {
        let mut store = loaded_store();
        store.set_tissue_filter("Liver");

        let visible = store.visible();

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].point.tissue, "Liver");
        assert_eq!(visible[0].point.x, 0.5);
    }

    #[test]
    fn filters_do_not_mutate_base_dataset() {
        let mut store = loaded_store();
        store.set_tissue_filter("Liver");
        store.toggle_category(Category::Dependency);
        assert!(store.visible().is_empty());
        assert_eq!(store.points().len(), 2);

        store.clear_tissue_filters();
        store.toggle_category(Category::Dependency);
        assert_eq!(store.visible().len(), 2);
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut store = SessionStore::new();
        let first = store.begin_fetch("ENSG_OLD");
        let second = store.begin_fetch("ENSG_NEW");

        assert!(!store.commit_fetch(first, Ok(dataset())));
        assert!(store.dataset().is_none());
        assert!(store.is_loading());

        assert!(store.commit_fetch(second, Err(FetchError::Upstream("boom".to_string()))));
        assert!(!store.is_loading());
        assert_eq!(store.error(), Some("boom"));
        assert!(store.dataset().is_none());
    }

    #[test]
    fn failed_refetch_leaves_store_empty() {
        let mut store = loaded_store();
        let generation = store.begin_fetch("ENSG_MISSING");
        store.commit_fetch(
            generation,
            Err(FetchError::Upstream("No essentiality data found for this gene".to_string())),
        );

        assert!(store.points().is_empty());
        assert!(store.visible().is_empty());
        assert_eq!(store.error(), Some("No essentiality data found for this gene"));
    }

    #[test]
    fn sorted_tissues_do_not_change_axis_order() {
        let store = loaded_store();
        assert_eq!(store.sorted_tissues(), vec!["Liver", "Lung"]);
        assert_eq!(store.tissues(), ["Lung".to_string(), "Liver".to_string()]);
    }

    #[test]
    fn summary_tracks_filters() {
        let mut store = loaded_store();
        assert_eq!(store.summary().len(), 2);
        store.set_tissue_filter("Lung");
        let summary = store.summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].dependency, 1);
    }
}
