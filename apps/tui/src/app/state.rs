use std::sync::Mutex;
use std::time::{Duration, Instant};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::style::Color;
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;
use tracing::error;

use crate::api::{FetchResult, MISSING_GENE_ID};
use crate::app::actions::AppActions;
use crate::app::store::SessionStore;
use crate::data::{DataPoint, NormalizedDataset};
use crate::domain::Category;

pub const MIN_SIDE_PANEL_PERCENT: u16 = 20;
pub const MAX_SIDE_PANEL_PERCENT: u16 = 60;
const DEFAULT_SIDE_PANEL_PERCENT: u16 = 35;
const SIDE_PANEL_STEP: u16 = 5;
const LOAD_FADE_MS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Main,
    Tissues,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Browsing,
    EditingGene,
    EditingSearch,
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub input_state: InputState,
    /// Gene id being typed
    pub current_input: String,
    pub status_message: String,
    pub show_help: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub throbber_state: ThrobberState,
    pub side_panel_percent: u16,
    /// Index into the visible points
    pub point_cursor: usize,
    pub tissue_menu_index: usize,
    pub tissue_query: String,
    pub table_index: usize,
    /// Gene id waiting to be fetched by the event loop
    pub pending_fetch: Option<String>,
    pub store: SessionStore,
    pub actions: AppActions,
    pub load_fx: Mutex<Option<Effect>>,
}

impl App {
    pub fn new(actions: AppActions, default_gene_id: &str) -> Self {
        let gene_id = default_gene_id.trim();
        Self {
            running: true,
            screen: AppScreen::Main,
            input_state: InputState::Browsing,
            current_input: gene_id.to_string(),
            status_message: String::new(),
            show_help: false,
            animation_counter: 0.0,
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
            throbber_state: ThrobberState::default(),
            side_panel_percent: DEFAULT_SIDE_PANEL_PERCENT,
            point_cursor: 0,
            tissue_menu_index: 0,
            tissue_query: String::new(),
            table_index: 0,
            pending_fetch: (!gene_id.is_empty()).then(|| gene_id.to_string()),
            store: SessionStore::new(),
            actions,
            load_fx: Mutex::new(None),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.last_tick = delta;

        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.store.is_loading() {
            self.throbber_state.calc_next();
        }

        if let Ok(mut effect) = self.load_fx.lock() {
            if effect.as_ref().is_some_and(Effect::done) {
                *effect = None;
            }
        }
    }

    /// Queue a fetch of the typed gene id. A blank id is rejected here so the
    /// loaded dataset and filters survive.
    pub fn submit_gene(&mut self) {
        let gene_id = self.current_input.trim().to_string();
        self.input_state = InputState::Browsing;
        if gene_id.is_empty() {
            self.status_message = format!("Error: {MISSING_GENE_ID}");
            return;
        }
        self.pending_fetch = Some(gene_id);
    }

    /// Record the generation handed out by the store and reset the cursors.
    pub fn begin_fetch(&mut self, gene_id: &str) -> u64 {
        let generation = self.store.begin_fetch(gene_id);
        self.reset_cursors();
        generation
    }

    /// Apply a fetch outcome. Returns `false` for a stale outcome.
    pub fn apply_fetch_outcome(
        &mut self,
        generation: u64,
        outcome: FetchResult<NormalizedDataset>,
    ) -> bool {
        if !self.store.commit_fetch(generation, outcome) {
            return false;
        }

        self.reset_cursors();
        if self.store.error().is_none() {
            self.start_load_effect();
        }
        true
    }

    fn reset_cursors(&mut self) {
        self.point_cursor = 0;
        self.table_index = 0;
        self.tissue_menu_index = 0;
        self.tissue_query.clear();
    }

    fn start_load_effect(&self) {
        if let Ok(mut effect) = self.load_fx.lock() {
            *effect = Some(fx::fade_from_fg(
                Color::Black,
                (LOAD_FADE_MS, Interpolation::QuadOut),
            ));
        }
    }

    pub fn visible_count(&self) -> usize {
        self.store.visible().len()
    }

    /// Keep cursors inside the visible list after a filter change.
    pub fn clamp_cursors(&mut self) {
        let count = self.visible_count();
        self.point_cursor = self.point_cursor.min(count.saturating_sub(1));
        self.table_index = self.table_index.min(count.saturating_sub(1));
    }

    pub fn cursor_point(&self) -> Option<DataPoint> {
        self.store
            .visible()
            .get(self.point_cursor)
            .map(|visible| visible.point.clone())
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let count = self.visible_count();
        if count == 0 {
            self.point_cursor = 0;
            return;
        }
        self.point_cursor = if forward {
            (self.point_cursor + 1) % count
        } else if self.point_cursor == 0 {
            count - 1
        } else {
            self.point_cursor - 1
        };
    }

    pub fn pin_point(&mut self, point: Option<DataPoint>) {
        if let Some(point) = &point {
            self.status_message = format!("Pinned {} ({})", point.cell_line, point.depmap_id);
        }
        self.store.set_pinned_point(point);
    }

    pub fn unpin(&mut self) {
        self.store.set_pinned_point(None);
        self.status_message = "Unpinned".to_string();
    }

    pub fn toggle_category(&mut self, category: Category) {
        self.store.toggle_category(category);
        self.clamp_cursors();
    }

    pub fn push_search_char(&mut self, c: char) {
        let field = self.store.view().search_field;
        let mut term = self.store.view().search_term.clone();
        term.push(c);
        self.store.set_search(&term, field);
        self.clamp_cursors();
    }

    pub fn pop_search_char(&mut self) {
        let field = self.store.view().search_field;
        let mut term = self.store.view().search_term.clone();
        term.pop();
        self.store.set_search(&term, field);
        self.clamp_cursors();
    }

    pub fn cycle_search_field(&mut self) {
        let view = self.store.view();
        let (term, field) = (view.search_term.clone(), view.search_field.next());
        self.store.set_search(&term, field);
        self.clamp_cursors();
    }

    /// Tissues for the menu: alphabetical, or by fuzzy score while a query is typed.
    pub fn menu_tissues(&self) -> Vec<String> {
        let tissues = self.store.sorted_tissues();
        if self.tissue_query.is_empty() {
            return tissues.into_iter().map(str::to_string).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &str)> = tissues
            .into_iter()
            .filter_map(|tissue| {
                matcher
                    .fuzzy_match(tissue, &self.tissue_query)
                    .map(|score| (score, tissue))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .map(|(_, tissue)| tissue.to_string())
            .collect()
    }

    pub fn toggle_menu_tissue(&mut self) {
        if let Some(tissue) = self.menu_tissues().get(self.tissue_menu_index) {
            self.store.set_tissue_filter(tissue);
            self.clamp_cursors();
        }
    }

    pub fn clear_tissues(&mut self) {
        self.store.clear_tissue_filters();
        self.clamp_cursors();
        self.status_message = "Tissue filters cleared".to_string();
    }

    pub fn toggle_context(&mut self) {
        self.store.toggle_context();
        self.clamp_cursors();
        self.status_message = if self.store.view().show_context {
            "Context mode: points outside the selected categories are faded".to_string()
        } else {
            "Context mode off".to_string()
        };
    }

    pub fn resize_side_panel(&mut self, grow: bool) {
        self.side_panel_percent = if grow {
            (self.side_panel_percent + SIDE_PANEL_STEP).min(MAX_SIDE_PANEL_PERCENT)
        } else {
            self.side_panel_percent
                .saturating_sub(SIDE_PANEL_STEP)
                .max(MIN_SIDE_PANEL_PERCENT)
        };
    }

    /// Export the visible points and report the outcome on the status line.
    pub fn export_visible(&mut self) {
        let Some(gene_id) = self.store.gene_id().map(str::to_string) else {
            self.status_message = "Error: No gene loaded".to_string();
            return;
        };

        let visible = self.store.visible();
        let outcome = self
            .actions
            .export_points(&gene_id, visible.iter().map(|visible| visible.point));

        self.status_message = match outcome {
            Ok((path, rows)) => {
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or("unknown");
                format!("Exported {rows} points to {file_name}")
            }
            Err(e) => {
                error!(error = %e, "export failed");
                format!("Error: Export failed: {e}")
            }
        };
    }
}
