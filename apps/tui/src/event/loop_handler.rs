use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

use crate::api::FetchResult;
use crate::app::{handle_input, App, AppActions, SessionStore};
use crate::cli::CliArgs;
use crate::data::{export_to_path, NormalizedDataset, TissueSummary};
use crate::ui;

// States of the most recent fetch
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum FetchState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Loaded => write!(f, "Loaded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Clone, Debug)]
enum FetchEvent {
    Start(String),
    Loaded { tissues: usize, points: usize },
    Failed(String),
}

impl fmt::Display for FetchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(gene_id) => write!(f, "Start({gene_id})"),
            Self::Loaded { tissues, points } => write!(f, "Loaded({tissues}, {points})"),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: FetchState,
    event: FetchEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct FetchMachine {
    state: FetchState,
}

impl FetchMachine {
    const fn new(initial_state: FetchState) -> Self {
        Self {
            state: initial_state,
        }
    }

    #[cfg(test)]
    const fn state(&self) -> FetchState {
        self.state
    }

    fn process_event(
        &mut self,
        event: &FetchEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        debug!(from = %self.state, to = %next_state.0, %event, "fetch state transition");
        self.state = next_state.0;
        Ok(())
    }
}

struct NextState(FetchState);

impl TryFrom<(FetchState, &FetchEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (FetchState, &FetchEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            // A new fetch may supersede one still in flight.
            (_, FetchEvent::Start(gene_id)) => {
                app.status_message = format!("Loading {gene_id}...");
                Ok(Self(FetchState::Loading))
            }
            (FetchState::Loading, FetchEvent::Loaded { tissues, points }) => {
                let gene_id = app.store.gene_id().unwrap_or_default();
                app.status_message =
                    format!("Loaded {points} screens across {tissues} tissues for {gene_id}");
                Ok(Self(FetchState::Loaded))
            }
            (FetchState::Loading, FetchEvent::Failed(error)) => {
                app.status_message = format!("Error: {error}");
                Ok(Self(FetchState::Failed))
            }
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

/// Outcome of a spawned fetch, tagged with the generation it was started under
#[derive(Debug)]
struct FetchMessage {
    generation: u64,
    outcome: FetchResult<NormalizedDataset>,
}

fn start_fetch(
    app: &mut App,
    machine: &mut FetchMachine,
    gene_id: String,
    tx: &UnboundedSender<FetchMessage>,
) {
    let generation = app.begin_fetch(&gene_id);
    if let Err(e) = machine.process_event(&FetchEvent::Start(gene_id.clone()), app) {
        debug!(error = %e, "fetch transition rejected");
    }

    let actions = app.actions.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = actions.fetch_dataset(&gene_id).await;
        if tx.send(FetchMessage { generation, outcome }).is_err() {
            debug!(generation, "event loop closed before fetch finished");
        }
    });
}

fn finish_fetch(app: &mut App, machine: &mut FetchMachine, message: FetchMessage) {
    let event = match &message.outcome {
        Ok(dataset) => FetchEvent::Loaded {
            tissues: dataset.tissues.len(),
            points: dataset.points.len(),
        },
        Err(e) => FetchEvent::Failed(e.to_string()),
    };

    if !app.apply_fetch_outcome(message.generation, message.outcome) {
        return;
    }

    if let Err(e) = machine.process_event(&event, app) {
        debug!(error = %e, "fetch transition rejected");
    }
}

/// Fetch one gene, apply the CLI filters, print a summary and optionally export.
pub async fn run_headless(actions: &AppActions, args: &CliArgs, gene_id: &str) -> Result<()> {
    let report = build_headless_report(actions, args, gene_id).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_headless_summary(&report));
    }

    Ok(())
}

async fn build_headless_report(
    actions: &AppActions,
    args: &CliArgs,
    gene_id: &str,
) -> Result<HeadlessReport> {
    let mut store = SessionStore::new();
    let generation = store.begin_fetch(gene_id);
    let outcome = actions.fetch_dataset(gene_id).await;
    store.commit_fetch(generation, outcome);

    if let Some(error) = store.error() {
        return Err(eyre!("{error}"));
    }

    apply_cli_filters(&mut store, args);

    let visible = store.visible();
    let exported = match &args.export {
        Some(path) => {
            let path = Path::new(path);
            let rows = export_to_path(path, visible.iter().map(|visible| visible.point))?;
            info!(path = %path.display(), rows, "exported visible points");
            Some(HeadlessExport {
                path: path.to_path_buf(),
                rows,
            })
        }
        None => None,
    };

    Ok(HeadlessReport {
        gene_id: store.gene_id().unwrap_or_default().to_string(),
        tissues: store.tissues().len(),
        total_points: store.points().len(),
        visible_points: visible.len(),
        highlighted: visible.iter().filter(|visible| visible.highlighted).count(),
        summary: store.summary(),
        exported,
    })
}

fn apply_cli_filters(store: &mut SessionStore, args: &CliArgs) {
    for tissue in &args.tissues {
        if !store.view().is_tissue_selected(tissue) {
            store.set_tissue_filter(tissue);
        }
    }

    if let Some(term) = &args.search {
        store.set_search(term, args.field);
    }

    for category in &args.categories {
        if !store.view().is_category_selected(*category) {
            store.toggle_category(*category);
        }
    }
}

fn format_headless_summary(report: &HeadlessReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nGene Essentiality: {}\n", report.gene_id));
    out.push_str("=========================\n");
    out.push_str(&format!("Tissues: {}\n", report.tissues));
    out.push_str(&format!(
        "Visible screens: {} of {}\n",
        report.visible_points, report.total_points
    ));
    if report.highlighted > 0 {
        out.push_str(&format!("Highlighted: {}\n", report.highlighted));
    }

    out.push_str("\nBy Tissue (total / dependency / neutral):\n");
    for summary in &report.summary {
        out.push_str(&format!(
            "- {}: {} / {} / {}\n",
            summary.tissue, summary.total, summary.dependency, summary.neutral
        ));
    }

    if let Some(export) = &report.exported {
        out.push_str(&format!(
            "\nExported {} rows to {}\n",
            export.rows,
            export.path.display()
        ));
    }

    out
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HeadlessReport {
    gene_id: String,
    tissues: usize,
    total_points: usize,
    visible_points: usize,
    highlighted: usize,
    summary: Vec<TissueSummary>,
    exported: Option<HeadlessExport>,
}

#[derive(Debug, Serialize)]
struct HeadlessExport {
    path: PathBuf,
    rows: usize,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let (tx, mut rx) = mpsc::unbounded_channel::<FetchMessage>();
    let mut fetch_machine = FetchMachine::new(FetchState::Idle);

    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                // Resizes are picked up by the next draw.
                Ok(_) | Err(_) => {}
            }
        }

        if let Some(gene_id) = app.pending_fetch.take() {
            start_fetch(app, &mut fetch_machine, gene_id, &tx);
        }

        while let Ok(message) = rx.try_recv() {
            finish_fetch(app, &mut fetch_machine, message);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::test_support::{StaticTransport, TWO_TISSUES};
    use crate::api::{EssentialityClient, FetchError};
    use clap::Parser;

    fn actions(json: &str) -> Result<AppActions, Box<dyn std::error::Error>> {
        let client = EssentialityClient::new(StaticTransport::from_json(json)?);
        Ok(AppActions::new(client, PathBuf::from(".")))
    }

    fn args(extra: &[&str]) -> Result<CliArgs, clap::Error> {
        let mut argv = vec!["essentiality-map", "--headless"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv)
    }

    fn sample_dataset() -> NormalizedDataset {
        NormalizedDataset {
            tissues: vec!["Lung".to_string()],
            points: Vec::new(),
        }
    }

    #[tokio::test]
    async fn headless_report_applies_filters() -> Result<(), Box<dyn std::error::Error>> {
        let actions = actions(TWO_TISSUES)?;
        let args = args(&["--tissue", "Liver", "--tissue", "Liver"])?;

        let report = build_headless_report(&actions, &args, "ENSG00000139618").await?;

        assert_eq!(report.tissues, 2);
        assert_eq!(report.total_points, 2);
        assert_eq!(report.visible_points, 1);
        assert_eq!(report.summary.len(), 1);
        assert_eq!(report.summary[0].tissue, "Liver");
        Ok(())
    }

    #[tokio::test]
    async fn headless_report_counts_highlights() -> Result<(), Box<dyn std::error::Error>> {
        let actions = actions(TWO_TISSUES)?;
        let args = args(&["--search", "a549", "--category", "selected-dependency"])?;

        let report = build_headless_report(&actions, &args, "ENSG00000139618").await?;

        assert_eq!(report.visible_points, 1);
        assert_eq!(report.highlighted, 1);
        let text = format_headless_summary(&report);
        assert!(text.contains("- Lung: 1 / 1 / 0"));
        assert!(text.contains("Highlighted: 1"));
        Ok(())
    }

    #[tokio::test]
    async fn headless_export_writes_csv() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        let path_arg = path.to_string_lossy().to_string();
        let actions = actions(TWO_TISSUES)?;
        let args = args(&["--export", &path_arg])?;

        let report = build_headless_report(&actions, &args, "ENSG00000139618").await?;

        assert_eq!(report.exported.as_ref().map(|e| e.rows), Some(2));
        let csv = std::fs::read_to_string(&path)?;
        assert_eq!(csv.lines().count(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn headless_surfaces_upstream_error() -> Result<(), Box<dyn std::error::Error>> {
        let actions = actions(r#"{"data": {"target": null}}"#)?;
        let args = args(&[])?;

        let result = build_headless_report(&actions, &args, "ENSG00000139618").await;

        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert_eq!(message, "No essentiality data found for this gene");
        Ok(())
    }

    #[test]
    fn machine_tracks_fetch_lifecycle() {
        let client = EssentialityClient::new(StaticTransport::responding(Ok(Default::default())));
        let mut app = App::new(AppActions::new(client, PathBuf::from(".")), "");
        let mut machine = FetchMachine::new(FetchState::Idle);

        assert!(machine
            .process_event(&FetchEvent::Failed("boom".to_string()), &mut app)
            .is_err());

        let generation = app.begin_fetch("ENSG1");
        assert!(machine
            .process_event(&FetchEvent::Start("ENSG1".to_string()), &mut app)
            .is_ok());
        assert_eq!(app.status_message, "Loading ENSG1...");

        finish_fetch(
            &mut app,
            &mut machine,
            FetchMessage {
                generation,
                outcome: Err(FetchError::Upstream("boom".to_string())),
            },
        );
        assert_eq!(machine.state(), FetchState::Failed);
        assert_eq!(app.status_message, "Error: boom");
    }

    #[test]
    fn stale_message_leaves_machine_loading() {
        let client = EssentialityClient::new(StaticTransport::responding(Ok(Default::default())));
        let mut app = App::new(AppActions::new(client, PathBuf::from(".")), "");
        let mut machine = FetchMachine::new(FetchState::Idle);

        let old = app.begin_fetch("ENSG_OLD");
        machine
            .process_event(&FetchEvent::Start("ENSG_OLD".to_string()), &mut app)
            .ok();
        let new = app.begin_fetch("ENSG_NEW");
        machine
            .process_event(&FetchEvent::Start("ENSG_NEW".to_string()), &mut app)
            .ok();

        finish_fetch(
            &mut app,
            &mut machine,
            FetchMessage {
                generation: old,
                outcome: Ok(sample_dataset()),
            },
        );
        assert_eq!(machine.state(), FetchState::Loading);
        assert!(app.store.dataset().is_none());

        finish_fetch(
            &mut app,
            &mut machine,
            FetchMessage {
                generation: new,
                outcome: Ok(sample_dataset()),
            },
        );
        assert_eq!(machine.state(), FetchState::Loaded);
        assert_eq!(
            app.status_message,
            "Loaded 0 screens across 1 tissues for ENSG_NEW"
        );
    }
}
