//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use tradeguard_core::config::Settings;
use tradeguard_core::engine::EvaluationResult;
use tradeguard_core::form::{Field, TradeForm};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Calculator,
    Rules,
    Analyzer,
    Help,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Calculator, Panel::Rules, Panel::Analyzer, Panel::Help];

    pub fn index(self) -> usize {
        match self {
            Panel::Calculator => 0,
            Panel::Rules => 1,
            Panel::Analyzer => 2,
            Panel::Help => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Calculator => "Calculator",
            Panel::Rules => "Rules",
            Panel::Analyzer => "Analyzer",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::ALL[(self.index() + 1) % Panel::ALL.len()]
    }

    pub fn prev(self) -> Panel {
        Panel::ALL[(self.index() + Panel::ALL.len() - 1) % Panel::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Text field focused in the analyzer panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalyzerField {
    #[default]
    ImagePath,
    ApiKey,
}

impl AnalyzerField {
    pub fn toggle(self) -> AnalyzerField {
        match self {
            AnalyzerField::ImagePath => AnalyzerField::ApiKey,
            AnalyzerField::ApiKey => AnalyzerField::ImagePath,
        }
    }
}

/// Analyzer panel state.
#[derive(Debug, Default)]
pub struct AnalyzerPanelState {
    pub image_path: String,
    pub api_key: String,
    pub focus: AnalyzerField,
    pub in_progress: bool,
    pub result: Option<String>,
    pub error: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
}

impl AnalyzerPanelState {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn focused_text_mut(&mut self) -> &mut String {
        match self.focus {
            AnalyzerField::ImagePath => &mut self.image_path,
            AnalyzerField::ApiKey => &mut self.api_key,
        }
    }

    /// The key as shown on screen.
    pub fn masked_key(&self) -> String {
        "*".repeat(self.api_key.chars().count())
    }
}

/// Top-level application state.
pub struct AppState {
    pub active_panel: Panel,
    pub running: bool,

    pub form: TradeForm,
    pub focus: Field,

    pub analyzer: AnalyzerPanelState,
    pub settings: Settings,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let api_key = settings.analyzer.api_key_from_env();
        Self {
            active_panel: Panel::Calculator,
            running: true,
            form: TradeForm::new(),
            focus: Field::Entry,
            analyzer: AnalyzerPanelState::new(api_key),
            settings,
            worker_tx,
            worker_rx,
            status_message: None,
        }
    }

    /// Current evaluation of the form, recomputed on every call.
    pub fn evaluation(&self) -> Option<EvaluationResult> {
        self.form.evaluate()
    }

    pub fn precision(&self) -> usize {
        self.settings.display.precision
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    /// Validate the analyzer fields and hand the job to the worker.
    pub fn start_analysis(&mut self) {
        if self.analyzer.in_progress {
            self.set_warning("Analysis already running");
            return;
        }
        let path = self.analyzer.image_path.trim().to_string();
        if path.is_empty() {
            self.set_warning("Enter an image path first");
            return;
        }
        let api_key = self.analyzer.api_key.trim().to_string();
        if api_key.is_empty() {
            self.set_error(format!(
                "An API key is required (type one or set {})",
                self.settings.analyzer.api_key_env
            ));
            return;
        }

        let cmd = WorkerCommand::Analyze {
            image_path: PathBuf::from(&path),
            api_key,
            settings: self.settings.analyzer.clone(),
        };
        if self.worker_tx.send(cmd).is_err() {
            self.set_error("Analyzer worker is not running");
            return;
        }

        tracing::info!(path = %path, "analysis requested");
        self.analyzer.in_progress = true;
        self.analyzer.result = None;
        self.analyzer.error = None;
        self.set_status("Analyzing image...");
    }

    pub fn apply_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::AnalysisDone { text } => {
                self.analyzer.in_progress = false;
                self.analyzer.result = Some(text);
                self.analyzer.error = None;
                self.analyzer.completed_at = Some(chrono::Local::now().naive_local());
                self.set_status("Analysis complete");
            }
            WorkerResponse::AnalysisFailed { error } => {
                self.analyzer.in_progress = false;
                self.set_error(format!("Analysis failed: {error}"));
                self.analyzer.error = Some(error);
            }
        }
    }
}
