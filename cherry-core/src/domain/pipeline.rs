//! Build pipeline domain types
//!
//! A `PipelineRun` only exists while a build is in flight; it is handed back to
//! the caller when the run ends and is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::spec::BuildSpecification;

/// Sequential steps of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    GeneratingSpec,
    Scaffolding,
    FixingCode,
    Building,
}

impl PipelineStage {
    pub const ORDER: [PipelineStage; 4] = [
        PipelineStage::GeneratingSpec,
        PipelineStage::Scaffolding,
        PipelineStage::FixingCode,
        PipelineStage::Building,
    ];
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::GeneratingSpec => write!(f, "GeneratingSpec"),
            PipelineStage::Scaffolding => write!(f, "Scaffolding"),
            PipelineStage::FixingCode => write!(f, "FixingCode"),
            PipelineStage::Building => write!(f, "Building"),
        }
    }
}

/// Orchestrator state machine
///
/// `Idle -> GeneratingSpec -> Scaffolding -> FixingCode -> Building -> Succeeded`,
/// with any stage able to jump to `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum PipelineState {
    Idle,
    GeneratingSpec,
    Scaffolding,
    FixingCode,
    Building,
    Succeeded,
    Failed { stage: PipelineStage, cause: String },
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed { .. })
    }

    /// Stage currently executing, if any
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            PipelineState::GeneratingSpec => Some(PipelineStage::GeneratingSpec),
            PipelineState::Scaffolding => Some(PipelineStage::Scaffolding),
            PipelineState::FixingCode => Some(PipelineStage::FixingCode),
            PipelineState::Building => Some(PipelineStage::Building),
            _ => None,
        }
    }

    fn next(&self) -> PipelineState {
        match self {
            PipelineState::Idle => PipelineState::GeneratingSpec,
            PipelineState::GeneratingSpec => PipelineState::Scaffolding,
            PipelineState::Scaffolding => PipelineState::FixingCode,
            PipelineState::FixingCode => PipelineState::Building,
            PipelineState::Building => PipelineState::Succeeded,
            terminal => terminal.clone(),
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "Idle"),
            PipelineState::Succeeded => write!(f, "Succeeded"),
            PipelineState::Failed { stage, .. } => write!(f, "Failed({})", stage),
            running => match running.stage() {
                Some(stage) => write!(f, "{}", stage),
                None => write!(f, "{:?}", running),
            },
        }
    }
}

/// Output captured while a stage ran
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageLog {
    pub stage: PipelineStage,
    pub timestamp: DateTime<Utc>,
    pub output: String,
}

/// One build invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: Uuid,
    pub cherry_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub state: PipelineState,
    /// Working specification, set once GeneratingSpec succeeds
    pub spec: Option<BuildSpecification>,
    pub logs: Vec<StageLog>,
}

impl PipelineRun {
    pub fn new(cherry_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            cherry_id: cherry_id.into(),
            started_at: Utc::now(),
            finished_at: None,
            state: PipelineState::Idle,
            spec: None,
            logs: Vec::new(),
        }
    }

    /// Moves to the next state in the fixed order
    ///
    /// Terminal states do not move.
    pub fn advance(&mut self) -> &PipelineState {
        self.state = self.state.next();
        if self.state.is_terminal() && self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
        &self.state
    }

    /// Fails the stage currently executing
    ///
    /// Ignored unless a stage is executing.
    pub fn fail(&mut self, cause: impl Into<String>) -> &PipelineState {
        if let Some(stage) = self.state.stage() {
            self.state = PipelineState::Failed {
                stage,
                cause: cause.into(),
            };
            self.finished_at = Some(Utc::now());
        }
        &self.state
    }

    /// Appends output to the log of the current stage
    pub fn record(&mut self, output: impl Into<String>) {
        let output = output.into();
        if let Some(stage) = self.state.stage() {
            if !output.trim().is_empty() {
                self.logs.push(StageLog {
                    stage,
                    timestamp: Utc::now(),
                    output,
                });
            }
        }
    }

    /// Concatenated log text of every stage
    pub fn log_text(&self) -> String {
        self.logs
            .iter()
            .map(|log| format!("[{}] {}", log.stage, log.output.trim_end()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn succeeded(&self) -> bool {
        self.state == PipelineState::Succeeded
    }
}

/// Notification broadcast on every pipeline state change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub run_id: Uuid,
    pub cherry_id: String,
    pub state: PipelineState,
    pub timestamp: DateTime<Utc>,
}

impl From<&PipelineRun> for PipelineEvent {
    fn from(run: &PipelineRun) -> Self {
        Self {
            run_id: run.id,
            cherry_id: run.cherry_id.clone(),
            state: run.state.clone(),
            timestamp: Utc::now(),
        }
    }
}
