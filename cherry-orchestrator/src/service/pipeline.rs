//! Build Pipeline Orchestrator
//!
//! Drives one cherry through spec generation, scaffolding, code fixing and
//! building. Stages run strictly in order; the first failure ends the run and
//! nothing is rolled back. Every state change is broadcast to subscribers.

use cherry_client::{ClientError, SpecGenerator};
use cherry_core::domain::cherry::{Cherry, RunState};
use cherry_core::domain::pipeline::{PipelineEvent, PipelineRun, PipelineStage};
use cherry_core::domain::spec::{BuildSpecification, FeatureFlags, FeatureKind};
use cherry_core::dto::spec::GenerateSpecRequest;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::repository::CherryRegistry;
use crate::service::fixer::{CodeFixer, NoopFixer};
use crate::service::lifecycle::LifecycleTracker;
use crate::tool::{InvokerError, ProjectTool};

/// Buffered notifications per subscriber before the oldest are dropped
const EVENT_CAPACITY: usize = 64;

/// Underlying cause of a failed stage
#[derive(Debug, Error)]
pub enum StageError {
    #[error("spec generation failed: {0}")]
    Generate(#[from] ClientError),

    #[error(transparent)]
    Tool(#[from] InvokerError),

    #[error("code fix failed: {0}")]
    Fix(String),
}

impl StageError {
    /// Captured external-process output, if the stage ran the tool
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            StageError::Tool(e) => e.output(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cherry not found: {0}")]
    CherryNotFound(String),

    #[error("a build is already in progress for cherry {0}")]
    BuildInProgress(String),

    /// A pipeline stage failed; `run` holds the state and logs up to the failure
    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: PipelineStage,
        #[source]
        source: StageError,
        run: Box<PipelineRun>,
    },

    #[error("scaffolding failed: {0}")]
    Scaffold(#[source] InvokerError),

    #[error("spec generation failed: {0}")]
    Generate(#[source] ClientError),
}

impl PipelineError {
    /// Stage that failed, for pipeline runs
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            PipelineError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn run(&self) -> Option<&PipelineRun> {
        match self {
            PipelineError::StageFailed { run, .. } => Some(&**run),
            _ => None,
        }
    }
}

/// Outcome of scaffolding a project with optional features
#[derive(Debug)]
pub struct ProjectReport {
    pub project_dir: PathBuf,
    /// Output of the scaffold call
    pub output: String,
    pub features_added: Vec<FeatureKind>,
    /// Features the tool rejected; these never abort the creation
    pub feature_failures: Vec<(FeatureKind, InvokerError)>,
}

impl ProjectReport {
    pub fn is_complete(&self) -> bool {
        self.feature_failures.is_empty()
    }
}

/// Releases a cherry's in-flight claim when dropped
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
    cherry_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.cherry_id);
    }
}

/// Runs builds and project creation against the registry
#[derive(Clone)]
pub struct BuildOrchestrator {
    registry: CherryRegistry,
    lifecycle: LifecycleTracker,
    generator: Arc<dyn SpecGenerator>,
    tool: Arc<dyn ProjectTool>,
    fixer: Arc<dyn CodeFixer>,
    in_flight: Arc<Mutex<HashSet<String>>>,
    events: broadcast::Sender<PipelineEvent>,
}

impl BuildOrchestrator {
    /// Creates an orchestrator with the no-op code fixer
    pub fn new(
        registry: CherryRegistry,
        generator: Arc<dyn SpecGenerator>,
        tool: Arc<dyn ProjectTool>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            lifecycle: LifecycleTracker::new(registry.clone()),
            registry,
            generator,
            tool,
            fixer: Arc::new(NoopFixer),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            events,
        }
    }

    /// Replaces the code fixer used by the FixingCode stage
    pub fn with_fixer(mut self, fixer: Arc<dyn CodeFixer>) -> Self {
        self.fixer = fixer;
        self
    }

    pub fn registry(&self) -> &CherryRegistry {
        &self.registry
    }

    pub fn lifecycle(&self) -> &LifecycleTracker {
        &self.lifecycle
    }

    /// Receives every pipeline state change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.events.subscribe()
    }

    /// Flips a cherry between running and stopped
    pub fn toggle_run(&self, cherry_id: &str) -> Option<RunState> {
        self.lifecycle.toggle_run(cherry_id)
    }

    fn claim(&self, cherry_id: &str) -> Result<InFlightGuard, PipelineError> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(cherry_id.to_string()) {
            warn!("Rejecting build for cherry {}: already in progress", cherry_id);
            return Err(PipelineError::BuildInProgress(cherry_id.to_string()));
        }

        Ok(InFlightGuard {
            in_flight: self.in_flight.clone(),
            cherry_id: cherry_id.to_string(),
        })
    }

    fn find(&self, cherry_id: &str) -> Result<Cherry, PipelineError> {
        self.registry
            .get(cherry_id)
            .ok_or_else(|| PipelineError::CherryNotFound(cherry_id.to_string()))
    }

    fn advance(&self, run: &mut PipelineRun) {
        run.advance();
        info!("Pipeline {} for cherry {}: {}", run.id, run.cherry_id, run.state);
        self.emit(run);
    }

    fn emit(&self, run: &PipelineRun) {
        // No subscribers is fine
        if self.events.send(PipelineEvent::from(run)).is_err() {
            debug!("No subscribers for pipeline {}", run.id);
        }
    }

    /// Ends `run` in the failed state and wraps the cause with its stage
    fn fail(&self, mut run: PipelineRun, stage: PipelineStage, source: StageError) -> PipelineError {
        if let Some(output) = source.tool_output() {
            run.record(output.to_string());
        }
        run.fail(source.to_string());

        error!(
            "Pipeline {} for cherry {} failed at {}: {}",
            run.id, run.cherry_id, stage, source
        );
        self.emit(&run);

        PipelineError::StageFailed {
            stage,
            source,
            run: Box::new(run),
        }
    }

    /// Runs the full build pipeline for a cherry
    ///
    /// On success the cherry is marked compiled and its project path is
    /// recorded. On failure the registry is left untouched and the error
    /// carries the failing stage, the cause and the run so far.
    pub async fn start_build(&self, cherry_id: &str) -> Result<PipelineRun, PipelineError> {
        let cherry = self.find(cherry_id)?;
        let _guard = self.claim(cherry_id)?;

        let mut run = PipelineRun::new(cherry_id);
        info!("Starting build {} for cherry {} ({})", run.id, cherry.id, cherry.name);

        // GeneratingSpec
        self.advance(&mut run);
        let req = GenerateSpecRequest::new(
            cherry.description.clone(),
            cherry.category.clone(),
            cherry.stack.clone(),
            FeatureFlags::pipeline_defaults(),
        );
        let spec = match self.generator.generate_enhanced(req).await {
            Ok(spec) => spec,
            Err(e) => return Err(self.fail(run, PipelineStage::GeneratingSpec, e.into())),
        };
        run.record(format!(
            "Generated specification '{}' for stack {} with features [{}]",
            spec.name,
            spec.stack,
            spec.features.join(", ")
        ));
        run.spec = Some(spec.clone());

        // Scaffolding
        self.advance(&mut run);
        match self.tool.create(&spec).await {
            Ok(output) => run.record(output),
            Err(e) => return Err(self.fail(run, PipelineStage::Scaffolding, e.into())),
        }
        let project_dir = self.tool.project_dir(&spec.name);

        // FixingCode
        self.advance(&mut run);
        match self.fixer.fix(&project_dir, &spec).await {
            Ok(output) => run.record(output),
            Err(cause) => {
                return Err(self.fail(run, PipelineStage::FixingCode, StageError::Fix(cause)));
            }
        }

        // Building
        self.advance(&mut run);
        match self.tool.build(&spec.name).await {
            Ok(output) => run.record(output),
            Err(e) => return Err(self.fail(run, PipelineStage::Building, e.into())),
        }

        self.lifecycle.mark_compiled(cherry_id);
        self.registry.set_path(cherry_id, project_dir);
        self.advance(&mut run);

        Ok(run)
    }

    /// Scaffolds a cherry's project and adds the requested features
    ///
    /// Scaffold failure is returned as an error. Feature failures are logged
    /// and listed in the report.
    pub async fn create_project(
        &self,
        cherry_id: &str,
        flags: FeatureFlags,
    ) -> Result<ProjectReport, PipelineError> {
        let cherry = self.find(cherry_id)?;
        let _guard = self.claim(cherry_id)?;

        let features = flags.requested();
        let spec = BuildSpecification {
            name: cherry.name.clone(),
            description: cherry.description.clone(),
            features: features.iter().map(|f| f.as_str().to_string()).collect(),
            stack: cherry.stack.clone(),
        };

        info!("Creating project for cherry {} ({})", cherry.id, cherry.name);
        let output = self.tool.create(&spec).await.map_err(PipelineError::Scaffold)?;

        let mut features_added = Vec::new();
        let mut feature_failures = Vec::new();
        for feature in features {
            match self
                .tool
                .add_feature(&cherry.name, feature.as_str(), feature.default_provider())
                .await
            {
                Ok(_) => features_added.push(feature),
                Err(e) => {
                    warn!("Failed to add {} to {}: {}", feature, cherry.name, e);
                    feature_failures.push((feature, e));
                }
            }
        }

        let project_dir = self.tool.project_dir(&cherry.name);
        self.registry.set_path(cherry_id, project_dir.clone());

        Ok(ProjectReport {
            project_dir,
            output,
            features_added,
            feature_failures,
        })
    }

    /// Asks the Spec Generator for a specification and adds it as a new cherry
    ///
    /// The cherry keeps the requested category; name, description and stack
    /// come from the generated specification.
    pub async fn generate_cherry(
        &self,
        req: GenerateSpecRequest,
        enhanced: bool,
    ) -> Result<(Cherry, BuildSpecification), PipelineError> {
        let category = req.category.clone();
        let result = if enhanced {
            self.generator.generate_enhanced(req).await
        } else {
            self.generator.generate(req).await
        };
        let spec = result.map_err(PipelineError::Generate)?;

        let cherry = self.registry.add(
            spec.name.clone(),
            spec.description.clone(),
            category,
            spec.stack.clone(),
        );
        info!("Generated cherry {} ({}) on {}", cherry.id, cherry.name, cherry.stack);

        Ok((cherry, spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cherry_core::domain::pipeline::PipelineState;
    use chrono::Utc;
    use std::path::Path;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeGenerator {
        requests: Mutex<Vec<GenerateSpecRequest>>,
        fail_status: Option<u16>,
    }

    impl FakeGenerator {
        fn failing(status: u16) -> Self {
            Self {
                fail_status: Some(status),
                ..Default::default()
            }
        }

        fn requests(&self) -> Vec<GenerateSpecRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpecGenerator for FakeGenerator {
        async fn generate(&self, req: GenerateSpecRequest) -> cherry_client::Result<BuildSpecification> {
            self.requests.lock().unwrap().push(req.clone());
            if let Some(status) = self.fail_status {
                return Err(ClientError::protocol(status, "internal error"));
            }
            Ok(BuildSpecification {
                name: "Task Cherry".to_string(),
                description: req.description,
                features: vec!["tasks".to_string(), "offline".to_string()],
                stack: req.stack,
            })
        }
    }

    #[derive(Default)]
    struct FakeTool {
        creates: Mutex<Vec<String>>,
        features: Mutex<Vec<(String, String, String)>>,
        builds: Mutex<Vec<String>>,
        fail_create: bool,
        fail_build: bool,
        rejected_feature: Option<&'static str>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeTool {
        fn build_calls(&self) -> usize {
            self.builds.lock().unwrap().len()
        }

        fn create_calls(&self) -> usize {
            self.creates.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProjectTool for FakeTool {
        async fn create(&self, spec: &BuildSpecification) -> Result<String, InvokerError> {
            self.creates.lock().unwrap().push(spec.name.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail_create {
                return Err(InvokerError::ExternalTool {
                    exit_code: 1,
                    output: "Project already exists".to_string(),
                });
            }
            Ok(format!("Created {}", spec.name))
        }

        async fn add_feature(
            &self,
            project: &str,
            feature: &str,
            provider: &str,
        ) -> Result<String, InvokerError> {
            self.features.lock().unwrap().push((
                project.to_string(),
                feature.to_string(),
                provider.to_string(),
            ));
            if self.rejected_feature == Some(feature) {
                return Err(InvokerError::ExternalTool {
                    exit_code: 2,
                    output: format!("unknown provider {}", provider),
                });
            }
            Ok(format!("Added {}", feature))
        }

        async fn build(&self, project: &str) -> Result<String, InvokerError> {
            self.builds.lock().unwrap().push(project.to_string());
            if self.fail_build {
                return Err(InvokerError::ExternalTool {
                    exit_code: 2,
                    output: "main.go:12: undefined: router".to_string(),
                });
            }
            Ok("Built ./bin/app".to_string())
        }

        fn project_dir(&self, project: &str) -> PathBuf {
            PathBuf::from("/tool/projects/drafts").join(project.to_lowercase().replace(' ', "-"))
        }
    }

    struct RejectingFixer;

    #[async_trait]
    impl CodeFixer for RejectingFixer {
        async fn fix(&self, _dir: &Path, _spec: &BuildSpecification) -> Result<String, String> {
            Err("3 type errors remain".to_string())
        }
    }

    fn orchestrator(
        generator: Arc<FakeGenerator>,
        tool: Arc<FakeTool>,
    ) -> BuildOrchestrator {
        BuildOrchestrator::new(CherryRegistry::seeded(), generator, tool)
    }

    fn drain(rx: &mut broadcast::Receiver<PipelineEvent>) -> Vec<PipelineState> {
        let mut states = Vec::new();
        while let Ok(event) = rx.try_recv() {
            states.push(event.state);
        }
        states
    }

    #[tokio::test]
    async fn test_successful_build_marks_compiled() {
        let generator = Arc::new(FakeGenerator::default());
        let tool = Arc::new(FakeTool::default());
        let orch = orchestrator(generator.clone(), tool.clone());
        let started = Utc::now();

        let run = orch.start_build("1").await.unwrap();

        assert!(run.succeeded());
        assert!(run.finished_at.is_some());
        assert_eq!(run.spec.as_ref().unwrap().name, "Task Cherry");
        assert_eq!(tool.build_calls(), 1);

        let cherry = orch.registry().get("1").unwrap();
        assert!(cherry.is_compiled);
        assert!(cherry.last_compiled.unwrap() >= started);
        assert_eq!(
            cherry.path,
            Some(PathBuf::from("/tool/projects/drafts/task-cherry"))
        );
        assert!(run.log_text().contains("Built ./bin/app"));
    }

    #[tokio::test]
    async fn test_build_uses_enhanced_request_with_pipeline_defaults() {
        let generator = Arc::new(FakeGenerator::default());
        let orch = orchestrator(generator.clone(), Arc::new(FakeTool::default()));

        orch.start_build("2").await.unwrap();

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.stack, "static");
        assert_eq!(req.category, "productivity");
        assert!(req.include_database);
        assert!(req.include_sync);
        assert!(!req.include_auth);
        assert!(req.is_enhanced());
        assert!(req.description.contains("Quick note-taking utility"));
    }

    #[tokio::test]
    async fn test_scaffold_failure_short_circuits() {
        let tool = Arc::new(FakeTool {
            fail_create: true,
            ..Default::default()
        });
        let orch = orchestrator(Arc::new(FakeGenerator::default()), tool.clone());
        let before = orch.registry().list();

        let err = orch.start_build("1").await.unwrap_err();

        assert_eq!(err.stage(), Some(PipelineStage::Scaffolding));
        assert_eq!(tool.build_calls(), 0);
        let run = err.run().unwrap();
        match &run.state {
            PipelineState::Failed { stage, cause } => {
                assert_eq!(*stage, PipelineStage::Scaffolding);
                assert!(cause.contains("Project already exists"));
            }
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(orch.registry().list(), before);
    }

    #[tokio::test]
    async fn test_protocol_error_never_reaches_tool() {
        let tool = Arc::new(FakeTool::default());
        let orch = orchestrator(Arc::new(FakeGenerator::failing(500)), tool.clone());

        let err = orch.start_build("1").await.unwrap_err();

        assert_eq!(err.stage(), Some(PipelineStage::GeneratingSpec));
        match &err {
            PipelineError::StageFailed {
                source: StageError::Generate(e),
                ..
            } => assert!(e.is_protocol()),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(tool.create_calls(), 0);
        assert_eq!(tool.build_calls(), 0);
        assert!(!orch.registry().get("1").unwrap().is_compiled);
    }

    #[tokio::test]
    async fn test_build_failure_preserves_tool_output() {
        let tool = Arc::new(FakeTool {
            fail_build: true,
            ..Default::default()
        });
        let orch = orchestrator(Arc::new(FakeGenerator::default()), tool);

        let err = orch.start_build("1").await.unwrap_err();

        assert_eq!(err.stage(), Some(PipelineStage::Building));
        assert!(err.to_string().contains("undefined: router"));
        assert!(err.run().unwrap().log_text().contains("undefined: router"));
        let cherry = orch.registry().get("1").unwrap();
        assert!(!cherry.is_compiled);
        assert!(cherry.path.is_none());
    }

    #[tokio::test]
    async fn test_fixer_failure_skips_build() {
        let tool = Arc::new(FakeTool::default());
        let orch = orchestrator(Arc::new(FakeGenerator::default()), tool.clone())
            .with_fixer(Arc::new(RejectingFixer));

        let err = orch.start_build("1").await.unwrap_err();

        assert_eq!(err.stage(), Some(PipelineStage::FixingCode));
        assert_eq!(tool.create_calls(), 1);
        assert_eq!(tool.build_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_cherry() {
        let generator = Arc::new(FakeGenerator::default());
        let orch = orchestrator(generator.clone(), Arc::new(FakeTool::default()));

        let err = orch.start_build("99").await.unwrap_err();

        assert!(matches!(err, PipelineError::CherryNotFound(id) if id == "99"));
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_events_follow_stage_order() {
        let orch = orchestrator(
            Arc::new(FakeGenerator::default()),
            Arc::new(FakeTool::default()),
        );
        let mut rx = orch.subscribe();

        orch.start_build("1").await.unwrap();

        assert_eq!(
            drain(&mut rx),
            vec![
                PipelineState::GeneratingSpec,
                PipelineState::Scaffolding,
                PipelineState::FixingCode,
                PipelineState::Building,
                PipelineState::Succeeded,
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_event_names_stage() {
        let orch = orchestrator(
            Arc::new(FakeGenerator::failing(503)),
            Arc::new(FakeTool::default()),
        );
        let mut rx = orch.subscribe();

        let _ = orch.start_build("1").await;

        let states = drain(&mut rx);
        assert_eq!(states.len(), 2);
        assert!(matches!(
            states[1],
            PipelineState::Failed {
                stage: PipelineStage::GeneratingSpec,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_concurrent_build_for_same_cherry_is_rejected() {
        let gate = Arc::new(Notify::new());
        let tool = Arc::new(FakeTool {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let orch = orchestrator(Arc::new(FakeGenerator::default()), tool);
        let mut rx = orch.subscribe();

        let first = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.start_build("1").await })
        };

        // Wait until the first run is parked inside the scaffold call
        loop {
            let event = rx.recv().await.unwrap();
            if event.state == PipelineState::Scaffolding {
                break;
            }
        }

        let err = orch.start_build("1").await.unwrap_err();
        assert!(matches!(err, PipelineError::BuildInProgress(_)));

        gate.notify_one();
        assert!(first.await.unwrap().is_ok());

        // Claim is released once the run ends
        gate.notify_one();
        assert!(orch.start_build("1").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_project_features_are_best_effort() {
        let tool = Arc::new(FakeTool {
            rejected_feature: Some("sync"),
            ..Default::default()
        });
        let orch = orchestrator(Arc::new(FakeGenerator::default()), tool.clone());
        let flags = FeatureFlags {
            database: true,
            sync: true,
            auth: true,
        };

        let report = orch.create_project("2", flags).await.unwrap();

        assert_eq!(report.output, "Created Note Taker");
        assert_eq!(
            report.features_added,
            vec![FeatureKind::Database, FeatureKind::Auth]
        );
        assert_eq!(report.feature_failures.len(), 1);
        assert_eq!(report.feature_failures[0].0, FeatureKind::Sync);
        assert!(!report.is_complete());

        let calls = tool.features.lock().unwrap().clone();
        assert_eq!(
            calls,
            [
                ("database", "fireproof"),
                ("sync", "fireproof-cloud"),
                ("auth", "device"),
            ]
            .map(|(feature, provider)| {
                ("Note Taker".to_string(), feature.to_string(), provider.to_string())
            })
            .to_vec()
        );
        assert_eq!(
            orch.registry().get("2").unwrap().path,
            Some(report.project_dir)
        );
    }

    #[tokio::test]
    async fn test_create_project_scaffold_failure_is_fatal() {
        let tool = Arc::new(FakeTool {
            fail_create: true,
            ..Default::default()
        });
        let orch = orchestrator(Arc::new(FakeGenerator::default()), tool.clone());

        let err = orch
            .create_project("1", FeatureFlags::pipeline_defaults())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Scaffold(_)));
        assert!(tool.features.lock().unwrap().is_empty());
        assert!(orch.registry().get("1").unwrap().path.is_none());
    }

    #[tokio::test]
    async fn test_generate_cherry_adds_record() {
        let generator = Arc::new(FakeGenerator::default());
        let orch = orchestrator(generator.clone(), Arc::new(FakeTool::default()));
        let req = GenerateSpecRequest::new(
            "track my tasks",
            "productivity",
            "rust-axum",
            FeatureFlags::default(),
        );

        let (cherry, spec) = orch.generate_cherry(req, false).await.unwrap();

        assert_eq!(cherry.id, "3");
        assert_eq!(cherry.name, spec.name);
        assert_eq!(cherry.stack, "rust-axum");
        assert_eq!(cherry.size, "5-15 MB");
        assert!(!generator.requests()[0].is_enhanced());
        assert_eq!(orch.registry().len(), 3);
    }

    #[tokio::test]
    async fn test_generate_cherry_failure_adds_nothing() {
        let orch = orchestrator(
            Arc::new(FakeGenerator::failing(500)),
            Arc::new(FakeTool::default()),
        );
        let req = GenerateSpecRequest::new("x", "tools", "static", FeatureFlags::default());

        let err = orch.generate_cherry(req, true).await.unwrap_err();

        assert!(matches!(err, PipelineError::Generate(_)));
        assert_eq!(orch.registry().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_run_delegates_to_lifecycle() {
        let orch = orchestrator(
            Arc::new(FakeGenerator::default()),
            Arc::new(FakeTool::default()),
        );

        assert_eq!(orch.toggle_run("1"), Some(RunState::Running));
        assert!(orch.registry().get("1").unwrap().is_running);
        assert_eq!(orch.toggle_run("missing"), None);
    }
}
