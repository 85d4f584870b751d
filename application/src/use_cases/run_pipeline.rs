//! Run Pipeline use case
//!
//! Drives the troupe through one sequential run: each agent composes a
//! prompt from the comments accumulated so far, calls the generation
//! adapter, and merges its batch into the globally sorted timeline.
//! Sequentiality is load-bearing — later agents' prompts incorporate
//! earlier agents' comments, so no two generation calls ever overlap.

use crate::ports::generation::{CommentGenerator, GenerationError};
use crate::ports::observer::{NoObserver, PipelineObserver};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use troupe_domain::{
    AgentId, AgentRegistry, AgentRunStatus, Comment, ExecutionOrder, Model, RunId, RunProgress,
    RunState, Timeline, VideoRef, compose_prompt,
};

/// Errors that can occur during pipeline execution
#[derive(Error, Debug)]
pub enum RunPipelineError {
    /// Precondition failure: reported before any agent starts.
    #[error("No video selected")]
    NoVideo,

    #[error("Execution stopped due to an error with {agent}: {source}")]
    AgentFailed {
        agent: AgentId,
        #[source]
        source: GenerationError,
    },

    #[error("Run cancelled")]
    Cancelled,
}

/// Input for the RunPipeline use case
#[derive(Debug, Clone)]
pub struct RunPipelineInput {
    /// The video under analysis
    pub video: VideoRef,
    /// Optional supplementary article text, embedded verbatim in prompts
    pub article_text: Option<String>,
    /// Persona catalog, already configured for this run
    pub registry: AgentRegistry,
    /// Sequential schedule for this run
    pub order: ExecutionOrder,
    /// Generation model for every agent
    pub model: Model,
}

impl RunPipelineInput {
    pub fn new(video: VideoRef, registry: AgentRegistry, order: ExecutionOrder) -> Self {
        Self {
            video,
            article_text: None,
            registry,
            order,
            model: Model::default(),
        }
    }

    pub fn with_article(mut self, article_text: impl Into<String>) -> Self {
        self.article_text = Some(article_text.into());
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }
}

/// Final value of a fully successful run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub run: RunId,
    pub state: RunState,
    /// The merged, time-sorted timeline of every agent's comments
    pub timeline: Timeline,
    pub statuses: HashMap<AgentId, AgentRunStatus>,
    pub comment_counts: HashMap<AgentId, usize>,
}

/// Use case for running the persona pipeline
pub struct RunPipelineUseCase<G: CommentGenerator + 'static> {
    generator: Arc<G>,
}

impl<G: CommentGenerator + 'static> RunPipelineUseCase<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunPipelineInput) -> Result<PipelineResult, RunPipelineError> {
        self.execute_with_progress(input, &NoObserver, &CancellationToken::new())
            .await
    }

    /// Execute the use case with progress callbacks and cancellation
    ///
    /// Cancellation is checked between agents; an in-flight generation call
    /// finishes (or fails) before the token takes effect. Statuses and the
    /// timeline of a cancelled or failed run remain observable through the
    /// events already emitted.
    pub async fn execute_with_progress(
        &self,
        input: RunPipelineInput,
        observer: &dyn PipelineObserver,
        cancel: &CancellationToken,
    ) -> Result<PipelineResult, RunPipelineError> {
        if !input.video.is_present() {
            return Err(RunPipelineError::NoVideo);
        }

        let run = RunId::next();
        let total = input.order.len();
        info!("Starting pipeline {} with {} agents", run, total);

        // Fresh bookkeeping: every registered agent back to idle, empty
        // timeline, zero progress.
        let mut statuses: HashMap<AgentId, AgentRunStatus> = input
            .registry
            .ids()
            .map(|id| (id, AgentRunStatus::Idle))
            .collect();
        let mut comment_counts: HashMap<AgentId, usize> = HashMap::new();
        let mut timeline = Timeline::new();
        let mut accumulated: Vec<Comment> = Vec::new();

        observer.on_run_start(run, total);

        for (index, agent_id) in input.order.iter().enumerate() {
            if cancel.is_cancelled() {
                info!("Pipeline {} cancelled before agent {}", run, agent_id);
                return Err(RunPipelineError::Cancelled);
            }

            let persona = input
                .registry
                .get(agent_id)
                .expect("execution order is validated against the registry");

            debug!("[{}/{}] {} is working", index + 1, total, persona.name);
            statuses.insert(agent_id, AgentRunStatus::Loading);
            observer.on_agent_start(run, index, total, persona);

            let payload = compose_prompt(
                persona,
                &input.video,
                input.article_text.as_deref(),
                &accumulated,
            );

            let on_retry = |attempt: u32, max_attempts: u32| {
                observer.on_retry(run, persona, attempt, max_attempts);
            };

            match self
                .generator
                .generate(&input.model, &payload, &on_retry)
                .await
            {
                Ok(batch) => {
                    let tagged: Vec<Comment> =
                        batch.into_iter().map(|c| c.tagged(agent_id)).collect();
                    let batch_len = tagged.len();
                    info!("{} produced {} comments", persona.name, batch_len);

                    accumulated.extend(tagged.clone());
                    timeline.merge(tagged);

                    statuses.insert(agent_id, AgentRunStatus::Success);
                    comment_counts.insert(agent_id, batch_len);

                    let progress = RunProgress::of(index + 1, total);
                    observer.on_agent_complete(run, persona, batch_len, &progress, &timeline);
                }
                Err(e) => {
                    warn!("{} failed: {}", persona.name, e);
                    statuses.insert(agent_id, AgentRunStatus::Error(e.to_string()));
                    observer.on_run_failed(run, agent_id, &e.to_string());
                    // Later agents never run: their prompts would miss this
                    // agent's contribution, and the run is already failed.
                    return Err(RunPipelineError::AgentFailed {
                        agent: agent_id,
                        source: e,
                    });
                }
            }
        }

        observer.on_run_complete(run);
        info!("Pipeline {} completed, {} comments total", run, timeline.len());

        Ok(PipelineResult {
            run,
            state: RunState::Completed,
            timeline,
            statuses,
            comment_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::generation::RetryObserver;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use troupe_domain::{Persona, PromptPayload};

    /// Scripted fake: each agent's turn pops the next outcome.
    struct ScriptedGenerator {
        outcomes: Mutex<Vec<Result<Vec<Comment>, GenerationError>>>,
        seen_prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(outcomes: Vec<Result<Vec<Comment>, GenerationError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                seen_prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommentGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _model: &Model,
            payload: &PromptPayload,
            _on_retry: RetryObserver<'_>,
        ) -> Result<Vec<Comment>, GenerationError> {
            self.seen_prompts.lock().unwrap().push(payload.text.clone());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        started: Mutex<Vec<AgentId>>,
        completed: Mutex<Vec<(AgentId, usize)>>,
        failed: Mutex<Vec<(AgentId, String)>>,
        fractions: Mutex<Vec<f64>>,
    }

    impl PipelineObserver for RecordingObserver {
        fn on_agent_start(&self, _run: RunId, _index: usize, _total: usize, persona: &Persona) {
            self.started.lock().unwrap().push(persona.id);
        }

        fn on_agent_complete(
            &self,
            _run: RunId,
            persona: &Persona,
            batch_len: usize,
            progress: &RunProgress,
            _timeline: &Timeline,
        ) {
            self.completed.lock().unwrap().push((persona.id, batch_len));
            self.fractions.lock().unwrap().push(progress.fraction);
        }

        fn on_run_failed(&self, _run: RunId, agent: AgentId, message: &str) {
            self.failed.lock().unwrap().push((agent, message.to_string()));
        }
    }

    fn registry() -> AgentRegistry {
        let prompts: HashMap<AgentId, String> = AgentId::ALL
            .into_iter()
            .map(|id| (id, format!("You are the {id}.")))
            .collect();
        AgentRegistry::new(&prompts).unwrap()
    }

    fn order_of(ids: &[AgentId], registry: &AgentRegistry) -> ExecutionOrder {
        ExecutionOrder::new(ids.to_vec(), registry).unwrap()
    }

    fn batch(times: &[&str]) -> Result<Vec<Comment>, GenerationError> {
        Ok(times.iter().map(|t| Comment::new(*t, "", "c")).collect())
    }

    fn input_for(
        registry: AgentRegistry,
        order: ExecutionOrder,
    ) -> RunPipelineInput {
        RunPipelineInput::new(VideoRef::named("test.mp4"), registry, order)
    }

    #[tokio::test]
    async fn test_agents_visited_in_given_order() {
        let reg = registry();
        let order = order_of(&[AgentId::Otaku, AgentId::Gal, AgentId::Professor], &reg);
        let generator = Arc::new(ScriptedGenerator::new(vec![
            batch(&["00:00:01.00"]),
            batch(&["00:00:02.00"]),
            batch(&["00:00:03.00"]),
        ]));
        let observer = RecordingObserver::default();

        RunPipelineUseCase::new(generator)
            .execute_with_progress(input_for(reg, order), &observer, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            *observer.started.lock().unwrap(),
            vec![AgentId::Otaku, AgentId::Gal, AgentId::Professor]
        );
        // Completion interleaves strictly: no agent starts before the
        // previous one finished.
        assert_eq!(observer.completed.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_interleaved_times_merge_chronologically() {
        let reg = registry();
        let order = order_of(&[AgentId::Gal, AgentId::Professor], &reg);
        let generator = Arc::new(ScriptedGenerator::new(vec![
            batch(&["00:01.00", "00:10.00"]),
            batch(&["00:05.00"]),
        ]));

        let result = RunPipelineUseCase::new(generator)
            .execute(input_for(reg, order))
            .await
            .unwrap();

        let merged: Vec<(&str, AgentId)> = result
            .timeline
            .iter()
            .map(|c| (c.time.as_str(), c.agent_id.unwrap()))
            .collect();
        assert_eq!(
            merged,
            vec![
                ("00:01.00", AgentId::Gal),
                ("00:05.00", AgentId::Professor),
                ("00:10.00", AgentId::Gal),
            ]
        );
    }

    #[tokio::test]
    async fn test_every_merged_comment_is_tagged() {
        let reg = registry();
        let order = order_of(&[AgentId::Aizuchi, AgentId::Yajiuma], &reg);
        let generator = Arc::new(ScriptedGenerator::new(vec![
            batch(&["00:00:01.00", "00:00:02.00"]),
            batch(&["00:00:03.00"]),
        ]));

        let result = RunPipelineUseCase::new(generator)
            .execute(input_for(reg, order))
            .await
            .unwrap();

        for comment in result.timeline.iter() {
            let agent = comment.agent_id.expect("merged comments carry their agent");
            assert!(matches!(agent, AgentId::Aizuchi | AgentId::Yajiuma));
        }
    }

    #[tokio::test]
    async fn test_no_video_fails_before_any_agent() {
        let reg = registry();
        let order = ExecutionOrder::default_for(&reg);
        let generator = Arc::new(ScriptedGenerator::new(vec![]));
        let observer = RecordingObserver::default();

        let mut input = input_for(reg, order);
        input.video = VideoRef::named("");

        let err = RunPipelineUseCase::new(Arc::clone(&generator))
            .execute_with_progress(input, &observer, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, RunPipelineError::NoVideo));
        assert!(observer.started.lock().unwrap().is_empty());
        assert!(generator.seen_prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_halts_pipeline_and_keeps_prior_output() {
        let reg = registry();
        let order = order_of(
            &[AgentId::Gal, AgentId::Professor, AgentId::Comedian],
            &reg,
        );
        let generator = Arc::new(ScriptedGenerator::new(vec![
            batch(&["00:00:01.00"]),
            Err(GenerationError::InvalidResponse("not a JSON array".into())),
        ]));
        let observer = RecordingObserver::default();

        let err = RunPipelineUseCase::new(Arc::clone(&generator))
            .execute_with_progress(
                input_for(reg, order),
                &observer,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        match err {
            RunPipelineError::AgentFailed { agent, .. } => assert_eq!(agent, AgentId::Professor),
            other => panic!("unexpected error: {other}"),
        }

        // The comedian never ran.
        assert_eq!(generator.seen_prompts.lock().unwrap().len(), 2);
        assert_eq!(
            *observer.started.lock().unwrap(),
            vec![AgentId::Gal, AgentId::Professor]
        );
        // Gal's batch stayed merged and reported.
        assert_eq!(
            *observer.completed.lock().unwrap(),
            vec![(AgentId::Gal, 1)]
        );
        let (failed_agent, message) = observer.failed.lock().unwrap()[0].clone();
        assert_eq!(failed_agent, AgentId::Professor);
        assert!(message.contains("not a JSON array"));
    }

    #[tokio::test]
    async fn test_prior_comments_thread_into_later_prompts() {
        let reg = registry();
        let order = order_of(&[AgentId::Gal, AgentId::Professor], &reg);
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(vec![Comment::new("00:00:01.00", "", "unique-gal-line")]),
            batch(&["00:00:02.00"]),
        ]));

        RunPipelineUseCase::new(Arc::clone(&generator))
            .execute(input_for(reg, order))
            .await
            .unwrap();

        let prompts = generator.seen_prompts.lock().unwrap();
        assert!(!prompts[0].contains("unique-gal-line"));
        assert!(prompts[1].contains("unique-gal-line"));
    }

    #[tokio::test]
    async fn test_progress_fraction_is_monotonic() {
        let reg = registry();
        let order = order_of(
            &[AgentId::Gal, AgentId::Professor, AgentId::Otaku, AgentId::Comedian],
            &reg,
        );
        let generator = Arc::new(ScriptedGenerator::new(vec![
            batch(&["00:00:01.00"]),
            batch(&["00:00:02.00"]),
            batch(&["00:00:03.00"]),
            batch(&["00:00:04.00"]),
        ]));
        let observer = RecordingObserver::default();

        RunPipelineUseCase::new(generator)
            .execute_with_progress(
                input_for(reg, order),
                &observer,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let fractions = observer.fractions.lock().unwrap();
        assert_eq!(*fractions, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[tokio::test]
    async fn test_cancellation_between_agents() {
        let reg = registry();
        let order = order_of(&[AgentId::Gal], &reg);
        let generator = Arc::new(ScriptedGenerator::new(vec![batch(&["00:00:01.00"])]));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = RunPipelineUseCase::new(generator)
            .execute_with_progress(input_for(reg, order), &NoObserver, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, RunPipelineError::Cancelled));
    }

    #[tokio::test]
    async fn test_successful_result_bookkeeping() {
        let reg = registry();
        let order = order_of(&[AgentId::Gal, AgentId::Professor], &reg);
        let generator = Arc::new(ScriptedGenerator::new(vec![
            batch(&["00:00:01.00", "00:00:02.00", "00:00:03.00"]),
            batch(&["00:00:04.00"]),
        ]));

        let result = RunPipelineUseCase::new(generator)
            .execute(input_for(reg, order))
            .await
            .unwrap();

        assert_eq!(result.state, RunState::Completed);
        assert_eq!(result.comment_counts[&AgentId::Gal], 3);
        assert_eq!(result.comment_counts[&AgentId::Professor], 1);
        assert_eq!(result.statuses[&AgentId::Gal], AgentRunStatus::Success);
        // Unscheduled agents stay idle.
        assert_eq!(result.statuses[&AgentId::Otaku], AgentRunStatus::Idle);
        assert_eq!(result.timeline.len(), 4);
    }
}
