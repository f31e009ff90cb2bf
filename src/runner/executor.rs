//! @ai:module:intent Evaluates question sets against models with bounded concurrency and resumable caching
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkExecutor, build_prompt
//! @ai:module:stateless false

use crate::cache::{CacheRecord, ResultCache};
use crate::config::{ModelSpec, RunConfig};
use crate::corpus::Question;
use crate::error::ConfigError;
use crate::evaluator::{AnswerExtractor, AnswerExtractorTrait};
use crate::metrics::{MetricsAggregator, MetricsAggregatorTrait, ModelReport, Outcome, RunStatus};
use crate::report::ConsoleReporter;
use crate::runner::client::{ProviderClient, ProviderSet};
use crate::runner::limiter::{ConcurrencyLimiter, ConcurrencyLimiterTrait};
use crate::runner::progress::ProgressReporter;
use crate::runner::retry::RetryPolicy;
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// @ai:intent Build the prompt sent to every model for a question
/// @ai:effects pure
pub fn build_prompt(question: &Question) -> String {
    format!(
        "You are an expert in quantum computing. Choose the correct answer.\n\
         \n\
         Question: {}\n\
         A. {}\n\
         B. {}\n\
         C. {}\n\
         D. {}\n\
         \n\
         Answer with only one letter: A, B, C, or D.\n\
         \n\
         Answer:",
        question.text,
        question.options[0],
        question.options[1],
        question.options[2],
        question.options[3]
    )
}

/// @ai:intent Executes benchmark questions against provider models
pub struct BenchmarkExecutor {
    cache: ResultCache,
    run_config: RunConfig,
    extractor: Arc<AnswerExtractor>,
    aggregator: MetricsAggregator,
    console: ConsoleReporter,
    show_progress: bool,
}

impl BenchmarkExecutor {
    /// @ai:intent Create a new benchmark executor
    /// @ai:pre run_config.concurrency >= 1
    /// @ai:effects pure
    pub fn new(cache: ResultCache, run_config: RunConfig) -> Result<Self, ConfigError> {
        if run_config.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }

        Ok(Self {
            cache,
            run_config,
            extractor: Arc::new(AnswerExtractor::new()),
            aggregator: MetricsAggregator::new(),
            console: ConsoleReporter::new(),
            show_progress: true,
        })
    }

    /// @ai:intent Toggle the live progress line
    /// @ai:effects pure
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress_sink(&self) -> Box<dyn Write + Send> {
        if self.show_progress {
            Box::new(std::io::stdout())
        } else {
            Box::new(std::io::sink())
        }
    }

    /// @ai:intent Evaluate every uncached question for one model and persist the merged record
    /// @ai:post the cache file is written once, and only when new questions were scheduled
    /// @ai:effects network, fs:read, fs:write, io
    pub async fn run_model<C>(
        &self,
        client: Arc<C>,
        model: &ModelSpec,
        dataset: &str,
        questions: &[Question],
    ) -> Result<ModelReport>
    where
        C: ProviderClient + 'static,
    {
        let mut record = self.cache.load(model.provider, &model.key, dataset);

        let (cached, pending): (Vec<&Question>, Vec<&Question>) = questions
            .iter()
            .partition(|q| record.contains_key(&q.index));

        let stale = count_stale(&record, &cached);
        if stale > 0 {
            tracing::warn!(
                "{}: {} cached outcomes disagree with the dataset's solution; keeping cached values",
                model.label(),
                stale
            );
        }

        self.console
            .print_model_header(model, cached.len(), questions.len());

        let mut evaluated = 0;
        let mut failed = 0;

        if pending.is_empty() {
            self.console.print_all_cached();
        } else {
            let scheduled = pending.len();
            let pending: Vec<Question> = pending.into_iter().cloned().collect();
            let outcomes = self
                .evaluate(client, model, pending, cached.len(), questions.len())
                .await;

            evaluated = outcomes.len();
            failed = scheduled - evaluated;
            record.extend(outcomes);

            self.cache.save(model.provider, &model.key, dataset, &record)?;
        }

        let stats = self.aggregator.accuracy(record.values());
        let report = ModelReport::new(model, stats, evaluated, failed);
        self.console.print_model_result(&report);

        Ok(report)
    }

    /// @ai:intent Fan questions out to a fixed worker pool and collect their outcomes
    /// @ai:post questions that fail terminally or panic are absent from the result; the rest still run
    /// @ai:effects network, io
    async fn evaluate<C>(
        &self,
        client: Arc<C>,
        model: &ModelSpec,
        pending: Vec<Question>,
        cached: usize,
        total: usize,
    ) -> Vec<(u32, Outcome)>
    where
        C: ProviderClient + 'static,
    {
        let status = Arc::new(RunStatus::with_cached(cached));
        let progress = ProgressReporter::spawn(
            status.clone(),
            total,
            self.run_config.progress_interval(),
            self.progress_sink(),
        );

        let workers = self.run_config.concurrency.min(pending.len());
        let limiter = ConcurrencyLimiter::new(self.run_config.concurrency);
        let retry = RetryPolicy::from_config(&self.run_config);
        tracing::debug!(
            "{}: {} workers, limiter capacity {}",
            model.label(),
            workers,
            limiter.capacity()
        );

        let (question_tx, question_rx) = mpsc::channel::<Question>(workers);
        let question_rx = Arc::new(Mutex::new(question_rx));
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<(u32, Outcome)>();

        let mut pool = JoinSet::new();
        for _ in 0..workers {
            let question_rx = question_rx.clone();
            let outcome_tx = outcome_tx.clone();
            let client = client.clone();
            let limiter = limiter.clone();
            let extractor = self.extractor.clone();
            let status = status.clone();
            let model_id = model.id.clone();

            pool.spawn(async move {
                loop {
                    let next = question_rx.lock().await.recv().await;
                    let Some(question) = next else { break };

                    let _permit = limiter.acquire().await;
                    let index = question.index;

                    // A panic in the provider call ends this task only, not the worker
                    let task = tokio::spawn(answer_question(
                        client.clone(),
                        model_id.clone(),
                        question,
                        retry,
                        extractor.clone(),
                    ));

                    match task.await {
                        Ok(Some(outcome)) => {
                            status.record_outcome(&outcome);
                            outcome_tx.send((index, outcome)).ok();
                        }
                        Ok(None) => status.record_failure(),
                        Err(e) => {
                            status.record_failure();
                            tracing::error!("Q{}: evaluation aborted: {}", index, e);
                        }
                    }
                }
            });
        }
        drop(outcome_tx);
        drop(question_rx);

        for question in pending {
            // Every worker is gone; nothing left to hand the rest to
            if question_tx.send(question).await.is_err() {
                tracing::error!("{}: all workers stopped before the queue drained", model.label());
                break;
            }
        }
        drop(question_tx);

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                status.record_failure();
                tracing::error!("{}: worker stopped: {}", model.label(), e);
            }
        }

        progress.finish().await;

        let mut outcomes = Vec::new();
        while let Some(outcome) = outcome_rx.recv().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// @ai:intent Run every model in turn; one model's failure does not stop the rest
    /// @ai:effects network, fs:read, fs:write, io
    pub async fn run_all<C>(
        &self,
        providers: &ProviderSet<C>,
        models: &[ModelSpec],
        dataset: &str,
        questions: &[Question],
    ) -> Vec<ModelReport>
    where
        C: ProviderClient + 'static,
    {
        let mut reports = Vec::new();

        for model in models {
            let Some(client) = providers.get(model.provider) else {
                tracing::error!("{}: no {} client configured", model.label(), model.provider);
                continue;
            };

            match self.run_model(client, model, dataset, questions).await {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!("{}: {:#}", model.label(), e),
            }
        }

        reports
    }
}

/// @ai:intent Ask one question with retries and score the reply
/// @ai:effects network
async fn answer_question<C>(
    client: Arc<C>,
    model_id: String,
    question: Question,
    retry: RetryPolicy,
    extractor: Arc<AnswerExtractor>,
) -> Option<Outcome>
where
    C: ProviderClient + 'static,
{
    let prompt = build_prompt(&question);

    let text = retry
        .run(question.index, || {
            let client = client.clone();
            let model_id = model_id.clone();
            let prompt = prompt.clone();
            async move { client.complete(&model_id, &prompt).await }
        })
        .await?;

    Some(Outcome::new(extractor.extract(&text), question.solution))
}

fn count_stale(record: &CacheRecord, cached: &[&Question]) -> usize {
    cached
        .iter()
        .filter(|q| {
            record
                .get(&q.index)
                .is_some_and(|outcome| outcome.correct != q.solution)
        })
        .count()
}
