use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::error::GenerationError;
use super::model::{JobHandle, JobStatusSnapshot, MediaKind, PollOutcome, PollSettings, ResolvedResult};

/// Anything that can fetch a fresh status snapshot for a job set.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn job_status(&self, handle: &JobHandle) -> Result<JobStatusSnapshot, GenerationError>;
}

/// Suspends the current task between poll attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Polls until a result URL appears, a job reports failure, or the attempt budget runs out.
pub async fn resolve<S, Z>(
    source: &S,
    sleeper: &Z,
    handle: &JobHandle,
    kind: MediaKind,
    settings: PollSettings,
) -> Result<PollOutcome, GenerationError>
where
    S: JobStatusSource + ?Sized,
    Z: Sleeper + ?Sized,
{
    let attempts = settings.attempts();
    let job_set_id = handle.job_set_id();

    for attempt in 1..=attempts {
        let snapshot = source.job_status(handle).await?;

        if let Some(url) = snapshot.result_url(kind) {
            info!("Job set {} resolved on attempt {}: {}", job_set_id, attempt, url);
            return Ok(PollOutcome::Ready(ResolvedResult { url, kind }));
        }

        if snapshot.has_failed_job() {
            warn!("Job set {} reported failure: {:?}", job_set_id, snapshot.job_statuses());
            return Err(GenerationError::JobFailed {
                job_set_id: job_set_id.to_string(),
            });
        }

        debug!(
            "Job set {} not ready ({}/{}): {:?}",
            job_set_id,
            attempt,
            attempts,
            snapshot.job_statuses()
        );

        if attempt < attempts {
            sleeper.sleep(settings.interval).await;
        }
    }

    info!("Job set {} still processing after {} attempts", job_set_id, attempts);
    Ok(PollOutcome::Pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays scripted payloads; the last one repeats forever.
    struct ScriptedSource {
        script: Vec<Result<Value, StatusCode>>,
        polls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Value, StatusCode>>) -> Self {
            Self { script, polls: AtomicUsize::new(0) }
        }

        fn polls(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobStatusSource for ScriptedSource {
        async fn job_status(&self, _handle: &JobHandle) -> Result<JobStatusSnapshot, GenerationError> {
            let n = self.polls.fetch_add(1, Ordering::SeqCst);
            match &self.script[n.min(self.script.len() - 1)] {
                Ok(payload) => Ok(JobStatusSnapshot::new(payload.clone())),
                Err(status) => Err(GenerationError::Upstream {
                    status: *status,
                    body: "upstream down".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        naps: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.naps.lock().unwrap().push(duration);
        }
    }

    fn pending() -> Value {
        json!({"id": "set-1", "jobs": [{"status": "pending", "results": null}]})
    }

    fn settings(timeout: f64, interval: f64) -> PollSettings {
        PollSettings::new(Duration::from_secs_f64(timeout), Duration::from_secs_f64(interval))
    }

    fn handle() -> JobHandle {
        JobHandle::new("set-1").unwrap()
    }

    #[tokio::test]
    async fn test_budget_of_five_attempts_then_pending() {
        let source = ScriptedSource::new(vec![Ok(pending())]);
        let sleeper = RecordingSleeper::default();

        let outcome = resolve(&source, &sleeper, &handle(), MediaKind::Image, settings(10.0, 2.0))
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::Pending);
        assert_eq!(source.polls(), 5);
        assert_eq!(*sleeper.naps.lock().unwrap(), vec![Duration::from_secs(2); 4]);
    }

    #[tokio::test]
    async fn test_resolves_on_third_poll() {
        let done = json!({
            "jobs": [{"status": "completed", "results": {"raw": {"url": "https://a/clip.mp4"}}}]
        });
        let source = ScriptedSource::new(vec![Ok(pending()), Ok(pending()), Ok(done)]);
        let sleeper = RecordingSleeper::default();

        let outcome = resolve(&source, &sleeper, &handle(), MediaKind::Video, settings(30.0, 3.0))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::Ready(ResolvedResult {
                url: "https://a/clip.mp4".to_string(),
                kind: MediaKind::Video,
            })
        );
        assert_eq!(source.polls(), 3);
        assert_eq!(sleeper.naps.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_stops_polling_immediately() {
        let failed = json!({"jobs": [{"status": "completed"}, {"status": "failed"}]});
        let source = ScriptedSource::new(vec![Ok(pending()), Ok(failed), Ok(pending())]);
        let sleeper = RecordingSleeper::default();

        let err = resolve(&source, &sleeper, &handle(), MediaKind::Image, settings(60.0, 1.0))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::JobFailed { ref job_set_id } if job_set_id == "set-1"));
        assert_eq!(source.polls(), 2);
        assert_eq!(sleeper.naps.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_error_status_on_first_snapshot() {
        let errored = json!({"jobs": [{"status": "error"}]});
        let source = ScriptedSource::new(vec![Ok(errored)]);
        let sleeper = RecordingSleeper::default();

        let err = resolve(&source, &sleeper, &handle(), MediaKind::Video, settings(60.0, 1.0))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::JobFailed { .. }));
        assert_eq!(source.polls(), 1);
        assert!(sleeper.naps.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_result_wins_over_failure_in_same_snapshot() {
        let mixed = json!({
            "jobs": [
                {"status": "failed"},
                {"status": "completed", "results": {"url": "https://a/ok.png"}}
            ]
        });
        let source = ScriptedSource::new(vec![Ok(mixed)]);

        let outcome = resolve(&source, &TokioSleeper, &handle(), MediaKind::Image, settings(4.0, 2.0))
            .await
            .unwrap();

        assert!(matches!(outcome, PollOutcome::Ready(ref r) if r.url == "https://a/ok.png"));
    }

    #[tokio::test]
    async fn test_cancelled_status_runs_out_the_budget() {
        let cancelled = json!({"jobs": [{"status": "cancelled"}]});
        let source = ScriptedSource::new(vec![Ok(cancelled)]);
        let sleeper = RecordingSleeper::default();

        let outcome = resolve(&source, &sleeper, &handle(), MediaKind::Video, settings(9.0, 3.0))
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::Pending);
        assert_eq!(source.polls(), 3);
    }

    #[tokio::test]
    async fn test_single_attempt_when_timeout_below_interval() {
        let source = ScriptedSource::new(vec![Ok(pending())]);
        let sleeper = RecordingSleeper::default();

        let outcome = resolve(&source, &sleeper, &handle(), MediaKind::Image, settings(1.0, 2.0))
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::Pending);
        assert_eq!(source.polls(), 1);
        assert!(sleeper.naps.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_aborts_loop() {
        let source = ScriptedSource::new(vec![Ok(pending()), Err(StatusCode::SERVICE_UNAVAILABLE)]);
        let sleeper = RecordingSleeper::default();

        let err = resolve(&source, &sleeper, &handle(), MediaKind::Image, settings(20.0, 2.0))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(source.polls(), 2);
    }
}
