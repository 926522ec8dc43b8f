use std::time::Duration;

use serde_json::Value;

use super::extract;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Top-level MIME type an upstream content type must carry to be trusted.
    pub fn mime_type(&self) -> mime::Name<'static> {
        match self {
            MediaKind::Image => mime::IMAGE,
            MediaKind::Video => mime::VIDEO,
        }
    }

    pub fn default_content_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/png",
            MediaKind::Video => "video/mp4",
        }
    }
}

/// Provider model name and the endpoint path it is submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelRoute {
    pub name: &'static str,
    pub endpoint: &'static str,
}

/// Opaque provider job-set id. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    job_set_id: String,
}

impl JobHandle {
    /// Accepts only ids that fit in one URL path segment.
    pub fn new(job_set_id: impl Into<String>) -> Option<Self> {
        let job_set_id = job_set_id.into();
        let single_segment = !matches!(job_set_id.as_str(), "." | "..")
            && !job_set_id.contains(['/', '\\', '?', '#']);

        if job_set_id.trim().is_empty() || !single_segment {
            None
        } else {
            Some(Self { job_set_id })
        }
    }

    pub fn job_set_id(&self) -> &str {
        &self.job_set_id
    }
}

/// Raw job-set status payload as returned by one poll.
#[derive(Debug, Clone)]
pub struct JobStatusSnapshot(Value);

impl JobStatusSnapshot {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }

    pub fn result_url(&self, kind: MediaKind) -> Option<String> {
        extract::result_url(&self.0, kind)
    }

    pub fn job_statuses(&self) -> Vec<&str> {
        self.0
            .get("jobs")
            .and_then(Value::as_array)
            .map(|jobs| {
                jobs.iter()
                    .filter_map(|job| job.get("status").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_failed_job(&self) -> bool {
        self.job_statuses()
            .into_iter()
            .any(|status| extract::FAILURE_STATUSES.contains(&status))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResult {
    pub url: String,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready(ResolvedResult),
    /// Attempt budget spent without success or failure.
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollSettings {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollSettings {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// `max(1, floor(timeout / interval))`
    pub fn attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let ratio = self.timeout.as_secs_f64() / self.interval.as_secs_f64();
        (ratio.floor() as u32).max(1)
    }
}
