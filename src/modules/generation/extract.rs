//! Result-URL extraction over loosely shaped job-set payloads.
//!
//! Results may sit under a top-level `results` or under each job's `results`,
//! each either an object or a list of objects. Top-level results are searched
//! first. Inside a result object candidates are read in key-table order. A
//! missing or mistyped key is never an error, only "no candidate here".

use serde_json::{Map, Value};
use url::Url;

use super::model::MediaKind;

/// Resolution variants shaped like `{"raw": {"url": ...}}`, best first.
pub const NESTED_VARIANT_KEYS: [&str; 4] = ["raw", "min", "high", "low"];

/// Flat fields holding either a URL string or `{"url": ...}`.
pub const FLAT_URL_KEYS: [&str; 4] = ["url", "video", "video_url", "mp4"];

pub const VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".webm", ".mov"];

pub const FAILURE_STATUSES: [&str; 2] = ["failed", "error"];

pub fn result_url(snapshot: &Value, kind: MediaKind) -> Option<String> {
    let objects = result_objects(snapshot);
    match kind {
        MediaKind::Image => objects
            .iter()
            .flat_map(|obj| candidates(*obj))
            .next()
            .map(str::to_string),
        MediaKind::Video => video_url(&objects),
    }
}

fn video_url(objects: &[&Map<String, Value>]) -> Option<String> {
    let http_candidates = || {
        objects
            .iter()
            .flat_map(|obj| candidates(*obj))
            .filter(|u| is_http(u))
    };

    http_candidates()
        .find(|u| has_video_extension(u))
        .or_else(|| http_candidates().next())
        .or_else(|| objects.iter().find_map(|obj| any_http_string(*obj)))
        .map(str::to_string)
}

/// Every result object in search order.
pub fn result_objects(snapshot: &Value) -> Vec<&Map<String, Value>> {
    let mut objects = Vec::new();
    collect_results(snapshot.get("results"), &mut objects);

    if let Some(jobs) = snapshot.get("jobs").and_then(Value::as_array) {
        for job in jobs {
            collect_results(job.get("results"), &mut objects);
        }
    }
    objects
}

fn collect_results<'a>(node: Option<&'a Value>, out: &mut Vec<&'a Map<String, Value>>) {
    match node {
        Some(Value::Object(map)) => out.push(map),
        Some(Value::Array(items)) => out.extend(items.iter().filter_map(Value::as_object)),
        _ => {}
    }
}

/// Candidate URLs of one result object, in key-table priority order.
pub fn candidates(obj: &Map<String, Value>) -> impl Iterator<Item = &str> {
    let nested = NESTED_VARIANT_KEYS
        .iter()
        .filter_map(move |key| obj.get(*key).and_then(nested_url));
    let flat = FLAT_URL_KEYS
        .iter()
        .filter_map(move |key| obj.get(*key).and_then(flat_url));

    nested.chain(flat).filter(|u| !u.is_empty())
}

fn nested_url(value: &Value) -> Option<&str> {
    value.get("url").and_then(Value::as_str)
}

fn flat_url(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(_) => nested_url(value),
        _ => None,
    }
}

/// Depth-first search for the first http(s) string anywhere below `obj`.
fn any_http_string(obj: &Map<String, Value>) -> Option<&str> {
    obj.values().find_map(first_http_in)
}

fn first_http_in(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if is_http(s) => Some(s.as_str()),
        Value::Object(map) => any_http_string(map),
        Value::Array(items) => items.iter().find_map(first_http_in),
        _ => None,
    }
}

pub fn is_http(candidate: &str) -> bool {
    candidate.starts_with("http")
}

pub fn has_video_extension(candidate: &str) -> bool {
    let path = Url::parse(candidate)
        .map(|u| u.path().to_ascii_lowercase())
        .unwrap_or_else(|_| candidate.to_ascii_lowercase());

    VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
