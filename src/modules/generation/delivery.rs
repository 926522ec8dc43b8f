use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;
use url::Url;
use utoipa::ToSchema;

use super::dto::{ProcessingResponse, ReadyResponse};
use super::error::GenerationError;
use super::model::{JobHandle, MediaKind, ResolvedResult};
use crate::infrastructure::higgsfield::client::HiggsfieldClient;

pub const MEDIA_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Json,
    Bytes,
    Redirect,
}

pub fn redirect(result: &ResolvedResult) -> Response {
    // 307 keeps the method on the follow-up request.
    Redirect::temporary(&result.url).into_response()
}

pub fn ready_json(model: &str, handle: &JobHandle, result: &ResolvedResult) -> Response {
    let body = ReadyResponse::new(model, handle.job_set_id(), result);
    (StatusCode::OK, Json(body)).into_response()
}

pub fn still_processing(model: Option<&str>, handle: &JobHandle, kind: MediaKind) -> Response {
    let body = ProcessingResponse {
        status: "processing".to_string(),
        model: model.map(str::to_string),
        job_set_id: handle.job_set_id().to_string(),
        detail: format!(
            "{} not ready yet. Keep polling or increase timeout.",
            capitalize(kind.label())
        ),
    };
    (StatusCode::ACCEPTED, Json(body)).into_response()
}

/// Fetches the resolved media server-side and re-emits it inline.
pub async fn stream_bytes(
    client: &HiggsfieldClient,
    handle: &JobHandle,
    result: &ResolvedResult,
) -> Result<Response, GenerationError> {
    let media = client.fetch_media(&result.url).await?;
    let content_type = resolve_content_type(result.kind, media.content_type.as_deref(), &result.url);
    let disposition = format!(
        "inline; filename=\"{}.{}\"",
        sanitize_filename(handle.job_set_id()),
        extension_for(&content_type)
    );

    info!(
        "Streaming {} ({}, {} bytes) for job set {}",
        result.kind.label(),
        content_type,
        media.body.len(),
        handle.job_set_id()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, MEDIA_CACHE_CONTROL.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        media.body,
    )
        .into_response())
}

pub async fn deliver(
    client: &HiggsfieldClient,
    mode: DeliveryMode,
    model: &str,
    handle: &JobHandle,
    result: &ResolvedResult,
) -> Result<Response, GenerationError> {
    match mode {
        DeliveryMode::Json => Ok(ready_json(model, handle, result)),
        DeliveryMode::Redirect => Ok(redirect(result)),
        DeliveryMode::Bytes => stream_bytes(client, handle, result).await,
    }
}

/// Upstream type if it matches the media kind, else a guess from the URL path, else the kind default.
pub fn resolve_content_type(kind: MediaKind, upstream: Option<&str>, url: &str) -> String {
    let matches_kind = |m: &mime::Mime| m.type_().as_str() == kind.mime_type().as_str();

    if let Some(raw) = upstream {
        if raw.parse::<mime::Mime>().is_ok_and(|m| matches_kind(&m)) {
            return raw.to_string();
        }
    }

    let path = Url::parse(url).map(|u| u.path().to_string()).unwrap_or_default();
    mime_guess::from_path(&path)
        .iter()
        .find(|m| matches_kind(m))
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| kind.default_content_type().to_string())
}

fn extension_for(content_type: &str) -> &'static str {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        _ => mime_guess::get_mime_extensions_str(essence)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("bin"),
    }
}

fn sanitize_filename(job_set_id: &str) -> String {
    job_set_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .take(64)
        .collect()
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_type_kept_when_it_matches() {
        assert_eq!(
            resolve_content_type(MediaKind::Video, Some("video/webm"), "https://a/x"),
            "video/webm"
        );
        assert_eq!(
            resolve_content_type(MediaKind::Image, Some("image/jpeg; charset=binary"), "https://a/x"),
            "image/jpeg; charset=binary"
        );
    }

    #[test]
    fn test_mismatched_upstream_type_falls_back_to_url_guess() {
        assert_eq!(
            resolve_content_type(MediaKind::Image, Some("application/octet-stream"), "https://a/p.webp?sig=1"),
            "image/webp"
        );
        assert_eq!(
            resolve_content_type(MediaKind::Video, Some("binary/octet-stream"), "https://a/clip.mov"),
            "video/quicktime"
        );
    }

    #[test]
    fn test_kind_default_when_nothing_matches() {
        assert_eq!(resolve_content_type(MediaKind::Video, None, "https://a/x"), "video/mp4");
        assert_eq!(resolve_content_type(MediaKind::Image, Some("garbage"), "not a url"), "image/png");
        assert_eq!(resolve_content_type(MediaKind::Video, Some("image/png"), "https://a/x.png"), "video/mp4");
    }

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for("video/mp4"), "mp4");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("application/x-unknown-thing"), "bin");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("abc-123_x"), "abc-123_x");
        assert_eq!(sanitize_filename("a\"b/c"), "a_b_c");
    }

    #[test]
    fn test_redirect_is_307() {
        let result = ResolvedResult { url: "https://a/raw.png".into(), kind: MediaKind::Image };
        let response = redirect(&result);
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "https://a/raw.png");
    }

    #[test]
    fn test_still_processing_is_202() {
        let handle = JobHandle::new("set-7").unwrap();
        let response = still_processing(Some("minimax-t2v"), &handle, MediaKind::Video);
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
