//! Per-image content resolution
//!
//! One image, two retrieval paths: original-quality file content first, a
//! base64 data URL second. The fallback is a single substitution, not a
//! retry policy; a failure on the fallback path aborts the whole run.

use base64::Engine as _;

use crate::board::{BoardHost, ImageContent};
use crate::error::{Error, Result};
use crate::pacing::CallPacer;
use crate::types::ItemId;

/// Resolved binary payload for one image
#[must_use]
#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// Content type the payload was resolved with, if known
    pub content_type: Option<String>,
}

/// Resolve one image's binary content
///
/// Primary path: [`BoardHost::get_original_content`]; its reported content
/// type is trusted as-is. On any primary failure the fallback requests a
/// `data:` URI via [`BoardHost::get_original_data_url`] and decodes it
/// locally. Whichever host call ran last is followed by one pacer pause;
/// local decoding is not paced.
///
/// # Errors
///
/// [`Error::ContentResolution`] when the fallback fetch fails or the data
/// URL cannot be decoded. There is no second fallback.
pub async fn resolve(
    host: &dyn BoardHost,
    pacer: &CallPacer,
    id: &ItemId,
) -> Result<ResolvedAsset> {
    match host.get_original_content(id).await {
        Ok(ImageContent {
            bytes,
            content_type,
        }) => {
            pacer.pause().await;
            Ok(ResolvedAsset {
                bytes,
                content_type,
            })
        }
        Err(primary) => {
            tracing::debug!(
                item_id = %id,
                error = %primary,
                "original content fetch failed, falling back to data URL"
            );
            let data_url =
                host.get_original_data_url(id)
                    .await
                    .map_err(|fallback| Error::ContentResolution {
                        id: id.to_string(),
                        reason: fallback.to_string(),
                    })?;
            pacer.pause().await;
            decode_data_url(id, &data_url)
        }
    }
}

/// Decode a base64 `data:` URI into a resolved asset
///
/// Accepts `data:<mime>;base64,<payload>`. The mime portion may be empty,
/// in which case the asset carries no content type and the naming layer
/// falls back to `.png`.
pub(crate) fn decode_data_url(id: &ItemId, url: &str) -> Result<ResolvedAsset> {
    let malformed = |reason: &str| Error::ContentResolution {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| malformed("fallback returned a non-data URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| malformed("data URL has no payload separator"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| malformed("data URL is not base64-encoded"))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| malformed(&format!("data URL payload is not valid base64: {e}")))?;

    Ok(ResolvedAsset {
        bytes,
        content_type: if mime.is_empty() {
            None
        } else {
            Some(mime.to_string())
        },
    })
}
