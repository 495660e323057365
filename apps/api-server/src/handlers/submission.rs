//! Reads the `blogpost` field from a post submission.
//!
//! Browsers send either `application/x-www-form-urlencoded` or
//! `multipart/form-data`; both are accepted under the same byte limit.

use actix_multipart::{Multipart, MultipartError};
use actix_web::dev::UrlEncoded;
use actix_web::error::UrlencodedError;
use actix_web::{HttpMessage, HttpRequest, web};
use futures::StreamExt;

use inkpost_shared::dto::CreatePostForm;

use crate::middleware::error::{AppError, AppResult};

const FIELD: &str = "blogpost";

/// Extract the submitted post content. `None` means the field was absent.
pub async fn read_blogpost(
    req: &HttpRequest,
    payload: web::Payload,
    limit: usize,
) -> AppResult<Option<String>> {
    if req.content_type().eq_ignore_ascii_case("multipart/form-data") {
        from_multipart(req, payload, limit).await
    } else {
        from_urlencoded(req, payload, limit).await
    }
}

async fn from_urlencoded(
    req: &HttpRequest,
    payload: web::Payload,
    limit: usize,
) -> AppResult<Option<String>> {
    let form = UrlEncoded::<CreatePostForm>::new(req, &mut payload.into_inner())
        .limit(limit)
        .await
        .map_err(|err| match err {
            err @ UrlencodedError::Overflow { .. } => AppError::PayloadTooLarge(err.to_string()),
            other => AppError::BadRequest(other.to_string()),
        })?;

    Ok(form.blogpost)
}

async fn from_multipart(
    req: &HttpRequest,
    payload: web::Payload,
    limit: usize,
) -> AppResult<Option<String>> {
    let mut multipart = Multipart::new(req.headers(), payload);
    let mut blogpost = None;
    let mut received = 0usize;

    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(invalid_multipart)?;
        let wanted = blogpost.is_none() && field.name() == Some(FIELD);
        let mut value = Vec::new();

        // Other fields are drained so the stream can advance.
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(invalid_multipart)?;
            received += chunk.len();
            if received > limit {
                return Err(AppError::PayloadTooLarge(format!(
                    "Multipart payload is larger than allowed (limit: {} bytes)",
                    limit
                )));
            }
            if wanted {
                value.extend_from_slice(&chunk);
            }
        }

        if wanted {
            let text = String::from_utf8(value).map_err(|_| {
                AppError::BadRequest(format!("Field `{}` is not valid UTF-8", FIELD))
            })?;
            blogpost = Some(text);
        }
    }

    Ok(blogpost)
}

fn invalid_multipart(err: MultipartError) -> AppError {
    AppError::BadRequest(err.to_string())
}
