//! Post handlers.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};

use inkpost_core::domain::PostId;
use inkpost_core::{DomainError, StoreError};
use inkpost_shared::dto::PostCreatedResponse;

use super::submission;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /create-post - form or multipart body with a `blogpost` field.
pub async fn create_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let content = submission::read_blogpost(&req, payload, state.max_post_bytes)
        .await?
        .ok_or_else(|| DomainError::Validation("Field `blogpost` is required".to_string()))?;

    let post = state.posts.append(content).await?;

    tracing::info!(id = %post.id, "Post created");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/posts/{}", post.id)))
        .json(PostCreatedResponse {
            id: post.id.to_string(),
            content: post.content,
        }))
}

/// GET /get-posts - the stored collection, byte for byte.
pub async fn get_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let body = state.posts.read_raw().await.map_err(|err| match err {
        StoreError::Missing { .. } => AppError::NotFound("No post store exists yet".to_string()),
        other => other.into(),
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// GET /posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    let id: PostId = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid post id: {}", raw_id)))?;

    let post = state
        .posts
        .find(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format!("post id: {}\n\n{}", post.id, post.content)))
}
