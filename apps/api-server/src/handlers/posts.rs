//! Post handlers.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use blog_core::domain::{Post, PostId};
use blog_core::ports::{BaseRepository, PostRepository};
use blog_core::validation::{self, Mode};
use blog_shared::dto::{PostResponse, SearchQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// Fetch a post by id. `None` means it does not exist; store failures are errors.
async fn lookup(state: &AppState, id: PostId) -> AppResult<Option<Post>> {
    let post = state.posts.find_by_id(id).await?;
    if post.is_none() {
        tracing::debug!(post_id = id, "Post not found");
    }
    Ok(post)
}

/// GET /posts/?search=<term>
pub async fn list_posts(
    state: web::Data<AppState>,
    pairs: web::Query<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let query = SearchQuery::from_pairs(pairs.into_inner());
    let posts = match query.term() {
        Some(term) => state.posts.search(term).await?,
        None => state.posts.find_all().await?,
    };

    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /post/create/
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let new_post = validation::validate_new(&body)?;
    let post = state.posts.insert(new_post).await?;

    tracing::info!(post_id = post.id, "Post created");
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /post/{id}/
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = lookup(&state, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /post/{id}/update/
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    apply_update(&state, path.into_inner(), &body, Mode::Full).await
}

/// PATCH /post/{id}/update/
pub async fn partial_update_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    apply_update(&state, path.into_inner(), &body, Mode::Partial).await
}

async fn apply_update(
    state: &AppState,
    id: PostId,
    body: &Value,
    mode: Mode,
) -> AppResult<HttpResponse> {
    let existing = lookup(state, id).await?.ok_or(AppError::NotFound)?;
    let post = validation::validate_update(body, existing, mode)?;
    let post = state.posts.update(post).await?;

    tracing::info!(post_id = id, ?mode, "Post updated");
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /post/{id}/delete/
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    lookup(&state, id).await?.ok_or(AppError::NotFound)?;
    state.posts.delete(id).await?;

    tracing::info!(post_id = id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
