//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ActiveModelTrait, Condition, EntityTrait, QueryFilter};

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Escape LIKE wildcards so the term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn lower_contains(column: post::Column, pattern: &LikeExpr) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(pattern.clone())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(term, "Searching posts");

        let pattern =
            LikeExpr::new(format!("%{}%", escape_like(&term.to_lowercase()))).escape('\\');

        let result = PostEntity::find()
            .filter(
                Condition::any()
                    .add(lower_contains(post::Column::Title, &pattern))
                    .add(lower_contains(post::Column::Content, &pattern))
                    .add(lower_contains(post::Column::Category, &pattern)),
            )
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = new_post.into();
        let model = active_model.insert(&self.db).await.map_err(repo_error)?;

        tracing::debug!(post_id = model.id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.update(&self.db).await.map_err(repo_error)?;

        Ok(model.into())
    }
}
