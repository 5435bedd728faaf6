//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use blog_core::domain::{NewPost, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category,
            tags: model.tags,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
///
/// `created_at` is left unset so an update can never rewrite it.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            tags: Set(post.tags),
            created_at: NotSet,
            updated_at: Set(post.updated_at.into()),
        }
    }
}

/// Insert form: the id comes from the sequence, both timestamps are stamped now.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: NotSet,
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            tags: Set(post.tags),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
