//! Postgres Listings Stores

use crate::domain::entity::ad::Ad;
use crate::domain::entity::comment::Comment;
use crate::domain::repository::{AdRepository, CommentRepository};
use crate::error::ListingsResult;
use chrono::{DateTime, Utc};
use kernel::id::{AdId, CommentId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgAdRepository {
    pool: PgPool,
}

impl PgAdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AdRow {
    ad_id: Uuid,
    author_id: Uuid,
    title: String,
    price: i64,
    description: Option<String>,
    image_ref: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdRow {
    fn into_ad(self) -> Ad {
        Ad {
            id: AdId::from(self.ad_id),
            author_id: UserId::from(self.author_id),
            title: self.title,
            price: self.price,
            description: self.description,
            image_ref: self.image_ref,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const AD_COLUMNS: &str =
    "ad_id, author_id, title, price, description, image_ref, created_at, updated_at";

impl AdRepository for PgAdRepository {
    async fn create(&self, ad: &Ad) -> ListingsResult<Ad> {
        let row = sqlx::query_as::<_, AdRow>(
            r#"
            INSERT INTO ads (ad_id, author_id, title, price, description,
                             image_ref, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING ad_id, author_id, title, price, description,
                      image_ref, created_at, updated_at
            "#,
        )
        .bind(Uuid::from(ad.id))
        .bind(Uuid::from(ad.author_id))
        .bind(&ad.title)
        .bind(ad.price)
        .bind(ad.description.as_deref())
        .bind(ad.image_ref.as_deref())
        .bind(ad.created_at)
        .bind(ad.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_ad())
    }

    async fn find_by_id(&self, ad_id: &AdId) -> ListingsResult<Option<Ad>> {
        let row = sqlx::query_as::<_, AdRow>(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE ad_id = $1"
        ))
        .bind(Uuid::from(*ad_id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AdRow::into_ad))
    }

    async fn list_all(&self) -> ListingsResult<Vec<Ad>> {
        let rows = sqlx::query_as::<_, AdRow>(&format!(
            "SELECT {AD_COLUMNS} FROM ads ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AdRow::into_ad).collect())
    }

    async fn list_by_author(&self, author_id: &UserId) -> ListingsResult<Vec<Ad>> {
        let rows = sqlx::query_as::<_, AdRow>(&format!(
            "SELECT {AD_COLUMNS} FROM ads WHERE author_id = $1 ORDER BY created_at DESC"
        ))
        .bind(Uuid::from(*author_id))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AdRow::into_ad).collect())
    }

    async fn update(&self, ad: &Ad) -> ListingsResult<Ad> {
        let row = sqlx::query_as::<_, AdRow>(
            r#"
            UPDATE ads
            SET title = $2, price = $3, description = $4, image_ref = $5,
                updated_at = $6
            WHERE ad_id = $1
            RETURNING ad_id, author_id, title, price, description,
                      image_ref, created_at, updated_at
            "#,
        )
        .bind(Uuid::from(ad.id))
        .bind(&ad.title)
        .bind(ad.price)
        .bind(ad.description.as_deref())
        .bind(ad.image_ref.as_deref())
        .bind(ad.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_ad())
    }

    async fn delete(&self, ad_id: &AdId) -> ListingsResult<()> {
        sqlx::query("DELETE FROM ads WHERE ad_id = $1")
            .bind(Uuid::from(*ad_id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    ad_id: Uuid,
    author_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: CommentId::from(self.comment_id),
            ad_id: AdId::from(self.ad_id),
            author_id: UserId::from(self.author_id),
            text: self.text,
            created_at: self.created_at,
        }
    }
}

const COMMENT_COLUMNS: &str = "comment_id, ad_id, author_id, text, created_at";

impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: &Comment) -> ListingsResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (comment_id, ad_id, author_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING comment_id, ad_id, author_id, text, created_at
            "#,
        )
        .bind(Uuid::from(comment.id))
        .bind(Uuid::from(comment.ad_id))
        .bind(Uuid::from(comment.author_id))
        .bind(&comment.text)
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> ListingsResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = $1"
        ))
        .bind(Uuid::from(*comment_id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn list_by_ad(&self, ad_id: &AdId) -> ListingsResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE ad_id = $1 ORDER BY created_at DESC"
        ))
        .bind(Uuid::from(*ad_id))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn update(&self, comment: &Comment) -> ListingsResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET text = $2
            WHERE comment_id = $1
            RETURNING comment_id, ad_id, author_id, text, created_at
            "#,
        )
        .bind(Uuid::from(comment.id))
        .bind(&comment.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn delete(&self, comment_id: &CommentId) -> ListingsResult<()> {
        sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(Uuid::from(*comment_id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_by_ad(&self, ad_id: &AdId) -> ListingsResult<()> {
        sqlx::query("DELETE FROM comments WHERE ad_id = $1")
            .bind(Uuid::from(*ad_id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
