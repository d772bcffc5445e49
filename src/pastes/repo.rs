use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{NewPaste, Paste};

/// Storage for pastes. Pastes are never deleted; the only mutation after
/// insert is deactivation.
#[async_trait]
pub trait PasteRepo: Send + Sync {
    async fn create(&self, paste: NewPaste) -> anyhow::Result<Paste>;
    async fn get_by_id(&self, paste_id: i64) -> anyhow::Result<Option<Paste>>;
    /// Flip an active paste to inactive. Returns `false` when no active
    /// paste with that id existed, so only one caller can win.
    async fn deactivate(&self, paste_id: i64) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgPasteRepo {
    db: PgPool,
}

impl PgPasteRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PasteRepo for PgPasteRepo {
    async fn create(&self, paste: NewPaste) -> anyhow::Result<Paste> {
        let row = sqlx::query_as::<_, Paste>(
            r#"
            INSERT INTO pastes (user_id, contents, title, language, password_hash,
                                deactivation_token, expiry_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING paste_id, user_id, contents, title, language, password_hash,
                      deactivation_token, is_active, post_time, expiry_time
            "#,
        )
        .bind(paste.user_id) // Option<i64> → NULL allowed
        .bind(paste.contents)
        .bind(paste.title)
        .bind(paste.language)
        .bind(paste.password_hash)
        .bind(paste.deactivation_token)
        .bind(paste.expiry_time)
        .fetch_one(&self.db)
        .await
        .context("insert paste")?;
        Ok(row)
    }

    async fn get_by_id(&self, paste_id: i64) -> anyhow::Result<Option<Paste>> {
        let row = sqlx::query_as::<_, Paste>(
            r#"
            SELECT paste_id, user_id, contents, title, language, password_hash,
                   deactivation_token, is_active, post_time, expiry_time
              FROM pastes
             WHERE paste_id = $1
            "#,
        )
        .bind(paste_id)
        .fetch_optional(&self.db)
        .await
        .context("get paste by id")?;
        Ok(row)
    }

    async fn deactivate(&self, paste_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE pastes
               SET is_active = FALSE
             WHERE paste_id = $1 AND is_active
            "#,
        )
        .bind(paste_id)
        .execute(&self.db)
        .await
        .context("deactivate paste")?;
        Ok(result.rows_affected() == 1)
    }
}
