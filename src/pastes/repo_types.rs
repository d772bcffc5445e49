use sqlx::FromRow;
use time::OffsetDateTime;

/// Paste record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Paste {
    pub paste_id: i64,
    pub user_id: Option<i64>,
    pub contents: String,
    pub title: Option<String>,
    pub language: Option<String>,
    pub password_hash: Option<String>,
    pub deactivation_token: String,
    pub is_active: bool,
    pub post_time: OffsetDateTime,
    pub expiry_time: Option<OffsetDateTime>,
}

impl Paste {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expiry_time.is_some_and(|t| t <= now)
    }

    /// Active and not past its expiry. Anything else is treated as gone.
    pub fn is_live(&self, now: OffsetDateTime) -> bool {
        self.is_active && !self.is_expired(now)
    }
}

/// Values needed to insert a paste; the store assigns id and post time.
#[derive(Debug, Clone)]
pub struct NewPaste {
    pub user_id: Option<i64>,
    pub contents: String,
    pub title: Option<String>,
    pub language: Option<String>,
    pub password_hash: Option<String>,
    pub deactivation_token: String,
    pub expiry_time: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn paste(is_active: bool, expiry_time: Option<OffsetDateTime>) -> Paste {
        Paste {
            paste_id: 1,
            user_id: None,
            contents: "contents".into(),
            title: None,
            language: None,
            password_hash: None,
            deactivation_token: "token".into(),
            is_active,
            post_time: OffsetDateTime::now_utc(),
            expiry_time,
        }
    }

    #[test]
    fn liveness() {
        let now = OffsetDateTime::now_utc();
        assert!(paste(true, None).is_live(now));
        assert!(paste(true, Some(now + Duration::hours(1))).is_live(now));
        assert!(!paste(true, Some(now - Duration::seconds(1))).is_live(now));
        assert!(!paste(true, Some(now)).is_live(now));
        assert!(!paste(false, None).is_live(now));
    }
}
