pub use crate::auth::repo_types::User;
use sqlx::PgPool;

impl User {
    /// Registration pre-check: any user already holding this email or
    /// username.
    pub async fn find_by_email_or_username(
        db: &PgPool,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, phone, password_hash,
                   ration_card_id, role, created_at, updated_at
            FROM users
            WHERE email = $1 OR username = $2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Login lookup: the identifier may match username, email or phone.
    /// First match wins.
    pub async fn find_by_identifier(
        db: &PgPool,
        identifier: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, phone, password_hash,
                   ration_card_id, role, created_at, updated_at
            FROM users
            WHERE username = $1 OR email = $1 OR phone = $1
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user with an already-hashed password. The id and
    /// timestamps are assigned by the database; a unique violation on
    /// username or email surfaces as a database error the caller can map.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
        ration_card_id: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, phone, password_hash, ration_card_id, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id, username, email, phone, password_hash,
                      ration_card_id, role, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .bind(ration_card_id)
        .bind(role)
        .fetch_one(db)
        .await
    }
}
