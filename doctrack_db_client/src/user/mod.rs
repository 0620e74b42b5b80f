use model::user::User;
use sqlx::{Pool, Postgres};

const USER_COLUMNS: &str = r#"
    id,
    email,
    name,
    "avatarKey" AS avatar_key,
    "createdAt" AS created_at,
    "updatedAt" AS updated_at
"#;

/// Inserts the user on first sight, refreshing the email on conflict.
///
/// The display name starts as the local part of the email address.
#[tracing::instrument(skip(db))]
pub async fn upsert_user(db: &Pool<Postgres>, user_id: &str, email: &str) -> anyhow::Result<User> {
    let default_name = email.split('@').next().unwrap_or(email);

    let query = format!(
        r#"
        INSERT INTO "User" (id, email, name)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE
        SET email = EXCLUDED.email, "updatedAt" = NOW()
        RETURNING {USER_COLUMNS}
        "#
    );

    let user = sqlx::query_as::<_, User>(&query)
        .bind(user_id)
        .bind(email)
        .bind(default_name)
        .fetch_one(db)
        .await
        .map_err(|err| {
            tracing::error!(error=?err, "unable to upsert user");
            err
        })?;

    Ok(user)
}

/// Fetches a user by id.
#[tracing::instrument(skip(db))]
pub async fn get_user(db: &Pool<Postgres>, user_id: &str) -> anyhow::Result<Option<User>> {
    let query = format!(r#"SELECT {USER_COLUMNS} FROM "User" WHERE id = $1"#);

    let user = sqlx::query_as::<_, User>(&query)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

    Ok(user)
}

/// Updates the user's display name.
#[tracing::instrument(skip(db))]
pub async fn update_user_name(
    db: &Pool<Postgres>,
    user_id: &str,
    name: &str,
) -> anyhow::Result<()> {
    sqlx::query(r#"UPDATE "User" SET name = $2, "updatedAt" = NOW() WHERE id = $1"#)
        .bind(user_id)
        .bind(name)
        .execute(db)
        .await?;

    Ok(())
}

/// Replaces the user's avatar key, returning the previous key so the caller
/// can clean up the old object.
#[tracing::instrument(skip(db))]
pub async fn set_avatar_key(
    db: &Pool<Postgres>,
    user_id: &str,
    avatar_key: Option<&str>,
) -> anyhow::Result<Option<String>> {
    let previous: Option<(Option<String>,)> = sqlx::query_as(
        r#"
        UPDATE "User" u
        SET "avatarKey" = $2, "updatedAt" = NOW()
        FROM (SELECT id, "avatarKey" FROM "User" WHERE id = $1 FOR UPDATE) old
        WHERE u.id = old.id
        RETURNING old."avatarKey"
        "#,
    )
    .bind(user_id)
    .bind(avatar_key)
    .fetch_optional(db)
    .await?;

    Ok(previous.and_then(|(key,)| key))
}

/// Deletes the user row; documents and two-factor enrollment cascade with it.
#[tracing::instrument(skip(db))]
pub async fn delete_user(db: &Pool<Postgres>, user_id: &str) -> anyhow::Result<bool> {
    let result = sqlx::query(r#"DELETE FROM "User" WHERE id = $1"#)
        .bind(user_id)
        .execute(db)
        .await
        .map_err(|err| {
            tracing::error!(error=?err, "unable to delete user");
            err
        })?;

    Ok(result.rows_affected() > 0)
}
