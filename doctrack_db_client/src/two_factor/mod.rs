use model::two_factor::TwoFactor;
use sqlx::{Pool, Postgres};

const TWO_FACTOR_COLUMNS: &str = r#"
    "userId" AS user_id,
    secret,
    enabled,
    "verifiedAt" AS verified_at,
    "createdAt" AS created_at
"#;

/// Stores a freshly generated secret for the user, resetting any previous
/// enrollment back to the unverified state.
#[tracing::instrument(skip(db, secret))]
pub async fn upsert_secret(
    db: &Pool<Postgres>,
    user_id: &str,
    secret: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO "TwoFactor" ("userId", secret)
        VALUES ($1, $2)
        ON CONFLICT ("userId") DO UPDATE
        SET secret = EXCLUDED.secret, enabled = FALSE, "verifiedAt" = NULL
        "#,
    )
    .bind(user_id)
    .bind(secret)
    .execute(db)
    .await
    .map_err(|err| {
        tracing::error!(error=?err, "unable to store two-factor secret");
        err
    })?;

    Ok(())
}

/// Fetches the user's two-factor enrollment, if any.
#[tracing::instrument(skip(db))]
pub async fn get_two_factor(
    db: &Pool<Postgres>,
    user_id: &str,
) -> anyhow::Result<Option<TwoFactor>> {
    let query = format!(r#"SELECT {TWO_FACTOR_COLUMNS} FROM "TwoFactor" WHERE "userId" = $1"#);

    let two_factor = sqlx::query_as::<_, TwoFactor>(&query)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

    Ok(two_factor)
}

/// Marks the enrollment verified and enabled.
#[tracing::instrument(skip(db))]
pub async fn enable(db: &Pool<Postgres>, user_id: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE "TwoFactor"
        SET enabled = TRUE, "verifiedAt" = NOW()
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .execute(db)
    .await?;

    Ok(())
}

/// Removes the enrollment entirely.
#[tracing::instrument(skip(db))]
pub async fn disable(db: &Pool<Postgres>, user_id: &str) -> anyhow::Result<()> {
    sqlx::query(r#"DELETE FROM "TwoFactor" WHERE "userId" = $1"#)
        .bind(user_id)
        .execute(db)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Pool, Postgres};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_enrollment_lifecycle(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let user_id = "doctrack|user@user.com";

        assert!(get_two_factor(&pool, user_id).await?.is_none());

        upsert_secret(&pool, user_id, "JBSWY3DPEHPK3PXP").await?;
        let pending = get_two_factor(&pool, user_id).await?.unwrap();
        assert!(!pending.enabled);
        assert!(pending.verified_at.is_none());

        enable(&pool, user_id).await?;
        let enabled = get_two_factor(&pool, user_id).await?.unwrap();
        assert!(enabled.enabled);
        assert!(enabled.verified_at.is_some());

        disable(&pool, user_id).await?;
        assert!(get_two_factor(&pool, user_id).await?.is_none());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_regenerating_resets_verification(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let user_id = "doctrack|user@user.com";

        upsert_secret(&pool, user_id, "JBSWY3DPEHPK3PXP").await?;
        enable(&pool, user_id).await?;

        upsert_secret(&pool, user_id, "KRSXG5CTMVRXEZLU").await?;
        let reset = get_two_factor(&pool, user_id).await?.unwrap();
        assert_eq!(reset.secret, "KRSXG5CTMVRXEZLU");
        assert!(!reset.enabled);
        assert!(reset.verified_at.is_none());

        Ok(())
    }
}
