use crate::Database;

/// Fetch a guild's configured command prefix, if one is set.
pub async fn guild_prefix(db: &Database, guild_id: u64) -> anyhow::Result<Option<String>> {
    let prefix: Option<String> =
        sqlx::query_scalar("SELECT prefix FROM guild_settings WHERE guild_id = $1")
            .bind(guild_id as i64)
            .fetch_optional(db.pool())
            .await?;

    Ok(prefix)
}

/// Set or replace a guild's command prefix.
pub async fn set_guild_prefix(db: &Database, guild_id: u64, prefix: &str) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, prefix) VALUES ($1, $2)
         ON CONFLICT (guild_id) DO UPDATE SET prefix = EXCLUDED.prefix",
    )
    .bind(guild_id as i64)
    .bind(prefix)
    .execute(db.pool())
    .await?;

    Ok(())
}
