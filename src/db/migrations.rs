use std::collections::HashSet;

use deadpool_postgres::Pool;

use super::error::DbError;

/// Schema migrations, applied in order. Embedded so a host binary does not
/// depend on its working directory.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_nft_events.sql",
    include_str!("../../migrations/001_nft_events.sql"),
)];

pub async fn run(pool: &Pool) -> Result<(), DbError> {
    let mut client = pool.get().await?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS _migrations (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )",
            &[],
        )
        .await?;

    let rows = client.query("SELECT name FROM _migrations", &[]).await?;
    let applied: HashSet<String> = rows.iter().map(|row| row.get(0)).collect();

    for (name, sql) in pending(MIGRATIONS, &applied) {
        let tx = client.transaction().await?;

        tx.batch_execute(sql).await.map_err(|e| {
            DbError::MigrationError(format!("Failed to run migration {}: {}", name, e))
        })?;

        tx.execute("INSERT INTO _migrations (name) VALUES ($1)", &[&name])
            .await?;

        tx.commit().await?;

        tracing::info!(migration = name, "Applied migration");
    }

    tracing::info!("All migrations up to date");
    Ok(())
}

fn pending<'a>(
    migrations: &'a [(&'a str, &'a str)],
    applied: &'a HashSet<String>,
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    migrations
        .iter()
        .copied()
        .filter(move |(name, _)| !applied.contains(*name))
}
