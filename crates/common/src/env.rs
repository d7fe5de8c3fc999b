//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::debug;

/// Create the parent directory of a file-backed SQLite database (`sqlite://data/x.db?mode=rwc`).
pub async fn ensure_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else { return Ok(()) };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(':') {
        return Ok(());
    }
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
            debug!(dir = %parent.display(), "sqlite directory ready");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_file_urls_are_ignored() -> anyhow::Result<()> {
        ensure_sqlite_dir("sqlite::memory:").await?;
        ensure_sqlite_dir("postgres://localhost/properties").await?;
        ensure_sqlite_dir("sqlite://properties.db").await?;
        Ok(())
    }

    #[tokio::test]
    async fn creates_parent_of_sqlite_file() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("property-api-env-{}", std::process::id()));
        let url = format!("sqlite://{}/nested/properties.db?mode=rwc", dir.display());
        ensure_sqlite_dir(&url).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        tokio::fs::remove_dir_all(&dir).await?;
        Ok(())
    }
}
