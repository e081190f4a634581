//! Persisting ranking results.
//!
//! Each run overwrites the latest result and archives a copy per edition:
//! ```text
//! data_dir/
//! ├── headlines.json
//! └── 2025-05-06/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```

use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::models::NewsResult;
use crate::utils::{ensure_writable_dir, time_of_day};

/// Write `result` as the latest result and into today's edition archive.
///
/// Returns the paths written, latest first.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display()))]
pub async fn write_news_result(
    result: &NewsResult,
    data_dir: &Path,
    filename: &str,
) -> Result<Vec<PathBuf>> {
    let json = serde_json::to_string(result)?;
    ensure_writable_dir(data_dir).await?;

    let latest = data_dir.join(filename);
    fs::write(&latest, &json).await?;
    info!(path = %latest.display(), "Wrote latest headlines");

    let archive_dir = data_dir.join(Local::now().date_naive().to_string());
    if let Err(e) = fs::create_dir_all(&archive_dir).await {
        error!(path = %archive_dir.display(), error = %e, "Failed to create archive dir");
        return Err(e.into());
    }
    let archived = archive_dir.join(format!("{}.json", time_of_day()));
    fs::write(&archived, &json).await?;
    info!(path = %archived.display(), "Archived headlines");

    Ok(vec![latest, archived])
}
