use crate::storage::RECORD_EXTENSION;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::warn;

/// Counts record files per date key. Best effort: a directory that cannot be
/// listed yields an empty map.
pub async fn aggregate(dir: &Path) -> BTreeMap<String, u64> {
    match scan(dir).await {
        Ok(counts) => counts,
        Err(err) => {
            warn!(dir = %dir.display(), "heatmap scan failed: {err}");
            BTreeMap::new()
        }
    }
}

async fn scan(dir: &Path) -> std::io::Result<BTreeMap<String, u64>> {
    let suffix = format!(".{RECORD_EXTENSION}");
    let mut counts = BTreeMap::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(date) = name.strip_suffix(&suffix) {
            let count = counts.entry(date.to_string()).or_insert(0u64);
            *count = count.saturating_add(1);
        }
    }
    Ok(counts)
}
