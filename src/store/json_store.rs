use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::store::schema::Statistics;

const STATS_FILE: &str = "statistics.json";

/// Single-file JSON persistence for the statistics record. Absence of the
/// file is a valid state meaning "use defaults".
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spellwell");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn stats_path(&self) -> PathBuf {
        self.base_dir.join(STATS_FILE)
    }

    /// Load the statistics record. Missing, unparseable, or stale-schema
    /// files all fall back to the default record; this never fails.
    pub fn load_stats(&self) -> Statistics {
        let path = self.stats_path();
        if !path.exists() {
            return Statistics::default();
        }
        let parsed: Statistics = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Statistics::default(),
        };
        if parsed.needs_reset() {
            Statistics::default()
        } else {
            parsed
        }
    }

    /// Atomic save: write to a temp file, fsync, rename over the original.
    pub fn save_stats(&self, stats: &Statistics) -> Result<()> {
        let path = self.stats_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(stats)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Delete the record. Idempotent; a subsequent load returns defaults.
    pub fn reset_stats(&self) -> Result<()> {
        let path = self.stats_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
