//! Filesystem-backed JSON persistence for the expense tracker state.
//!
//! Each key of the [`StateStorage`] contract maps to one pretty-printed JSON
//! file under the data directory. Writes stage to a `.tmp` sibling and rename
//! into place;
//! loads are lenient, degrading missing or malformed values to defaults so a
//! damaged store never blocks startup.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use spendlog_core::{
    CoreError, StateStorage, BUDGETS_KEY, EXPENSES_KEY, LOCKED_CURRENCY_KEY,
};
use spendlog_domain::{BudgetConfig, CurrencyCode, Expense};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// JSON key-value gateway rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStateStorage {
    dir: PathBuf,
}

impl JsonStateStorage {
    /// Opens a gateway rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Opens the gateway at the platform data directory
    /// (for example `~/.local/share/spendlog`).
    pub fn open_default() -> Result<Self, CoreError> {
        let base = dirs::data_dir()
            .ok_or_else(|| CoreError::Persistence("no data directory available".into()))?;
        Self::new(base.join("spendlog"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{FILE_EXTENSION}"))
    }

    /// Reads and parses one key. Absent or malformed values degrade to
    /// `default` with a warning; only real I/O failures surface as errors.
    fn load_key<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, CoreError> {
        let path = self.key_path(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(default),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&data) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(key, %err, "stored value is malformed; using default");
                Ok(default)
            }
        }
    }

    fn save_key<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let data = serde_json::to_string_pretty(value)
            .map_err(|err| CoreError::Persistence(err.to_string()))?;
        write_atomic(&self.key_path(key), &data)
    }
}

impl StateStorage for JsonStateStorage {
    fn load_expenses(&self) -> Result<Vec<Expense>, CoreError> {
        self.load_key(EXPENSES_KEY, Vec::new())
    }

    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), CoreError> {
        self.save_key(EXPENSES_KEY, &expenses)
    }

    fn load_locked_currency(&self) -> Result<Option<CurrencyCode>, CoreError> {
        self.load_key(LOCKED_CURRENCY_KEY, None)
    }

    fn save_locked_currency(&self, lock: Option<&CurrencyCode>) -> Result<(), CoreError> {
        self.save_key(LOCKED_CURRENCY_KEY, &lock)
    }

    fn load_budgets(&self) -> Result<BudgetConfig, CoreError> {
        self.load_key(BUDGETS_KEY, BudgetConfig::default())
    }

    fn save_budgets(&self, budgets: &BudgetConfig) -> Result<(), CoreError> {
        self.save_key(BUDGETS_KEY, budgets)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
