//! Persisted user preferences: which variant's date format and file to use,
//! how queries match categories, and the optional monthly budget.

use std::{
    fmt,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{LedgerError, Result},
    ledger::{Budget, CategoryMatch, DateFormat},
    storage::{FlatFileStorage, LoadPolicy},
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";

/// Presets reproducing the sibling trackers this crate unifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Basic,
    Advanced,
    Enhanced,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Basic, Variant::Advanced, Variant::Enhanced];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Advanced => "advanced",
            Variant::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown variant `{}`", value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,
    pub date_format: DateFormat,
    pub ledger_file: PathBuf,
    pub category_match: CategoryMatch,
    pub load_policy: LoadPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Decimal>,
    pub save_on_exit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl Config {
    pub fn for_variant(variant: Variant) -> Self {
        let (date_format, ledger_file, category_match, save_on_exit) = match variant {
            Variant::Basic => (DateFormat::Iso, "expenses.txt", CategoryMatch::Exact, true),
            Variant::Advanced => (
                DateFormat::Iso,
                "advanced_expenses.csv",
                CategoryMatch::Contains,
                false,
            ),
            Variant::Enhanced => (
                DateFormat::DayMonthYear,
                "enhanced_expenses.txt",
                CategoryMatch::Exact,
                false,
            ),
        };
        Self {
            variant,
            date_format,
            ledger_file: PathBuf::from(ledger_file),
            category_match,
            load_policy: LoadPolicy::Abort,
            monthly_budget: None,
            save_on_exit,
        }
    }

    /// Preset for `variant` that keeps the user's budget and load policy.
    pub fn switched_to(&self, variant: Variant) -> Self {
        Self {
            monthly_budget: self.monthly_budget,
            load_policy: self.load_policy,
            ..Self::for_variant(variant)
        }
    }

    /// Storage for the configured ledger file.
    pub fn storage(&self) -> FlatFileStorage {
        FlatFileStorage::new(&self.ledger_file, self.date_format).with_policy(self.load_policy)
    }

    /// Storage for an explicit path, keeping the configured format and policy.
    pub fn storage_at(&self, path: impl Into<PathBuf>) -> FlatFileStorage {
        FlatFileStorage::new(path, self.date_format).with_policy(self.load_policy)
    }

    pub fn budget(&self) -> Option<Budget> {
        self.monthly_budget
            .map(Budget::new)
            .filter(Budget::is_set)
    }
}

/// Loads and saves [`Config`] as JSON inside the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(format!("json.{TMP_SUFFIX}"));
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
