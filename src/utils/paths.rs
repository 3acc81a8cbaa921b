use std::{
    env,
    path::{Path, PathBuf},
};

const HOME_ENV: &str = "EXPENSE_LEDGER_HOME";
const DEFAULT_DIR_NAME: &str = ".expense_ledger";
const CONFIG_FILE: &str = "config.json";

/// Application data directory: `$EXPENSE_LEDGER_HOME`, else `~/.expense_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
