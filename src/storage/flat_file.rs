use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    ledger::{DateFormat, Ledger},
};

use super::{
    codec::{read_ledger, write_ledger, LoadPolicy, LoadReport},
    StorageBackend,
};

const TMP_SUFFIX: &str = "tmp";

/// Stores a ledger as a flat comma separated text file.
#[derive(Debug, Clone)]
pub struct FlatFileStorage {
    path: PathBuf,
    date_format: DateFormat,
    policy: LoadPolicy,
}

impl FlatFileStorage {
    pub fn new(path: impl Into<PathBuf>, date_format: DateFormat) -> Self {
        Self {
            path: path.into(),
            date_format,
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }
}

impl StorageBackend for FlatFileStorage {
    fn load(&self) -> Result<LoadReport> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no ledger file, starting empty");
            return Ok(LoadReport::empty(self.date_format));
        }
        let file = File::open(&self.path)?;
        let report = read_ledger(BufReader::new(file), self.date_format, self.policy)?;
        tracing::debug!(
            path = %self.path.display(),
            records = report.ledger.len(),
            skipped = report.skipped.len(),
            "ledger loaded"
        );
        Ok(report)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = tmp_path(&self.path);
        let staged = write_staged(ledger, &tmp)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(Into::into));
        if let Err(err) = staged {
            fs::remove_file(&tmp).ok();
            return Err(err);
        }
        tracing::debug!(path = %self.path.display(), records = ledger.len(), "ledger saved");
        Ok(())
    }
}

fn write_staged(ledger: &Ledger, tmp: &Path) -> Result<()> {
    let file = File::create(tmp)?;
    write_ledger(ledger, BufWriter::new(file))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let storage = FlatFileStorage::new(dir.path().join("absent.txt"), DateFormat::Iso);
        let report = storage.load().unwrap();
        assert!(report.ledger.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("expenses.txt")),
            PathBuf::from("expenses.txt.tmp")
        );
        assert_eq!(tmp_path(Path::new("ledger")), PathBuf::from("ledger.tmp"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("expenses.txt");
        let storage = FlatFileStorage::new(&path, DateFormat::Iso);
        let mut ledger = Ledger::new(DateFormat::Iso);
        ledger.add("2024-01-15", "Food", "1", "x").unwrap();
        storage.save(&ledger).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2024-01-15,Food,1,x\n");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn failed_save_removes_staged_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.txt");
        fs::create_dir(&path).unwrap();
        let storage = FlatFileStorage::new(&path, DateFormat::Iso);
        let mut ledger = Ledger::new(DateFormat::Iso);
        ledger.add("2024-01-15", "Food", "1", "x").unwrap();

        let err = storage.save(&ledger).unwrap_err();
        assert!(matches!(err, crate::errors::LedgerError::Io(_)));
        assert!(!tmp_path(&path).exists());
        assert!(path.is_dir());
    }
}
