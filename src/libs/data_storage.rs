use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "jtl";
pub const DATA_DIR: &str = "data";

/// Resolves files under the per-user application directory.
#[derive(Clone, Debug)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(APP_NAME);

        Self { base_path }
    }

    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }

    /// Path of the data file for the month of `date`, e.g. `data/Apr-2020.csv`.
    pub fn monthly_data_file(&self, date: NaiveDate) -> Result<PathBuf> {
        let dir = self.get_path(DATA_DIR)?;
        fs::create_dir_all(&dir)?;
        Ok(dir.join(data_file_name(date)))
    }

    /// The data file to work on: `requested` when it exists, otherwise the
    /// current month's file.
    pub fn data_file(&self, requested: Option<&Path>) -> Result<PathBuf> {
        match requested {
            Some(path) if path.is_file() => Ok(path.to_path_buf()),
            Some(path) => {
                tracing::warn!(path = %path.display(), "Provided data file doesn't exist, the default one will be used");
                self.monthly_data_file(Local::now().date_naive())
            }
            None => self.monthly_data_file(Local::now().date_naive()),
        }
    }
}

pub fn data_file_name(date: NaiveDate) -> String {
    format!("{}.csv", date.format("%b-%Y"))
}
