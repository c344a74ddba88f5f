//! Configuration file handling.
//!
//! The configuration file is stored at `$GF_HOME/config.json`. It names the storage key the ledger
//! document lives under, how many backups to keep, and optionally where exports go.

use crate::backup::Backup;
use crate::error::{ErrorType, IntoResult, Res};
use crate::storage::FileStorage;
use crate::store::{Store, DEFAULT_STORAGE_KEY};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "gf";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$GF_HOME` and from there it loads `$GF_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory, its subdirectories, an initial `config.json` with default
    /// settings, and the seeded ledger document.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::create_inner(dir.into())
            .await
            .pub_result(ErrorType::Config)
    }

    /// This will
    /// - validate that `gf_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub async fn load(gf_home: impl Into<PathBuf>) -> Result<Self> {
        Self::load_inner(gf_home.into())
            .await
            .pub_result(ErrorType::Config)
    }

    /// Loads the configuration, creating the data directory first if it has no `config.json`.
    pub async fn load_or_create(gf_home: impl Into<PathBuf>) -> Result<Self> {
        let gf_home = gf_home.into();
        if gf_home.join(CONFIG_JSON).is_file() {
            Self::load(gf_home).await
        } else {
            debug!("No config found in {}, creating one", gf_home.display());
            Self::create(gf_home).await
        }
    }

    async fn create_inner(maybe_relative: PathBuf) -> Res<Self> {
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the gf home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.is_file() {
            bail!("A config file already exists at '{}'", config_path.display())
        }

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups).await?;

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let config = Self {
            root,
            backups,
            config_path,
            config_file,
        };
        config
            .store()
            .init()
            .await
            .context("Unable to write the initial ledger data")?;
        Ok(config)
    }

    async fn load_inner(maybe_relative: PathBuf) -> Res<Self> {
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The gf home directory is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            root: root.clone(),
            backups: root.join(BACKUPS),
            config_path,
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn storage_key(&self) -> &str {
        &self.config_file.storage_key
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// Where exports go when no directory is given on the command line. A relative `export_dir`
    /// is resolved against `$GF_HOME`; with no `export_dir` the current directory is used.
    pub fn export_dir(&self) -> PathBuf {
        match &self.config_file.export_dir {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => self.root.join(p),
            None => PathBuf::from("."),
        }
    }

    /// A `Store` over the document file in `$GF_HOME`.
    pub fn store(&self) -> Store<FileStorage> {
        Store::new(FileStorage::new(&self.root), self.storage_key())
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "gf",
///   "config_version": 1,
///   "storage_key": "gf_data_v1",
///   "backup_copies": 5,
///   "export_dir": "exports"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "gf"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The storage key of the ledger document. The document lives at `$GF_HOME/{storage_key}.json`
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Number of backup copies to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,

    /// Default directory for CSV exports (optional, relative to $GF_HOME or absolute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    export_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            storage_key: default_storage_key(),
            backup_copies: BACKUP_COPIES,
            export_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another app.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            !config.storage_key.trim().is_empty(),
            "The storage_key in {} must not be empty",
            path.display()
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
