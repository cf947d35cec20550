use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
#[cfg(test)]
use mockall::automock;

use crate::time_item::TimeItem;

/// 保存先を指定する環境変数。
pub const DATA_FILE_ENV: &str = "TIMESINCE_DATA_FILE";

/// time itemの一覧を保存、読み込みするためのtrait。
///
/// 一覧全体をまとめて保存する。
#[cfg_attr(test, automock)]
pub trait TimeItemRepository {
    /// 保存されている一覧を読み込む。何も保存されていない場合は`None`を返す。
    fn load(&self) -> Result<Option<Vec<TimeItem>>>;

    /// 一覧全体を保存する。
    fn save(&self, items: &[TimeItem]) -> Result<()>;

    /// 保存されている一覧を削除する。
    fn clear(&self) -> Result<()>;
}

/// time itemの一覧をJSONファイルに保存するリポジトリ。
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// 新しい`JsonFileRepository`を返す。
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 保存先を解決して`JsonFileRepository`を返す。
    ///
    /// 引数、環境変数`TIMESINCE_DATA_FILE`、データディレクトリの順に優先する。
    ///
    /// # Arguments
    ///
    /// * `data_file` - コマンドラインで指定された保存先
    pub fn resolve(data_file: Option<PathBuf>) -> Result<Self> {
        let path = match data_file {
            Some(path) => path,
            None => match env::var(DATA_FILE_ENV) {
                Ok(path) => PathBuf::from(path),
                Err(_) => dirs::data_dir()
                    .context("Failed to find the data directory")?
                    .join("timesince")
                    .join("time_items.json"),
            },
        };
        debug!("Data file: {}", path.display());

        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TimeItemRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Vec<TimeItem>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }

        let items = serde_json::from_str::<Option<Vec<TimeItem>>>(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        Ok(items)
    }

    fn save(&self, items: &[TimeItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(items).context("Failed to serialize time items")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!("Saved {} time items", items.len());

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }
}
