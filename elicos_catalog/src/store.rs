//! `JsonStore`：目录下的 JSON 键值存储，一个 key 对应一个 `{key}.json` 文件。
//!
//! 读失败不向上抛：`load` 记录日志并返回调用方给定的兜底值。
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    /// 序列化并写入 `key`（覆盖旧值）。
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        let json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(key, path = %path.display(), "saved");
        Ok(())
    }

    /// 读取 `key`；不存在时返回 `Ok(None)`。
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    /// 读取 `key`；不存在或读取失败时返回 `fallback`。
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(err) => {
                error!(key, error = %err, "failed to load from store");
                fallback
            }
        }
    }

    /// `key` 是否已有值；key 非法或无法访问时视为不存在。
    pub fn exists(&self, key: &str) -> bool {
        match self.path_for(key) {
            Ok(path) => path.is_file(),
            Err(err) => {
                error!(key, error = %err, "failed to check store key");
                false
            }
        }
    }

    /// 删除 `key`；不存在视为成功。
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}
