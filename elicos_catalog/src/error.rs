use std::{io, path::PathBuf};

use thiserror::Error;

/// 加载图片目录失败。
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// 某行缺少 tag 或 src
    #[error("catalog line {line}: missing tag/src")]
    MissingField { line: usize },
}

/// JSON 存储读写失败。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage io error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
