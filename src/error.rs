// ============================================
// src/error.rs
// ファイル入出力と数字パースのエラー型
// ============================================

use std::io;
use std::path::PathBuf;

/// 設定ファイル・単語リスト・参照データの読み書きで起きるエラー
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error on {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("root of {0} is not an object")]
    NotAnObject(PathBuf),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.into(),
            source,
        }
    }
}

/// 数字文字列を読み方に変換できなかった理由
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumeralError {
    #[error("empty number")]
    Empty,

    #[error("unexpected character {0:?}")]
    InvalidDigit(char),

    #[error("{0} digits before the decimal point (max 9)")]
    TooManyDigits(usize),
}
