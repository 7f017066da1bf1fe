// ============================================
// src/word_list.rs
// 単語リストの構造と読み込み、単語の送り方
// ============================================

use rand::Rng;
use serde::Deserialize;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::StoreError;

/// 値がないときに表示する記号
pub const EMPTY_SIGN: &str = "-";

/// 単語リストの1項目
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WordEntry {
    pub romaji: String,
    pub hiragana: String,
    pub katakana: String,
    pub kanji: String,
    pub translation: String,
}

impl Default for WordEntry {
    fn default() -> Self {
        Self {
            romaji: EMPTY_SIGN.to_string(),
            hiragana: EMPTY_SIGN.to_string(),
            katakana: EMPTY_SIGN.to_string(),
            kanji: EMPTY_SIGN.to_string(),
            translation: EMPTY_SIGN.to_string(),
        }
    }
}

impl WordEntry {
    #[cfg(test)]
    pub fn new(
        romaji: &str,
        hiragana: &str,
        katakana: &str,
        kanji: &str,
        translation: &str,
    ) -> Self {
        Self {
            romaji: romaji.to_string(),
            hiragana: hiragana.to_string(),
            katakana: katakana.to_string(),
            kanji: kanji.to_string(),
            translation: translation.to_string(),
        }
        .with_placeholders()
    }

    /// 空のフィールドを EMPTY_SIGN に置き換える
    pub fn with_placeholders(mut self) -> Self {
        for field in [
            &mut self.romaji,
            &mut self.hiragana,
            &mut self.katakana,
            &mut self.kanji,
            &mut self.translation,
        ] {
            if field.trim().is_empty() {
                *field = EMPTY_SIGN.to_string();
            }
        }
        self
    }
}

/// ファイル上の単語リスト: { "item": [ {...}, ... ] }
#[derive(Debug, Default, Deserialize)]
struct WordListDocument {
    #[serde(default)]
    item: Vec<WordEntry>,
}

/// 学習に使う単語リスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    entries: Vec<WordEntry>,
}

impl WordList {
    pub fn from_entries(entries: Vec<WordEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(WordEntry::with_placeholders).collect(),
        }
    }

    /// MARK:ファイルから単語リストを読み込む
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
        let document: WordListDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::json(path, e))?;

        tracing::info!(path = %path.display(), words = document.item.len(), "word list loaded");
        Ok(Self::from_entries(document.item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }
}

/// 単語リストのどこを表示しているかを管理する
#[derive(Debug, Clone, Default)]
pub struct WordBrowser {
    index: usize,
    shown: bool,
}

impl WordBrowser {
    /// 表示中の単語の位置 (まだ何も表示していなければ None)
    pub fn current(&self) -> Option<usize> {
        self.shown.then_some(self.index)
    }

    /// 先頭から表示し直す
    pub fn reset(&mut self, show_first: bool) {
        self.index = 0;
        self.shown = show_first;
    }

    /// 次の単語へ (末尾の次は先頭)
    pub fn next(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.index = if self.shown { (self.index + 1) % len } else { 0 };
        self.shown = true;
        Some(self.index)
    }

    /// 前の単語へ (先頭の前は末尾)
    pub fn previous(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.index = if self.index == 0 || self.index >= len {
            len - 1
        } else {
            self.index - 1
        };
        self.shown = true;
        Some(self.index)
    }

    /// 今と違う単語をランダムに選ぶ
    pub fn random<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if len == 1 {
            // 別の単語が存在しないので引き直さない
            tracing::warn!("word list has a single entry, random pick keeps it");
            self.index = 0;
            self.shown = true;
            return Some(self.index);
        }

        let mut candidate = rng.random_range(0..len);
        while self.shown && candidate == self.index {
            candidate = rng.random_range(0..len);
        }
        self.index = candidate;
        self.shown = true;
        Some(self.index)
    }
}
