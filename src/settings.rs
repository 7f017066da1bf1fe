// ============================================
// src/settings.rs
// 設定コンテナと設定ファイルの読み書きロジック
// ============================================

use directories::ProjectDirs;
use serde_json::{Map, Value, json};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::letters::LETTER_ROWS;
use crate::word_list::WordList;

/// 設定ファイル名
pub const CONFIG_FILE: &str = "config.json";

/// 設定ファイル内の1ブロック (例: "number" の中身)
pub type Block = Map<String, Value>;

/// ランダムな文字列の長さの下限・上限
pub const MIN_RANDOM_TEXT_SIZE: usize = 1;
pub const MAX_RANDOM_TEXT_SIZE: usize = 10;

/// 数字ドリルの桁数の上限
pub const MAX_DIGITS_BEFORE_DECIMAL: u32 = 9;
pub const MAX_DIGITS_AFTER_DECIMAL: u32 = 10;

/// フォントサイズ
pub const DEFAULT_FONT_SIZE: f32 = 12.0;
pub const MIN_FONT_SIZE: f32 = 1.0;
pub const MAX_FONT_SIZE: f32 = 120.0;

// --------------------------------------------------
// 設定ファイル上のブロックとの変換
// --------------------------------------------------

/// 設定ファイルに自分のブロックを持つ設定コンテナ
pub trait SettingsSection {
    /// ブロック名
    const TAG: &'static str;

    /// 現在の値をブロックに書き出す
    fn write_block(&self) -> Block;

    /// ブロックから読めた値だけを反映し、最後にすべてのセッターを通し直す
    fn read_block(&mut self, block: &Block);
}

fn read_int(block: &Block, key: &str) -> Option<i64> {
    let value = block.get(key)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!(key, %value, "skipping unparsable integer field");
    }
    parsed
}

fn read_float(block: &Block, key: &str) -> Option<f32> {
    let value = block.get(key)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!(key, %value, "skipping unparsable float field");
    }
    parsed
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn read_bool(block: &Block, key: &str) -> Option<bool> {
    let value = block.get(key)?;
    let parsed = parse_bool(value);
    if parsed.is_none() {
        tracing::debug!(key, %value, "skipping unparsable bool field");
    }
    parsed
}

fn read_string(block: &Block, key: &str) -> Option<String> {
    block.get(key)?.as_str().map(str::to_string)
}

// --------------------------------------------------
// 各設定コンテナ
// --------------------------------------------------

/// どの行の文字をドリルに使うか
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterSettings {
    use_letters: Vec<bool>,
}

impl Default for LetterSettings {
    fn default() -> Self {
        Self {
            use_letters: vec![true; LETTER_ROWS.len()],
        }
    }
}

impl LetterSettings {
    pub fn rows(&self) -> &[bool] {
        &self.use_letters
    }

    pub fn is_using(&self, row: usize) -> bool {
        self.use_letters.get(row).copied().unwrap_or(false)
    }

    /// 範囲外の行は無視する
    pub fn set_using(&mut self, row: usize, used: bool) {
        if let Some(slot) = self.use_letters.get_mut(row) {
            *slot = used;
        }
    }

    pub fn toggle(&mut self, row: usize) {
        self.set_using(row, !self.is_using(row));
    }
}

impl SettingsSection for LetterSettings {
    const TAG: &'static str = "letter";

    fn write_block(&self) -> Block {
        let rows: Vec<Value> = self
            .use_letters
            .iter()
            .zip(LETTER_ROWS)
            .map(|(used, row)| json!({ "letters": row.caption(), "value": used }))
            .collect();

        let mut block = Block::new();
        block.insert("use_letter".into(), Value::Array(rows));
        block
    }

    fn read_block(&mut self, block: &Block) {
        let Some(Value::Array(rows)) = block.get("use_letter") else {
            return;
        };

        let states: Vec<bool> = rows
            .iter()
            .filter_map(|row| match row {
                Value::Object(entry) => entry.get("value").and_then(parse_bool),
                other => parse_bool(other),
            })
            .collect();

        // 行数が一致しないときは古い形式とみなして反映しない
        if states.len() != self.use_letters.len() {
            tracing::warn!(
                found = states.len(),
                expected = self.use_letters.len(),
                "letter rows do not match, keeping current selection"
            );
            return;
        }
        for (row, used) in states.into_iter().enumerate() {
            self.set_using(row, used);
        }
    }
}

/// かなドリルの長さと単語学習の方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsSettings {
    minimum_random_text_size: usize,
    maximum_random_text_size: usize,
    linear_word_learning: bool,
}

impl Default for OptionsSettings {
    fn default() -> Self {
        Self {
            minimum_random_text_size: 1,
            maximum_random_text_size: 5,
            linear_word_learning: false,
        }
    }
}

fn clamp_text_size(value: i64) -> usize {
    value.clamp(MIN_RANDOM_TEXT_SIZE as i64, MAX_RANDOM_TEXT_SIZE as i64) as usize
}

impl OptionsSettings {
    pub fn minimum_random_text_size(&self) -> usize {
        self.minimum_random_text_size
    }

    /// 下限が上限を超えたら上限を引き上げる
    pub fn set_minimum_random_text_size(&mut self, value: i64) {
        let value = clamp_text_size(value);
        if value > self.maximum_random_text_size {
            self.maximum_random_text_size = value;
        }
        self.minimum_random_text_size = value;
    }

    pub fn maximum_random_text_size(&self) -> usize {
        self.maximum_random_text_size
    }

    /// 上限が下限を下回ったら下限を引き下げる
    pub fn set_maximum_random_text_size(&mut self, value: i64) {
        let value = clamp_text_size(value);
        if value < self.minimum_random_text_size {
            self.minimum_random_text_size = value;
        }
        self.maximum_random_text_size = value;
    }

    pub fn linear_word_learning(&self) -> bool {
        self.linear_word_learning
    }

    pub fn set_linear_word_learning(&mut self, linear: bool) {
        self.linear_word_learning = linear;
    }
}

impl SettingsSection for OptionsSettings {
    const TAG: &'static str = "options";

    fn write_block(&self) -> Block {
        let mut block = Block::new();
        block.insert(
            "minimum_random_text_size".into(),
            json!(self.minimum_random_text_size),
        );
        block.insert(
            "maximum_random_text_size".into(),
            json!(self.maximum_random_text_size),
        );
        block.insert("linear_word_learning".into(), json!(self.linear_word_learning));
        block
    }

    fn read_block(&mut self, block: &Block) {
        let mut minimum = self.minimum_random_text_size as i64;
        let mut maximum = self.maximum_random_text_size as i64;
        if let Some(value) = read_int(block, "minimum_random_text_size") {
            minimum = value;
        }
        if let Some(value) = read_int(block, "maximum_random_text_size") {
            maximum = value;
        }
        if let Some(value) = read_bool(block, "linear_word_learning") {
            self.linear_word_learning = value;
        }

        // 手で編集されたファイルでも範囲内に収める
        self.minimum_random_text_size = clamp_text_size(minimum);
        self.maximum_random_text_size = clamp_text_size(maximum);
        self.set_minimum_random_text_size(minimum);
        self.set_maximum_random_text_size(maximum);
        self.set_linear_word_learning(self.linear_word_learning);
    }
}

/// 数字ドリルの桁数と符号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSettings {
    digits_before_decimal: u32,
    digits_after_decimal: u32,
    minus_allowed: bool,
}

impl Default for NumberSettings {
    fn default() -> Self {
        Self {
            digits_before_decimal: 2,
            digits_after_decimal: 0,
            minus_allowed: false,
        }
    }
}

impl NumberSettings {
    pub fn digits_before_decimal(&self) -> u32 {
        self.digits_before_decimal
    }

    /// 0 なら常に "0"。[0, 9] に丸める
    pub fn set_digits_before_decimal(&mut self, digits: i64) {
        self.digits_before_decimal = digits.clamp(0, MAX_DIGITS_BEFORE_DECIMAL as i64) as u32;
    }

    pub fn digits_after_decimal(&self) -> u32 {
        self.digits_after_decimal
    }

    /// [0, 10] に丸める
    pub fn set_digits_after_decimal(&mut self, digits: i64) {
        self.digits_after_decimal = digits.clamp(0, MAX_DIGITS_AFTER_DECIMAL as i64) as u32;
    }

    pub fn minus_allowed(&self) -> bool {
        self.minus_allowed
    }

    pub fn set_minus_allowed(&mut self, allowed: bool) {
        self.minus_allowed = allowed;
    }
}

impl SettingsSection for NumberSettings {
    const TAG: &'static str = "number";

    fn write_block(&self) -> Block {
        let mut block = Block::new();
        block.insert(
            "digits_before_decimal".into(),
            json!(self.digits_before_decimal),
        );
        block.insert(
            "digits_after_decimal".into(),
            json!(self.digits_after_decimal),
        );
        block.insert("allow_minus".into(), json!(self.minus_allowed));
        block
    }

    fn read_block(&mut self, block: &Block) {
        let before = read_int(block, "digits_before_decimal")
            .unwrap_or(i64::from(self.digits_before_decimal));
        let after = read_int(block, "digits_after_decimal")
            .unwrap_or(i64::from(self.digits_after_decimal));
        let minus = read_bool(block, "allow_minus").unwrap_or(self.minus_allowed);

        self.set_digits_before_decimal(before);
        self.set_digits_after_decimal(after);
        self.set_minus_allowed(minus);
    }
}

/// 1種類の文字 (かな / 漢字) に使うフォント
#[derive(Debug, Clone, PartialEq)]
pub struct FontChoice {
    path: String,
    size: f32,
}

impl Default for FontChoice {
    fn default() -> Self {
        Self {
            path: String::new(),
            size: DEFAULT_FONT_SIZE,
        }
    }
}

impl FontChoice {
    /// 空文字列は端末の標準フォント
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 存在しないファイルは標準フォントに戻す
    pub fn set_path(&mut self, path: &str) {
        self.path = normalize_font_path(path);
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// [1, 120] に丸める
    pub fn set_size(&mut self, size: f32) {
        self.size = if size.is_nan() {
            DEFAULT_FONT_SIZE
        } else {
            size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        };
    }
}

/// 区切り文字を "/" にそろえ、カレントディレクトリ以下なら相対パスにする
pub fn normalize_font_path(path: &str) -> String {
    if path.trim().is_empty() {
        return String::new();
    }
    if !Path::new(path).is_file() {
        tracing::warn!(path, "font file not found, falling back to the default font");
        return String::new();
    }

    let current = std::env::current_dir().ok();
    portable_path(path, current.as_deref())
}

/// `\` を `/` に置き換え、`base` の下にあれば `base` からの相対パスにする
fn portable_path(path: &str, base: Option<&Path>) -> String {
    let normalized = path.replace('\\', "/");
    let Some(base) = base else {
        return normalized;
    };

    let prefix = format!("{}/", base.display().to_string().replace('\\', "/").trim_end_matches('/'));
    match normalized.strip_prefix(&prefix) {
        Some(relative) if !relative.is_empty() => relative.to_string(),
        _ => normalized,
    }
}

/// かな表示用と漢字表示用のフォント
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontSettings {
    pub kana: FontChoice,
    pub kanji: FontChoice,
}

impl SettingsSection for FontSettings {
    const TAG: &'static str = "fontdata";

    fn write_block(&self) -> Block {
        let mut block = Block::new();
        block.insert("kana_font_path".into(), json!(self.kana.path));
        block.insert("kana_font_size".into(), json!(self.kana.size));
        block.insert("kanji_font_path".into(), json!(self.kanji.path));
        block.insert("kanji_font_size".into(), json!(self.kanji.size));
        block
    }

    fn read_block(&mut self, block: &Block) {
        let kana_path = read_string(block, "kana_font_path").unwrap_or_else(|| self.kana.path.clone());
        let kana_size = read_float(block, "kana_font_size").unwrap_or(self.kana.size);
        let kanji_path =
            read_string(block, "kanji_font_path").unwrap_or_else(|| self.kanji.path.clone());
        let kanji_size = read_float(block, "kanji_font_size").unwrap_or(self.kanji.size);

        self.kana.set_path(&kana_path);
        self.kana.set_size(kana_size);
        self.kanji.set_path(&kanji_path);
        self.kanji.set_size(kanji_size);
    }
}

/// 使用中の単語リスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordListSettings {
    path: String,
    words: WordList,
}

impl WordListSettings {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// パスの単語リストを読み込む。1語も読めなければパスを空にする
    pub fn set_path(&mut self, path: &str) {
        self.words = if path.is_empty() {
            WordList::default()
        } else {
            WordList::load(Path::new(path)).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "could not load word list, resetting active list");
                WordList::default()
            })
        };

        self.path = if self.words.is_empty() {
            String::new()
        } else {
            path.to_string()
        };
    }
}

impl SettingsSection for WordListSettings {
    const TAG: &'static str = "wordlist";

    fn write_block(&self) -> Block {
        let mut block = Block::new();
        block.insert("wordlist_path".into(), json!(self.path));
        block
    }

    fn read_block(&mut self, block: &Block) {
        let path = read_string(block, "wordlist_path").unwrap_or_else(|| self.path.clone());
        self.set_path(&path);
    }
}

/// 時刻ドリルを漢字で表示するか
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeSettings {
    use_kanji: bool,
}

impl Default for DateTimeSettings {
    fn default() -> Self {
        Self { use_kanji: true }
    }
}

impl DateTimeSettings {
    pub fn use_kanji(&self) -> bool {
        self.use_kanji
    }

    pub fn set_use_kanji(&mut self, use_kanji: bool) {
        self.use_kanji = use_kanji;
    }
}

impl SettingsSection for DateTimeSettings {
    const TAG: &'static str = "dateAndTime";

    fn write_block(&self) -> Block {
        let mut block = Block::new();
        block.insert("use_kanji".into(), json!(self.use_kanji));
        block
    }

    fn read_block(&mut self, block: &Block) {
        let use_kanji = read_bool(block, "use_kanji").unwrap_or(self.use_kanji);
        self.set_use_kanji(use_kanji);
    }
}

// --------------------------------------------------
// 設定ファイル全体
// --------------------------------------------------

/// 設定ファイルの中身。ルートの下にコンテナごとのブロックが並ぶ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    root: Block,
}

impl SettingsDocument {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        match serde_json::from_str(&text).map_err(|e| StoreError::json(path, e))? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(StoreError::NotAnObject(path.to_path_buf())),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&self.root).map_err(|e| StoreError::json(path, e))?;
        fs::write(path, json).map_err(|e| StoreError::io(path, e))
    }

    pub fn block(&self, tag: &str) -> Option<&Block> {
        self.root.get(tag)?.as_object()
    }

    /// 古いブロックを取り除いてから新しいブロックを入れる (フィールド単位のマージはしない)
    pub fn replace_block(&mut self, tag: &str, block: Block) {
        self.root.remove(tag);
        self.root.insert(tag.to_string(), Value::Object(block));
    }

    pub fn write_section<S: SettingsSection>(&mut self, section: &S) {
        self.replace_block(S::TAG, section.write_block());
    }

    /// ブロックがなければ何もしない
    pub fn read_section<S: SettingsSection>(&self, section: &mut S) {
        match self.block(S::TAG) {
            Some(block) => section.read_block(block),
            None => tracing::debug!(tag = S::TAG, "no block in settings document"),
        }
    }
}

/// アプリ全体の設定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub letters: LetterSettings,
    pub options: OptionsSettings,
    pub numbers: NumberSettings,
    pub fonts: FontSettings,
    pub word_list: WordListSettings,
    pub date_time: DateTimeSettings,
}

impl Settings {
    /// MARK:ファイルから設定を読み込む (失敗したらデフォルトのまま)
    pub fn load(path: &Path) -> Self {
        let mut settings = Self::default();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no settings file yet, using defaults");
            return settings;
        }

        match SettingsDocument::load(path) {
            Ok(document) => settings.apply(&document),
            Err(e) => tracing::warn!(error = %e, "could not read settings, using defaults"),
        }
        settings
    }

    pub fn apply(&mut self, document: &SettingsDocument) {
        document.read_section(&mut self.letters);
        document.read_section(&mut self.options);
        document.read_section(&mut self.numbers);
        document.read_section(&mut self.fonts);
        document.read_section(&mut self.word_list);
        document.read_section(&mut self.date_time);
    }

    pub fn write_to(&self, document: &mut SettingsDocument) {
        document.write_section(&self.letters);
        document.write_section(&self.options);
        document.write_section(&self.numbers);
        document.write_section(&self.fonts);
        document.write_section(&self.word_list);
        document.write_section(&self.date_time);
    }

    /// MARK:設定をファイルに保存する (知らないブロックはそのまま残す)
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut document = if path.exists() {
            SettingsDocument::load(path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "replacing unreadable settings file");
                SettingsDocument::default()
            })
        } else {
            SettingsDocument::default()
        };

        self.write_to(&mut document);
        document.save(path)?;
        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }
}

/// OSごとのデータ保存用ディレクトリ (取得できなければカレントディレクトリ)
pub fn data_dir() -> PathBuf {
    // "jp" (国), "Fukumoto0141" (組織名), "KANA_WIZ" (アプリ名)
    match ProjectDirs::from("jp", "Fukumoto0141", "KANA_WIZ") {
        Some(proj_dirs) => proj_dirs.data_dir().to_path_buf(),
        None => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(value: Value) -> Block {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn text_size_setters_clamp_and_keep_order() {
        let mut options = OptionsSettings::default();
        for x in [-100, -1, 0, 1, 3, 7, 10, 11, 1_000, i64::MIN, i64::MAX] {
            options.set_minimum_random_text_size(x);
            assert!((1..=10).contains(&options.minimum_random_text_size()));
            assert!(options.minimum_random_text_size() <= options.maximum_random_text_size());

            options.set_maximum_random_text_size(x);
            assert!((1..=10).contains(&options.maximum_random_text_size()));
            assert!(options.minimum_random_text_size() <= options.maximum_random_text_size());
        }
    }

    #[test]
    fn minimum_above_maximum_moves_the_maximum() {
        let mut options = OptionsSettings::default();
        options.set_maximum_random_text_size(3);
        options.set_minimum_random_text_size(8);
        assert_eq!(options.minimum_random_text_size(), 8);
        assert_eq!(options.maximum_random_text_size(), 8);

        options.set_maximum_random_text_size(2);
        assert_eq!(options.minimum_random_text_size(), 2);
        assert_eq!(options.maximum_random_text_size(), 2);
    }

    #[test]
    fn digit_setters_clamp() {
        let mut numbers = NumberSettings::default();
        for x in [-5, 0, 4, 9, 10, 11, 99, i64::MIN, i64::MAX] {
            numbers.set_digits_before_decimal(x);
            assert!(numbers.digits_before_decimal() <= 9);
            numbers.set_digits_after_decimal(x);
            assert!(numbers.digits_after_decimal() <= 10);
        }
        numbers.set_digits_before_decimal(12);
        assert_eq!(numbers.digits_before_decimal(), 9);
        numbers.set_digits_after_decimal(-3);
        assert_eq!(numbers.digits_after_decimal(), 0);
    }

    #[test]
    fn font_size_clamps() {
        let mut font = FontChoice::default();
        assert_eq!(font.size(), DEFAULT_FONT_SIZE);
        font.set_size(0.2);
        assert_eq!(font.size(), MIN_FONT_SIZE);
        font.set_size(500.0);
        assert_eq!(font.size(), MAX_FONT_SIZE);
        font.set_size(f32::NAN);
        assert_eq!(font.size(), DEFAULT_FONT_SIZE);
        font.set_size(f32::NEG_INFINITY);
        assert_eq!(font.size(), MIN_FONT_SIZE);
    }

    #[test]
    fn missing_font_file_falls_back_to_default() {
        let mut font = FontChoice::default();
        font.set_path("definitely/not/here.ttf");
        assert_eq!(font.path(), "");
    }

    #[test]
    fn font_under_current_dir_is_stored_relative() {
        let current = std::env::current_dir().unwrap();
        let font_file = tempfile::Builder::new()
            .prefix("kanawiz-font-")
            .suffix(".ttf")
            .tempfile_in(&current)
            .unwrap();
        let absolute = font_file.path().display().to_string();
        let file_name = font_file.path().file_name().unwrap().to_string_lossy().to_string();

        let mut font = FontChoice::default();
        font.set_path(&absolute);
        assert_eq!(font.path(), file_name);
        assert!(Path::new(font.path()).is_relative());
    }

    #[test]
    fn font_paths_use_forward_slashes() {
        let base = Path::new("C:/Users/me/kanawiz");
        assert_eq!(
            portable_path(r"C:\Users\me\kanawiz\fonts\gothic.ttf", Some(base)),
            "fonts/gothic.ttf"
        );
        assert_eq!(
            portable_path(r"D:\fonts\mincho.otf", Some(base)),
            "D:/fonts/mincho.otf"
        );
        assert_eq!(
            portable_path("/usr/share/fonts/a.ttc", Some(Path::new("/home/me/"))),
            "/usr/share/fonts/a.ttc"
        );
        assert_eq!(portable_path(r"fonts\a.ttf", None), "fonts/a.ttf");
    }

    #[test]
    fn letter_rows_toggle_and_ignore_out_of_range() {
        let mut letters = LetterSettings::default();
        assert!(letters.rows().iter().all(|&used| used));
        letters.toggle(3);
        assert!(!letters.is_using(3));
        letters.set_using(500, false);
        assert!(!letters.is_using(500));
        assert_eq!(letters.rows().len(), LETTER_ROWS.len());
    }

    #[test]
    fn letter_block_with_wrong_row_count_is_ignored() {
        let mut letters = LetterSettings::default();
        letters.read_block(&block(json!({ "use_letter": [false, false] })));
        assert!(letters.rows().iter().all(|&used| used));
    }

    #[test]
    fn letter_block_accepts_hand_written_values() {
        let mut values = vec![json!(true); LETTER_ROWS.len()];
        values[0] = json!("false");
        values[1] = json!({ "letters": "ka ki ku ke ko", "value": false });
        let mut letters = LetterSettings::default();
        letters.read_block(&block(json!({ "use_letter": values })));
        assert!(!letters.is_using(0));
        assert!(!letters.is_using(1));
        assert!(letters.is_using(2));
    }

    #[test]
    fn unparsable_fields_keep_previous_values() {
        let mut numbers = NumberSettings::default();
        numbers.set_digits_before_decimal(5);
        numbers.set_minus_allowed(true);
        numbers.read_block(&block(json!({
            "digits_before_decimal": "lots",
            "digits_after_decimal": "3",
            "allow_minus": 17
        })));
        assert_eq!(numbers.digits_before_decimal(), 5);
        assert_eq!(numbers.digits_after_decimal(), 3);
        assert!(numbers.minus_allowed());
    }

    #[test]
    fn loaded_values_are_clamped() {
        let mut options = OptionsSettings::default();
        options.read_block(&block(json!({
            "minimum_random_text_size": 40,
            "maximum_random_text_size": -2
        })));
        assert!(options.minimum_random_text_size() <= options.maximum_random_text_size());
        assert!((1..=10).contains(&options.minimum_random_text_size()));
        assert!((1..=10).contains(&options.maximum_random_text_size()));

        let mut numbers = NumberSettings::default();
        numbers.read_block(&block(json!({ "digits_before_decimal": 30 })));
        assert_eq!(numbers.digits_before_decimal(), 9);
    }

    fn round_trip<S: SettingsSection + Default + PartialEq + std::fmt::Debug>(section: &S) {
        let mut document = SettingsDocument::default();
        document.write_section(section);
        let mut fresh = S::default();
        document.read_section(&mut fresh);
        assert_eq!(&fresh, section);
    }

    #[test]
    fn sections_round_trip_through_a_document() {
        let mut letters = LetterSettings::default();
        letters.set_using(0, false);
        letters.set_using(26, false);
        round_trip(&letters);

        let mut options = OptionsSettings::default();
        options.set_maximum_random_text_size(9);
        options.set_minimum_random_text_size(4);
        options.set_linear_word_learning(true);
        round_trip(&options);

        let mut numbers = NumberSettings::default();
        numbers.set_digits_before_decimal(7);
        numbers.set_digits_after_decimal(3);
        numbers.set_minus_allowed(true);
        round_trip(&numbers);

        let font_file = tempfile::Builder::new().suffix(".ttf").tempfile().unwrap();
        let mut fonts = FontSettings::default();
        fonts.kana.set_path(&font_file.path().display().to_string());
        fonts.kana.set_size(33.5);
        fonts.kanji.set_size(120.0);
        assert!(!fonts.kana.path().is_empty());
        round_trip(&fonts);

        let mut date_time = DateTimeSettings::default();
        date_time.set_use_kanji(false);
        round_trip(&date_time);
    }

    #[test]
    fn word_list_path_round_trips_and_resets_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, r#"{"item": [{"romaji": "umi", "hiragana": "うみ"}]}"#).unwrap();

        let mut word_list = WordListSettings::default();
        word_list.set_path(&path.display().to_string());
        assert_eq!(word_list.words().len(), 1);
        round_trip(&word_list);

        let empty = dir.path().join("empty.json");
        fs::write(&empty, r#"{"item": []}"#).unwrap();
        word_list.set_path(&empty.display().to_string());
        assert_eq!(word_list.path(), "");

        word_list.set_path(&dir.path().join("missing.json").display().to_string());
        assert_eq!(word_list.path(), "");
        assert!(word_list.words().is_empty());
    }

    #[test]
    fn save_replaces_blocks_and_keeps_unknown_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut document = SettingsDocument::default();
        document.replace_block("custom", block(json!({ "keep": "me" })));
        document.replace_block(
            NumberSettings::TAG,
            block(json!({ "digits_before_decimal": 1, "stale": true })),
        );
        document.save(&path).unwrap();

        let mut settings = Settings::default();
        settings.numbers.set_digits_before_decimal(6);
        settings.save(&path).unwrap();

        let saved = SettingsDocument::load(&path).unwrap();
        assert_eq!(saved.block("custom").unwrap()["keep"], "me");
        let numbers = saved.block(NumberSettings::TAG).unwrap();
        assert_eq!(numbers["digits_before_decimal"], 6);
        assert!(numbers.get("stale").is_none());

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn broken_or_missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("none.json")), Settings::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "<config/>").unwrap();
        assert_eq!(Settings::load(&broken), Settings::default());

        let array = dir.path().join("array.json");
        fs::write(&array, "[1, 2]").unwrap();
        assert!(matches!(
            SettingsDocument::load(&array),
            Err(StoreError::NotAnObject(_))
        ));
    }
}
