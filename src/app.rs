// ============================================
// src/app.rs
// アプリ全体の状態とキー入力の処理
// ============================================

use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::rngs::StdRng;

use std::path::{Path, PathBuf};

use crate::clock::{REFERENCE_FILE, RandomDate, RandomTime, ReferenceData};
use crate::fonts::{self, FONT_DIR};
use crate::kana_drill::{KanaDrill, NO_LETTERS_MESSAGE};
use crate::letters::{LETTER_ROWS, Script};
use crate::numerals;
use crate::settings::{CONFIG_FILE, FontChoice, Settings, normalize_font_path};
use crate::shortcuts::{Action, Shortcuts, View};
use crate::word_list::WordBrowser;

/// 設定ファイル・参照データ・フォントフォルダの場所
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub settings: PathBuf,
    pub reference: PathBuf,
    pub fonts: PathBuf,
}

impl AppPaths {
    /// データディレクトリ基準のパス。設定ファイルだけは個別に指定できる
    pub fn in_dir(data_dir: &Path, settings: Option<PathBuf>) -> Self {
        Self {
            settings: settings.unwrap_or_else(|| data_dir.join(CONFIG_FILE)),
            reference: data_dir.join(REFERENCE_FILE),
            fonts: data_dir.join(FONT_DIR),
        }
    }
}

/// Options 画面の項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionItem {
    MinimumLength,
    MaximumLength,
    DigitsBeforeDecimal,
    DigitsAfterDecimal,
    AllowMinus,
    LinearWordLearning,
    UseKanji,
    KanaFont,
    KanaFontSize,
    KanjiFont,
    KanjiFontSize,
}

impl OptionItem {
    pub const ALL: [OptionItem; 11] = [
        OptionItem::MinimumLength,
        OptionItem::MaximumLength,
        OptionItem::DigitsBeforeDecimal,
        OptionItem::DigitsAfterDecimal,
        OptionItem::AllowMinus,
        OptionItem::LinearWordLearning,
        OptionItem::UseKanji,
        OptionItem::KanaFont,
        OptionItem::KanaFontSize,
        OptionItem::KanjiFont,
        OptionItem::KanjiFontSize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OptionItem::MinimumLength => "Kana drill min length",
            OptionItem::MaximumLength => "Kana drill max length",
            OptionItem::DigitsBeforeDecimal => "Digits before decimal",
            OptionItem::DigitsAfterDecimal => "Digits after decimal",
            OptionItem::AllowMinus => "Allow minus",
            OptionItem::LinearWordLearning => "Linear word learning",
            OptionItem::UseKanji => "Time & date in kanji",
            OptionItem::KanaFont => "Kana font",
            OptionItem::KanaFontSize => "Kana font size",
            OptionItem::KanjiFont => "Kanji font",
            OptionItem::KanjiFontSize => "Kanji font size",
        }
    }
}

/// 数字ドリルの1問
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberQuiz {
    pub number: String,
    pub reading: String,
}

/// 単語画面で表示するかどうか (訳・ローマ字・かな・漢字)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordReveal {
    pub translation: bool,
    pub romaji: bool,
    pub kana: bool,
    pub kanji: bool,
}

impl Default for WordReveal {
    fn default() -> Self {
        Self {
            translation: true,
            romaji: false,
            kana: false,
            kanji: false,
        }
    }
}

/// アプリ全体の状態を管理する
pub struct AppState {
    pub settings: Settings,
    pub paths: AppPaths,
    pub reference: ReferenceData,
    pub shortcuts: Shortcuts,
    /// Options で選べるフォント ("" は標準フォント)
    pub font_candidates: Vec<String>,
    rng: StdRng,

    pub view: View,
    pub should_quit: bool,
    /// 画面下部に出す一言 (保存しました 等)
    pub status: Option<String>,

    // かなドリル
    pub kana_drill: Option<KanaDrill>,
    pub kana_script: Script,
    pub kana_message: Option<&'static str>,

    // 数字
    pub number_quiz: Option<NumberQuiz>,
    pub show_number: bool,
    pub show_reading: bool,

    // 時刻・日付
    pub time_quiz: Option<RandomTime>,
    pub date_quiz: Option<RandomDate>,

    // 単語
    pub word_browser: WordBrowser,
    pub word_reveal: WordReveal,

    // 設定画面のカーソル
    pub letters_cursor: usize,
    pub options_cursor: usize,
}

impl AppState {
    /// AppState の初期化 (設定・参照データ・フォント一覧を読み込む)
    pub fn new(paths: AppPaths, start_view: View) -> Self {
        let settings = Settings::load(&paths.settings);
        let mut state = Self::from_parts(paths, settings, StdRng::from_os_rng());
        state.view = start_view;
        state
    }

    pub fn from_parts(paths: AppPaths, settings: Settings, rng: StdRng) -> Self {
        let reference = ReferenceData::load(&paths.reference);
        let font_candidates = std::iter::once(String::new())
            .chain(
                fonts::discover(&paths.fonts)
                    .iter()
                    .map(|path| normalize_font_path(&path.to_string_lossy()))
                    .filter(|path| !path.is_empty()),
            )
            .collect();

        let mut word_browser = WordBrowser::default();
        word_browser.reset(
            settings.options.linear_word_learning() && !settings.word_list.words().is_empty(),
        );

        Self {
            settings,
            paths,
            reference,
            shortcuts: Shortcuts::default(),
            font_candidates,
            rng,
            view: View::Kana,
            should_quit: false,
            status: None,
            kana_drill: None,
            kana_script: Script::default(),
            kana_message: None,
            number_quiz: None,
            show_number: true,
            show_reading: false,
            time_quiz: None,
            date_quiz: None,
            word_browser,
            word_reveal: WordReveal::default(),
            letters_cursor: 0,
            options_cursor: 0,
        }
    }

    // MARK:キー入力
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.view = self.view.next();
                return;
            }
            KeyCode::BackTab => {
                self.view = self.view.previous();
                return;
            }
            KeyCode::F(2) => {
                self.save();
                return;
            }
            _ => {}
        }

        if let Some(action) = self.shortcuts.resolve(self.view, code) {
            tracing::debug!(view = ?self.view, ?action, "shortcut");
            self.perform(action);
        }
    }

    fn perform(&mut self, action: Action) {
        match (self.view, action) {
            (View::Kana, Action::Generate) => self.generate_kana(),
            (View::Kana, Action::ShowRomaji) => self.kana_script = Script::Romaji,
            (View::Kana, Action::ShowHiragana) => self.kana_script = Script::Hiragana,
            (View::Kana, Action::ShowKatakana) => self.kana_script = Script::Katakana,

            (View::Numbers, Action::Generate) => self.generate_number(),
            (View::Numbers, Action::ToggleFirstReveal) => self.show_number = !self.show_number,
            (View::Numbers, Action::ToggleSecondReveal) => self.show_reading = !self.show_reading,

            (View::Time, Action::Generate) => {
                self.time_quiz = Some(RandomTime::generate(&mut self.rng));
            }
            (View::Date, Action::Generate) => {
                self.date_quiz = Some(RandomDate::generate(&mut self.rng));
            }

            (View::Words, Action::Generate) => self.advance_word(),
            (View::Words, Action::PreviousWord) => {
                let len = self.settings.word_list.words().len();
                self.word_browser.previous(len);
            }
            (View::Words, Action::NextWord) => {
                let len = self.settings.word_list.words().len();
                self.word_browser.next(len);
            }
            (View::Words, Action::ToggleFirstReveal) => {
                self.word_reveal.translation = !self.word_reveal.translation;
            }
            (View::Words, Action::ToggleSecondReveal) => {
                self.word_reveal.romaji = !self.word_reveal.romaji;
            }
            (View::Words, Action::ToggleThirdReveal) => {
                self.word_reveal.kana = !self.word_reveal.kana;
            }
            (View::Words, Action::ToggleFourthReveal) => {
                self.word_reveal.kanji = !self.word_reveal.kanji;
            }

            (View::Letters, Action::CursorUp) => {
                self.letters_cursor = step(self.letters_cursor, LETTER_ROWS.len(), -1);
            }
            (View::Letters, Action::CursorDown) => {
                self.letters_cursor = step(self.letters_cursor, LETTER_ROWS.len(), 1);
            }
            (View::Letters, Action::Toggle) => self.settings.letters.toggle(self.letters_cursor),

            (View::Options, Action::CursorUp) => {
                self.options_cursor = step(self.options_cursor, OptionItem::ALL.len(), -1);
            }
            (View::Options, Action::CursorDown) => {
                self.options_cursor = step(self.options_cursor, OptionItem::ALL.len(), 1);
            }
            (View::Options, Action::Toggle) => self.adjust_option(self.selected_option(), 1),
            (View::Options, Action::Decrease) => self.adjust_option(self.selected_option(), -1),
            (View::Options, Action::Increase) => self.adjust_option(self.selected_option(), 1),

            (view, action) => tracing::debug!(?view, ?action, "action not handled here"),
        }
    }

    // MARK:お題の生成
    fn generate_kana(&mut self) {
        let options = &self.settings.options;
        self.kana_drill = KanaDrill::generate(
            options.minimum_random_text_size(),
            options.maximum_random_text_size(),
            self.settings.letters.rows(),
            &mut self.rng,
        );
        self.kana_message = self.kana_drill.is_none().then_some(NO_LETTERS_MESSAGE);
        if let Some(drill) = &self.kana_drill {
            tracing::debug!(length = drill.len(), "kana drill drawn");
        }
    }

    /// 現在の表記で描いたかなドリル (未生成なら None)
    pub fn kana_text(&self) -> Option<String> {
        match (&self.kana_drill, self.kana_message) {
            (_, Some(message)) => Some(message.to_string()),
            (Some(drill), None) => Some(drill.render(self.kana_script)),
            (None, None) => None,
        }
    }

    fn generate_number(&mut self) {
        let number = numerals::random_number(&self.settings.numbers, &mut self.rng);
        match numerals::reading(&number, &mut self.rng) {
            Ok(reading) => self.number_quiz = Some(NumberQuiz { number, reading }),
            Err(e) => {
                tracing::error!(%number, error = %e, "generated number could not be read");
                self.status = Some(format!("Could not read {number}: {e}"));
            }
        }
    }

    /// 線形学習なら次の単語、そうでなければ別の単語をランダムに
    fn advance_word(&mut self) {
        let len = self.settings.word_list.words().len();
        if len == 0 {
            self.status = Some("No word list loaded".to_string());
            return;
        }
        if self.settings.options.linear_word_learning() {
            self.word_browser.next(len);
        } else {
            self.word_browser.random(len, &mut self.rng);
        }
    }

    // MARK:設定の変更
    pub fn selected_option(&self) -> OptionItem {
        OptionItem::ALL[self.options_cursor.min(OptionItem::ALL.len() - 1)]
    }

    pub fn adjust_option(&mut self, item: OptionItem, delta: i64) {
        let settings = &mut self.settings;
        match item {
            OptionItem::MinimumLength => {
                let current = settings.options.minimum_random_text_size() as i64;
                settings.options.set_minimum_random_text_size(current + delta);
            }
            OptionItem::MaximumLength => {
                let current = settings.options.maximum_random_text_size() as i64;
                settings.options.set_maximum_random_text_size(current + delta);
            }
            OptionItem::DigitsBeforeDecimal => {
                let current = i64::from(settings.numbers.digits_before_decimal());
                settings.numbers.set_digits_before_decimal(current + delta);
            }
            OptionItem::DigitsAfterDecimal => {
                let current = i64::from(settings.numbers.digits_after_decimal());
                settings.numbers.set_digits_after_decimal(current + delta);
            }
            OptionItem::AllowMinus => {
                let allowed = settings.numbers.minus_allowed();
                settings.numbers.set_minus_allowed(!allowed);
            }
            OptionItem::LinearWordLearning => {
                let linear = !settings.options.linear_word_learning();
                settings.options.set_linear_word_learning(linear);
                let show_first = linear && !settings.word_list.words().is_empty();
                self.word_browser.reset(show_first);
            }
            OptionItem::UseKanji => {
                let use_kanji = settings.date_time.use_kanji();
                settings.date_time.set_use_kanji(!use_kanji);
            }
            OptionItem::KanaFont => cycle_font(&mut settings.fonts.kana, &self.font_candidates, delta),
            OptionItem::KanjiFont => {
                cycle_font(&mut settings.fonts.kanji, &self.font_candidates, delta);
            }
            OptionItem::KanaFontSize => {
                let size = settings.fonts.kana.size();
                settings.fonts.kana.set_size(size + delta as f32);
            }
            OptionItem::KanjiFontSize => {
                let size = settings.fonts.kanji.size();
                settings.fonts.kanji.set_size(size + delta as f32);
            }
        }
    }

    /// Options 画面に出す現在値
    pub fn option_value(&self, item: OptionItem) -> String {
        let settings = &self.settings;
        match item {
            OptionItem::MinimumLength => settings.options.minimum_random_text_size().to_string(),
            OptionItem::MaximumLength => settings.options.maximum_random_text_size().to_string(),
            OptionItem::DigitsBeforeDecimal => settings.numbers.digits_before_decimal().to_string(),
            OptionItem::DigitsAfterDecimal => settings.numbers.digits_after_decimal().to_string(),
            OptionItem::AllowMinus => on_off(settings.numbers.minus_allowed()),
            OptionItem::LinearWordLearning => on_off(settings.options.linear_word_learning()),
            OptionItem::UseKanji => on_off(settings.date_time.use_kanji()),
            OptionItem::KanaFont => font_label(&settings.fonts.kana),
            OptionItem::KanjiFont => font_label(&settings.fonts.kanji),
            OptionItem::KanaFontSize => format!("{:.1}", settings.fonts.kana.size()),
            OptionItem::KanjiFontSize => format!("{:.1}", settings.fonts.kanji.size()),
        }
    }

    /// MARK:設定を保存する
    pub fn save(&mut self) {
        match self.settings.save(&self.paths.settings) {
            Ok(()) => self.status = Some("Settings saved".to_string()),
            Err(e) => {
                tracing::error!(error = %e, "could not save settings");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }
}

/// カーソルを端で止めずに一周させる
fn step(cursor: usize, len: usize, delta: i64) -> usize {
    if len == 0 {
        return 0;
    }
    (cursor as i64 + delta).rem_euclid(len as i64) as usize
}

fn cycle_font(font: &mut FontChoice, candidates: &[String], delta: i64) {
    if candidates.is_empty() {
        return;
    }
    let current = candidates
        .iter()
        .position(|candidate| candidate == font.path())
        .unwrap_or(0);
    let next = step(current, candidates.len(), delta);
    font.set_path(&candidates[next]);
}

fn font_label(font: &FontChoice) -> String {
    if font.path().is_empty() {
        "(default)".to_string()
    } else {
        font.path().to_string()
    }
}

fn on_off(value: bool) -> String {
    let label = if value { "on" } else { "off" };
    label.to_string()
}
