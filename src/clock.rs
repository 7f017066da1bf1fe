// ============================================
// src/clock.rs
// 月・日・時の参照データと、ランダムな時刻・日付のお題
// ============================================

use chrono::NaiveDate;
use rand::Rng;
use serde::Deserialize;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::StoreError;
use crate::numerals::{ONES, TENS};

/// 参照データファイル名
pub const REFERENCE_FILE: &str = "date_and_time.json";

/// 分の一の位の読み (1〜9) と、ちょうど十の位のときの「じゅっ」
const MINUTE_STEMS: [&str; 10] = [
    "いっ", "に", "さん", "よん", "ご", "ろっ", "なな", "はっ", "きゅう", "じゅっ",
];

/// 30分の別の言い方
pub const HALF_PAST: &str = "はん";

/// 「分」(ふん / ぷん / 分)
const MINUTE_HIRAGANA: [&str; 2] = ["ふん", "ぷん"];
const MINUTE_KANJI: &str = "分";

/// 午前・午後
pub const MORNING: &str = "ごぜん";
pub const EVENING: &str = "ごご";

const KANJI_DIGITS: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];

const MONTH_KANA: [&str; 12] = [
    "いちがつ", "にがつ", "さんがつ", "しがつ", "ごがつ", "ろくがつ",
    "しちがつ", "はちがつ", "くがつ", "じゅうがつ", "じゅういちがつ", "じゅうにがつ",
];

const DAY_KANA: [&str; 31] = [
    "ついたち", "ふつか", "みっか", "よっか", "いつか", "むいか", "なのか", "ようか",
    "ここのか", "とおか", "じゅういちにち", "じゅうににち", "じゅうさんにち", "じゅうよっか",
    "じゅうごにち", "じゅうろくにち", "じゅうしちにち", "じゅうはちにち", "じゅうくにち",
    "はつか", "にじゅういちにち", "にじゅうににち", "にじゅうさんにち", "にじゅうよっか",
    "にじゅうごにち", "にじゅうろくにち", "にじゅうしちにち", "にじゅうはちにち",
    "にじゅうくにち", "さんじゅうにち", "さんじゅういちにち",
];

const HOUR_KANA: [&str; 24] = [
    "いちじ", "にじ", "さんじ", "よじ", "ごじ", "ろくじ", "しちじ", "はちじ", "くじ",
    "じゅうじ", "じゅういちじ", "じゅうにじ", "じゅうさんじ", "じゅうよじ", "じゅうごじ",
    "じゅうろくじ", "じゅうしちじ", "じゅうはちじ", "じゅうくじ", "にじゅうじ",
    "にじゅういちじ", "にじゅうにじ", "にじゅうさんじ", "にじゅうよじ",
];

/// 1〜99 を漢数字にする (例: 24 → 二十四)
fn kanji_number(value: u32) -> String {
    let tens = value / 10;
    let ones = value % 10;
    let mut output = String::new();
    if tens > 1 {
        output.push_str(KANJI_DIGITS[(tens - 1) as usize]);
    }
    if tens > 0 {
        output.push('十');
    }
    if ones > 0 {
        output.push_str(KANJI_DIGITS[(ones - 1) as usize]);
    }
    output
}

/// 月・日・時の1つ分の表記
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeUnit {
    pub kana: String,
    pub kanji: String,
}

impl TimeUnit {
    pub fn text(&self, use_kanji: bool) -> &str {
        if use_kanji { &self.kanji } else { &self.kana }
    }
}

/// ファイル上の1項目: { "value": 3, "kana": "...", "kanji": "..." }
#[derive(Debug, Deserialize)]
struct UnitRecord {
    value: u32,
    #[serde(default)]
    kana: String,
    #[serde(default)]
    kanji: String,
}

#[derive(Debug, Default, Deserialize)]
struct ReferenceDocument {
    #[serde(default)]
    month: Vec<UnitRecord>,
    #[serde(default)]
    day: Vec<UnitRecord>,
    #[serde(default)]
    hour: Vec<UnitRecord>,
}

/// 月 (1〜12)・日 (1〜31)・時 (1〜24) の読み方表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    months: BTreeMap<u32, TimeUnit>,
    days: BTreeMap<u32, TimeUnit>,
    hours: BTreeMap<u32, TimeUnit>,
}

impl Default for ReferenceData {
    /// 組み込みの表
    fn default() -> Self {
        let build = |kana: &[&str], suffix: &str| -> BTreeMap<u32, TimeUnit> {
            kana.iter()
                .zip(1u32..)
                .map(|(kana, value)| {
                    let unit = TimeUnit {
                        kana: kana.to_string(),
                        kanji: format!("{}{}", kanji_number(value), suffix),
                    };
                    (value, unit)
                })
                .collect()
        };

        Self {
            months: build(&MONTH_KANA, "月"),
            days: build(&DAY_KANA, "日"),
            hours: build(&HOUR_KANA, "時"),
        }
    }
}

impl ReferenceData {
    /// MARK:参照データを読み込む (読めなければ組み込みの表のまま)
    pub fn load(path: &Path) -> Self {
        let mut data = Self::default();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no reference data file, using built-in tables");
            return data;
        }
        if let Err(e) = data.merge_file(path) {
            tracing::warn!(error = %e, "could not read reference data, using built-in tables");
        }
        data
    }

    /// ファイルにある項目だけを上書きする
    pub fn merge_file(&mut self, path: &Path) -> Result<(), StoreError> {
        let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
        let document: ReferenceDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::json(path, e))?;

        for (records, target) in [
            (document.month, &mut self.months),
            (document.day, &mut self.days),
            (document.hour, &mut self.hours),
        ] {
            for record in records {
                target.insert(
                    record.value,
                    TimeUnit {
                        kana: record.kana,
                        kanji: record.kanji,
                    },
                );
            }
        }
        Ok(())
    }

    pub fn month(&self, value: u32) -> Option<&TimeUnit> {
        self.months.get(&value)
    }

    pub fn day(&self, value: u32) -> Option<&TimeUnit> {
        self.days.get(&value)
    }

    pub fn hour(&self, value: u32) -> Option<&TimeUnit> {
        self.hours.get(&value)
    }
}

/// 12時間表示のときの午前・午後
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    pub fn label(self) -> &'static str {
        match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        }
    }

    pub fn japanese(self) -> &'static str {
        match self {
            Period::Am => MORNING,
            Period::Pm => EVENING,
        }
    }
}

/// ランダムな時刻のお題
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomTime {
    pub hour: u32,
    pub minute: u32,
    pub period: Option<Period>,
}

impl RandomTime {
    /// 半々で 12時間表示 (1〜12時 + 午前/午後) か 24時間表示 (1〜24時)。分は 1〜59
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (hour, period) = if rng.random_bool(0.5) {
            let period = if rng.random_bool(0.5) { Period::Am } else { Period::Pm };
            (rng.random_range(1..=12), Some(period))
        } else {
            (rng.random_range(1..=24), None)
        };
        let minute = rng.random_range(1..=59);
        Self {
            hour,
            minute,
            period,
        }
    }

    /// 例: "09:05 AM", "17:30"
    pub fn standard(&self) -> String {
        match self.period {
            Some(period) => format!("{:02}:{:02} {}", self.hour, self.minute, period.label()),
            None => format!("{:02}:{:02}", self.hour, self.minute),
        }
    }

    /// 例: "ごぜん くじ ごふん"
    pub fn japanese(&self, reference: &ReferenceData, use_kanji: bool) -> String {
        let hour = reference
            .hour(self.hour)
            .map(|unit| unit.text(use_kanji).to_string())
            .unwrap_or_else(|| format!("{}時", self.hour));

        let mut parts = Vec::new();
        if let Some(period) = self.period {
            parts.push(period.japanese().to_string());
        }
        parts.push(hour);
        parts.push(minute_phrase(self.minute, use_kanji));
        parts.join(" ")
    }
}

/// 分の読み方。範囲外の値は 1〜59 に丸める。1,3,6,8,0 で終わるときは「ぷん」
fn minute_phrase(minute: u32, use_kanji: bool) -> String {
    let minute = minute.clamp(1, 59);
    let ones = minute % 10;
    let tens = minute / 10;

    let suffix = if use_kanji {
        MINUTE_KANJI
    } else if matches!(ones, 0 | 1 | 3 | 6 | 8) {
        MINUTE_HIRAGANA[1]
    } else {
        MINUTE_HIRAGANA[0]
    };

    let mut phrase = String::new();
    if ones != 0 && minute > 10 {
        phrase.push_str(TENS.digits[(tens - 1) as usize][0]);
    } else if minute > 10 {
        // ちょうど何十分: 4 は「し」ではなく「よん」
        let variants = ONES.digits[(tens - 1) as usize];
        let word = if tens == 4 { "よん" } else { variants[0] };
        phrase.push_str(word);
    }

    let stem = if ones == 0 { 9 } else { ones - 1 };
    phrase.push_str(MINUTE_STEMS[stem as usize]);
    phrase.push_str(suffix);

    if minute == 30 {
        phrase.push_str(" / ");
        phrase.push_str(HALF_PAST);
    }
    phrase
}

/// ランダムな日付のお題
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDate {
    pub month: u32,
    pub day: u32,
}

/// 閏年を含めた、その月の日数
fn days_in_month(month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(2024, month, day).is_some())
        .unwrap_or(28)
}

impl RandomDate {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let month = rng.random_range(1..=12);
        let day = rng.random_range(1..=days_in_month(month));
        Self { month, day }
    }

    /// 例: "03/14"
    pub fn standard(&self) -> String {
        format!("{:02}/{:02}", self.month, self.day)
    }

    /// 例: "さんがつ じゅうよっか"
    pub fn japanese(&self, reference: &ReferenceData, use_kanji: bool) -> String {
        let month = reference
            .month(self.month)
            .map(|unit| unit.text(use_kanji).to_string())
            .unwrap_or_else(|| format!("{}月", self.month));
        let day = reference
            .day(self.day)
            .map(|unit| unit.text(use_kanji).to_string())
            .unwrap_or_else(|| format!("{}日", self.day));
        format!("{month} {day}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn built_in_tables_are_complete() {
        let reference = ReferenceData::default();
        assert_eq!(reference.month(4).unwrap().kana, "しがつ");
        assert_eq!(reference.month(12).unwrap().kanji, "十二月");
        assert_eq!(reference.day(1).unwrap().kana, "ついたち");
        assert_eq!(reference.day(20).unwrap().kanji, "二十日");
        assert_eq!(reference.day(31).unwrap().kanji, "三十一日");
        assert_eq!(reference.hour(4).unwrap().kana, "よじ");
        assert_eq!(reference.hour(24).unwrap().kanji, "二十四時");
        assert!(reference.hour(25).is_none());
        assert!(reference.day(0).is_none());
    }

    #[test]
    fn reference_file_overrides_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REFERENCE_FILE);
        std::fs::write(
            &path,
            r#"{"hour": [{"value": 9, "kana": "くじ!", "kanji": "九時!"}], "month": []}"#,
        )
        .unwrap();

        let reference = ReferenceData::load(&path);
        assert_eq!(reference.hour(9).unwrap().kana, "くじ!");
        assert_eq!(reference.hour(10).unwrap().kana, "じゅうじ");
    }

    #[test]
    fn broken_reference_file_keeps_built_in_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REFERENCE_FILE);
        std::fs::write(&path, "{ broken").unwrap();
        assert_eq!(ReferenceData::load(&path), ReferenceData::default());
    }

    #[test]
    fn minute_phrases_use_euphonic_forms() {
        assert_eq!(minute_phrase(1, false), "いっぷん");
        assert_eq!(minute_phrase(2, false), "にふん");
        assert_eq!(minute_phrase(3, false), "さんぷん");
        assert_eq!(minute_phrase(4, false), "よんふん");
        assert_eq!(minute_phrase(6, false), "ろっぷん");
        assert_eq!(minute_phrase(8, false), "はっぷん");
        assert_eq!(minute_phrase(10, false), "じゅっぷん");
        assert_eq!(minute_phrase(11, false), "じゅういっぷん");
        assert_eq!(minute_phrase(15, false), "じゅうごふん");
        assert_eq!(minute_phrase(20, false), "にじゅっぷん");
        assert_eq!(minute_phrase(40, false), "よんじゅっぷん");
        assert_eq!(minute_phrase(45, false), "よんじゅうごふん");
        assert_eq!(minute_phrase(59, false), "ごじゅうきゅうふん");
    }

    #[test]
    fn out_of_range_minutes_are_clamped() {
        assert_eq!(minute_phrase(0, false), "いっぷん");
        assert_eq!(minute_phrase(60, false), "ごじゅうきゅうふん");
        assert_eq!(minute_phrase(100, true), "ごじゅうきゅう分");
        assert_eq!(minute_phrase(u32::MAX, false), minute_phrase(59, false));
    }

    #[test]
    fn thirty_offers_half_past() {
        assert_eq!(minute_phrase(30, false), "さんじゅっぷん / はん");
        assert_eq!(minute_phrase(30, true), "さんじゅっ分 / はん");
    }

    #[test]
    fn time_renders_both_notations() {
        let reference = ReferenceData::default();
        let morning = RandomTime {
            hour: 9,
            minute: 5,
            period: Some(Period::Am),
        };
        assert_eq!(morning.standard(), "09:05 AM");
        assert_eq!(morning.japanese(&reference, false), "ごぜん くじ ごふん");

        let evening = RandomTime {
            hour: 17,
            minute: 33,
            period: None,
        };
        assert_eq!(evening.standard(), "17:33");
        assert_eq!(evening.japanese(&reference, true), "十七時 さんじゅうさん分");
    }

    #[test]
    fn generated_times_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut saw_twelve_hour = false;
        let mut saw_twenty_four_hour = false;
        for _ in 0..300 {
            let time = RandomTime::generate(&mut rng);
            assert!((1..=59).contains(&time.minute));
            match time.period {
                Some(_) => {
                    saw_twelve_hour = true;
                    assert!((1..=12).contains(&time.hour));
                }
                None => {
                    saw_twenty_four_hour = true;
                    assert!((1..=24).contains(&time.hour));
                }
            }
        }
        assert!(saw_twelve_hour && saw_twenty_four_hour);
    }

    #[test]
    fn generated_dates_are_valid() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let date = RandomDate::generate(&mut rng);
            assert!(NaiveDate::from_ymd_opt(2024, date.month, date.day).is_some());
        }
        assert_eq!(days_in_month(2), 29);
        assert_eq!(days_in_month(4), 30);
        assert_eq!(days_in_month(12), 31);
    }

    #[test]
    fn date_renders_both_notations() {
        let reference = ReferenceData::default();
        let date = RandomDate { month: 3, day: 14 };
        assert_eq!(date.standard(), "03/14");
        assert_eq!(date.japanese(&reference, false), "さんがつ じゅうよっか");
        assert_eq!(date.japanese(&reference, true), "三月 十四日");
    }
}
