// ============================================
// src/numerals.rs
// 数字 → 日本語の読み方 (ひらがな) 変換
// ============================================

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::NumeralError;
use crate::settings::NumberSettings;

/// 小数点より前に扱える最大桁数 (億の位まで)
pub const MAX_INTEGER_DIGITS: usize = 9;

/// マイナス
pub const MINUS: &str = "マイナス";

/// ゼロの読み方 (れい, ぜろ)
pub const ZERO: &[&str] = &["れい", "ぜろ"];

/// 同じ数字に複数の読み方があるときの選び方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantPolicy {
    /// 候補から一様ランダムに選ぶ
    Random,
    /// 先頭の候補 (4 なら「よん」) を使う
    Preferred,
}

/// ある位の 1〜9 の読み方表
pub struct MagnitudeTable {
    pub name: &'static str,
    /// digits[n - 1] が数字 n の読み方候補
    pub digits: [&'static [&'static str]; 9],
    /// 候補の選び方
    pub policy: VariantPolicy,
    /// この位だけが 0 でも下の位を読むときに出す語 (万・億)
    pub bare_word: Option<&'static str>,
}

impl MagnitudeTable {
    /// 0 以外の数字の読み方を選ぶ
    pub fn pick<R: Rng + ?Sized>(&self, digit: u8, rng: &mut R) -> &'static str {
        let variants = self.digits[usize::from(digit - 1)];
        match self.policy {
            VariantPolicy::Preferred => variants[0],
            VariantPolicy::Random => variants.choose(rng).copied().unwrap_or(variants[0]),
        }
    }
}

pub static ONES: MagnitudeTable = MagnitudeTable {
    name: "ones",
    digits: [
        &["いち"],
        &["に"],
        &["さん"],
        &["し", "よん"],
        &["ご"],
        &["ろく"],
        &["なな", "しち"],
        &["はち"],
        &["きゅう", "く"],
    ],
    policy: VariantPolicy::Random,
    bare_word: None,
};

pub static TENS: MagnitudeTable = MagnitudeTable {
    name: "tens",
    digits: [
        &["じゅう"],
        &["にじゅう"],
        &["さんじゅう"],
        &["よんじゅう", "しじゅう"],
        &["ごじゅう"],
        &["ろくじゅう"],
        &["ななじゅう", "しちじゅう"],
        &["はちじゅう"],
        &["きゅうじゅう", "くじゅう"],
    ],
    policy: VariantPolicy::Preferred,
    bare_word: None,
};

pub static HUNDREDS: MagnitudeTable = MagnitudeTable {
    name: "hundreds",
    digits: [
        &["ひゃく"],
        &["にひゃく"],
        &["さんびゃく"],
        &["よんひゃく"],
        &["ごひゃく"],
        &["ろっぴゃく"],
        &["ななひゃく"],
        &["はっぴゃく"],
        &["きゅうひゃく"],
    ],
    policy: VariantPolicy::Preferred,
    bare_word: None,
};

pub static THOUSANDS: MagnitudeTable = MagnitudeTable {
    name: "thousands",
    digits: [
        &["いっせん"],
        &["にせん"],
        &["さんぜん"],
        &["よんせん"],
        &["ごせん"],
        &["ろくせん"],
        &["ななせん"],
        &["はっせん"],
        &["きゅうせん"],
    ],
    policy: VariantPolicy::Preferred,
    bare_word: None,
};

pub static TEN_THOUSANDS: MagnitudeTable = MagnitudeTable {
    name: "ten-thousands",
    digits: [
        &["いちまん"],
        &["にまん"],
        &["さんまん"],
        &["よんまん"],
        &["ごまん"],
        &["ろくまん"],
        &["ななまん"],
        &["はちまん"],
        &["きゅうまん"],
    ],
    policy: VariantPolicy::Preferred,
    bare_word: Some("まん"),
};

pub static HUNDRED_MILLIONS: MagnitudeTable = MagnitudeTable {
    name: "hundred-millions",
    digits: [
        &["いちおく"],
        &["におく"],
        &["さんおく"],
        &["よんおく"],
        &["ごおく"],
        &["ろくおく"],
        &["ななおく"],
        &["はちおく"],
        &["きゅうおく"],
    ],
    policy: VariantPolicy::Preferred,
    bare_word: Some("おく"),
};

/// 桁の位置 (1 = 一の位 … 9 = 億の位) ごとの表
fn table_for_position(position: usize) -> &'static MagnitudeTable {
    match position {
        9 => &HUNDRED_MILLIONS,
        8 | 4 => &THOUSANDS,
        7 | 3 => &HUNDREDS,
        6 | 2 => &TENS,
        5 => &TEN_THOUSANDS,
        _ => &ONES,
    }
}

/// 符号・整数部・小数部に分けた数字文字列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNumber<'a> {
    pub negative: bool,
    pub integer: &'a str,
    pub fraction: &'a str,
}

/// `[-]?[0-9]{1,9}(.[0-9]*)?` の形だけを受け付ける
pub fn parse(number: &str) -> Result<ParsedNumber<'_>, NumeralError> {
    let (negative, rest) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number),
    };
    let (integer, fraction) = rest.split_once('.').unwrap_or((rest, ""));

    if integer.is_empty() {
        return Err(NumeralError::Empty);
    }
    if let Some(c) = integer
        .chars()
        .chain(fraction.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(NumeralError::InvalidDigit(c));
    }
    if integer.len() > MAX_INTEGER_DIGITS {
        return Err(NumeralError::TooManyDigits(integer.len()));
    }

    Ok(ParsedNumber {
        negative,
        integer,
        fraction,
    })
}

/// 数字文字列をひらがなの読み方に変換する。小数部は読まない
pub fn reading<R: Rng + ?Sized>(number: &str, rng: &mut R) -> Result<String, NumeralError> {
    let parsed = parse(number)?;
    let digits: Vec<u8> = parsed.integer.bytes().map(|b| b - b'0').collect();

    // 0 (00 なども) は符号を付けず、位取りせずにゼロの読み方だけを返す
    if digits.iter().all(|&d| d == 0) {
        return Ok(ZERO.choose(rng).copied().unwrap_or(ZERO[0]).to_string());
    }

    let mut output = String::new();
    if parsed.negative {
        output.push_str(MINUS);
    }

    let length = digits.len();
    for (index, &digit) in digits.iter().enumerate() {
        let position = length - index;
        let table = table_for_position(position);
        tracing::trace!(table = table.name, digit, "reading digit");

        if digit != 0 {
            output.push_str(table.pick(digit, rng));
        } else if let Some(bare) = table.bare_word {
            // 万の位が 0 でも、十万〜千万の位が読まれていれば「まん」を付ける
            if group_has_digits(&digits, position) {
                output.push_str(bare);
            }
        }
    }

    Ok(output)
}

/// 万・億の区切りより上 (同じ4桁グループ内) に 0 以外の数字があるか
fn group_has_digits(digits: &[u8], position: usize) -> bool {
    (position + 1..=position + 3)
        .filter(|&p| p <= digits.len())
        .any(|p| digits[digits.len() - p] != 0)
}

/// 設定に従ってランダムな数字文字列を作る (例: "-4051", "12.07")
pub fn random_number<R: Rng + ?Sized>(settings: &NumberSettings, rng: &mut R) -> String {
    let before = settings.digits_before_decimal();
    let mut number = if before == 0 {
        "0".to_string()
    } else {
        rng.random_range(0..10u64.pow(before)).to_string()
    };

    let after = settings.digits_after_decimal();
    if after != 0 {
        let fraction = rng.random_range(0..10u64.pow(after));
        number.push_str(&format!(".{:0width$}", fraction, width = after as usize));
    }

    if settings.minus_allowed() && rng.random_bool(0.5) {
        number.insert(0, '-');
    }
    number
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn read(number: &str) -> String {
        reading(number, &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn zero_uses_a_zero_variant() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let phrase = reading("0", &mut rng).unwrap();
            assert!(ZERO.contains(&phrase.as_str()), "{phrase}");
        }
    }

    #[test]
    fn ten_and_hundred_have_no_leading_one() {
        assert_eq!(read("10"), "じゅう");
        assert_eq!(read("100"), "ひゃく");
        assert_eq!(read("1000"), "いっせん");
    }

    #[test]
    fn minus_prefixes_the_reading() {
        assert_eq!(read("-5"), "マイナスご");
        assert_eq!(read("-120"), "マイナスひゃくにじゅう");
    }

    #[test]
    fn negative_zero_reads_as_plain_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        for number in ["-0", "-00", "00", "-0.5"] {
            let phrase = reading(number, &mut rng).unwrap();
            assert!(ZERO.contains(&phrase.as_str()), "{number} => {phrase}");
        }
    }

    #[test]
    fn cascade_reads_every_position() {
        assert_eq!(read("25"), "にじゅうご");
        assert_eq!(read("305"), "さんびゃくご");
        assert_eq!(read("8600"), "はっせんろっぴゃく");
        assert_eq!(read("12345"), "いちまんにせんさんびゃくよんじゅうご");
    }

    #[test]
    fn four_prefers_yon_above_the_ones() {
        assert_eq!(read("40"), "よんじゅう");
        assert_eq!(read("400"), "よんひゃく");
        assert_eq!(read("4000"), "よんせん");
        assert_eq!(read("40000"), "よんまん");
    }

    #[test]
    fn ones_pick_randomly_among_variants() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(reading("4", &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("し") && seen.contains("よん"));
    }

    #[test]
    fn man_is_kept_when_its_digit_is_zero() {
        assert_eq!(read("100000"), "じゅうまん");
        assert_eq!(read("3020000"), "さんびゃくにまん");
        assert_eq!(read("10000000"), "いっせんまん");
    }

    #[test]
    fn oku_without_man_group() {
        assert_eq!(read("100000000"), "いちおく");
        assert_eq!(read("200000001"), "におくいち");
        assert_eq!(read("900010000"), "きゅうおくいちまん");
        assert_eq!(read("150000000"), "いちおくごせんまん");
    }

    #[test]
    fn fraction_is_ignored() {
        assert_eq!(read("12.75"), "じゅうに");
        assert_eq!(read("-3."), "マイナスさん");
    }

    #[test]
    fn malformed_input_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(reading("", &mut rng), Err(NumeralError::Empty));
        assert_eq!(reading("-", &mut rng), Err(NumeralError::Empty));
        assert_eq!(reading(".5", &mut rng), Err(NumeralError::Empty));
        assert_eq!(reading("1a", &mut rng), Err(NumeralError::InvalidDigit('a')));
        assert_eq!(
            reading("1234567890", &mut rng),
            Err(NumeralError::TooManyDigits(10))
        );
    }

    #[test]
    fn random_numbers_follow_settings() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut settings = NumberSettings::default();

        settings.set_digits_before_decimal(0);
        assert_eq!(random_number(&settings, &mut rng), "0");

        settings.set_digits_before_decimal(3);
        settings.set_digits_after_decimal(2);
        settings.set_minus_allowed(true);
        let mut saw_minus = false;
        for _ in 0..100 {
            let number = random_number(&settings, &mut rng);
            let parsed = parse(&number).unwrap();
            saw_minus |= parsed.negative;
            assert!(parsed.integer.len() <= 3);
            assert_eq!(parsed.fraction.len(), 2);
            assert!(reading(&number, &mut rng).is_ok());
        }
        assert!(saw_minus);
    }
}
