// ============================================
// src/letters.rs
// 五十音表 (ローマ字・ひらがな・カタカナ)
// ============================================

/// 表示する文字の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Script {
    #[default]
    Romaji,
    Hiragana,
    Katakana,
}

impl Script {
    pub const ALL: [Script; 3] = [Script::Romaji, Script::Hiragana, Script::Katakana];

    pub fn label(self) -> &'static str {
        match self {
            Script::Romaji => "Latin",
            Script::Hiragana => "Hiragana",
            Script::Katakana => "Katakana",
        }
    }
}

/// 表の1行 (例: か行)。3つの表記は同じ並び・同じ長さ
#[derive(Copy, Clone)]
pub struct LetterRow {
    pub romaji: &'static [&'static str],
    pub hiragana: &'static [&'static str],
    pub katakana: &'static [&'static str],
}

impl LetterRow {
    pub fn len(&self) -> usize {
        self.romaji.len()
    }

    pub fn get(&self, script: Script, column: usize) -> Option<&'static str> {
        let letters = match script {
            Script::Romaji => self.romaji,
            Script::Hiragana => self.hiragana,
            Script::Katakana => self.katakana,
        };
        letters.get(column).copied()
    }

    /// 設定ファイルに書く人間向けのラベル (例: "ka ki ku ke ko")
    pub fn caption(&self) -> String {
        self.romaji.join(" ")
    }
}

/// 表の中の1文字の位置。表記に依存しないので、表示を切り替えても同じ文字を指す
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetterId {
    pub row: usize,
    pub column: usize,
}

impl LetterId {
    pub fn render(self, script: Script) -> Option<&'static str> {
        LETTER_ROWS.get(self.row)?.get(script, self.column)
    }
}

/// 文字表 (清音 11行 → 濁音・半濁音 5行 → 拗音 11行)
pub const LETTER_ROWS: &[LetterRow] = &[
    // 清音
    LetterRow {
        romaji: &["a", "i", "u", "e", "o"],
        hiragana: &["あ", "い", "う", "え", "お"],
        katakana: &["ア", "イ", "ウ", "エ", "オ"],
    },
    LetterRow {
        romaji: &["ka", "ki", "ku", "ke", "ko"],
        hiragana: &["か", "き", "く", "け", "こ"],
        katakana: &["カ", "キ", "ク", "ケ", "コ"],
    },
    LetterRow {
        romaji: &["sa", "shi", "su", "se", "so"],
        hiragana: &["さ", "し", "す", "せ", "そ"],
        katakana: &["サ", "シ", "ス", "セ", "ソ"],
    },
    LetterRow {
        romaji: &["ta", "chi", "tsu", "te", "to"],
        hiragana: &["た", "ち", "つ", "て", "と"],
        katakana: &["タ", "チ", "ツ", "テ", "ト"],
    },
    LetterRow {
        romaji: &["na", "ni", "nu", "ne", "no"],
        hiragana: &["な", "に", "ぬ", "ね", "の"],
        katakana: &["ナ", "ニ", "ヌ", "ネ", "ノ"],
    },
    LetterRow {
        romaji: &["ha", "hi", "hu", "he", "ho"],
        hiragana: &["は", "ひ", "ふ", "へ", "ほ"],
        katakana: &["ハ", "ヒ", "フ", "ヘ", "ホ"],
    },
    LetterRow {
        romaji: &["ma", "mi", "mu", "me", "mo"],
        hiragana: &["ま", "み", "む", "め", "も"],
        katakana: &["マ", "ミ", "ム", "メ", "モ"],
    },
    LetterRow {
        romaji: &["ya", "yu", "yo"],
        hiragana: &["や", "ゆ", "よ"],
        katakana: &["ヤ", "ユ", "ヨ"],
    },
    LetterRow {
        romaji: &["ra", "ri", "ru", "re", "ro"],
        hiragana: &["ら", "り", "る", "れ", "ろ"],
        katakana: &["ラ", "リ", "ル", "レ", "ロ"],
    },
    LetterRow {
        romaji: &["wa", "wo"],
        hiragana: &["わ", "を"],
        katakana: &["ワ", "ヲ"],
    },
    LetterRow {
        romaji: &["n"],
        hiragana: &["ん"],
        katakana: &["ン"],
    },
    // 濁音・半濁音
    LetterRow {
        romaji: &["ga", "gi", "gu", "ge", "go"],
        hiragana: &["が", "ぎ", "ぐ", "げ", "ご"],
        katakana: &["ガ", "ギ", "グ", "ゲ", "ゴ"],
    },
    LetterRow {
        romaji: &["za", "ji", "zu", "ze", "zo"],
        hiragana: &["ざ", "じ", "ず", "ぜ", "ぞ"],
        katakana: &["ザ", "ジ", "ズ", "ゼ", "ゾ"],
    },
    LetterRow {
        romaji: &["da", "ji", "zu", "de", "do"],
        hiragana: &["だ", "ぢ", "づ", "で", "ど"],
        katakana: &["ダ", "ヂ", "ヅ", "デ", "ド"],
    },
    LetterRow {
        romaji: &["ba", "bi", "bu", "be", "bo"],
        hiragana: &["ば", "び", "ぶ", "べ", "ぼ"],
        katakana: &["バ", "ビ", "ブ", "ベ", "ボ"],
    },
    LetterRow {
        romaji: &["pa", "pi", "pu", "pe", "po"],
        hiragana: &["ぱ", "ぴ", "ぷ", "ぺ", "ぽ"],
        katakana: &["パ", "ピ", "プ", "ペ", "ポ"],
    },
    // 拗音
    LetterRow {
        romaji: &["kya", "kyu", "kyo"],
        hiragana: &["きゃ", "きゅ", "きょ"],
        katakana: &["キャ", "キュ", "キョ"],
    },
    LetterRow {
        romaji: &["sha", "shu", "sho"],
        hiragana: &["しゃ", "しゅ", "しょ"],
        katakana: &["シャ", "シュ", "ショ"],
    },
    LetterRow {
        romaji: &["cha", "chu", "cho"],
        hiragana: &["ちゃ", "ちゅ", "ちょ"],
        katakana: &["チャ", "チュ", "チョ"],
    },
    LetterRow {
        romaji: &["nya", "nyu", "nyo"],
        hiragana: &["にゃ", "にゅ", "にょ"],
        katakana: &["ニャ", "ニュ", "ニョ"],
    },
    LetterRow {
        romaji: &["hya", "hyu", "hyo"],
        hiragana: &["ひゃ", "ひゅ", "ひょ"],
        katakana: &["ヒャ", "ヒュ", "ヒョ"],
    },
    LetterRow {
        romaji: &["mya", "myu", "myo"],
        hiragana: &["みゃ", "みゅ", "みょ"],
        katakana: &["ミャ", "ミュ", "ミョ"],
    },
    LetterRow {
        romaji: &["rya", "ryu", "ryo"],
        hiragana: &["りゃ", "りゅ", "りょ"],
        katakana: &["リャ", "リュ", "リョ"],
    },
    LetterRow {
        romaji: &["gya", "gyu", "gyo"],
        hiragana: &["ぎゃ", "ぎゅ", "ぎょ"],
        katakana: &["ギャ", "ギュ", "ギョ"],
    },
    LetterRow {
        romaji: &["ja", "ju", "jo"],
        hiragana: &["じゃ", "じゅ", "じょ"],
        katakana: &["ジャ", "ジュ", "ジョ"],
    },
    LetterRow {
        romaji: &["bya", "byu", "byo"],
        hiragana: &["びゃ", "びゅ", "びょ"],
        katakana: &["ビャ", "ビュ", "ビョ"],
    },
    LetterRow {
        romaji: &["pya", "pyu", "pyo"],
        hiragana: &["ぴゃ", "ぴゅ", "ぴょ"],
        katakana: &["ピャ", "ピュ", "ピョ"],
    },
];

/// 有効な行の文字を表の順に平らに並べる
pub fn enabled_letters(enabled: &[bool]) -> Vec<LetterId> {
    LETTER_ROWS
        .iter()
        .enumerate()
        .filter(|(row, _)| enabled.get(*row).copied().unwrap_or(false))
        .flat_map(|(row, letters)| (0..letters.len()).map(move |column| LetterId { row, column }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_have_matching_shapes() {
        assert_eq!(LETTER_ROWS.len(), 27);
        for row in LETTER_ROWS {
            assert_eq!(row.romaji.len(), row.hiragana.len());
            assert_eq!(row.romaji.len(), row.katakana.len());
        }
    }

    #[test]
    fn enabled_letters_follow_the_mask() {
        let mut mask = vec![false; LETTER_ROWS.len()];
        mask[1] = true; // か行
        mask[10] = true; // ん

        let letters = enabled_letters(&mask);
        let romaji: Vec<_> = letters
            .iter()
            .map(|id| id.render(Script::Romaji).unwrap())
            .collect();
        assert_eq!(romaji, ["ka", "ki", "ku", "ke", "ko", "n"]);
    }

    #[test]
    fn short_mask_disables_missing_rows() {
        assert!(enabled_letters(&[]).is_empty());
        assert_eq!(enabled_letters(&[true]).len(), 5);
    }

    #[test]
    fn caption_lists_romaji() {
        assert_eq!(LETTER_ROWS[9].caption(), "wa wo");
    }
}
