// ============================================
// src/kana_drill.rs
// ランダムなかな文字列を作るドリル
// ============================================

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::letters::{LetterId, Script, enabled_letters};
use crate::settings::{MAX_RANDOM_TEXT_SIZE, MIN_RANDOM_TEXT_SIZE};

/// 有効な行がひとつもないときに表示するメッセージ
pub const NO_LETTERS_MESSAGE: &str = "No letters selected!";

/// 1回分のお題。文字は表の位置で持つので、表記を切り替えても同じ並びを再描画できる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanaDrill {
    letters: Vec<LetterId>,
}

impl KanaDrill {
    /// 長さ [min, max] のランダムな並びを作る。有効な行がなければ `None`
    pub fn generate<R: Rng + ?Sized>(
        min_length: usize,
        max_length: usize,
        enabled_rows: &[bool],
        rng: &mut R,
    ) -> Option<Self> {
        let pool = enabled_letters(enabled_rows);
        if pool.is_empty() {
            return None;
        }

        let (min_length, max_length) = normalize_bounds(min_length, max_length);
        let length = rng.random_range(min_length..=max_length);

        // プールは空でないので choose は必ず Some
        let letters = (0..length)
            .filter_map(|_| pool.choose(rng).copied())
            .collect();
        Some(Self { letters })
    }

    #[cfg(test)]
    pub fn letters(&self) -> &[LetterId] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// 指定した表記で空白区切りの文字列にする
    pub fn render(&self, script: Script) -> String {
        self.letters
            .iter()
            .filter_map(|id| id.render(script))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 範囲外の長さを丸め、逆転していれば入れ替える
fn normalize_bounds(min_length: usize, max_length: usize) -> (usize, usize) {
    let min_length = min_length.clamp(MIN_RANDOM_TEXT_SIZE, MAX_RANDOM_TEXT_SIZE);
    let max_length = max_length.clamp(MIN_RANDOM_TEXT_SIZE, MAX_RANDOM_TEXT_SIZE);
    if min_length > max_length {
        (max_length, min_length)
    } else {
        (min_length, max_length)
    }
}
