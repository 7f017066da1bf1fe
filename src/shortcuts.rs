// ============================================
// src/shortcuts.rs
// (画面, 操作) → キー の対応表
// ============================================

use crossterm::event::KeyCode;

use std::collections::HashMap;

/// 画面 (タブ) の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum View {
    Kana,
    Numbers,
    Time,
    Date,
    Words,
    Letters,
    Options,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Kana,
        View::Numbers,
        View::Time,
        View::Date,
        View::Words,
        View::Letters,
        View::Options,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Kana => "Kana",
            View::Numbers => "Numbers",
            View::Time => "Time",
            View::Date => "Date",
            View::Words => "Words",
            View::Letters => "Letters",
            View::Options => "Options",
        }
    }

    pub fn index(self) -> usize {
        View::ALL.iter().position(|&v| v == self).unwrap_or(0)
    }

    pub fn next(self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn previous(self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

/// ショートカットで呼び出せる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Generate,
    ShowRomaji,
    ShowHiragana,
    ShowKatakana,
    ToggleFirstReveal,
    ToggleSecondReveal,
    ToggleThirdReveal,
    ToggleFourthReveal,
    PreviousWord,
    NextWord,
    CursorUp,
    CursorDown,
    Toggle,
    Decrease,
    Increase,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Generate => "generate",
            Action::ShowRomaji => "latin",
            Action::ShowHiragana => "hiragana",
            Action::ShowKatakana => "katakana",
            Action::ToggleFirstReveal
            | Action::ToggleSecondReveal
            | Action::ToggleThirdReveal
            | Action::ToggleFourthReveal => "show/hide",
            Action::PreviousWord => "prev",
            Action::NextWord => "next",
            Action::CursorUp | Action::CursorDown => "move",
            Action::Toggle => "toggle",
            Action::Decrease => "less",
            Action::Increase => "more",
        }
    }
}

/// 画面ごとのショートカット表
#[derive(Debug, Clone)]
pub struct Shortcuts {
    keys: HashMap<(View, Action), KeyCode>,
}

impl Default for Shortcuts {
    fn default() -> Self {
        let mut keys = HashMap::new();

        keys.insert((View::Kana, Action::Generate), KeyCode::Enter);
        keys.insert((View::Kana, Action::ShowRomaji), KeyCode::Char('q'));
        keys.insert((View::Kana, Action::ShowHiragana), KeyCode::Char('w'));
        keys.insert((View::Kana, Action::ShowKatakana), KeyCode::Char('e'));

        keys.insert((View::Numbers, Action::Generate), KeyCode::Enter);
        keys.insert((View::Numbers, Action::ToggleFirstReveal), KeyCode::Char('1'));
        keys.insert((View::Numbers, Action::ToggleSecondReveal), KeyCode::Char('2'));

        keys.insert((View::Time, Action::Generate), KeyCode::Enter);
        keys.insert((View::Date, Action::Generate), KeyCode::Enter);

        keys.insert((View::Words, Action::Generate), KeyCode::Enter);
        keys.insert((View::Words, Action::PreviousWord), KeyCode::Left);
        keys.insert((View::Words, Action::NextWord), KeyCode::Right);
        keys.insert((View::Words, Action::ToggleFirstReveal), KeyCode::Char('1'));
        keys.insert((View::Words, Action::ToggleSecondReveal), KeyCode::Char('2'));
        keys.insert((View::Words, Action::ToggleThirdReveal), KeyCode::Char('3'));
        keys.insert((View::Words, Action::ToggleFourthReveal), KeyCode::Char('4'));

        for view in [View::Letters, View::Options] {
            keys.insert((view, Action::CursorUp), KeyCode::Up);
            keys.insert((view, Action::CursorDown), KeyCode::Down);
            keys.insert((view, Action::Toggle), KeyCode::Char(' '));
        }
        keys.insert((View::Options, Action::Decrease), KeyCode::Left);
        keys.insert((View::Options, Action::Increase), KeyCode::Right);

        Self { keys }
    }
}

impl Shortcuts {
    /// 押されたキーに対応する操作を探す
    pub fn resolve(&self, view: View, code: KeyCode) -> Option<Action> {
        self.keys
            .iter()
            .find(|((v, _), key)| *v == view && **key == code)
            .map(|((_, action), _)| *action)
    }

    /// 画面下部のヘルプ用 (例: "Enter: generate")
    pub fn describe(&self, view: View) -> Vec<String> {
        let mut bindings: Vec<(Action, String)> = self
            .keys
            .iter()
            .filter(|((v, _), _)| *v == view)
            .map(|((_, action), key)| (*action, key_label(*key)))
            .collect();
        bindings.sort_by_key(|(action, _)| *action);
        bindings
            .into_iter()
            .map(|(action, key)| format!("{key}: {}", action.label()))
            .collect()
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        other => format!("{other}"),
    }
}
