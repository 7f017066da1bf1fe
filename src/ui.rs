// ============================================
// src/ui.rs
// 画面の描画 (タブごと)
// ============================================

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::{AppState, OptionItem};
use crate::letters::{LETTER_ROWS, Script};
use crate::shortcuts::View;
use crate::word_list::EMPTY_SIGN;

/// 隠している値の代わりに出す記号
const HIDDEN: &str = "???";

pub fn ui(f: &mut Frame, app: &AppState) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("Kana Wiz !");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] タブ
            Constraint::Length(1), // [1] 空白
            Constraint::Min(1),    // [2] 本体
            Constraint::Length(1), // [3] ステータス
            Constraint::Length(1), // [4] キー操作のヘルプ
        ])
        .split(inner_area);

    // 0. タブ
    let tabs = Tabs::new(View::ALL.iter().map(|view| view.title()))
        .select(app.view.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).bold());
    f.render_widget(tabs, chunks[0]);

    // 2. 本体
    match app.view {
        View::Kana => draw_kana(f, app, chunks[2]),
        View::Numbers => draw_numbers(f, app, chunks[2]),
        View::Time => draw_time(f, app, chunks[2]),
        View::Date => draw_date(f, app, chunks[2]),
        View::Words => draw_words(f, app, chunks[2]),
        View::Letters => draw_letters(f, app, chunks[2]),
        View::Options => draw_options(f, app, chunks[2]),
    }

    // 3. ステータス
    if let Some(status) = &app.status {
        f.render_widget(
            Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow)),
            chunks[3],
        );
    }

    // 4. ヘルプ
    let mut help = app.shortcuts.describe(app.view);
    help.extend(["Tab: view", "F2: save", "Esc: quit"].map(String::from));
    f.render_widget(
        Paragraph::new(help.join("  ")).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

/// 上下中央に数行を置く
fn centered_lines(f: &mut Frame, lines: Vec<Line>, area: Rect) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let target = Rect::new(area.x, top, area.width, height);
    f.render_widget(Paragraph::new(lines).centered(), target);
}

fn hint(text: impl Into<String>) -> Line<'static> {
    Line::from(text.into()).style(Style::default().fg(Color::DarkGray))
}

fn big(text: String) -> Line<'static> {
    Line::from(text).style(Style::default().fg(Color::White).bold())
}

fn draw_kana(f: &mut Frame, app: &AppState, area: Rect) {
    let scripts: Vec<Span> = Script::ALL
        .iter()
        .map(|&script| {
            let style = if script == app.kana_script {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {} ", script.label()), style)
        })
        .collect();

    let body = match app.kana_text() {
        Some(text) => big(text),
        None => hint("Press Enter to draw letters"),
    };
    centered_lines(f, vec![Line::from(scripts), Line::default(), body], area);
}

fn draw_numbers(f: &mut Frame, app: &AppState, area: Rect) {
    let lines = match &app.number_quiz {
        Some(quiz) => vec![
            big(reveal(app.show_number, &quiz.number)),
            Line::default(),
            Line::from(reveal(app.show_reading, &quiz.reading)).fg(Color::Cyan),
        ],
        None => vec![hint("Press Enter to draw a number")],
    };
    centered_lines(f, lines, area);
}

fn draw_time(f: &mut Frame, app: &AppState, area: Rect) {
    let use_kanji = app.settings.date_time.use_kanji();
    let lines = match &app.time_quiz {
        Some(time) => vec![
            big(time.standard()),
            Line::default(),
            Line::from(time.japanese(&app.reference, use_kanji)).fg(Color::Cyan),
        ],
        None => vec![hint("Press Enter to draw a time")],
    };
    centered_lines(f, lines, area);
}

fn draw_date(f: &mut Frame, app: &AppState, area: Rect) {
    let use_kanji = app.settings.date_time.use_kanji();
    let lines = match &app.date_quiz {
        Some(date) => vec![
            big(date.standard()),
            Line::default(),
            Line::from(date.japanese(&app.reference, use_kanji)).fg(Color::Cyan),
        ],
        None => vec![hint("Press Enter to draw a date")],
    };
    centered_lines(f, lines, area);
}

fn draw_words(f: &mut Frame, app: &AppState, area: Rect) {
    let words = app.settings.word_list.words();
    if words.is_empty() {
        centered_lines(
            f,
            vec![
                hint("No word list loaded"),
                hint("Load one with: kanawiz wordlist <file>"),
            ],
            area,
        );
        return;
    }

    let Some((index, entry)) = app
        .word_browser
        .current()
        .and_then(|index| words.get(index).map(|entry| (index, entry)))
    else {
        centered_lines(f, vec![hint("Press Enter for a word")], area);
        return;
    };

    let reveal_state = app.word_reveal;
    let field = |label: &str, shown: bool, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
            Span::raw(reveal(shown, value)),
        ])
    };
    let lines = vec![
        hint(format!("{} / {}", index + 1, words.len())),
        Line::default(),
        field("Translation", reveal_state.translation, &entry.translation),
        field("Romaji", reveal_state.romaji, &entry.romaji),
        field(
            "Kana",
            reveal_state.kana,
            &format!("{} / {}", entry.hiragana, entry.katakana),
        ),
        field("Kanji", reveal_state.kanji, &entry.kanji),
    ];
    centered_lines(f, lines, area);
}

fn draw_letters(f: &mut Frame, app: &AppState, area: Rect) {
    let lines: Vec<Line> = LETTER_ROWS
        .iter()
        .enumerate()
        .map(|(row, letters)| {
            let mark = if app.settings.letters.is_using(row) { "[x]" } else { "[ ]" };
            let text = format!(
                "{mark} {:<20} {:<16} {}",
                letters.caption(),
                letters.hiragana.join(" "),
                letters.katakana.join(" ")
            );
            if row == app.letters_cursor {
                Line::from(text).style(Style::default().fg(Color::Black).bg(Color::White))
            } else {
                Line::from(text)
            }
        })
        .collect();

    // カーソルが見える位置までスクロールする
    let offset = app.letters_cursor.saturating_sub(area.height.saturating_sub(1) as usize);
    f.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), area);
}

fn draw_options(f: &mut Frame, app: &AppState, area: Rect) {
    let lines: Vec<Line> = OptionItem::ALL
        .iter()
        .enumerate()
        .map(|(index, &item)| {
            let text = format!("{:<24} < {} >", item.label(), app.option_value(item));
            if index == app.options_cursor {
                Line::from(text).style(Style::default().fg(Color::Black).bg(Color::White))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let offset = app.options_cursor.saturating_sub(area.height.saturating_sub(1) as usize);
    f.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), area);
}

fn reveal(shown: bool, value: &str) -> String {
    match (shown, value.is_empty()) {
        (false, _) => HIDDEN.to_string(),
        (true, true) => EMPTY_SIGN.to_string(),
        (true, false) => value.to_string(),
    }
}
