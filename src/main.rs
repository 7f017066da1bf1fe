// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::{Result, stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod app;
mod clock;
mod error;
mod fonts;
mod kana_drill;
mod letters;
mod logging;
mod numerals;
mod settings;
mod shortcuts;
mod ui;
mod word_list;

use app::{AppPaths, AppState};
use clock::{RandomDate, RandomTime, ReferenceData};
use kana_drill::{KanaDrill, NO_LETTERS_MESSAGE};
use letters::Script;
use settings::{FontChoice, Settings};
use shortcuts::View;

use clap::{Parser, Subcommand};
use console::style;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use ratatui::prelude::*;

// --------------------------------------------------
// コマンドライン
// --------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "kanawiz", version, about = "Kana, numbers, time and word drills in the terminal")]
struct Cli {
    /// 設定ファイル (省略時はデータディレクトリの config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// データディレクトリ (参照データ・フォント・ログ)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 練習画面を開く
    Run {
        #[arg(long, value_enum, default_value_t = View::Kana)]
        view: View,
    },
    /// 数字の読み方を表示する (例: -1500)
    Number {
        #[arg(allow_hyphen_values = true)]
        digits: String,
    },
    /// ランダムなかなを3つの表記で表示する
    Kana,
    /// ランダムな時刻を表示する
    Time,
    /// ランダムな日付を表示する
    Date,
    /// かな・漢字のフォントを選んで保存する
    Fonts {
        /// フォントを探すフォルダ
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// 単語リストを読み込んで保存する
    Wordlist { file: PathBuf },
}

// --------------------------------------------------
// メイン関数
// --------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(settings::data_dir);
    let _guard = logging::init_tracing(&data_dir);
    let paths = AppPaths::in_dir(&data_dir, cli.config);
    tracing::info!(config = %paths.settings.display(), "starting");

    match cli.command.unwrap_or(Command::Run { view: View::Kana }) {
        Command::Run { view } => {
            let mut terminal = setup_terminal()?;
            let result = run_app(&mut terminal, AppState::new(paths, view));
            restore_terminal(&mut terminal)?;
            result
        }
        Command::Number { digits } => print_number(&digits),
        Command::Kana => print_kana(&paths),
        Command::Time => print_time(&paths),
        Command::Date => print_date(&paths),
        Command::Fonts { dir } => choose_fonts(&paths, dir.as_deref()),
        Command::Wordlist { file } => load_word_list(&paths, &file),
    }
}

// --------------------------------------------------
// TUIセットアップと実行ループ
// --------------------------------------------------

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<impl Backend>) -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, mut app_state: AppState) -> Result<()> {
    while !app_state.should_quit {
        terminal.draw(|f| ui::ui(f, &app_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    app_state.handle_key(key.code);
                }
            }
        }
    }

    // 終了時に保存
    app_state.save();
    Ok(())
}

// --------------------------------------------------
// 1回だけ実行するコマンド
// --------------------------------------------------

fn print_number(digits: &str) -> Result<()> {
    match numerals::reading(digits, &mut rand::rng()) {
        Ok(reading) => println!("{} {}", style(digits).bold(), style(reading).cyan()),
        Err(e) => eprintln!("{} {e}", style("error:").red().bold()),
    }
    Ok(())
}

fn print_kana(paths: &AppPaths) -> Result<()> {
    let settings = Settings::load(&paths.settings);
    let options = &settings.options;
    let drill = KanaDrill::generate(
        options.minimum_random_text_size(),
        options.maximum_random_text_size(),
        settings.letters.rows(),
        &mut rand::rng(),
    );

    match drill {
        Some(drill) => {
            for script in Script::ALL {
                println!("{:<9} {}", style(script.label()).dim(), drill.render(script));
            }
        }
        None => println!("{}", style(NO_LETTERS_MESSAGE).yellow()),
    }
    Ok(())
}

fn print_time(paths: &AppPaths) -> Result<()> {
    let use_kanji = Settings::load(&paths.settings).date_time.use_kanji();
    let reference = ReferenceData::load(&paths.reference);
    let time = RandomTime::generate(&mut rand::rng());
    println!(
        "{} {}",
        style(time.standard()).bold(),
        style(time.japanese(&reference, use_kanji)).cyan()
    );
    Ok(())
}

fn print_date(paths: &AppPaths) -> Result<()> {
    let use_kanji = Settings::load(&paths.settings).date_time.use_kanji();
    let reference = ReferenceData::load(&paths.reference);
    let date = RandomDate::generate(&mut rand::rng());
    println!(
        "{} {}",
        style(date.standard()).bold(),
        style(date.japanese(&reference, use_kanji)).cyan()
    );
    Ok(())
}

/// MARK:フォントを対話的に選ぶ
fn choose_fonts(paths: &AppPaths, dir: Option<&Path>) -> Result<()> {
    let dir = dir.unwrap_or(&paths.fonts);
    let found = fonts::discover(dir);
    if found.is_empty() {
        println!(
            "{} no font files under {}",
            style("note:").yellow(),
            dir.display()
        );
    }

    let mut settings = Settings::load(&paths.settings);
    let theme = ColorfulTheme::default();
    let mut items = vec!["(default)".to_string()];
    items.extend(found.iter().map(|path| path.display().to_string()));

    for (label, choice) in [
        ("Kana", &mut settings.fonts.kana),
        ("Kanji", &mut settings.fonts.kanji),
    ] {
        pick_font(&theme, label, &items, &found, choice)?;
    }

    save_settings(&settings, paths);
    Ok(())
}

fn pick_font(
    theme: &ColorfulTheme,
    label: &str,
    items: &[String],
    found: &[PathBuf],
    choice: &mut FontChoice,
) -> Result<()> {
    let selection = Select::with_theme(theme)
        .with_prompt(format!("{label} font"))
        .items(items)
        .default(0)
        .interact()
        .map_err(std::io::Error::other)?;

    match selection.checked_sub(1).and_then(|index| found.get(index)) {
        Some(path) => choice.set_path(&path.to_string_lossy()),
        None => choice.set_path(""),
    }

    let size: String = Input::with_theme(theme)
        .with_prompt(format!("{label} font size"))
        .default(format!("{}", choice.size()))
        .interact_text()
        .map_err(std::io::Error::other)?;

    match size.trim().parse::<f32>() {
        Ok(size) => choice.set_size(size),
        Err(_) => println!(
            "{} {size:?} is not a number, keeping {}",
            style("note:").yellow(),
            choice.size()
        ),
    }
    Ok(())
}

fn load_word_list(paths: &AppPaths, file: &Path) -> Result<()> {
    let mut settings = Settings::load(&paths.settings);
    let path = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
    settings.word_list.set_path(&path.to_string_lossy());

    let words = settings.word_list.words();
    if words.is_empty() {
        println!(
            "{} {} has no words, word list cleared",
            style("warning:").yellow().bold(),
            file.display()
        );
    } else {
        println!(
            "{} {} words from {}",
            style("loaded").green().bold(),
            words.len(),
            settings.word_list.path()
        );
    }

    save_settings(&settings, paths);
    Ok(())
}

fn save_settings(settings: &Settings, paths: &AppPaths) {
    match settings.save(&paths.settings) {
        Ok(()) => println!("{} {}", style("saved").green(), paths.settings.display()),
        Err(e) => eprintln!("{} {e}", style("error:").red().bold()),
    }
}
