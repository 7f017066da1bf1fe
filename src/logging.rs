// ============================================
// src/logging.rs
// ログの出力先 (データディレクトリの kanawiz.log)
// ============================================

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use std::path::Path;

const LOG_FILE: &str = "kanawiz.log";

/// ファイルへのログ出力を始める。返したガードはプロセス終了まで保持すること
///
/// 画面は TUI が使うので、ログは標準エラーではなくファイルに書く
pub fn init_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("could not create log directory {}: {e}", log_dir.display());
        return None;
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kanawiz=info")),
        )
        .try_init();

    match installed {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}
