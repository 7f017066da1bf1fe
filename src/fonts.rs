// ============================================
// src/fonts.rs
// フォントファイルの探索
// ============================================

use walkdir::WalkDir;

use std::path::{Path, PathBuf};

/// フォントを探すフォルダ名 (データディレクトリ直下)
pub const FONT_DIR: &str = "fonts";

const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// フォルダ以下を再帰的に探し、フォントファイルをパス順に返す
pub fn discover(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "font directory does not exist");
        return Vec::new();
    }

    let mut fonts: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
        })
        .collect();
    fonts.sort();

    tracing::info!(dir = %dir.display(), count = fonts.len(), "font scan finished");
    fonts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_fonts_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("noto").join("jp");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("b.TTF"), b"").unwrap();
        fs::write(dir.path().join("a.otf"), b"").unwrap();
        fs::write(nested.join("c.ttc"), b"").unwrap();
        fs::write(dir.path().join("readme.txt"), b"").unwrap();

        let fonts = discover(dir.path());
        let names: Vec<_> = fonts
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.otf", "b.TTF", "c.ttc"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("nothing")).is_empty());
    }
}
