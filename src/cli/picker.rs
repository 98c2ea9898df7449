//! Interactive CV picker.
//!
//! Kept apart from clap parsing: clap handles the structured flags, the
//! picker covers `sr upload` with no files (choose from the PDF/DOCX files
//! under the current directory). The TUI upload tab uses the same discovery.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::FileType;
use crate::error::{AppError, EXIT_LOCAL};

/// Directory recursion depth when looking for CVs.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Prompt for one or more CVs from the current directory tree.
///
/// Accepts numbers separated by spaces or commas, `a` for all, a path, or
/// `q` to cancel.
pub fn prompt_for_cv_paths() -> Result<Vec<PathBuf>, AppError> {
    let files = discover_cv_files();
    if files.is_empty() {
        return Err(AppError::new(
            EXIT_LOCAL,
            "No .pdf or .docx files found. Pass them explicitly: `sr upload <files..>`.",
        ));
    }

    println!("Found {} CV file(s):", files.len());
    for (idx, path) in files.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, pretty_path(path));
    }

    loop {
        print!("Select files (e.g. 1 3 4), a for all, or type a path (q to quit): ");
        io::stdout()
            .flush()
            .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                EXIT_LOCAL,
                "No input received. Pass files explicitly: `sr upload <files..>`.",
            ));
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Err(AppError::new(EXIT_LOCAL, "Canceled."));
        }
        if input.eq_ignore_ascii_case("a") {
            return Ok(files);
        }

        match parse_choices(input, files.len()) {
            Some(choices) => return Ok(choices.into_iter().map(|i| files[i].clone()).collect()),
            None if input.chars().all(|c| c.is_ascii_digit() || c == ',' || c.is_whitespace()) => {
                println!("Invalid choice. Enter numbers between 1 and {}.", files.len());
            }
            None => match validate_cv_path(Path::new(input)) {
                Ok(path) => return Ok(vec![path]),
                Err(err) => println!("{err}"),
            },
        }
    }
}

/// One-based choices to zero-based indices, deduplicated in input order.
fn parse_choices(input: &str, len: usize) -> Option<Vec<usize>> {
    let mut out = Vec::new();
    for token in input.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
        let n: usize = token.parse().ok()?;
        if !(1..=len).contains(&n) {
            return None;
        }
        if !out.contains(&(n - 1)) {
            out.push(n - 1);
        }
    }
    (!out.is_empty()).then_some(out)
}

/// The path must be an existing `.pdf` or `.docx` file.
pub fn validate_cv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(EXIT_LOCAL, format!("File not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::new(
            EXIT_LOCAL,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !is_cv(path) {
        return Err(AppError::new(
            EXIT_LOCAL,
            format!("Expected a .pdf or .docx file (got: {}).", path.display()),
        ));
    }
    Ok(path.to_path_buf())
}

/// PDF/DOCX files under the current directory, in a stable order.
pub fn discover_cv_files() -> Vec<PathBuf> {
    find_cv_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn find_cv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_cv_files_inner(root, 0, max_depth, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn find_cv_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }
    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_cv_files_inner(&path, depth + 1, max_depth, out);
            }
        } else if file_type.is_file() && is_cv(&path) {
            out.push(path);
        }
    }
}

fn is_cv(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(FileType::from_file_name)
        .is_some()
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

pub fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_parse_and_dedupe() {
        assert_eq!(parse_choices("1 3,3", 3), Some(vec![0, 2]));
        assert_eq!(parse_choices("4", 3), None);
        assert_eq!(parse_choices("0", 3), None);
        assert_eq!(parse_choices("", 3), None);
        assert_eq!(parse_choices("cv.pdf", 3), None);
    }

    #[test]
    fn finds_only_cvs_and_skips_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("b")).unwrap();
        std::fs::create_dir_all(root.join("target")).unwrap();
        for f in ["a.pdf", "b/c.DOCX", "notes.txt", "target/x.pdf"] {
            std::fs::write(root.join(f), b"x").unwrap();
        }
        let found: Vec<String> = find_cv_files(root, 4)
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().display().to_string())
            .collect();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|f| f.ends_with("a.pdf")));
        assert!(found.iter().any(|f| f.ends_with("c.DOCX")));
    }

    #[test]
    fn validation() {
        let dir = tempfile::tempdir().unwrap();
        let cv = dir.path().join("cv.pdf");
        let txt = dir.path().join("cv.txt");
        std::fs::write(&cv, b"x").unwrap();
        std::fs::write(&txt, b"x").unwrap();
        assert!(validate_cv_path(&cv).is_ok());
        assert!(validate_cv_path(&txt).is_err());
        assert!(validate_cv_path(dir.path()).is_err());
        assert!(validate_cv_path(&dir.path().join("missing.pdf")).is_err());
    }
}
