//! Folder scanning and job-folder filing
//!
//! Travelers arrive in a drop folder, get summarized, then get filed into a
//! per-job history folder. Helpers here cover PDF discovery, Windows-safe
//! folder naming, and collision-free moves between folders.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::ScanError;

/// Lists PDF files under `folder`, sorted by path. Non-recursive scans look
/// only at the folder's direct children. The extension match ignores case,
/// so `.PDF` scans count too.
pub fn find_pdfs(folder: &Path, recursive: bool) -> Vec<PathBuf> {
    let walker = if recursive {
        WalkDir::new(folder).min_depth(1)
    } else {
        WalkDir::new(folder).min_depth(1).max_depth(1)
    };

    let mut pdfs: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_pdf(path))
        .collect();
    pdfs.sort();
    pdfs
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Replaces characters Windows rejects in folder names with underscores and
/// trims surrounding whitespace and trailing dots.
pub fn safe_folder_name(name: &str) -> String {
    static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

    UNSAFE_CHARS
        .replace_all(name, "_")
        .trim()
        .trim_end_matches('.')
        .to_string()
}

/// Moves `file` into `dest_folder`, creating the folder as needed.
///
/// Name collisions resolve by appending ` (1)`, ` (2)`, ... to the stem
/// until a free name is found. Returns the path the file ended up at.
pub fn move_into(file: &Path, dest_folder: &Path) -> Result<PathBuf, ScanError> {
    fs::create_dir_all(dest_folder)?;

    let name = match file.file_name() {
        Some(name) => name,
        None => {
            return Err(ScanError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "source path has no file name",
            )))
        }
    };

    let mut dest = dest_folder.join(name);
    if dest.exists() {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = file
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let mut i = 1;
        loop {
            let candidate = dest_folder.join(format!("{} ({}){}", stem, i, ext));
            if !candidate.exists() {
                dest = candidate;
                break;
            }
            i += 1;
        }
    }

    // Rename fails across filesystems; fall back to copy and delete.
    if fs::rename(file, &dest).is_err() {
        log::debug!("rename failed for {}, copying instead", file.display());
        fs::copy(file, &dest)?;
        fs::remove_file(file)?;
    }

    log::debug!("moved {} to {}", file.display(), dest.display());
    Ok(dest)
}

/// Reads the job number back out of a written report file.
///
/// Only the first line starting with `job:` (case-insensitive) is
/// consulted; a blank value there means no job, even if a later line has
/// one. Missing or unreadable files yield `None`.
pub fn job_from_report(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    let text = String::from_utf8_lossy(&bytes);

    for line in text.lines() {
        if !line.trim().to_lowercase().starts_with("job:") {
            continue;
        }
        return match line.split_once(':') {
            Some((_, value)) => {
                let value = value.trim();
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            None => None,
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_find_pdfs_sorted_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.PDF"));
        touch(&dir.path().join("a.pdf"));
        touch(&dir.path().join("notes.txt"));

        let found = find_pdfs(dir.path(), false);
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.PDF"]);
    }

    #[test]
    fn test_find_pdfs_recursive() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("top.pdf"));
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub").join("nested.pdf"));

        assert_eq!(find_pdfs(dir.path(), false).len(), 1);
        assert_eq!(find_pdfs(dir.path(), true).len(), 2);
    }

    #[test]
    fn test_safe_folder_name() {
        assert_eq!(safe_folder_name("Job - 77/3"), "Job - 77_3");
        assert_eq!(safe_folder_name("a<b>c:d\"e"), "a_b_c_d_e");
        assert_eq!(safe_folder_name("  spaced.  "), "spaced");
        assert_eq!(safe_folder_name("plain"), "plain");
    }

    #[test]
    fn test_move_into_plain() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.pdf");
        touch(&src);
        let dest_folder = dir.path().join("History");

        let dest = move_into(&src, &dest_folder).unwrap();
        assert_eq!(dest, dest_folder.join("a.pdf"));
        assert!(dest.exists());
        assert!(!src.exists());
    }

    #[test]
    fn test_move_into_collision_suffixes() {
        let dir = TempDir::new().unwrap();
        let dest_folder = dir.path().join("History");
        fs::create_dir(&dest_folder).unwrap();
        touch(&dest_folder.join("a.pdf"));
        touch(&dest_folder.join("a (1).pdf"));

        let src = dir.path().join("a.pdf");
        touch(&src);
        let dest = move_into(&src, &dest_folder).unwrap();
        assert_eq!(dest, dest_folder.join("a (2).pdf"));
        assert!(dest.exists());
    }

    #[test]
    fn test_job_from_report() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join("parts.txt");
        fs::write(&report, "Job: 500\nFile: a.pdf\nPage 1  Asm: A1  Part: P1\n").unwrap();
        assert_eq!(job_from_report(&report), Some("500".to_string()));
    }

    #[test]
    fn test_job_from_report_first_line_wins_even_when_blank() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join("parts.txt");
        fs::write(&report, "job:\nJob: 500\n").unwrap();
        assert_eq!(job_from_report(&report), None);
    }

    #[test]
    fn test_job_from_report_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(job_from_report(&dir.path().join("nope.txt")), None);
    }
}
