//! CLI tool that prints a folder of PDFs to tabloid via SumatraPDF

use std::env;
use std::path::{Path, PathBuf};
use std::process::{self, Command};
use std::thread;
use std::time::Duration;

use traveler_parts::files::find_pdfs;

const DEFAULT_PRINTER: &str = "Kyocera TASKalfa 3501i";
const DEFAULT_SLEEP_SECONDS: f64 = 1.5;

// Fit to printable area, tabloid paper, one-sided.
const PRINT_SETTINGS: &str = "fit,paper=tabloid,duplex=off";

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [folder] [--printer NAME] [--sumatra PATH] [--recursive] [--sleep SECONDS]",
        program
    );
    eprintln!();
    eprintln!("Prints all PDFs in a folder to tabloid, one-sided, fit to page.");
    eprintln!();
    eprintln!("  folder       Folder containing PDFs (default: ./printing_jobs)");
    eprintln!("  --printer    Printer name (default: {})", DEFAULT_PRINTER);
    eprintln!("  --sumatra    Full path to SumatraPDF.exe");
    eprintln!("  --recursive  Include PDFs in subfolders");
    eprintln!("  --sleep      Seconds to wait between print jobs (default: 1.5)");
}

/// Locates SumatraPDF, checking an explicit path, well-known install
/// locations, the folders next to this executable, and finally PATH.
fn find_sumatra(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        let path = PathBuf::from(path);
        return if path.is_file() { Some(path) } else { None };
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    let cwd = env::current_dir().ok();

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(env_path) = env::var_os("SUMATRA_PDF") {
        candidates.push(PathBuf::from(env_path));
    }
    candidates.push(PathBuf::from(r"C:\Program Files\SumatraPDF\SumatraPDF.exe"));
    candidates.push(PathBuf::from(r"C:\Program Files (x86)\SumatraPDF\SumatraPDF.exe"));
    if let Some(dir) = &exe_dir {
        candidates.push(dir.join("SumatraPDF.exe"));
    }
    if let Some(cwd) = &cwd {
        candidates.push(cwd.join("SumatraPDF.exe"));
        candidates.push(cwd.join("SumatraPDF").join("SumatraPDF.exe"));
    }
    if let Some(dir) = &exe_dir {
        candidates.push(dir.join("SumatraPDF").join("SumatraPDF.exe"));
    }
    for var in ["LOCALAPPDATA", "APPDATA"] {
        if let Some(base) = env::var_os(var) {
            candidates.push(PathBuf::from(base).join("SumatraPDF").join("SumatraPDF.exe"));
        }
    }

    for candidate in candidates {
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    find_in_path("SumatraPDF.exe").or_else(|| find_in_path("SumatraPDF"))
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut folder: Option<String> = None;
    let mut printer = DEFAULT_PRINTER.to_string();
    let mut sumatra_arg: Option<String> = None;
    let mut recursive = false;
    let mut sleep_seconds = DEFAULT_SLEEP_SECONDS;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--recursive" => recursive = true,
            "--printer" => {
                i += 1;
                match args.get(i) {
                    Some(value) => printer = value.clone(),
                    None => {
                        eprintln!("Error: --printer requires a value");
                        process::exit(2);
                    }
                }
            }
            "--sumatra" => {
                i += 1;
                match args.get(i) {
                    Some(value) => sumatra_arg = Some(value.clone()),
                    None => {
                        eprintln!("Error: --sumatra requires a value");
                        process::exit(2);
                    }
                }
            }
            "--sleep" => {
                i += 1;
                match args.get(i).and_then(|v| v.parse::<f64>().ok()) {
                    Some(value) if value.is_finite() && value >= 0.0 => sleep_seconds = value,
                    _ => {
                        eprintln!("Error: --sleep requires a non-negative number of seconds");
                        process::exit(2);
                    }
                }
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            arg if folder.is_none() && !arg.starts_with('-') => folder = Some(arg.to_string()),
            arg => {
                eprintln!("Error: unrecognized argument: {}", arg);
                print_usage(&args[0]);
                process::exit(2);
            }
        }
        i += 1;
    }

    let folder = PathBuf::from(folder.unwrap_or_else(|| "printing_jobs".to_string()));
    if !folder.is_dir() {
        eprintln!("Error: folder not found: {}", folder.display());
        process::exit(2);
    }

    let sumatra = match find_sumatra(sumatra_arg.as_deref()) {
        Some(path) => path,
        None => {
            eprintln!("Error: SumatraPDF not found.");
            eprintln!("Install SumatraPDF or pass --sumatra with the full path to SumatraPDF.exe.");
            process::exit(3);
        }
    };

    let pdfs = find_pdfs(&folder, recursive);
    if pdfs.is_empty() {
        println!("No PDFs found.");
        return;
    }

    println!("Using printer: {}", printer);
    println!("SumatraPDF: {}", sumatra.display());
    println!("PDF count: {}", pdfs.len());

    let mut failures = 0;
    for pdf in &pdfs {
        println!("Printing: {}", pdf.display());
        let status = Command::new(&sumatra)
            .arg("-print-to")
            .arg(&printer)
            .arg("-print-settings")
            .arg(PRINT_SETTINGS)
            .arg("-silent")
            .arg(pdf)
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                failures += 1;
                match status.code() {
                    Some(code) => println!("Failed: {} (exit {})", pdf.display(), code),
                    None => println!("Failed: {} (terminated by signal)", pdf.display()),
                }
            }
            Err(e) => {
                failures += 1;
                println!("Failed: {} ({})", pdf.display(), e);
            }
        }

        // The spooler chokes when jobs arrive back to back.
        thread::sleep(Duration::from_secs_f64(sleep_seconds));
    }

    if failures > 0 {
        println!("Done with {} failure(s).", failures);
        process::exit(1);
    }
    println!("Done.");
}
