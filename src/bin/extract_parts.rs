//! CLI tool that summarizes traveler PDFs into a parts report

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use rayon::prelude::*;
use traveler_parts::files::find_pdfs;
use traveler_parts::{summarize_pdf, DocumentReport, ScanError};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [input] [--recursive] [--output FILE]", program);
    eprintln!();
    eprintln!("Extracts the first Part: value from each page of traveler PDFs");
    eprintln!("and writes compressed page ranges to a report.");
    eprintln!();
    eprintln!("  input        Folder with PDFs or a single PDF file");
    eprintln!("               (default: ./insert-traveler)");
    eprintln!("  --recursive  Include PDFs in subfolders");
    eprintln!("  --output     Report file (default: parts.txt in the input folder)");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut recursive = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--recursive" => recursive = true,
            "--output" => {
                i += 1;
                match args.get(i) {
                    Some(value) => output = Some(value.clone()),
                    None => {
                        eprintln!("Error: --output requires a value");
                        process::exit(2);
                    }
                }
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            arg if input.is_none() && !arg.starts_with('-') => input = Some(arg.to_string()),
            arg => {
                eprintln!("Error: unrecognized argument: {}", arg);
                print_usage(&args[0]);
                process::exit(2);
            }
        }
        i += 1;
    }

    let input_path = PathBuf::from(input.unwrap_or_else(|| "insert-traveler".to_string()));

    let (pdfs, output_path) = if input_path.is_file() {
        let output_path = match &output {
            Some(path) => PathBuf::from(path),
            None => input_path.parent().unwrap_or(Path::new(".")).join("parts.txt"),
        };
        (vec![input_path.clone()], output_path)
    } else {
        if !input_path.is_dir() {
            eprintln!("Error: input not found: {}", input_path.display());
            process::exit(2);
        }
        let output_path = match &output {
            Some(path) => PathBuf::from(path),
            None => input_path.join("parts.txt"),
        };
        (find_pdfs(&input_path, recursive), output_path)
    };

    if pdfs.is_empty() {
        println!("No PDFs found.");
        return;
    }

    // Documents are independent, so summarize them in parallel; the
    // indexed collect keeps report order matching the sorted file order.
    let results: Vec<(PathBuf, Result<DocumentReport, ScanError>)> = pdfs
        .par_iter()
        .map(|pdf| (pdf.clone(), summarize_pdf(pdf)))
        .collect();

    let mut rows: Vec<String> = Vec::new();
    let mut failures = 0;

    for (pdf, result) in &results {
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {}: {}", pdf.display(), e);
                failures += 1;
                continue;
            }
        };
        if report.is_empty() {
            continue;
        }

        if let Some(job) = &report.job {
            rows.push(format!("Job: {}", job));
        }
        let name = pdf
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        rows.push(format!("File: {}", name));
        for record in &report.records {
            rows.push(record.to_string());
        }
        rows.push(String::new());
    }

    if rows.is_empty() {
        println!("No Part: values found.");
        process::exit(if failures > 0 { 1 } else { 0 });
    }

    let output_text = format!("{}\n", rows.join("\n").trim_end());
    if let Err(e) = fs::write(&output_path, output_text) {
        eprintln!("Error: failed to write {}: {}", output_path.display(), e);
        process::exit(1);
    }

    println!("Wrote {} line(s) to: {}", rows.len(), output_path.display());
    if failures > 0 {
        process::exit(1);
    }
}
