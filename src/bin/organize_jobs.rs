//! CLI tool that files finished traveler PDFs into per-job history folders

use std::env;
use std::process;

use traveler_parts::files::{find_pdfs, job_from_report, move_into, safe_folder_name};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--recursive]", program);
    eprintln!();
    eprintln!("Moves PDFs from insert-traveler and printing_jobs into a");
    eprintln!("History/Job - <job> folder named after the job in");
    eprintln!("insert-traveler/parts.txt.");
    eprintln!();
    eprintln!("  --recursive  Include PDFs in subfolders");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut recursive = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "--recursive" => recursive = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                eprintln!("Error: unrecognized argument: {}", other);
                print_usage(&args[0]);
                process::exit(2);
            }
        }
    }

    let root = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let insert_traveler = root.join("insert-traveler");
    let printing_jobs = root.join("printing_jobs");
    let report_path = insert_traveler.join("parts.txt");

    let job = match job_from_report(&report_path) {
        Some(job) => job,
        None => {
            eprintln!("Error: could not find Job in {}", report_path.display());
            process::exit(2);
        }
    };

    let dest_folder = root
        .join("History")
        .join(safe_folder_name(&format!("Job - {}", job)));

    let mut moved = 0;
    for source in [&insert_traveler, &printing_jobs] {
        if !source.exists() {
            continue;
        }
        for pdf in find_pdfs(source, recursive) {
            match move_into(&pdf, &dest_folder) {
                Ok(_) => moved += 1,
                Err(e) => {
                    eprintln!("Error: failed to move {}: {}", pdf.display(), e);
                    process::exit(1);
                }
            }
        }
    }

    println!("Job folder: {}", dest_folder.display());
    println!("Moved: {}", moved);
}
