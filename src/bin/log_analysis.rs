use anyhow::Result;
use chrono::Local;
use crawl_log_triage::{export_report, scan_log, HttpFetcher};
use std::path::Path;
use std::process;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut skip_fetch = false;
    let mut positional = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-n" | "--no-testdata-generation" => skip_fetch = true,
            other => positional.push(other.to_string()),
        }
    }

    if positional.len() != 2 {
        eprintln!(
            "Usage: {} <log_file_path> <test_data_dir> [-n|--no-testdata-generation]",
            args[0]
        );
        process::exit(1);
    }

    let log_path = Path::new(&positional[0]);
    let out_dir = Path::new(&positional[1]);

    if out_dir.exists() && !out_dir.is_dir() {
        eprintln!("{} is not a directory", out_dir.display());
        process::exit(1);
    }

    let start_time = Local::now();
    let report = scan_log(log_path)?;
    println!("finally, log analysis is finished.");
    println!(
        "scan took {} ms",
        (Local::now() - start_time).num_milliseconds()
    );

    let fetcher = HttpFetcher::new();
    export_report(&report.index, out_dir, skip_fetch, &fetcher)?;

    Ok(())
}
