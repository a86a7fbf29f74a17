use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::scanner::{ErrorIndex, UNKNOWN_TITLE};

pub const PAGE_LIST_FILE: &str = "pagelist.txt";
pub const TEST_SOURCE_FILE: &str = "test.java";

/// Retrieval of a page's raw bytes. The exporter only needs this one call,
/// so tests can substitute canned content for the network.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches pages over HTTP with a shared blocking client.
#[derive(Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;
        let bytes = response
            .bytes()
            .with_context(|| format!("Failed to read response body from {}", url))?;
        Ok(bytes.to_vec())
    }
}

/// Export the failing pages as test data.
///
/// Writes the URL list, one content snapshot per URL (fetched through
/// `fetcher`, named after the URL's last path segment), and the generated
/// Java test registrations. Returns how many URLs were fully processed;
/// that count is also printed whether the export finishes or fails partway.
pub fn export_report(
    index: &ErrorIndex,
    out_dir: &Path,
    skip_fetch: bool,
    fetcher: &dyn PageFetcher,
) -> Result<usize> {
    if skip_fetch {
        println!("Skip test data generation");
        return Ok(0);
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut processed = 0;
    let result = write_outputs(index, out_dir, fetcher, &mut processed);
    println!("processed: {}", processed);
    result.map(|()| processed)
}

fn write_outputs(
    index: &ErrorIndex,
    out_dir: &Path,
    fetcher: &dyn PageFetcher,
    processed: &mut usize,
) -> Result<()> {
    let mut page_list = File::create(out_dir.join(PAGE_LIST_FILE))
        .with_context(|| format!("Failed to create {}", PAGE_LIST_FILE))?;
    let mut test_source = File::create(out_dir.join(TEST_SOURCE_FILE))
        .with_context(|| format!("Failed to create {}", TEST_SOURCE_FILE))?;

    for entry in index.iter() {
        // Only the first observed title feeds the generated test.
        let title = entry
            .titles
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_TITLE);
        println!("processing: {}: {}", entry.url, title);

        page_list.write_all(entry.url.as_bytes())?;
        page_list.write_all(b"\n")?;

        let segment = entry
            .url
            .rsplit_once('/')
            .map_or(entry.url.as_str(), |(_, segment)| segment);

        println!("going to fetch: {}", entry.url);
        let content = fetcher.fetch(&entry.url)?;
        fs::write(out_dir.join(segment), &content)
            .with_context(|| format!("Failed to write snapshot {}", segment))?;

        writeln!(
            test_source,
            "pageTest(new File(testDir, \"{}\"), \"{}\",",
            segment, title
        )?;
        writeln!(test_source, "\"{}\");", entry.url)?;
        writeln!(test_source)?;

        page_list.flush()?;
        test_source.flush()?;
        *processed += 1;
    }

    Ok(())
}
