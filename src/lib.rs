// Export the scanner and export modules
pub mod export;
pub mod scanner;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::export::{
    export_report, HttpFetcher, PageFetcher, PAGE_LIST_FILE, TEST_SOURCE_FILE,
};
pub use crate::scanner::{scan_log, ErrorEntry, ErrorIndex, ScanReport, UNKNOWN_TITLE};
