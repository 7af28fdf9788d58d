use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Read URLs from the first column of a CSV file.
///
/// The first row is always treated as a header and skipped, even when it
/// holds a URL. Rows with an empty first column are ignored.
pub fn read_urls(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let mut urls = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read row {} of {}", line + 2, path.display()))?;
        match record.get(0).map(str::trim) {
            Some(url) if !url.is_empty() => urls.push(url.to_string()),
            _ => debug!(row = line + 2, "Skipping row without a URL"),
        }
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_urls_skips_header() {
        let file = write_file("url\nexample.com\nnews.example.org\n");
        let urls = read_urls(file.path()).unwrap();
        assert_eq!(urls, vec!["example.com", "news.example.org"]);
    }

    #[test]
    fn test_read_urls_skips_first_row_unconditionally() {
        let file = write_file("test0.com\ntest1.com\ntest2.com\n");
        let urls = read_urls(file.path()).unwrap();
        assert_eq!(urls, vec!["test1.com", "test2.com"]);
    }

    #[test]
    fn test_read_urls_first_column_only() {
        let file = write_file("url,owner\nexample.com,alice\nexample.net\n,orphan\n");
        let urls = read_urls(file.path()).unwrap();
        assert_eq!(urls, vec!["example.com", "example.net"]);
    }

    #[test]
    fn test_read_urls_missing_file() {
        let err = read_urls("/nonexistent/urls.csv").unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }
}
