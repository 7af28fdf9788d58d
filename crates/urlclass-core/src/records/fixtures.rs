use std::path::Path;

use anyhow::{Context, Result};

/// Write `count` synthetic URLs (`test0.com`, `test1.com`, ...), one per
/// row and without a header.
pub fn write_test_urls(path: impl AsRef<Path>, count: usize) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    for i in 0..count {
        writer.write_record([format!("test{}.com", i)])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_test_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_urls.csv");
        write_test_urls(&path, 3).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "test0.com\ntest1.com\ntest2.com\n");
    }

    #[test]
    fn test_generated_file_feeds_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_urls.csv");
        write_test_urls(&path, 1024).unwrap();

        // No header is written, so the reader drops test0.com
        let urls = crate::records::read_urls(&path).unwrap();
        assert_eq!(urls.len(), 1023);
        assert_eq!(urls.first().map(String::as_str), Some("test1.com"));
        assert_eq!(urls.last().map(String::as_str), Some("test1023.com"));
    }
}
