//! Generate a CSV of synthetic URLs (`test0.com`, `test1.com`, ...) for
//! exercising the lookup API.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use urlclass_core::records::write_test_urls;

/// Write a CSV of test URLs
#[derive(Parser, Debug)]
#[command(name = "urlclass-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to create
    #[arg(short, long, default_value = "test_urls.csv")]
    output: PathBuf,

    /// Number of URLs to generate
    #[arg(short = 'n', long, default_value_t = 1024)]
    count: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    write_test_urls(&args.output, args.count)?;
    println!("Generated {} test URLs in {}", args.count, args.output.display());
    Ok(())
}
