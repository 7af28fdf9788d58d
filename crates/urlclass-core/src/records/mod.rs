//! CSV files read and written by urlclass.
//!
//! - `read_urls`: input list, one URL per row in the first column
//! - `write_results` / `read_results`: classification report
//! - `write_test_urls`: synthetic input for exercising the API

pub mod fixtures;
pub mod input;
pub mod output;

pub use fixtures::write_test_urls;
pub use input::read_urls;
pub use output::{read_results, write_results, RESULT_HEADERS};
