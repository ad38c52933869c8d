//! CSV reading utilities.

mod decode;
mod reader;

pub use decode::{CANDIDATE_DELIMITERS, decode_bytes, sniff_delimiter};
pub use reader::{NA_TOKENS, is_na_token, parse_csv_text, read_csv_table};
