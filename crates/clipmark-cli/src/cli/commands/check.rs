//! `clipmark check <input>` – validate and canonicalize without fetching.

use anyhow::Result;
use clipmark_core::url_model::{canonicalize, validate};

pub fn run_check(input: &str) -> Result<()> {
    match validate(input) {
        Ok(url) => {
            println!("{}", canonicalize(&url));
            Ok(())
        }
        Err(e) => anyhow::bail!("{:?} is not a valid URL ({})", input, e),
    }
}
