//! One-shot formatting: raw text in, HTML out.

use std::io::Read;

use anyhow::{Context, Result};
use mimic_core::format::{format, to_html};

pub fn run(text: Option<&str>) -> Result<()> {
    let raw = match text {
        Some(text) => text.to_string(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("read text from stdin")?;
            buffer
        }
    };

    print!("{}", to_html(&format(&raw)));
    Ok(())
}
