// src/bin/list_archives.rs
//
// Print every archive under a year directory, its members, and which
// archives each worksheet would be looked up in.

use anyhow::{Context, Result};
use bptload::{load, locate, Worksheet, YearLayout};
use std::env;

fn main() -> Result<()> {
    let dir = env::args()
        .nth(1)
        .context("Usage: list_archives <YEAR_DIR>")?;
    let layout = YearLayout::new(&dir).with_context(|| format!("resolving {}", dir))?;

    println!(
        "year {} ({:?} naming) in {}",
        layout.year(),
        layout.convention(),
        layout.dir().display()
    );

    for listing in locate::list_archives(layout.dir())? {
        println!("{}", listing.path.display());
        for member in &listing.members {
            println!("    {}", member);
        }
    }

    println!();
    for ws in Worksheet::ALL {
        let archives = load::sheet_archives(&layout, ws)?;
        println!(
            "{} ({}): {} candidate archive(s)",
            ws,
            ws.description(),
            archives.len()
        );
        for a in archives {
            println!("    {}", a.display());
        }
    }
    Ok(())
}
