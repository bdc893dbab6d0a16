//! Example: loading a word list and running the query kinds against it.
//!
//! Run with: cargo run --example wordsearch [WORDLIST] [PATTERN]
//!
//! Without arguments a small built-in list is used. Set `RUST_LOG=debug` or
//! `RUST_LOG=trace` to see what the index reports while loading and searching.

use std::env;
use std::error::Error;

use log::LevelFilter;
use wordgraph::{CancelToken, SearchSpec, Variation, WordIndex};

const BUILTIN: &str = "\
# A few test words
BAKE
BAKED
BAKER
CAKE
CAKED
FAKE
LAKE
TAKE
TEAK
KATE
ACE
";

fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, LevelFilter::Info)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.init();
}

fn print_hits(label: &str, hits: &[String]) {
    println!("{label} ({}):", hits.len());
    for hit in hits {
        println!("  {hit}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logger();

    let mut args = env::args().skip(1);
    let index = match args.next() {
        Some(path) => WordIndex::from_file(&path)?,
        None => WordIndex::from_reader(BUILTIN.as_bytes())?,
    };
    let pattern = args.next().unwrap_or_else(|| "?AKE".to_string());
    log::info!(
        "{} words in {} nodes",
        index.word_count(),
        index.node_count()
    );

    print_hits(
        &format!("Pattern {pattern}"),
        &index.search(&SearchSpec::pattern(&pattern)),
    );
    print_hits(
        &format!("Anagrams of {pattern}"),
        &index.search(&SearchSpec::anagram(&pattern)),
    );
    print_hits(
        &format!("Subanagrams of {pattern}, at least 3 letters"),
        &index.search(&SearchSpec::subanagram(&pattern).with_min_length(3)),
    );

    let word = pattern.replace(['?', '*'], "");
    for variation in [Variation::Hooks, Variation::Extensions] {
        println!("{}", variation.caption(&word));
        for group in index.variations(&word, variation) {
            print_hits(&format!("  {}", group.title), &group.words);
        }
    }

    // A token cancelled up front stops the search before it starts.
    let cancel = CancelToken::new();
    cancel.cancel();
    if let Err(err) = index.search_cancellable(&SearchSpec::pattern("*"), &cancel) {
        println!("Full listing: {err}");
    }

    if index.node_count() < 64 {
        println!("\nGraph:\n{}", index.dump());
    }
    Ok(())
}
