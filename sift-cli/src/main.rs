//! Sift CLI
//!
//! Parse markup from a file, an inline string, or stdin, then print the
//! tree, the aggregated text, selector matches, or JSON snapshots.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use sift_common::warning::{clear_warnings, warn_once};
use sift_core::html::print_tree;
use sift_core::prelude::*;
use sift_core::{CloserMatching, NodeSnapshot, ParseIssue, SelectorList, parse_with_issues};

/// Sift: forgiving HTML parsing and compound-selector queries
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the element tree of a file
    sift page.html

    # Query inline markup
    sift --html '<ul><li>A</li><li>B</li></ul>' --select li --text

    # Emit matches as JSON
    sift page.html --select 'a[rel=next] meta[name=description]' --json

    # Read from stdin and list what the parser absorbed
    curl -s https://example.com | sift --issues
"#)]
struct Cli {
    /// HTML file to parse (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "MARKUP", conflicts_with = "path")]
    html: Option<String>,

    /// Whitespace-separated compound selectors; matches are printed in
    /// token order
    #[arg(short, long, value_name = "SELECTOR")]
    select: Option<String>,

    /// Print JSON snapshots instead of the tree outline
    #[arg(long, conflicts_with = "text")]
    json: bool,

    /// Print aggregated text content only
    #[arg(long)]
    text: bool,

    /// Report anomalies the parser absorbed (to stderr)
    #[arg(long)]
    issues: bool,

    /// Decode character references in text and attribute values
    #[arg(long)]
    decode_entities: bool,

    /// Match closing tags by nesting depth instead of taking the nearest
    #[arg(long)]
    balanced: bool,

    /// Truncate input to this many bytes before parsing
    #[arg(long, value_name = "BYTES")]
    max_bytes: Option<usize>,
}

impl Cli {
    fn options(&self) -> ParseOptions {
        let matching = if self.balanced {
            CloserMatching::Balanced
        } else {
            CloserMatching::Nearest
        };
        let options = ParseOptions::new()
            .decode_entities(self.decode_entities)
            .closer_matching(matching);
        match self.max_bytes {
            Some(limit) => options.max_input_bytes(limit),
            None => options,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let markup = load_markup(&cli)?;
    let (doc, issues) = parse_with_issues(&markup, cli.options());

    let nodes = match cli.select {
        Some(ref selector) => {
            let list = SelectorList::parse(selector);
            for message in rejected_tokens(selector, &list) {
                warn_once("Selector", &message);
            }
            let matches = list.select(doc.root_ref());
            if matches.is_empty() {
                warn_once("CLI", &format!("no elements match {selector:?}"));
            }
            matches
        }
        None => vec![doc.root_ref()],
    };

    if cli.json {
        print_json(&nodes, cli.select.is_some())?;
    } else if cli.text {
        for node in &nodes {
            println!("{}", node.text_content());
        }
    } else {
        print_outline(&doc, &nodes);
    }

    if cli.issues {
        print_issues(&issues);
    }

    Ok(())
}

/// Read the markup named on the command line. Invalid UTF-8 is replaced,
/// never rejected.
fn load_markup(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        return Ok(html.clone());
    }

    let bytes = match cli.path {
        Some(ref path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut buffer = Vec::new();
            let _ = io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// One message per selector token the list rejected, naming the token.
fn rejected_tokens(selector: &str, list: &SelectorList) -> Vec<String> {
    selector
        .split_whitespace()
        .zip(&list.tokens)
        .filter_map(|(token, result)| {
            result
                .as_ref()
                .err()
                .map(|error| format!("ignoring {token:?}: {error}"))
        })
        .collect()
}

fn print_outline(doc: &Document, nodes: &[NodeRef<'_>]) {
    for (index, node) in nodes.iter().enumerate() {
        if nodes.len() > 1 {
            println!("{}", format!("=== match {} ===", index + 1).bold());
        }
        print_tree(doc, node.node_id());
    }
}

/// Matches print as a JSON array; the whole document prints as one object.
fn print_json(nodes: &[NodeRef<'_>], as_array: bool) -> Result<()> {
    let snapshots: Vec<NodeSnapshot> = nodes
        .iter()
        .map(|&node| NodeSnapshot::capture(node))
        .collect();
    let json = match snapshots.as_slice() {
        [only] if !as_array => serde_json::to_string_pretty(only)?,
        all => serde_json::to_string_pretty(all)?,
    };
    println!("{json}");
    Ok(())
}

fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        eprintln!("{}", "no parse issues".green());
        return;
    }
    eprintln!("{}", format!("=== {} parse issues ===", issues.len()).bold());
    for issue in issues {
        eprintln!("  - {}", issue.to_string().yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_tokens_name_each_dropped_selector() {
        let selector = "li a:hover [href #main";
        let list = SelectorList::parse(selector);
        let messages = rejected_tokens(selector, &list);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("ignoring \"a:hover\""));
        assert!(messages[1].starts_with("ignoring \"[href\""));
    }

    #[test]
    fn valid_selectors_report_nothing() {
        let list = SelectorList::parse("li .x");
        assert!(rejected_tokens("li .x", &list).is_empty());
        assert!(rejected_tokens("", &SelectorList::parse("")).is_empty());
    }

    #[test]
    fn options_follow_flags() {
        let cli = Cli::parse_from(["sift", "--balanced", "--decode-entities", "--max-bytes", "9"]);
        let options = cli.options();
        assert_eq!(options.closer_matching, CloserMatching::Balanced);
        assert!(options.decode_entities);
        assert_eq!(options.max_input_bytes, Some(9));
    }
}
