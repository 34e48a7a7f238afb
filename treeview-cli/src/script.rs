//! Script lines replayed against a tree.
//!
//! One step per line:
//!
//! - a JSON command object, e.g. `{"method": "expandAll", "args": {}}`
//! - `click <line> [expand|check]` to click a rendered row
//! - `menu <line>` to open the context menu on a rendered row
//! - `choose <entry>` to click an entry of the open context menu
//! - `print` to print the current rows and any open menu
//!
//! Blank lines and lines starting with `#` are skipped.

use anyhow::{Context, bail};
use treeview::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Command(String),
    Click { line: usize, part: ClickPart },
    Menu { line: usize },
    Choose { entry: usize },
    Print,
}

pub fn parse_line(line: &str) -> anyhow::Result<Option<Step>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.starts_with('{') {
        return Ok(Some(Step::Command(line.to_string())));
    }

    let mut words = line.split_whitespace();
    let step = match words.next() {
        Some("print") => Step::Print,
        Some("click") => {
            let row = words.next().context("click needs a line number")?;
            let row = row
                .parse()
                .with_context(|| format!("bad line number {row:?}"))?;
            let part = match words.next() {
                None | Some("body") => ClickPart::Body,
                Some("expand") => ClickPart::ExpandIcon,
                Some("check") => ClickPart::CheckIcon,
                Some(other) => bail!("unknown click target {other:?}"),
            };
            Step::Click { line: row, part }
        }
        Some("menu") => Step::Menu {
            line: number(words.next(), "menu needs a line number")?,
        },
        Some("choose") => Step::Choose {
            entry: number(words.next(), "choose needs an entry number")?,
        },
        Some(other) => bail!("unknown step {other:?}"),
        None => return Ok(None),
    };
    Ok(Some(step))
}

fn number(word: Option<&str>, missing: &'static str) -> anyhow::Result<usize> {
    let word = word.context(missing)?;
    word.parse()
        .with_context(|| format!("bad number {word:?}"))
}

/// Parse a whole script, reporting the first bad line by number.
pub fn parse(script: &str) -> anyhow::Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (n, line) in script.lines().enumerate() {
        let step = parse_line(line).with_context(|| format!("script line {}", n + 1))?;
        steps.extend(step);
    }
    Ok(steps)
}
