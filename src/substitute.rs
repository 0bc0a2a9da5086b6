//! Heading substitution into body text.
//!
//! Two strategies rewrite the body from parallel `(matches, replacements)`
//! lists. They disagree whenever a match is part of a larger word, so the
//! choice is explicit through [`SubstitutionMode`].
//!
//! ```
//! use unscan::substitute::{Substitution, TokenSubstitution};
//!
//! let out = TokenSubstitution
//!     .apply(
//!         "Report Title content",
//!         &["Report".to_string()],
//!         &["# Report <br>".to_string()],
//!     )
//!     .unwrap();
//! assert_eq!(out, "# Report <br> Title content");
//! ```

use std::collections::HashMap;

use crate::error::{Error, Result};

/// A pure rewrite of body text from parallel match/replacement lists.
pub trait Substitution: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite `body`, replacing `matches[i]` with `replacements[i]`.
    ///
    /// Fails when the two lists differ in length.
    fn apply(&self, body: &str, matches: &[String], replacements: &[String]) -> Result<String>;
}

fn check_lengths(matches: &[String], replacements: &[String]) -> Result<()> {
    if matches.len() != replacements.len() {
        return Err(Error::InvalidConfig(format!(
            "{} matches but {} replacements",
            matches.len(),
            replacements.len()
        )));
    }
    Ok(())
}

/// Replaces whole whitespace-delimited tokens that equal a match exactly.
///
/// A match made of several words replaces a run of consecutive body tokens
/// on one line that equal its words, so a heading line such as
/// `"Quarterly Report Summary"` is found as a unit. The longest run wins at
/// each position. Whitespace outside replaced runs is copied through
/// unchanged. When several matches are equal, the last one in list order
/// wins. `"Title."` does not match `"Title"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSubstitution;

impl Substitution for TokenSubstitution {
    fn name(&self) -> &'static str {
        "token"
    }

    fn apply(&self, body: &str, matches: &[String], replacements: &[String]) -> Result<String> {
        check_lengths(matches, replacements)?;

        let mut table: HashMap<Vec<&str>, &str> = HashMap::with_capacity(matches.len());
        let mut longest = 0;
        for (m, r) in matches.iter().zip(replacements) {
            let words: Vec<&str> = m.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }
            longest = longest.max(words.len());
            table.insert(words, r.as_str());
        }

        let spans = token_spans(body);
        let mut output = String::with_capacity(body.len());
        let mut copied = 0;
        let mut i = 0;
        while i < spans.len() {
            let (start, end) = spans[i];
            output.push_str(&body[copied..start]);

            let max_run = longest.min(spans.len() - i);
            let found = (1..=max_run).rev().find_map(|n| {
                let run = &spans[i..i + n];
                let crosses_line = run
                    .windows(2)
                    .any(|pair| body[pair[0].1..pair[1].0].contains('\n'));
                if crosses_line {
                    return None;
                }
                let words: Vec<&str> = run.iter().map(|&(s, e)| &body[s..e]).collect();
                table.get(&words).map(|r| (n, *r))
            });

            match found {
                Some((n, replacement)) => {
                    output.push_str(replacement);
                    copied = spans[i + n - 1].1;
                    i += n;
                }
                None => {
                    output.push_str(&body[start..end]);
                    copied = end;
                    i += 1;
                }
            }
        }
        output.push_str(&body[copied..]);

        Ok(output)
    }
}

/// Byte ranges of the whitespace-delimited tokens in `text`.
fn token_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, idx));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

/// Replaces every literal occurrence of a match, including inside words.
///
/// Duplicate matches keep their first position and their last
/// replacement. Matches are applied one after another in that order, so a
/// later match can rewrite text produced by an earlier replacement. Empty
/// matches are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringSubstitution;

impl Substitution for SubstringSubstitution {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn apply(&self, body: &str, matches: &[String], replacements: &[String]) -> Result<String> {
        check_lengths(matches, replacements)?;

        let mut order: Vec<&str> = Vec::new();
        let mut table: HashMap<&str, &str> = HashMap::new();
        for (m, r) in matches.iter().zip(replacements) {
            if m.is_empty() {
                continue;
            }
            if table.insert(m.as_str(), r.as_str()).is_none() {
                order.push(m.as_str());
            }
        }

        let mut output = body.to_string();
        for key in order {
            if let Some(value) = table.get(key) {
                output = output.replace(key, value);
            }
        }
        Ok(output)
    }
}

/// Selects a substitution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstitutionMode {
    /// Exact whitespace-token equality
    #[default]
    Token,
    /// Literal substring replacement
    Substring,
}

impl SubstitutionMode {
    /// The strategy implementing this mode.
    pub fn strategy(self) -> &'static dyn Substitution {
        match self {
            SubstitutionMode::Token => &TokenSubstitution,
            SubstitutionMode::Substring => &SubstringSubstitution,
        }
    }

    /// Apply this mode's strategy.
    pub fn apply(self, body: &str, matches: &[String], replacements: &[String]) -> Result<String> {
        self.strategy().apply(body, matches, replacements)
    }
}
