use std::fmt;

use regex::{Regex, RegexBuilder};

/// A compiled filename glob: `*` matches any run of characters, `?` exactly
/// one, everything else is literal. Matching is case-insensitive and always
/// covers the whole filename.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&glob_to_regex(pattern))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;

        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    #[inline]
    pub fn is_match(&self, filename: &str) -> bool {
        self.regex.is_match(filename)
    }

    /// The pattern as the user wrote it.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translate a glob into an anchored regex source.
///
/// Anything other than `*` and `?` is escaped, so regex metacharacters such
/// as `(`, `[` or `+` in a filename pattern only ever match themselves.
fn glob_to_regex(pattern: &str) -> String {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push_str(r"\A");

    let mut buf = [0u8; 4];
    let mut prev_star = false;
    for c in pattern.chars() {
        match c {
            // `**` is the same as `*`; keep the regex short.
            '*' if prev_star => {}
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            _ => re.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
        prev_star = c == '*';
    }

    re.push_str(r"\z");
    re
}

#[cfg(test)]
#[path = "wildcard_tests.rs"]
mod tests;
