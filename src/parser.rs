use std::iter::Enumerate;
use std::str::Split;

use log::{trace, warn};

use crate::error::DecodeError;
use crate::section::{Config, DEFAULT_SECTION};
use crate::util::{is_comment_marker, unescape_value};

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Enumerate<Split<'a, char>>,
    current_section: &'a str,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').enumerate(),
            current_section: DEFAULT_SECTION,
        }
    }
}

impl Parser<'_> {
    /// Consume the remaining lines.
    ///
    /// Returns `None` if the text never opened a section nor defined a key.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed section header.
    pub fn into_config(self) -> Result<Option<Config>, DecodeError> {
        let Self {
            lines,
            mut current_section,
        } = self;
        let mut config = None::<Config>;

        for (index, line) in lines {
            let number = index + 1;
            let line = line.trim_end_matches('\r').trim_start();

            match line.chars().next() {
                None => {}
                Some(c) if is_comment_marker(c) => {}
                Some('[') => {
                    let name = parse_section_header(line, number)?;
                    trace!("line {number}: entering section {name:?}");

                    // Headers register their section even if no entries follow.
                    _ = config.get_or_insert_with(Config::default).section_mut(name);
                    current_section = name;
                }
                Some(_) => {
                    if let Some((key, value)) = parse_section_entry(line) {
                        config
                            .get_or_insert_with(Config::default)
                            .section_mut(current_section)
                            .insert(key, value);
                    } else {
                        warn!("line {number}: missing '=' or ':' delimiter; ignoring {line:?}");
                    }
                }
            }
        }

        Ok(config)
    }
}

/// Parse `[name]`, optionally followed by whitespace and a comment.
fn parse_section_header(line: &str, number: usize) -> Result<&str, DecodeError> {
    let invalid = || DecodeError::InvalidSectionHeader {
        line: number,
        header: line.trim_end().to_owned(),
    };

    let rest = line.strip_prefix('[').ok_or_else(invalid)?;
    let (name, rest) = rest.split_once(']').ok_or_else(invalid)?;

    match rest.trim_start().chars().next() {
        Some(c) if !is_comment_marker(c) => Err(invalid()),
        _ => Ok(name),
    }
}

/// Split on whichever of `=` or `:` comes first. The key is trimmed, the value is not.
fn parse_section_entry(line: &str) -> Option<(String, String)> {
    let delimiter = line.find(['=', ':'])?;
    let key = line[..delimiter].trim().to_owned();
    let value = unescape_value(&line[delimiter + 1..]);

    Some((key, value))
}
