//! Delimiters and escape sequences.

use crate::error::{Er7Error, Result};

/// The five ER7 delimiter characters declared by MSH-1 and MSH-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Read the delimiters from the start of an MSH segment.
    pub fn from_header(line: &str) -> Result<Self> {
        let mut chars = line.strip_prefix("MSH").unwrap_or(line).chars();
        let field = chars.next().ok_or_else(|| malformed("missing field separator"))?;
        let encoding: Vec<char> = chars.take_while(|c| *c != field).collect();
        let [component, repetition, escape, subcomponent, ..] = encoding[..] else {
            return Err(malformed(format!(
                "expected four encoding characters, found {}",
                encoding.len()
            )));
        };
        let delimiters = Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
        };
        let all = delimiters.all();
        if all
            .iter()
            .enumerate()
            .any(|(i, c)| all[i + 1..].contains(c) || c.is_alphanumeric())
        {
            return Err(malformed("delimiters must be distinct punctuation"));
        }
        Ok(delimiters)
    }

    fn all(&self) -> [char; 5] {
        [
            self.field,
            self.component,
            self.repetition,
            self.escape,
            self.subcomponent,
        ]
    }

    /// MSH-2 text: component, repetition, escape and subcomponent characters.
    pub fn encoding_characters(&self) -> String {
        [
            self.component,
            self.repetition,
            self.escape,
            self.subcomponent,
        ]
        .iter()
        .collect()
    }

    /// Escape every delimiter and line break in `text`.
    pub fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            let sequence = match c {
                c if c == self.field => "F",
                c if c == self.component => "S",
                c if c == self.subcomponent => "T",
                c if c == self.repetition => "R",
                c if c == self.escape => "E",
                '\r' => "X0D",
                '\n' => "X0A",
                _ => {
                    out.push(c);
                    continue;
                }
            };
            out.push(self.escape);
            out.push_str(sequence);
            out.push(self.escape);
        }
        out
    }

    /// Undo [`Delimiters::escape`]. Sequences it does not know (such as
    /// formatting commands) are kept verbatim.
    pub fn unescape(&self, text: &str) -> String {
        if !text.contains(self.escape) {
            return text.to_string();
        }
        let width = self.escape.len_utf8();
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(self.escape) {
            out.push_str(&rest[..start]);
            let after = &rest[start + width..];
            let Some(end) = after.find(self.escape) else {
                out.push_str(&rest[start..]);
                return out;
            };
            let sequence = &after[..end];
            match self.expand(sequence) {
                Some(expanded) => out.push_str(&expanded),
                None => {
                    out.push(self.escape);
                    out.push_str(sequence);
                    out.push(self.escape);
                }
            }
            rest = &after[end + width..];
        }
        out.push_str(rest);
        out
    }

    fn expand(&self, sequence: &str) -> Option<String> {
        match sequence {
            "F" => Some(self.field.to_string()),
            "S" => Some(self.component.to_string()),
            "T" => Some(self.subcomponent.to_string()),
            "R" => Some(self.repetition.to_string()),
            "E" => Some(self.escape.to_string()),
            _ => sequence.strip_prefix('X').and_then(decode_hex),
        }
    }
}

fn decode_hex(hex: &str) -> Option<String> {
    if hex.is_empty() || hex.len() % 2 != 0 {
        return None;
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        })
        .collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

fn malformed(reason: impl Into<String>) -> Er7Error {
    Er7Error::MalformedHeader {
        reason: reason.into(),
    }
}
