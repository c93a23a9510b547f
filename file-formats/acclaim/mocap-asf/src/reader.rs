//! Line cursor shared by the section parsers

use crate::error::{AsfError, Result};
use glam::Vec3;

/// A meaningful (non-blank, non-comment) line with its 1-based number
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn tokens(&self) -> impl Iterator<Item = &'a str> {
        self.text.split_whitespace()
    }

    /// First token, lowercased
    pub fn keyword(&self) -> String {
        self.tokens()
            .next()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }

    /// Everything after the first token
    pub fn rest(&self) -> &'a str {
        let text = self.text.trim_start();
        text.find(char::is_whitespace)
            .map_or("", |pos| text[pos..].trim())
    }

    pub fn is_section(&self) -> bool {
        self.text.starts_with(':')
    }
}

pub(crate) struct Lines<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

impl<'a> Lines<'a> {
    pub fn new(content: &'a str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .map(|(i, text)| Line {
                number: i + 1,
                text: text.trim(),
            })
            .filter(|line| !line.text.is_empty() && !line.text.starts_with('#'))
            .collect();
        Self { lines, pos: 0 }
    }

    pub fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    pub fn next_line(&mut self) -> Option<Line<'a>> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// Next line unless it starts a new `:section`
    pub fn next_in_section(&mut self) -> Option<Line<'a>> {
        match self.peek() {
            Some(line) if !line.is_section() => self.next_line(),
            _ => None,
        }
    }

    /// Skip the body of the current section
    pub fn skip_section(&mut self) -> usize {
        let mut skipped = 0;
        while self.next_in_section().is_some() {
            skipped += 1;
        }
        skipped
    }
}

pub(crate) fn parse_f32(token: &str, line: usize) -> Result<f32> {
    token.parse::<f32>().map_err(|_| AsfError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Parse exactly three numbers from the start of `tokens`
pub(crate) fn parse_vec3<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3> {
    let mut v = [0.0f32; 3];
    for slot in &mut v {
        let token = tokens
            .next()
            .ok_or_else(|| AsfError::syntax(line, "expected three numbers"))?;
        *slot = parse_f32(token, line)?;
    }
    Ok(Vec3::from_array(v))
}
