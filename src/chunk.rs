use std::ops::Range;

use log::debug;

use crate::{Error, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 1500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Break points in order of preference: paragraph, line, sentence, word
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " "];

/// Boundary-aware splitter producing overlapping chunks of bounded character length.
///
/// Chunks are exact substrings of the input. Consecutive chunks overlap by at most
/// `chunk_overlap` characters, so dropping each chunk's overlap and concatenating
/// gives back the input.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &'static [&'static str],
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separators: DEFAULT_SEPARATORS,
        }
    }
}

impl Chunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::ChunkerConfig("chunk size must be positive".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(Error::ChunkerConfig(format!(
                "chunk overlap ({chunk_overlap}) must be smaller than chunk size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS,
        })
    }

    /// Replace the break points; earlier entries are preferred, none means hard cuts only
    pub fn with_separators(mut self, separators: &'static [&'static str]) -> Self {
        self.separators = separators;
        self
    }

    pub fn split(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .split_ranges(text)?
            .into_iter()
            .map(|r| text[r].to_string())
            .collect())
    }

    /// Byte ranges of each chunk within `text`, in order
    pub fn split_ranges(&self, text: &str) -> Result<Vec<Range<usize>>> {
        if text.trim().is_empty() {
            return Err(Error::EmptyContent);
        }

        let mut ranges = Vec::new();
        let mut start = 0;
        loop {
            let window_end = advance(text, start, self.chunk_size);
            if window_end == text.len() {
                ranges.push(start..text.len());
                break;
            }

            let (end, separator) = self.find_break(text, start, window_end);
            ranges.push(start..end);
            start = self.next_start(text, end, separator);
        }

        if ranges.is_empty() {
            return Err(Error::SplitFailure);
        }
        debug!("Split {} chars into {} chunks", text.chars().count(), ranges.len());
        Ok(ranges)
    }

    /// End of the chunk starting at `start`: just after the last separator of the
    /// best kind in the window, or a hard cut at the window end
    fn find_break(&self, text: &str, start: usize, window_end: usize) -> (usize, Option<&'static str>) {
        let window = &text[start..window_end];
        for &sep in self.separators.iter().filter(|s| !s.is_empty()) {
            if let Some(idx) = window.rfind(sep) {
                let end = start + idx + sep.len();
                // the chunk must outgrow its overlap or the next one would not advance
                if text[start..end].chars().count() > self.chunk_overlap {
                    return (end, Some(sep));
                }
            }
        }
        (window_end, None)
    }

    /// Start of the chunk following one that ends at `end`
    fn next_start(&self, text: &str, end: usize, separator: Option<&str>) -> usize {
        let floor = retreat(text, end, self.chunk_overlap);
        let Some(sep) = separator else {
            return floor;
        };
        match text[floor..end].find(sep) {
            Some(idx) if floor + idx + sep.len() < end => floor + idx + sep.len(),
            _ => end,
        }
    }
}

/// Byte index `n` characters after `from`, clamped to the end of `text`
fn advance(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| from + i)
}

/// Byte index `n` characters before `to`, clamped to the start of `text`
fn retreat(text: &str, to: usize, n: usize) -> usize {
    if n == 0 {
        return to;
    }
    text[..to].char_indices().rev().nth(n - 1).map_or(0, |(i, _)| i)
}
