use std::{collections::VecDeque, fmt, num::NonZeroUsize};

use crate::{Result, TextErr};

/// The `H` most recent characters of a stream, lowercased, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    chars: VecDeque<char>,
}

impl Window {
    /// Fills a new window with the first `len` characters of `stream`.
    ///
    /// Only `len` characters are consumed, pass `iter.by_ref()` to keep reading afterwards.
    ///
    /// # Returns
    /// The window or `TextErr::StreamExhausted` if the stream ends too early.
    pub fn initialize<I>(stream: I, len: NonZeroUsize) -> Result<Self>
    where
        I: Iterator<Item = char>,
    {
        let chars: VecDeque<_> = stream.take(len.get()).map(lowercase).collect();

        if chars.len() < len.get() {
            return Err(TextErr::StreamExhausted {
                got: chars.len(),
                expected: len.get(),
            });
        }

        Ok(Self { chars })
    }

    /// Seeds a new window with the last `len` characters of `prompt`.
    pub fn from_prompt(prompt: &str, len: NonZeroUsize) -> Result<Self> {
        let total = prompt.chars().count();
        let skip = total.saturating_sub(len.get());

        Self::initialize(prompt.chars().skip(skip), len)
    }

    /// Returns a copy of this window with the oldest character dropped and `c` appended.
    pub fn advance(&self, c: char) -> Self {
        let mut next = self.clone();
        next.shift(c);
        next
    }

    /// In place version of `advance`.
    pub fn shift(&mut self, c: char) {
        self.chars.pop_front();
        self.chars.push_back(lowercase(c));
    }

    /// Returns `H`, the window length.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

pub(crate) fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
