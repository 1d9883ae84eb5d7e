use log::debug;
use serde::{Deserialize, Serialize};

use crate::{TextErr, encoding::Alphabet};

/// What to do with stream characters that have no symbol in the alphabet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCharPolicy {
    /// Drop the character, as if it never was in the stream.
    #[default]
    Skip,
    /// Stop with `TextErr::OutOfAlphabet`.
    Reject,
}

/// Lowercases a character stream and filters it through an alphabet.
///
/// On a rejected character the iterator ends and keeps the error for `take_err`.
pub(crate) struct Symbols<'a, I> {
    stream: I,
    alphabet: &'a Alphabet,
    policy: UnknownCharPolicy,
    skipped: usize,
    failed: bool,
    err: Option<TextErr>,
}

impl<'a, I> Symbols<'a, I>
where
    I: Iterator<Item = char>,
{
    pub(crate) fn new(stream: I, alphabet: &'a Alphabet, policy: UnknownCharPolicy) -> Self {
        Self {
            stream,
            alphabet,
            policy,
            skipped: 0,
            failed: false,
            err: None,
        }
    }

    pub(crate) fn skipped(&self) -> usize {
        self.skipped
    }

    pub(crate) fn take_err(&mut self) -> Option<TextErr> {
        self.err.take()
    }
}

impl<I> Iterator for Symbols<'_, I>
where
    I: Iterator<Item = char>,
{
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.failed {
            return None;
        }

        loop {
            let c = crate::encoding::lowercase(self.stream.next()?);
            if self.alphabet.contains(c) {
                return Some(c);
            }

            match self.policy {
                UnknownCharPolicy::Skip => {
                    debug!("skipping {c:?}, not in the alphabet");
                    self.skipped += 1;
                }
                UnknownCharPolicy::Reject => {
                    self.failed = true;
                    self.err = Some(TextErr::OutOfAlphabet(c));
                    return None;
                }
            }
        }
    }
}
