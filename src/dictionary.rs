use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::{RwLock, RwLockReadGuard};
use serde::Deserialize;

use crate::error::{LoadError, UnloadError};
use crate::letter::Letter;

/// Longest word, in bytes, a word list may contain by default.
pub const MAX_WORD_LENGTH: usize = 45;

/// What `load` does with a token that is too long or does not start with
/// an ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidTokenPolicy {
    /// Abort the load with an error.
    #[default]
    Reject,
    /// Drop the token and keep loading. Dropped tokens are not counted.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub max_word_length: usize,
    pub invalid_tokens: InvalidTokenPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_word_length: MAX_WORD_LENGTH,
            invalid_tokens: InvalidTokenPolicy::default(),
        }
    }
}

/// ASCII whitespace plus vertical tab, which `is_ascii_whitespace` omits.
fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

type Buckets = [Vec<String>; Letter::COUNT];

fn empty_buckets() -> Buckets {
    std::array::from_fn(|_| Vec::new())
}

/// Words partitioned by their case-folded first letter.
///
/// Built once by `load_reader`/`load_path`, queried with `check`, and torn
/// down with `unload`, after which it may be loaded again. Stored words keep
/// the case they had in the source; lookups ignore case.
#[derive(Debug)]
pub struct WordIndex {
    buckets: Buckets,
    word_count: usize,
    loaded: bool,
    options: LoadOptions,
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl WordIndex {
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            buckets: empty_buckets(),
            word_count: 0,
            loaded: false,
            options,
        }
    }

    /// Opens `path` and loads every whitespace separated token in it.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LoadError> {
        if self.loaded {
            return Err(LoadError::AlreadyLoaded);
        }
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loading word list from {:?}", path);
        self.load_reader(BufReader::new(file))
    }

    /// Loads every whitespace separated token from `reader`.
    ///
    /// Tokens are staged and only become visible once the reader is
    /// exhausted, so on error the index is left exactly as empty as it was.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<usize, LoadError> {
        if self.loaded {
            return Err(LoadError::AlreadyLoaded);
        }

        let mut staged = empty_buckets();
        let mut count = 0;

        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            for token in line.split(is_separator).filter(|t| !t.is_empty()) {
                let Some(letter) = self.admit(token, n + 1)? else {
                    continue;
                };
                let mut word = String::new();
                word.try_reserve_exact(token.len())?;
                word.push_str(token);

                let chain = &mut staged[letter.index()];
                chain.try_reserve(1)?;
                chain.push(word);
                count += 1;
            }
        }

        self.buckets = staged;
        self.word_count = count;
        self.loaded = true;
        info!("loaded {} words", count);
        Ok(count)
    }

    /// Validates a token, returning its bucket, `None` when it should be
    /// skipped, or the rejection error.
    fn admit(&self, token: &str, line: usize) -> Result<Option<Letter>, LoadError> {
        let rejection = if token.len() > self.options.max_word_length {
            LoadError::OverLongToken {
                line,
                len: token.len(),
                max: self.options.max_word_length,
            }
        } else if let Some(letter) = Letter::of_word(token) {
            return Ok(Some(letter));
        } else {
            LoadError::NonAlphabeticLeadingCharacter {
                token: token.to_string(),
                line,
            }
        };

        match self.options.invalid_tokens {
            InvalidTokenPolicy::Reject => Err(rejection),
            InvalidTokenPolicy::Skip => {
                warn!("skipping token: {rejection}");
                Ok(None)
            }
        }
    }

    /// Case-insensitive membership test. Words not starting with an ASCII
    /// letter are never present.
    pub fn check(&self, word: &str) -> bool {
        let Some(letter) = Letter::of_word(word) else {
            return false;
        };
        let found = self.bucket(letter).any(|w| w.eq_ignore_ascii_case(word));
        debug!("check {:?} -> {}", word, found);
        found
    }

    /// Words of one bucket, most recently loaded first.
    pub fn bucket(&self, letter: Letter) -> impl Iterator<Item = &str> + '_ {
        self.buckets[letter.index()].iter().rev().map(String::as_str)
    }

    pub fn size(&self) -> usize {
        self.word_count
    }

    /// Releases every stored word. Safe to call on an empty index.
    pub fn unload(&mut self) -> Result<(), UnloadError> {
        self.buckets = empty_buckets();
        self.word_count = 0;
        self.loaded = false;
        debug!("word index unloaded");
        Ok(())
    }
}

/// A `WordIndex` shared between threads. Loading and unloading take the
/// write lock, lookups share the read lock.
#[derive(Clone, Default)]
pub struct SharedWordIndex(Arc<RwLock<WordIndex>>);

impl SharedWordIndex {
    pub fn new(index: WordIndex) -> Self {
        Self(Arc::new(RwLock::new(index)))
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<usize, LoadError> {
        self.0.write().load_path(path)
    }

    pub fn load_reader<R: BufRead>(&self, reader: R) -> Result<usize, LoadError> {
        self.0.write().load_reader(reader)
    }

    pub fn check(&self, word: &str) -> bool {
        self.0.read().check(word)
    }

    pub fn size(&self) -> usize {
        self.0.read().size()
    }

    pub fn unload(&self) -> Result<(), UnloadError> {
        self.0.write().unload()
    }

    /// Holds the read lock for a batch of lookups.
    pub fn take(&self) -> RwLockReadGuard<'_, WordIndex> {
        self.0.read()
    }
}
