//! In-memory word list keyed by first letter, with case-insensitive
//! lookups. See [`WordIndex`].

pub mod config;
pub mod dictionary;
pub mod error;
pub mod letter;
pub mod lexer;

pub use config::Config;
pub use dictionary::{InvalidTokenPolicy, LoadOptions, SharedWordIndex, WordIndex, MAX_WORD_LENGTH};
pub use error::{ConfigError, LoadError, UnloadError};
pub use letter::Letter;
