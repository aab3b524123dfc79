use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, error, info};

use speller::lexer::Lexer;
use speller::{Config, InvalidTokenPolicy, Letter, LoadError, SharedWordIndex, WordIndex};

/// Reports the words in a text that are missing from a word list.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Word list to load, overriding the configured one
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Config file (defaults to <config dir>/speller/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip invalid word list tokens instead of failing the load
    #[arg(long)]
    skip_invalid: bool,

    /// Text to spell check
    text: PathBuf,
}

impl Args {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(dictionary) = &self.dictionary {
            config.dictionary = dictionary.clone();
        }
        if self.skip_invalid {
            config.invalid_tokens = InvalidTokenPolicy::Skip;
        }
        config
    }
}

#[derive(Default, Debug)]
struct Timings {
    load: Duration,
    check: Duration,
    size: Duration,
    unload: Duration,
}

impl Timings {
    fn total(&self) -> Duration {
        self.load + self.check + self.size + self.unload
    }
}

#[derive(Debug)]
struct Report {
    misspelled: Vec<String>,
    words_in_text: usize,
    words_in_dictionary: usize,
    timings: Timings,
}

fn timed<T>(slot: &mut Duration, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    *slot += start.elapsed();
    out
}

/// Loads the configured word list, checks every word of `text` against it
/// and unloads it again.
fn run(config: &Config, text: &str) -> Result<Report, LoadError> {
    let mut timings = Timings::default();
    let index = SharedWordIndex::new(WordIndex::with_options(config.load_options()));

    timed(&mut timings.load, || index.load_path(&config.dictionary))?;

    let mut misspelled = Vec::new();
    let mut words_in_text = 0;
    {
        let index = index.take();
        for letter in Letter::all() {
            debug!("bucket {}: {} words", letter.as_char(), index.bucket(letter).count());
        }
        for token in Lexer::with_max_len(text, config.max_word_length) {
            words_in_text += 1;
            if !timed(&mut timings.check, || index.check(&token.lexeme)) {
                debug!(
                    "{}:{} unknown word {}",
                    token.start.line() + 1,
                    token.start.column() + 1,
                    token.lexeme
                );
                misspelled.push(token.lexeme);
            }
        }
    }

    let words_in_dictionary = timed(&mut timings.size, || index.size());
    if let Err(never) = timed(&mut timings.unload, || index.unload()) {
        match never {}
    }
    info!(
        "checked {} words, {} misspelled",
        words_in_text,
        misspelled.len()
    );

    Ok(Report {
        misspelled,
        words_in_text,
        words_in_dictionary,
        timings,
    })
}

fn print_report(report: &Report) {
    println!("\nMISSPELLED WORDS\n");
    for word in &report.misspelled {
        println!("{word}");
    }

    let timings = &report.timings;
    println!("\nWORDS MISSPELLED:     {}", report.misspelled.len());
    println!("WORDS IN DICTIONARY:  {}", report.words_in_dictionary);
    println!("WORDS IN TEXT:        {}", report.words_in_text);
    println!("TIME IN load:         {:.2}", timings.load.as_secs_f64());
    println!("TIME IN check:        {:.2}", timings.check.as_secs_f64());
    println!("TIME IN size:         {:.2}", timings.size.as_secs_f64());
    println!("TIME IN unload:       {:.2}", timings.unload.as_secs_f64());
    println!("TIME IN TOTAL:        {:.2}\n", timings.total().as_secs_f64());
}

fn fail(message: String) -> ExitCode {
    error!("{message}");
    eprintln!("{message}");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => args.apply(config),
        Err(err) => return fail(err.to_string()),
    };

    let text = match fs::read_to_string(&args.text) {
        Ok(text) => text,
        Err(err) => return fail(format!("Could not open {:?}: {err}", args.text)),
    };

    match run(&config, &text) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => fail(format!("Could not load {:?}: {err}", config.dictionary)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn word_list(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn config_for(file: &NamedTempFile) -> Config {
        Config {
            dictionary: file.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn reports_misspelled_words() {
        let dict = word_list("the\ncat\nsat\non\nmat\n");
        let report = run(&config_for(&dict), "The cat sat on teh mat.").unwrap();
        assert_eq!(report.misspelled, vec!["teh"]);
        assert_eq!(report.words_in_text, 6);
        assert_eq!(report.words_in_dictionary, 5);
    }

    #[test]
    fn words_with_digits_are_not_counted() {
        let dict = word_list("cat mat");
        let report = run(&config_for(&dict), "cat r2d2 mat 42").unwrap();
        assert!(report.misspelled.is_empty());
        assert_eq!(report.words_in_text, 2);
    }

    #[test]
    fn skip_invalid_flag_overrides_config() {
        let dict = word_list("cat 1word dog");
        let path = dict.path().to_str().unwrap();

        let strict = Args::parse_from(["speller", "-d", path, "text.txt"]);
        let config = strict.apply(Config::default());
        assert!(matches!(
            run(&config, "cat"),
            Err(LoadError::NonAlphabeticLeadingCharacter { .. })
        ));

        let lenient = Args::parse_from(["speller", "--skip-invalid", "-d", path, "text.txt"]);
        let config = lenient.apply(Config::default());
        assert_eq!(config.dictionary, dict.path());
        let report = run(&config, "cat dog word").unwrap();
        assert_eq!(report.words_in_dictionary, 2);
        assert_eq!(report.misspelled, vec!["word"]);
    }

    #[test]
    fn missing_dictionary_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            dictionary: dir.path().join("absent"),
            ..Config::default()
        };
        assert!(matches!(
            run(&config, "anything"),
            Err(LoadError::SourceUnavailable { .. })
        ));
    }
}
