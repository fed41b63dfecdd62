// Tokenizer/cleaner: raw document text to normalized tokens.
//
// Every character outside ASCII [0-9A-Za-z] acts as a separator. Each
// maximal alphanumeric run is upper-cased and kept unless it is a stopword.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::config::Config;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9A-Za-z]+").expect("token pattern is valid"))
}

/// Split `text` into cleaned, upper-cased tokens with stopwords removed.
///
/// Order of appearance is preserved, so the output can be fed straight
/// into the frequency counter.
pub fn tokenize(text: &str, config: &Config) -> Vec<String> {
    token_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_uppercase())
        .filter(|token| !config.is_stopword(token))
        .collect()
}
