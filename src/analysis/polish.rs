/*! Rule-based Polish analyzer.

Segmentation follows Unicode text segmentation (UAX #29) for both words and sentences,
whitespace segments being dropped.
Tokens are then tagged by [tagger::tag] and looked up in the stop-word lists.
!*/
use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Error;

use super::{
    stopwords,
    tagger::{self, Tag},
    Analysis, Analyze, Limits,
};

/// Default maximum text length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 1_000_000;

/// Texts above this length are never analyzed.
pub const DEFAULT_CEILING: usize = 100_000_000;

#[derive(Debug, Clone, Copy)]
struct TokenInfo {
    tag: Tag,
    is_stop: bool,
}

pub struct PolishAnalyzer {
    max_length: usize,
    ceiling: usize,
    extra_stopwords: HashSet<String>,

    // reused between calls
    tokens: Vec<TokenInfo>,
}

impl PolishAnalyzer {
    fn is_stopword(&self, token: &str) -> bool {
        stopwords::is_stopword(token)
            || (!self.extra_stopwords.is_empty()
                && self.extra_stopwords.contains(&token.to_lowercase()))
    }

    fn count_sentences(text: &str) -> u64 {
        text.split_sentence_bounds()
            .filter(|sentence| !sentence.trim().is_empty())
            .count() as u64
    }
}

impl Analyze for PolishAnalyzer {
    fn default_limits(&self) -> Limits {
        Limits::new(self.max_length)
    }

    fn analyze(&mut self, text: &str, limits: Limits) -> Result<Analysis, Error> {
        if text.is_empty() {
            return Ok(Analysis::default());
        }

        let length = text.chars().count();
        let max_length = limits.max_length.min(self.ceiling);
        if length > max_length {
            return Err(Error::AnalyzerCapacityExceeded { length, max_length });
        }

        let mut tokens = std::mem::take(&mut self.tokens);
        tokens.clear();
        tokens.extend(
            text.split_word_bounds()
                .filter(|token| !token.trim().is_empty())
                .map(|token| TokenInfo {
                    tag: tagger::tag(token),
                    is_stop: self.is_stopword(token),
                }),
        );

        let mut analysis = Analysis {
            sentences: Self::count_sentences(text),
            ..Default::default()
        };

        for token in &tokens {
            let is_punct = token.tag == Tag::Punct;
            if !is_punct {
                analysis.words += 1;
            } else {
                analysis.punctuations += 1;
            }
            if token.tag == Tag::Sym {
                analysis.symbols += 1;
            }
            if token.is_stop {
                analysis.stopwords += 1;
            }
            if !token.is_stop && !is_punct {
                match token.tag {
                    Tag::Noun => analysis.nouns += 1,
                    Tag::Verb => analysis.verbs += 1,
                    _ => (),
                }
            }
        }

        self.tokens = tokens;
        Ok(analysis)
    }
}

/// Builder for [PolishAnalyzer].
pub struct PolishAnalyzerBuilder<'a> {
    max_length: Option<usize>,
    ceiling: Option<usize>,
    stopwords: Option<&'a Path>,
}

impl<'a> PolishAnalyzerBuilder<'a> {
    pub fn max_length<'b>(&'b mut self, max_length: usize) -> &'b mut PolishAnalyzerBuilder<'a> {
        self.max_length = Some(max_length);
        self
    }

    pub fn ceiling<'b>(&'b mut self, ceiling: usize) -> &'b mut PolishAnalyzerBuilder<'a> {
        self.ceiling = Some(ceiling);
        self
    }

    /// Additional stop-words file, one word per line.
    pub fn stopwords<'b>(&'b mut self, path: &'a Path) -> &'b mut PolishAnalyzerBuilder<'a> {
        self.stopwords = Some(path);
        self
    }

    pub fn build(&self) -> Result<PolishAnalyzer, Error> {
        let max_length = self.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
        let ceiling = self.ceiling.unwrap_or(DEFAULT_CEILING);

        if max_length == 0 {
            return Err(Error::Custom("max_length must be positive".to_string()));
        }
        if max_length > ceiling {
            return Err(Error::Custom(format!(
                "max_length ({}) is above ceiling ({})",
                max_length, ceiling
            )));
        }

        let extra_stopwords = match self.stopwords {
            Some(path) => Self::load_stopwords(path)?,
            None => HashSet::new(),
        };

        Ok(PolishAnalyzer {
            max_length,
            ceiling,
            extra_stopwords,
            tokens: Vec::new(),
        })
    }

    fn load_stopwords(path: &Path) -> Result<HashSet<String>, Error> {
        let f = BufReader::new(File::open(path)?);
        let mut words = HashSet::new();
        for line in f.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && !word.starts_with('#') {
                words.insert(word.to_lowercase());
            }
        }
        debug!("loaded {} stop-words from {:?}", words.len(), path);
        Ok(words)
    }
}

impl<'a> Default for PolishAnalyzerBuilder<'a> {
    fn default() -> Self {
        Self {
            max_length: Some(DEFAULT_MAX_LENGTH),
            ceiling: Some(DEFAULT_CEILING),
            stopwords: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn analyzer() -> PolishAnalyzer {
        PolishAnalyzerBuilder::default().build().unwrap()
    }

    #[test]
    fn two_sentences() {
        let mut a = analyzer();
        let text = "To jest test. Ma dwa zdania.";
        let analysis = a.analyze(text, a.default_limits()).unwrap();

        // To jest test . Ma dwa zdania .
        assert_eq!(analysis.sentences, 2);
        assert_eq!(analysis.words, 6);
        assert_eq!(analysis.punctuations, 2);
        assert_eq!(analysis.symbols, 0);
        // to, jest, ma, dwa
        assert_eq!(analysis.stopwords, 4);
        // zdania
        assert_eq!(analysis.nouns, 1);
        assert_eq!(analysis.verbs, 0);
    }

    #[test]
    fn empty() {
        let mut a = analyzer();
        let analysis = a.analyze("", a.default_limits()).unwrap();
        assert_eq!(analysis, Analysis::default());
    }

    #[test]
    fn whitespace_only() {
        let mut a = analyzer();
        let analysis = a.analyze(" \n\t ", a.default_limits()).unwrap();
        assert_eq!(analysis, Analysis::default());
    }

    #[test]
    fn symbols_are_words() {
        let mut a = analyzer();
        let analysis = a.analyze("2 + 2 = 4", a.default_limits()).unwrap();
        assert_eq!(analysis.symbols, 2);
        assert_eq!(analysis.words, 5);
        assert_eq!(analysis.punctuations, 0);
    }

    #[test]
    fn stopwords_are_not_nouns_or_verbs() {
        let mut a = analyzer();
        // "został" would be tagged as a verb, but is a stop-word
        let analysis = a.analyze("został głosować", a.default_limits()).unwrap();
        assert_eq!(analysis.stopwords, 1);
        assert_eq!(analysis.verbs, 1);
    }

    #[test]
    fn idempotent() {
        let mut a = analyzer();
        let text = "Wysoka Izbo! Rozpatrujemy projekt ustawy o zmianie ustawy – Kodeks pracy (druk nr 1234). Głosowanie odbędzie się jutro.";
        let first = a.analyze(text, a.default_limits()).unwrap();
        let second = a.analyze(text, a.default_limits()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn capacity_exceeded() {
        let mut a = PolishAnalyzerBuilder::default()
            .max_length(10)
            .ceiling(20)
            .build()
            .unwrap();

        let text = "a".repeat(15);
        match a.analyze(&text, a.default_limits()) {
            Err(Error::AnalyzerCapacityExceeded { length, max_length }) => {
                assert_eq!(length, 15);
                assert_eq!(max_length, 10);
            }
            other => panic!("expected capacity error, got {:?}", other),
        }

        // raised limit
        assert!(a.analyze(&text, Limits::new(15)).is_ok());

        // raised above ceiling
        let text = "a".repeat(25);
        assert!(matches!(
            a.analyze(&text, Limits::new(30)),
            Err(Error::AnalyzerCapacityExceeded { max_length: 20, .. })
        ));
    }

    #[test]
    fn invalid_builder() {
        assert!(PolishAnalyzerBuilder::default().max_length(0).build().is_err());
        assert!(PolishAnalyzerBuilder::default()
            .max_length(10)
            .ceiling(5)
            .build()
            .is_err());
    }

    #[test]
    fn extra_stopwords() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopwords.txt");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "# additional stop-words").unwrap();
        writeln!(f, "Marszałek").unwrap();
        drop(f);

        let mut a = PolishAnalyzerBuilder::default()
            .stopwords(&path)
            .build()
            .unwrap();
        let analysis = a.analyze("marszałek Sejmu", a.default_limits()).unwrap();
        assert_eq!(analysis.stopwords, 1);
    }
}
