// src/clients/profanity.rs

use std::collections::HashSet;

const STRIP_CHARS: &[char] = &['!', ',', '.', '?'];
const SUFFIXES: &[&str] = &["ing", "in'", "ed", "s"];

/// Word list loaded from `profanity.txt`, one word per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfanityList {
    words: HashSet<String>,
}

impl ProfanityList {
    pub fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Words of `lyrics` that hit the list, in order of appearance.
    pub fn find(&self, lyrics: &str) -> Vec<String> {
        lyrics
            .split_whitespace()
            .map(|w| w.trim_matches(STRIP_CHARS).to_lowercase())
            .filter(|w| !w.is_empty() && self.matches(w))
            .collect()
    }

    fn matches(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        SUFFIXES.iter().any(|suffix| {
            word.strip_suffix(suffix)
                .is_some_and(|stem| !stem.is_empty() && self.words.contains(stem))
        })
    }
}
