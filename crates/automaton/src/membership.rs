#![forbid(unsafe_code)]

use crate::Automaton;
use crate::ValidationError;

impl Automaton {
    /// Returns true iff the automaton accepts the given word, where every
    /// character is a single symbol.
    ///
    /// The check runs on the normalized automaton, so when this automaton is
    /// not normalized a normalized copy is computed first. Prefer to
    /// [normalize](Automaton::normalize) once when checking many words.
    pub fn accepts(&self, word: &str) -> Result<bool, ValidationError> {
        self.accepts_word(word.chars().map(|symbol| symbol.to_string()))
    }

    /// Same as [Automaton::accepts], but for a word given as a sequence of symbols.
    pub fn accepts_word<I>(&self, word: I) -> Result<bool, ValidationError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.is_normalized() {
            Ok(self.run(word))
        } else {
            Ok(self.clone().normalize()?.run(word))
        }
    }

    /// Follows the word from the initial state of a deterministic automaton.
    fn run<I>(&self, word: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        debug_assert!(self.is_deterministic(), "Only deterministic automata can be run");

        let Some(&initial) = self.initials().first() else {
            return false;
        };

        let mut current = initial;
        for symbol in word {
            let Some(symbol) = self.symbol_index(symbol.as_ref()) else {
                return false;
            };

            let Some(next) = self.state(current).targets(symbol).first() else {
                return false;
            };
            current = next;
        }

        self.state(current).is_final()
    }
}
