//! Hangman - turn-driven word guessing.

use crate::config::HangmanConfig;
use crate::error::{GameError, GameResult};
use crate::grid::GridModel;
use crate::rng::RandomSource;
use crate::rules::{log_rejected, terminal_guard, transition, GameRules};
use crate::types::{Action, Cell, Coord, GameKind, GameStatus, Rejection, StepResult};

#[derive(Debug, Clone)]
pub struct Hangman {
    /// Lowercase target word.
    word: Vec<char>,
    /// Every distinct letter guessed so far, in guess order.
    guessed: Vec<char>,
    /// One blank row, one cell per letter.
    blanks: GridModel<Cell>,
    attempts_left: u32,
    status: GameStatus,
}

impl Hangman {
    /// Pick the target word uniformly from the configured list.
    pub fn new<R: RandomSource>(config: &HangmanConfig, mut rng: R) -> GameResult<Self> {
        config.validate()?;
        let idx = rng.pick_index(config.words.len())?;
        Self::with_word(config, &config.words[idx])
    }

    pub fn with_word(config: &HangmanConfig, word: &str) -> GameResult<Self> {
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GameError::InvalidConfig(format!(
                "hangman word {:?} must be ascii letters",
                word
            )));
        }
        if config.attempts == 0 {
            return Err(GameError::InvalidConfig("hangman attempts must be positive".into()));
        }
        let word: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
        let blanks = GridModel::new(word.len() as i32, 1, Cell::Blank)?;
        Ok(Self {
            word,
            guessed: Vec::new(),
            blanks,
            attempts_left: config.attempts,
            status: GameStatus::InProgress,
        })
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    /// The target word, e.g. for the end-of-round message.
    pub fn word(&self) -> String {
        self.word.iter().collect()
    }

    fn solved(&self) -> bool {
        self.word.iter().all(|c| self.guessed.contains(c))
    }

    fn guess(&mut self, raw: char) -> StepResult {
        if !raw.is_ascii_alphabetic() {
            return log_rejected(GameKind::Hangman, Action::Guess(raw), Rejection::InvalidAction);
        }
        let letter = raw.to_ascii_lowercase();
        if self.guessed.contains(&letter) {
            return log_rejected(GameKind::Hangman, Action::Guess(raw), Rejection::InvalidAction);
        }
        self.guessed.push(letter);

        if self.word.contains(&letter) {
            let changed = self.solved()
                && transition(GameKind::Hangman, &mut self.status, GameStatus::Won);
            return StepResult::accepted()
                .with_score(1)
                .with_status_change(changed);
        }

        self.attempts_left = self.attempts_left.saturating_sub(1);
        let changed = self.attempts_left == 0
            && transition(GameKind::Hangman, &mut self.status, GameStatus::Lost);
        StepResult::accepted().with_status_change(changed)
    }
}

impl GameRules for Hangman {
    fn kind(&self) -> GameKind {
        GameKind::Hangman
    }

    fn apply(&mut self, action: Action) -> GameResult<StepResult> {
        if let Some(rejected) = terminal_guard(self.status) {
            return Ok(rejected);
        }
        match action {
            Action::Guess(c) => Ok(self.guess(c)),
            other => Ok(log_rejected(GameKind::Hangman, other, Rejection::Unsupported)),
        }
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        self.guessed.iter().filter(|c| self.word.contains(c)).count() as u32
    }

    fn view(&self) -> GridModel<Cell> {
        let mut view = self.blanks.clone();
        for (x, c) in self.word.iter().enumerate() {
            if self.guessed.contains(c) {
                view.paint(Coord::new(x as i32, 0), Cell::Letter(*c));
            }
        }
        view
    }

    fn summary(&self) -> String {
        let misses: String = self
            .guessed
            .iter()
            .filter(|c| !self.word.contains(c))
            .collect();
        match self.status {
            GameStatus::Lost => format!("The word was: {}", self.word()),
            _ => format!("Attempts left: {}  Misses: {}", self.attempts_left, misses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    fn game(word: &str, attempts: u32) -> Hangman {
        let config = HangmanConfig {
            attempts,
            ..HangmanConfig::default()
        };
        Hangman::with_word(&config, word).unwrap()
    }

    #[test]
    fn test_new_picks_from_word_list() {
        let game = Hangman::new(&HangmanConfig::default(), ScriptedRandom::new([1])).unwrap();
        assert_eq!(game.word(), "zenpo");
        assert_eq!(game.attempts_left(), 6);
    }

    #[test]
    fn test_correct_guess_reveals_every_occurrence() {
        let mut g = game("hangman", 6);
        let r = g.apply(Action::Guess('a')).unwrap();
        assert!(r.accepted);
        assert_eq!(r.score_delta, 1);
        let view = g.view();
        assert_eq!(view.width(), 7);
        assert_eq!(view.height(), 1);
        assert_eq!(view.get(1, 0), Some(Cell::Letter('a')));
        assert_eq!(view.get(5, 0), Some(Cell::Letter('a')));
        assert_eq!(view.get(0, 0), Some(Cell::Blank));
        assert_eq!(g.attempts_left(), 6);
    }

    #[test]
    fn test_repeated_miss_costs_once() {
        let mut g = game("python", 6);
        assert!(g.apply(Action::Guess('z')).unwrap().accepted);
        assert_eq!(g.attempts_left(), 5);
        let r = g.apply(Action::Guess('z')).unwrap();
        assert_eq!(r.rejection, Some(Rejection::InvalidAction));
        let r = g.apply(Action::Guess('Z')).unwrap();
        assert_eq!(r.rejection, Some(Rejection::InvalidAction));
        assert_eq!(g.attempts_left(), 5);
    }

    #[test]
    fn test_guess_is_case_insensitive() {
        let mut g = game("Zenpo", 6);
        assert_eq!(g.apply(Action::Guess('Z')).unwrap().score_delta, 1);
        assert_eq!(g.view().get(0, 0), Some(Cell::Letter('z')));
    }

    #[test]
    fn test_non_alphabetic_rejected() {
        let mut g = game("python", 6);
        for c in ['1', ' ', '-', 'é'] {
            let r = g.apply(Action::Guess(c)).unwrap();
            assert_eq!(r.rejection, Some(Rejection::InvalidAction));
        }
        assert_eq!(g.attempts_left(), 6);
        assert!(g.guessed().is_empty());
    }

    #[test]
    fn test_win_is_terminal() {
        let mut g = game("abba", 1);
        g.apply(Action::Guess('a')).unwrap();
        let r = g.apply(Action::Guess('b')).unwrap();
        assert!(r.status_changed);
        assert_eq!(g.status(), GameStatus::Won);
        assert_eq!(g.score(), 2);
        assert_eq!(
            g.apply(Action::Guess('x')).unwrap().rejection,
            Some(Rejection::TerminalState)
        );
        assert_eq!(g.attempts_left(), 1);
    }

    #[test]
    fn test_loss_at_zero_attempts_is_terminal() {
        let mut g = game("ab", 2);
        g.apply(Action::Guess('x')).unwrap();
        let r = g.apply(Action::Guess('y')).unwrap();
        assert!(r.status_changed);
        assert_eq!(g.status(), GameStatus::Lost);
        assert_eq!(g.summary(), "The word was: ab");
        assert_eq!(
            g.apply(Action::Guess('a')).unwrap().rejection,
            Some(Rejection::TerminalState)
        );
        assert_eq!(g.status(), GameStatus::Lost);
    }

    #[test]
    fn test_other_actions_unsupported() {
        let mut g = game("python", 6);
        assert_eq!(
            g.apply(Action::Quit).unwrap().rejection,
            Some(Rejection::Unsupported)
        );
    }
}
