//! Session scalars: funds, score and kill bookkeeping.

use data_runtime::configs::economy::Difficulty;

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub money: u32,
    pub score: u32,
    pub high_score: u32,
    pub enemies_killed: u32,
    pub difficulty: Difficulty,
}

impl Progress {
    pub fn new(money: u32, difficulty: Difficulty) -> Self {
        Self {
            money,
            score: 0,
            high_score: 0,
            enemies_killed: 0,
            difficulty,
        }
    }

    /// Credit `amount` to both funds and score.
    pub fn reward(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
        self.add_score(amount);
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
        self.high_score = self.high_score.max(self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_tracks_high_score() {
        let mut p = Progress::new(100, Difficulty::Medium);
        p.high_score = 10;
        p.reward(4);
        assert_eq!((p.money, p.score, p.high_score), (104, 4, 10));
        p.reward(7);
        assert_eq!(p.high_score, 11);
    }
}
