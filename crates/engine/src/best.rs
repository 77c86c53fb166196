use serde::{Deserialize, Serialize};

/// Highest score seen so far. Only ever moves up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScore(u32);

impl BestScore {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Record `score`; returns true when it set a new best.
    pub fn observe(&mut self, score: u32) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_raises() {
        let mut best = BestScore::new(10);
        assert!(best.observe(12));
        assert_eq!(best.get(), 12);
    }

    #[test]
    fn test_observe_never_lowers() {
        let mut best = BestScore::new(100);
        assert!(!best.observe(40));
        assert!(!best.observe(100));
        assert_eq!(best.get(), 100);
    }
}
