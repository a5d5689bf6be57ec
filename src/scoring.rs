use serde::{Deserialize, Serialize};

/// Point values and the attempt budget used by every round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringConfig {
    pub max_wrong_guesses: u32,
    pub points_per_correct_letter: u32,
    pub hint_penalty: u32,
    pub bonus_per_remaining_attempt: u32,
    pub bonus_no_hints: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_wrong_guesses: 6,
            points_per_correct_letter: 10,
            hint_penalty: 25,
            bonus_per_remaining_attempt: 5,
            bonus_no_hints: 50,
        }
    }
}

impl ScoringConfig {
    pub fn attempts_bonus(&self, wrong_count: u32) -> u32 {
        self.max_wrong_guesses
            .saturating_sub(wrong_count)
            .saturating_mul(self.bonus_per_remaining_attempt)
    }

    pub fn no_hint_bonus(&self, hint_used: bool) -> u32 {
        if hint_used {
            0
        } else {
            self.bonus_no_hints
        }
    }

    /// Score after paying for a hint, never below zero.
    pub fn apply_hint_penalty(&self, score: u32) -> u32 {
        score.saturating_sub(self.hint_penalty)
    }

    pub fn letter_points(&self, occurrences: usize) -> u32 {
        u32::try_from(occurrences)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.points_per_correct_letter)
    }
}

/// The pieces of the gallows figure, drawn one per wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum HangmanPart {
    #[strum(serialize = "head")]
    Head,
    #[strum(serialize = "body")]
    Body,
    #[strum(serialize = "left arm")]
    LeftArm,
    #[strum(serialize = "right arm")]
    RightArm,
    #[strum(serialize = "left leg")]
    LeftLeg,
    #[strum(serialize = "right leg")]
    RightLeg,
}

impl HangmanPart {
    pub const ALL: [HangmanPart; 6] = [
        HangmanPart::Head,
        HangmanPart::Body,
        HangmanPart::LeftArm,
        HangmanPart::RightArm,
        HangmanPart::LeftLeg,
        HangmanPart::RightLeg,
    ];

    /// Part revealed by the `wrong_count`-th miss. Misses beyond the
    /// sixth draw nothing further.
    pub fn for_wrong_count(wrong_count: u32) -> Option<HangmanPart> {
        match wrong_count {
            0 => None,
            n => Self::ALL.get(n as usize - 1).copied(),
        }
    }

    /// Parts visible after `wrong_count` misses.
    pub fn visible(wrong_count: u32) -> &'static [HangmanPart] {
        let n = (wrong_count as usize).min(Self::ALL.len());
        &Self::ALL[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.max_wrong_guesses, 6);
        assert_eq!(cfg.points_per_correct_letter, 10);
        assert_eq!(cfg.hint_penalty, 25);
        assert_eq!(cfg.bonus_per_remaining_attempt, 5);
        assert_eq!(cfg.bonus_no_hints, 50);
    }

    #[test]
    fn test_attempts_bonus() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.attempts_bonus(0), 30);
        assert_eq!(cfg.attempts_bonus(4), 10);
        assert_eq!(cfg.attempts_bonus(6), 0);
        assert_eq!(cfg.attempts_bonus(9), 0);
    }

    #[test]
    fn test_hint_penalty_floors_at_zero() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.apply_hint_penalty(40), 15);
        assert_eq!(cfg.apply_hint_penalty(10), 0);
        assert_eq!(cfg.apply_hint_penalty(0), 0);
    }

    #[test]
    fn test_large_config_values_saturate() {
        let cfg = ScoringConfig {
            points_per_correct_letter: u32::MAX,
            bonus_per_remaining_attempt: u32::MAX,
            ..ScoringConfig::default()
        };
        assert_eq!(cfg.attempts_bonus(0), u32::MAX);
        assert_eq!(cfg.letter_points(3), u32::MAX);
        assert_eq!(cfg.letter_points(0), 0);
    }

    #[test]
    fn test_no_hint_bonus() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.no_hint_bonus(false), 50);
        assert_eq!(cfg.no_hint_bonus(true), 0);
    }

    #[test]
    fn test_parts_by_wrong_count() {
        assert_eq!(HangmanPart::for_wrong_count(0), None);
        assert_eq!(HangmanPart::for_wrong_count(1), Some(HangmanPart::Head));
        assert_eq!(HangmanPart::for_wrong_count(6), Some(HangmanPart::RightLeg));
        assert_eq!(HangmanPart::for_wrong_count(7), None);
        assert_eq!(HangmanPart::visible(3).len(), 3);
        assert_eq!(HangmanPart::visible(10).len(), 6);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let cfg: ScoringConfig = serde_json::from_str(r#"{"hint_penalty": 40}"#).unwrap();
        assert_eq!(cfg.hint_penalty, 40);
        assert_eq!(cfg.max_wrong_guesses, 6);
    }

    #[test]
    fn test_part_display() {
        assert_eq!(HangmanPart::LeftArm.to_string(), "left arm");
    }
}
