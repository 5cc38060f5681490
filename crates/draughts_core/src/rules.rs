//! Per-variant rule sets.
//!
//! Everything variant-specific that move generation, promotion and the
//! capture-chain probe need to know lives in a [`RuleSet`] record. Code that
//! generates moves consults the record instead of matching on variant names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::types::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "frysk!")]
    Frysk,
    #[serde(rename = "antidraughts")]
    Antidraughts,
    #[serde(rename = "breakthrough")]
    Breakthrough,
    #[serde(rename = "brazilian")]
    Brazilian,
    #[serde(rename = "russian")]
    Russian,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Standard,
        Variant::Frysk,
        Variant::Antidraughts,
        Variant::Breakthrough,
        Variant::Brazilian,
        Variant::Russian,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Frysk => "frysk!",
            Variant::Antidraughts => "antidraughts",
            Variant::Breakthrough => "breakthrough",
            Variant::Brazilian => "brazilian",
            Variant::Russian => "russian",
        }
    }

    pub fn rules(self) -> RuleSet {
        RuleSet::for_variant(self)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoardError::UnknownVariant(s.to_string()))
    }
}

/// How a finished game is scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// The side left without a legal move loses.
    NoMovesLoses,
    /// The side left without a legal move wins.
    NoMovesWins,
    /// The first side to crown a king wins; running out of moves still loses.
    FirstKingWins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub variant: Variant,
    /// Playable squares per row.
    pub width: u8,
    pub height: u8,
    /// Rows filled for each player in the default start position.
    pub rows_per_player: u8,
    /// Kings slide and capture along whole diagonals.
    pub flying_kings: bool,
    pub men_capture_backward: bool,
    /// A man reaching the far row mid-chain is crowned immediately and keeps
    /// capturing as a king.
    pub promote_mid_capture: bool,
    pub win_condition: WinCondition,
}

impl RuleSet {
    pub fn for_variant(variant: Variant) -> Self {
        let (width, height) = match variant {
            Variant::Brazilian | Variant::Russian => (4, 8),
            _ => (5, 10),
        };
        let rows_per_player = match variant {
            Variant::Frysk => 1,
            Variant::Brazilian | Variant::Russian => 3,
            _ => 4,
        };
        let win_condition = match variant {
            Variant::Antidraughts => WinCondition::NoMovesWins,
            Variant::Breakthrough => WinCondition::FirstKingWins,
            _ => WinCondition::NoMovesLoses,
        };
        RuleSet {
            variant,
            width,
            height,
            rows_per_player,
            flying_kings: true,
            men_capture_backward: true,
            promote_mid_capture: variant == Variant::Russian,
            win_condition,
        }
    }

    pub fn position_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Loads a rule set from TOML. A `variant` key is required; any other
    /// field overrides that variant's defaults.
    ///
    /// ```toml
    /// variant = "russian"
    /// flying_kings = false
    /// ```
    pub fn from_toml(text: &str) -> Result<Self, BoardError> {
        let overrides: RuleOverrides = toml::from_str(text)?;
        let base = RuleSet::for_variant(overrides.variant);
        let rules = RuleSet {
            variant: overrides.variant,
            width: overrides.width.unwrap_or(base.width),
            height: overrides.height.unwrap_or(base.height),
            rows_per_player: overrides.rows_per_player.unwrap_or(base.rows_per_player),
            flying_kings: overrides.flying_kings.unwrap_or(base.flying_kings),
            men_capture_backward: overrides
                .men_capture_backward
                .unwrap_or(base.men_capture_backward),
            promote_mid_capture: overrides
                .promote_mid_capture
                .unwrap_or(base.promote_mid_capture),
            win_condition: overrides.win_condition.unwrap_or(base.win_condition),
        };
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        if self.width == 0 || self.height < 2 {
            return Err(BoardError::InvalidRules(format!(
                "board of {}x{} playable squares is too small",
                self.width, self.height
            )));
        }
        if self.position_count() > Square::MAX as usize {
            return Err(BoardError::InvalidRules(format!(
                "{} squares do not fit a square id",
                self.position_count()
            )));
        }
        if self.rows_per_player == 0 || 2 * self.rows_per_player as usize > self.height as usize {
            return Err(BoardError::InvalidRules(format!(
                "{} starting rows per player do not fit {} rows",
                self.rows_per_player, self.height
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleOverrides {
    variant: Variant,
    width: Option<u8>,
    height: Option<u8>,
    rows_per_player: Option<u8>,
    flying_kings: Option<bool>,
    men_capture_backward: Option<bool>,
    promote_mid_capture: Option<bool>,
    win_condition: Option<WinCondition>,
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
