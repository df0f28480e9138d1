//! Plate-appearance outcome.
//!
//! The category is derived from the play code, so an `Out` can never carry a
//! hit code and vice versa.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeCategory {
    Out,
    OnBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayCode {
    // On base
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    HitByPitch,
    // Out
    Strikeout,
    GroundOut,
    FlyOut,
    LineOut,
    DoublePlay,
    FieldersChoice,
    SacFly,
}

impl PlayCode {
    pub fn category(self) -> OutcomeCategory {
        match self {
            PlayCode::Single
            | PlayCode::Double
            | PlayCode::Triple
            | PlayCode::HomeRun
            | PlayCode::Walk
            | PlayCode::HitByPitch => OutcomeCategory::OnBase,
            _ => OutcomeCategory::Out,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(
            self,
            PlayCode::Single | PlayCode::Double | PlayCode::Triple | PlayCode::HomeRun
        )
    }

    /// Scorebook abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            PlayCode::Single => "1B",
            PlayCode::Double => "2B",
            PlayCode::Triple => "3B",
            PlayCode::HomeRun => "HR",
            PlayCode::Walk => "BB",
            PlayCode::HitByPitch => "HBP",
            PlayCode::Strikeout => "K",
            PlayCode::GroundOut => "GB",
            PlayCode::FlyOut => "FO",
            PlayCode::LineOut => "LO",
            PlayCode::DoublePlay => "DP",
            PlayCode::FieldersChoice => "FC",
            PlayCode::SacFly => "SF",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            PlayCode::Single => "singled",
            PlayCode::Double => "doubled",
            PlayCode::Triple => "tripled",
            PlayCode::HomeRun => "homered",
            PlayCode::Walk => "walked",
            PlayCode::HitByPitch => "was hit by a pitch",
            PlayCode::Strikeout => "struck out",
            PlayCode::GroundOut => "grounded out",
            PlayCode::FlyOut => "flied out",
            PlayCode::LineOut => "lined out",
            PlayCode::DoublePlay => "grounded into a double play",
            PlayCode::FieldersChoice => "reached on a fielder's choice",
            PlayCode::SacFly => "hit a sacrifice fly",
        }
    }

    /// Outs recorded and bases runners move for this code.
    fn shape(self) -> (u8, u8) {
        match self {
            PlayCode::Single => (0, 1),
            PlayCode::Double => (0, 2),
            PlayCode::Triple => (0, 3),
            PlayCode::HomeRun => (0, 4),
            PlayCode::Walk | PlayCode::HitByPitch => (0, 1),
            PlayCode::Strikeout | PlayCode::FlyOut | PlayCode::LineOut => (1, 0),
            PlayCode::GroundOut | PlayCode::FieldersChoice | PlayCode::SacFly => (1, 1),
            PlayCode::DoublePlay => (2, 1),
        }
    }
}

/// Result of a single plate appearance.
///
/// `runs` and `rbis` are zero when the outcome leaves the resolver; the in-play
/// resolver fills them in once the runners have moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub code: PlayCode,
    pub outs_on_play: u8,
    pub bases_to_advance: u8,
    pub runs: u8,
    pub rbis: u8,
}

impl Outcome {
    pub fn new(code: PlayCode) -> Self {
        let (outs_on_play, bases_to_advance) = code.shape();
        Self {
            code,
            outs_on_play,
            bases_to_advance,
            runs: 0,
            rbis: 0,
        }
    }

    pub fn category(&self) -> OutcomeCategory {
        self.code.category()
    }

    pub fn on_base(&self) -> bool {
        self.category() == OutcomeCategory::OnBase
    }

    /// Replace the play code, keeping the outcome's shape consistent.
    pub fn reclassify(self, code: PlayCode) -> Self {
        Self::new(code)
    }

    /// Record runs scored on the play. No RBI on a double play.
    pub fn with_runs(mut self, runs: u8) -> Self {
        self.runs = runs;
        self.rbis = if self.code == PlayCode::DoublePlay { 0 } else { runs };
        self
    }
}
