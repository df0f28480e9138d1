pub mod box_score;
pub mod game_result;
pub mod outcome;
pub mod player;
pub mod season;
pub mod team;

pub use box_score::{BattingLine, BattingRates, BoxScore, PitchingLine, PitchingRates};
pub use game_result::{Decisions, GamePlan, GameResult, LineScore};
pub use outcome::{Outcome, OutcomeCategory, PlayCode};
pub use player::{BatterStats, FieldPosition, LeagueBaseline, PitcherStats, PlayerId};
pub use season::{SeasonState, TeamRecord};
pub use team::{Side, TeamSetup, LINEUP_SIZE};
