//! Box score finalization: per-row rates, team totals, and scorebook
//! innings-pitched notation.

use crate::models::{BattingLine, BattingRates, BoxScore, PitchingLine, PitchingRates};

/// End-of-game pass over a box score: derived rates per row plus team
/// aggregate rows.
pub struct StatsCalculator {
    /// Innings in a regulation game, for ERA scaling
    pub era_innings: f64,
}

impl Default for StatsCalculator {
    fn default() -> Self {
        Self { era_innings: 9.0 }
    }
}

impl StatsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finalize(&self, box_score: &mut BoxScore) {
        let mut batting_total = BattingLine {
            name: "Totals".to_string(),
            ..Default::default()
        };
        for row in box_score.batting.iter_mut() {
            row.rates = Some(batting_rates(row));
            batting_total.absorb(row);
        }
        batting_total.g = 1;
        batting_total.rates = Some(batting_rates(&batting_total));

        let mut pitching_total = PitchingLine {
            name: "Totals".to_string(),
            ..Default::default()
        };
        for row in box_score.pitching.iter_mut() {
            row.rates = Some(self.pitching_rates(row));
            pitching_total.absorb(row);
        }
        pitching_total.g = 1;
        pitching_total.gs = 1;
        pitching_total.condition = box_score
            .pitching
            .last()
            .map(|row| row.condition)
            .unwrap_or_default();
        pitching_total.rates = Some(self.pitching_rates(&pitching_total));

        box_score.batting_totals = Some(batting_total);
        box_score.pitching_totals = Some(pitching_total);
    }

    pub fn pitching_rates(&self, line: &PitchingLine) -> PitchingRates {
        let ip = f64::from(line.outs) / 3.0;
        let (era, whip) = if line.outs > 0 {
            (
                f64::from(line.er) * self.era_innings / ip,
                f64::from(line.bb + line.h) / ip,
            )
        } else {
            (0.0, 0.0)
        };
        PitchingRates {
            ip: innings_pitched(line.outs),
            era: round3(era),
            whip: round3(whip),
        }
    }
}

/// Scorebook innings: 20 outs -> "6.2".
pub fn innings_pitched(outs: u32) -> String {
    format!("{}.{}", outs / 3, outs % 3)
}

pub fn batting_rates(line: &BattingLine) -> BattingRates {
    let avg = ratio(line.h, line.ab);
    let obp = ratio(line.h + line.bb + line.hbp, line.ab + line.bb + line.hbp + line.sf);
    let slg = ratio(line.total_bases(), line.ab);
    BattingRates {
        avg: round3(avg),
        obp: round3(obp),
        slg: round3(slg),
        ops: round3(obp + slg),
    }
}

#[inline]
fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        f64::from(num) / f64::from(den)
    }
}

#[inline]
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
