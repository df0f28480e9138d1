//! Baserunner state machine.
//!
//! Eight slots: 0 is the batter at the plate, 1-3 are the bases, 4-7 only
//! hold runners who crossed the plate during a single advance and are emptied
//! before the call returns. Runs scored accumulate until `take_runs` consumes
//! them; starting a new plate appearance with unconsumed runs is an error.

use fxhash::FxHashMap;

use crate::error::{GameError, Result};
use crate::models::PlayerId;

pub const BATTER: usize = 0;
pub const FIRST: usize = 1;
pub const SECOND: usize = 2;
pub const THIRD: usize = 3;
pub const HOME: usize = 4;
const SLOTS: usize = 8;

const BASE_NAMES: [&str; 4] = ["AB", "1st", "2nd", "3rd"];

#[derive(Debug, Clone, Default)]
pub struct Bases {
    slots: [Option<PlayerId>; SLOTS],
    names: FxHashMap<PlayerId, String>,
    runs_scored: u8,
    scored: Vec<PlayerId>,
}

impl Bases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the batter at the plate.
    pub fn new_ab(&mut self, batter: PlayerId, name: &str) -> Result<()> {
        if self.runs_scored != 0 {
            return Err(GameError::InconsistentBaseState(format!(
                "{} run(s) from the previous play were not consumed",
                self.runs_scored
            )));
        }
        self.validate()?;
        self.add_runner_to_base(BATTER, batter, name);
        Ok(())
    }

    /// Place a runner directly. Used for the batter and the extra-inning runner.
    pub fn add_runner_to_base(&mut self, base: usize, id: PlayerId, name: &str) {
        self.slots[base] = Some(id);
        if !name.is_empty() {
            self.names.insert(id, name.to_string());
        }
    }

    /// Move everyone in slots 0-3 forward `n` slots. Anyone reaching home
    /// scores. Returns runs scored by this advance.
    pub fn advance_runners(&mut self, n: usize) -> u8 {
        if n == 0 {
            return 0;
        }
        let before = self.runs_scored;
        // 3루부터 역순으로 이동해야 충돌 없음
        for slot in (BATTER..=THIRD).rev() {
            if let Some(id) = self.slots[slot].take() {
                let target = slot + n;
                if target >= HOME {
                    self.score(id);
                } else {
                    self.slots[target] = Some(id);
                }
            }
        }
        self.runs_scored - before
    }

    pub fn remove_runner(&mut self, slot: usize) {
        self.slots[slot] = None;
    }

    pub fn remove_runners(&mut self, slots: &[usize]) {
        for &slot in slots {
            self.remove_runner(slot);
        }
    }

    /// Sac fly: the runner on 3rd scores, nobody else moves, the batter is out.
    /// `outs` is the count after the catch; a third out scores nothing.
    pub fn tag_up(&mut self, outs: u8) -> u8 {
        self.remove_runner(BATTER);
        if outs >= 3 {
            return 0;
        }
        match self.slots[THIRD].take() {
            Some(id) => {
                self.score(id);
                1
            }
            None => 0,
        }
    }

    /// Move the runner on `from` to `to`, first pushing whoever stands on `to`
    /// the same distance. Returns runs scored by the push.
    pub fn push_a_runner(&mut self, from: usize, to: usize) -> u8 {
        let Some(id) = self.slots[from] else {
            return 0;
        };
        let mut runs = 0;
        if to < HOME && self.slots[to].is_some() {
            runs += self.push_a_runner(to, to + (to - from));
        }
        self.slots[from] = None;
        if to >= HOME {
            self.score(id);
            runs += 1;
        } else {
            self.slots[to] = Some(id);
        }
        runs
    }

    /// Batter to 1st; only forced runners move.
    pub fn walk_or_hbp(&mut self) -> u8 {
        self.push_a_runner(BATTER, FIRST)
    }

    /// Two-out hit: the chain starting at 1st takes one extra base before the
    /// regular advance.
    pub fn two_out_extra_base(&mut self) -> u8 {
        self.push_a_runner(FIRST, SECOND)
    }

    fn score(&mut self, id: PlayerId) {
        self.runs_scored += 1;
        self.scored.push(id);
    }

    pub fn runs_scored(&self) -> u8 {
        self.runs_scored
    }

    /// Consume the pending runs. Returns who scored, in order.
    pub fn take_runs(&mut self) -> Vec<PlayerId> {
        self.runs_scored = 0;
        for slot in HOME..SLOTS {
            self.slots[slot] = None;
        }
        std::mem::take(&mut self.scored)
    }

    /// Reset at half-inning end.
    pub fn clear_bases(&mut self) {
        self.slots = [None; SLOTS];
        self.names.clear();
    }

    pub fn num_runners(&self) -> usize {
        self.slots[FIRST..=THIRD].iter().filter(|s| s.is_some()).count()
    }

    pub fn runner_on(&self, base: usize) -> Option<PlayerId> {
        self.slots[base]
    }

    pub fn is_runner_on(&self, base: usize) -> bool {
        self.slots[base].is_some()
    }

    pub fn runner_name(&self, id: PlayerId) -> &str {
        self.names.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Runner on 1st with 2nd and 3rd open.
    pub fn is_eligible_for_stolen_base(&self) -> bool {
        self.is_runner_on(FIRST) && !self.is_runner_on(SECOND) && !self.is_runner_on(THIRD)
    }

    /// "Runner on 1st", "Runners on 1st, 3rd", or empty.
    pub fn describe_runners(&self) -> String {
        let occupied: Vec<&str> = (FIRST..=THIRD)
            .filter(|&b| self.is_runner_on(b))
            .map(|b| BASE_NAMES[b])
            .collect();
        match occupied.len() {
            0 => String::new(),
            1 => format!("Runner on {}", occupied[0]),
            _ => format!("Runners on {}", occupied.join(", ")),
        }
    }

    /// Occupancy invariants. One id per base, scoring slots empty.
    pub fn validate(&self) -> Result<()> {
        if let Some(slot) = (HOME..SLOTS).find(|&s| self.slots[s].is_some()) {
            return Err(GameError::InconsistentBaseState(format!(
                "scoring slot {} still occupied",
                slot
            )));
        }
        for a in BATTER..=THIRD {
            for b in (a + 1)..=THIRD {
                if let (Some(x), Some(y)) = (self.slots[a], self.slots[b]) {
                    if x == y {
                        return Err(GameError::InconsistentBaseState(format!(
                            "player {} on slots {} and {}",
                            x, a, b
                        )));
                    }
                }
            }
        }
        if usize::from(self.runs_scored) != self.scored.len() {
            return Err(GameError::InconsistentBaseState(format!(
                "runs_scored {} but {} scorers recorded",
                self.runs_scored,
                self.scored.len()
            )));
        }
        Ok(())
    }
}
