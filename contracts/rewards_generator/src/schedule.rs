//! Halving schedule: maps ledger heights to emission multipliers.
//!
//! Interval `i` spans `[boundary(i - 1), boundary(i))` (the first interval
//! starts at `start_height`) and carries `multipliers[i]`. Intervals with no
//! multiplier, and every height at or past the last boundary, carry 0.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::ContractError;

const SCHEDULE: Symbol = symbol_short!("SCHEDULE");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HalvingSchedule {
    pub start_height: u32,
    pub boundaries: Vec<u32>,
    pub multipliers: Vec<u32>,
}

impl HalvingSchedule {
    /// One boundary per multiplier: `start + halving_after × (i + 1) + 1`.
    pub fn build(
        env: &Env,
        start_height: u32,
        halving_after: u32,
        multipliers: Vec<u32>,
    ) -> Result<Self, ContractError> {
        if halving_after == 0 || multipliers.is_empty() {
            return Err(ContractError::InvalidSchedule);
        }

        let mut boundaries = Vec::new(env);
        for i in 0..multipliers.len() {
            let boundary = halving_after
                .checked_mul(i + 1)
                .and_then(|offset| offset.checked_add(start_height))
                .and_then(|height| height.checked_add(1))
                .ok_or(ContractError::InvalidSchedule)?;
            boundaries.push_back(boundary);
        }

        let schedule = Self {
            start_height,
            boundaries,
            multipliers,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Boundaries must be non-empty, strictly increasing and above the start.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.boundaries.is_empty() {
            return Err(ContractError::InvalidSchedule);
        }
        let mut previous = self.start_height;
        for boundary in self.boundaries.iter() {
            if boundary <= previous {
                return Err(ContractError::InvalidSchedule);
            }
            previous = boundary;
        }
        Ok(())
    }

    /// Weighted height count over `[from, to)`.
    ///
    /// Each height contributes the multiplier of the interval it falls in;
    /// heights before `start_height` contribute nothing. The sum of `u32`
    /// products over a `u32`-indexed table always fits in `i128`.
    pub fn get_multiplier(&self, from: u32, to: u32) -> i128 {
        let from = from.max(self.start_height);
        if from >= to {
            return 0;
        }

        let mut total: i128 = 0;
        let mut lower = self.start_height;
        for (i, upper) in self.boundaries.iter().enumerate() {
            if lower >= to {
                break;
            }
            let begin = from.max(lower);
            let end = to.min(upper);
            if end > begin {
                let multiplier = self.multipliers.get(i as u32).unwrap_or(0);
                total += i128::from(end - begin) * i128::from(multiplier);
            }
            lower = upper;
        }
        total
    }

    /// Number of boundaries already passed at `height`.
    pub fn consumed(&self, height: u32) -> u32 {
        let mut count = 0;
        for boundary in self.boundaries.iter() {
            if boundary > height {
                break;
            }
            count += 1;
        }
        count
    }

    /// Swap in a new boundary table, keeping the multipliers.
    ///
    /// The replacement must be at least as long as the prefix already
    /// consumed at `height`, so intervals in the past keep an entry.
    pub fn reset(&mut self, boundaries: Vec<u32>, height: u32) -> Result<(), ContractError> {
        if boundaries.len() < self.consumed(height) {
            return Err(ContractError::InvalidSchedule);
        }
        let candidate = Self {
            start_height: self.start_height,
            boundaries,
            multipliers: self.multipliers.clone(),
        };
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// First height whose multiplier is 0 for good.
    pub fn emission_end_height(&self) -> u32 {
        self.boundaries.last().unwrap_or(self.start_height)
    }
}

pub fn load(env: &Env) -> Result<HalvingSchedule, ContractError> {
    env.storage()
        .instance()
        .get(&SCHEDULE)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, schedule: &HalvingSchedule) {
    env.storage().instance().set(&SCHEDULE, schedule);
    ttl::extend_instance(env);
}
