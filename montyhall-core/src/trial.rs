//! Single-game resolution for the generalized Monty Hall problem.

use rand::Rng;
use rand::seq::{SliceRandom, index};

use crate::config::{GameConfiguration, Strategy};
use crate::error::Result;
use crate::numbers::doors_to_usize;

/// Which doors hide a prize for one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorAssignment {
    winning: Vec<bool>,
}

impl DoorAssignment {
    /// Place `winners` prizes behind distinct doors out of `doors`, uniformly.
    ///
    /// `winners` must not exceed `doors`.
    pub fn random<R: Rng + ?Sized>(doors: usize, winners: usize, rng: &mut R) -> Self {
        let mut winning = vec![false; doors];
        for door in index::sample(rng, doors, winners) {
            winning[door] = true;
        }
        Self { winning }
    }

    #[must_use]
    pub fn is_winning(&self, door: usize) -> bool {
        self.winning.get(door).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.winning.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.winning.is_empty()
    }

    #[must_use]
    pub fn winning_count(&self) -> usize {
        self.winning.iter().filter(|&&wins| wins).count()
    }

    /// Non-winning doors other than `guess`, in index order.
    fn goats_excluding(&self, guess: usize) -> Vec<usize> {
        self.winning
            .iter()
            .enumerate()
            .filter(|&(door, &wins)| !wins && door != guess)
            .map(|(door, _)| door)
            .collect()
    }
}

/// Play one game and report whether the contestant ends on a winning door.
///
/// # Errors
///
/// Returns [`crate::MontyHallError::InvalidConfiguration`] when `config` leaves
/// no door to switch to.
pub fn run_trial<R: Rng + ?Sized>(
    config: &GameConfiguration,
    strategy: Strategy,
    rng: &mut R,
) -> Result<bool> {
    config.validate()?;

    let doors = doors_to_usize(config.m);
    let assignment = DoorAssignment::random(doors, doors_to_usize(config.k), rng);
    let guess = rng.gen_range(0..doors);

    let final_guess = match strategy {
        Strategy::Stay => guess,
        Strategy::Switch => switch_after_reveal(&assignment, guess, doors_to_usize(config.n), rng),
    };

    Ok(assignment.is_winning(final_guess))
}

/// Boolean-flag form of [`run_trial`].
///
/// # Errors
///
/// Same as [`run_trial`].
pub fn run_trial_with_flag<R: Rng + ?Sized>(
    config: &GameConfiguration,
    switch: bool,
    rng: &mut R,
) -> Result<bool> {
    run_trial(config, Strategy::from_switch_flag(switch), rng)
}

/// Host opens `reveal` goat doors the contestant did not pick; the contestant
/// then moves to a uniformly random door that is neither the guess nor opened.
fn switch_after_reveal<R: Rng + ?Sized>(
    assignment: &DoorAssignment,
    guess: usize,
    reveal: usize,
    rng: &mut R,
) -> usize {
    let goats = assignment.goats_excluding(guess);
    let mut opened = vec![false; assignment.len()];
    for pick in index::sample(rng, goats.len(), reveal) {
        opened[goats[pick]] = true;
    }

    let closed: Vec<usize> = (0..assignment.len())
        .filter(|&door| door != guess && !opened[door])
        .collect();
    closed.choose(rng).copied().unwrap_or(guess)
}
