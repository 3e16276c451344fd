//! End-of-episode messages
//!
//! The presentation layer picks a message for [`FlightEvent::OutcomeFinalized`].
//! Some outcomes have several variants; the RNG is passed in so replays and
//! tests can pin the choice.
//!
//! [`FlightEvent::OutcomeFinalized`]: crate::sim::FlightEvent::OutcomeFinalized

use rand::Rng;

use crate::sim::Outcome;

const SAFE: &[&str] = &["The Eagle has landed! Congratulations on a safe landing."];

const CRASH_VERTICAL: &[&str] = &[
    "You came in too fast and left a new crater on the surface.",
    "Vertical speed too high. The landing gear did not survive.",
    "That was less of a landing and more of an impact.",
];

const CRASH_HORIZONTAL: &[&str] = &["Too much sideways drift. The lander tipped over and broke apart."];

const CRASH_UNEVEN: &[&str] = &["You missed the landing pad. The lander toppled on the uneven ground."];

const OUT_OF_RANGE: &[&str] = &["You have drifted out of range. Mission control has lost contact."];

fn variants(outcome: Outcome) -> &'static [&'static str] {
    match outcome {
        Outcome::Safe => SAFE,
        Outcome::CrashExcessVertical => CRASH_VERTICAL,
        Outcome::CrashExcessHorizontal => CRASH_HORIZONTAL,
        Outcome::CrashUnevenContact => CRASH_UNEVEN,
        Outcome::OutOfRange => OUT_OF_RANGE,
    }
}

/// Number of message variants for `outcome`
pub fn variant_count(outcome: Outcome) -> usize {
    variants(outcome).len()
}

/// Choose a message variant for `outcome`
pub fn pick_variant<R: Rng>(outcome: Outcome, rng: &mut R) -> usize {
    rng.random_range(0..variant_count(outcome))
}

/// Message text; variant indices past the end wrap around
pub fn outcome_message(outcome: Outcome, variant: usize) -> &'static str {
    let messages = variants(outcome);
    messages[variant % messages.len()]
}

/// Whether the end-of-episode dialog should show the "safe" icon
pub fn is_success(outcome: Outcome) -> bool {
    outcome == Outcome::Safe
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const ALL: [Outcome; 5] = [
        Outcome::Safe,
        Outcome::CrashExcessVertical,
        Outcome::CrashExcessHorizontal,
        Outcome::CrashUnevenContact,
        Outcome::OutOfRange,
    ];

    #[test]
    fn test_every_outcome_has_a_message() {
        for outcome in ALL {
            assert!(variant_count(outcome) >= 1);
            assert!(!outcome_message(outcome, 0).is_empty());
        }
        assert_eq!(variant_count(Outcome::CrashExcessVertical), 3);
    }

    #[test]
    fn test_seeded_variant_is_reproducible() {
        let mut a = Pcg32::seed_from_u64(2011);
        let mut b = Pcg32::seed_from_u64(2011);
        let picks_a: Vec<usize> = (0..20)
            .map(|_| pick_variant(Outcome::CrashExcessVertical, &mut a))
            .collect();
        let picks_b: Vec<usize> = (0..20)
            .map(|_| pick_variant(Outcome::CrashExcessVertical, &mut b))
            .collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|&v| v < 3));
    }

    #[test]
    fn test_variant_wraps() {
        assert_eq!(
            outcome_message(Outcome::CrashExcessVertical, 4),
            outcome_message(Outcome::CrashExcessVertical, 1)
        );
        assert_eq!(pick_variant(Outcome::Safe, &mut Pcg32::seed_from_u64(1)), 0);
    }

    #[test]
    fn test_success_flag() {
        assert!(is_success(Outcome::Safe));
        assert!(!is_success(Outcome::OutOfRange));
    }
}
