//! Session shell
//!
//! Wires the gateways to the round lifecycle: preferences in at round start,
//! the outcome out exactly once at round end. Gateway failures degrade into
//! defaults or a player-facing notice; they never abort or rewind the
//! simulation.

use crate::prefs::{Preferences, PreferencesGateway};
use crate::records::{ScoreEntry, ScoreGateway};
use crate::sim::{InputEvent, Round, RoundPhase};

/// One player session: a sequence of rounds over fixed gateways.
pub struct Session<P: PreferencesGateway, S: ScoreGateway> {
    prefs: P,
    scores: S,
    round: Option<Round>,
    next_seed: u64,
    submitted: bool,
    notice: Option<String>,
}

impl<P: PreferencesGateway, S: ScoreGateway> Session<P, S> {
    pub fn new(prefs: P, scores: S, seed: u64) -> Self {
        Self {
            prefs,
            scores,
            round: None,
            next_seed: seed,
            submitted: false,
            notice: None,
        }
    }

    /// Load preferences (falling back to defaults if the gateway fails) and
    /// start a fresh round.
    pub fn start_round(&mut self) {
        let prefs = self.prefs.load().unwrap_or_else(|err| {
            log::warn!("Preferences unavailable ({err:#}), using defaults");
            Preferences::default()
        });
        let mut round = Round::new(prefs.round_config(), self.next_seed);
        self.next_seed = self.next_seed.wrapping_add(1);
        round.start();
        self.round = Some(round);
        self.submitted = false;
        self.notice = None;
    }

    /// Restart the ended round on the same configuration.
    pub fn play_again(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.play_again();
            if round.phase() == RoundPhase::Running {
                self.submitted = false;
                self.notice = None;
            }
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(round) = self.round.as_mut() {
            round.handle_input(event);
        }
    }

    /// Advance the round and, on the Ended transition, submit the outcome
    /// exactly once.
    pub fn tick(&mut self, elapsed_ms: u64) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.tick(elapsed_ms);
        if round.phase() == RoundPhase::Ended && !self.submitted {
            self.submit_outcome();
        }
    }

    fn submit_outcome(&mut self) {
        let Some(outcome) = self.round.as_ref().and_then(|r| r.outcome()) else {
            return;
        };
        self.submitted = true;
        let entry = ScoreEntry {
            final_score: outcome.final_score,
            raw_score: outcome.raw_score,
            target_count: outcome.target_count,
            duration_secs: outcome.duration_secs,
        };
        if let Err(err) = self.scores.submit(&entry) {
            log::warn!("Score submission failed: {err:#}");
            self.notice = Some(format!("score not saved: {err:#}"));
        }
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Player-facing notice from the last round end, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn preferences(&mut self) -> &mut P {
        &mut self.prefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;
    use anyhow::{Result, anyhow};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingGateway {
        submissions: Rc<Cell<usize>>,
        fail: bool,
    }

    impl ScoreGateway for CountingGateway {
        fn submit(&mut self, _entry: &ScoreEntry) -> Result<()> {
            self.submissions.set(self.submissions.get() + 1);
            if self.fail {
                Err(anyhow!("records service unavailable"))
            } else {
                Ok(())
            }
        }
    }

    fn run_out_the_clock<P: PreferencesGateway>(session: &mut Session<P, CountingGateway>) {
        for _ in 0..200 {
            session.tick(16);
        }
    }

    #[test]
    fn test_outcome_submitted_exactly_once() {
        let submissions = Rc::new(Cell::new(0));
        let gateway = CountingGateway {
            submissions: submissions.clone(),
            fail: false,
        };
        let prefs = MemoryPreferences::new(Preferences {
            target_count: 1,
            round_duration: 2,
        });
        let mut session = Session::new(prefs, gateway, 1);
        session.start_round();

        run_out_the_clock(&mut session);
        assert_eq!(session.round().unwrap().phase(), RoundPhase::Ended);
        assert_eq!(submissions.get(), 1);

        // Ticking a dead round never resubmits
        run_out_the_clock(&mut session);
        assert_eq!(submissions.get(), 1);
    }

    #[test]
    fn test_submit_failure_becomes_notice() {
        let gateway = CountingGateway {
            submissions: Rc::new(Cell::new(0)),
            fail: true,
        };
        let prefs = MemoryPreferences::new(Preferences {
            target_count: 1,
            round_duration: 1,
        });
        let mut session = Session::new(prefs, gateway, 2);
        session.start_round();

        run_out_the_clock(&mut session);
        let round = session.round().unwrap();
        assert_eq!(round.phase(), RoundPhase::Ended);
        // The round still ended cleanly with its outcome intact
        assert!(round.outcome().is_some());
        assert!(session.notice().unwrap().contains("score not saved"));
    }

    #[test]
    fn test_prefs_failure_falls_back_to_defaults() {
        let gateway = CountingGateway::default();
        // Empty memory gateway: load() fails
        let mut session = Session::new(MemoryPreferences::default(), gateway, 3);
        session.start_round();

        let round = session.round().unwrap();
        assert_eq!(round.phase(), RoundPhase::Running);
        assert_eq!(round.targets().len(), 1);
        assert_eq!(round.remaining_secs(), 60);
    }

    #[test]
    fn test_play_again_rearms_submission() {
        let submissions = Rc::new(Cell::new(0));
        let gateway = CountingGateway {
            submissions: submissions.clone(),
            fail: false,
        };
        let prefs = MemoryPreferences::new(Preferences {
            target_count: 2,
            round_duration: 1,
        });
        let mut session = Session::new(prefs, gateway, 4);
        session.start_round();

        run_out_the_clock(&mut session);
        assert_eq!(submissions.get(), 1);

        session.play_again();
        assert_eq!(session.round().unwrap().phase(), RoundPhase::Running);
        run_out_the_clock(&mut session);
        assert_eq!(submissions.get(), 2);
    }
}
