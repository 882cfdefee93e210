//! Round rules: timer, scoring, win and lose.
//!
//! [`RoundState::advance`] is a pure function of the frame's `dt`, the held
//! controls and the two positions read from the previous physics step. It
//! returns what the caller must apply to the world this frame.

use bevy::prelude::*;

use crate::core::config::RulesConfig;
use crate::interaction::inputmap::Controls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Terminal; never left within the process.
    Ended(Outcome),
}

/// What one call to [`RoundState::advance`] asks of the rest of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    pub force: Vec3,
    pub impulse: Option<Vec3>,
    pub hit: bool,
    pub ended: Option<Outcome>,
}

#[derive(Resource, Debug, Clone)]
pub struct RoundState {
    pub score: u32,
    pub remaining: f32,
    pub cooldown: f32,
    pub phase: Phase,
    rules: RulesConfig,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl RoundState {
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            score: 0,
            remaining: rules.round_time.max(0.0),
            cooldown: 0.0,
            phase: Phase::Active,
            rules,
        }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Active => None,
            Phase::Ended(o) => Some(o),
        }
    }

    /// Runs one frame of rules. A no-op returning an empty report once ended.
    pub fn advance(&mut self, dt: f32, controls: Controls, player: Vec3, button: Vec3) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.is_active() {
            return report;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.remaining = (self.remaining - dt).max(0.0);

        report.force = movement_force(controls, self.rules.move_force);
        if controls.jump {
            report.impulse = Some(Vec3::Y * self.rules.jump_impulse);
        }

        self.cooldown -= dt;
        if player.distance(button) < self.rules.hit_distance && self.cooldown <= 0.0 {
            self.score += 1;
            self.cooldown = self.rules.hit_cooldown;
            report.hit = true;
            if self.score >= self.rules.target_score {
                self.phase = Phase::Ended(Outcome::Success);
                report.ended = Some(Outcome::Success);
            }
        }

        if self.is_active() && self.remaining <= 0.0 && self.score < self.rules.target_score {
            self.phase = Phase::Ended(Outcome::Failure);
            report.ended = Some(Outcome::Failure);
        }
        report
    }
}

/// Sum of the held directions; forward is −Z. Diagonals are not normalized.
pub fn movement_force(controls: Controls, magnitude: f32) -> Vec3 {
    let mut f = Vec3::ZERO;
    if controls.forward {
        f.z -= magnitude;
    }
    if controls.back {
        f.z += magnitude;
    }
    if controls.left {
        f.x -= magnitude;
    }
    if controls.right {
        f.x += magnitude;
    }
    f
}

pub fn outcome_message(outcome: Outcome, score: u32) -> String {
    match outcome {
        Outcome::Success => format!("MISSION COMPLETE! Score: {score}"),
        Outcome::Failure => format!("MISSION FAILED. Score: {score}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR: Vec3 = Vec3::new(0.0, 0.5, 5.0);
    const BUTTON: Vec3 = Vec3::new(0.0, 0.25, -5.0);
    const ON_BUTTON: Vec3 = Vec3::new(0.0, 0.5, -5.0);

    #[test]
    fn ten_hits_win() {
        let mut round = RoundState::default();
        let mut ended = None;
        for _ in 0..10 {
            let r = round.advance(0.35, Controls::default(), ON_BUTTON, BUTTON);
            assert!(r.hit);
            ended = r.ended.or(ended);
        }
        assert_eq!(round.score, 10);
        assert_eq!(ended, Some(Outcome::Success));
        assert_eq!(round.phase, Phase::Ended(Outcome::Success));
    }

    #[test]
    fn timeout_loses() {
        let mut round = RoundState::default();
        let mut reports = Vec::new();
        for _ in 0..60 {
            reports.push(round.advance(0.5, Controls::default(), FAR, BUTTON));
        }
        assert_eq!(round.remaining, 0.0);
        assert_eq!(round.phase, Phase::Ended(Outcome::Failure));
        assert_eq!(reports.iter().filter(|r| r.ended.is_some()).count(), 1);
        assert_eq!(reports[59].ended, Some(Outcome::Failure));
    }

    #[test]
    fn hits_respect_cooldown() {
        let mut round = RoundState::default();
        let mut clock = 0.0f32;
        let mut hit_times = Vec::new();
        for _ in 0..40 {
            clock += 0.05;
            if round.advance(0.05, Controls::default(), ON_BUTTON, BUTTON).hit {
                hit_times.push(clock);
            }
        }
        assert!(hit_times.len() >= 2);
        assert_eq!(round.score as usize, hit_times.len());
        for pair in hit_times.windows(2) {
            assert!(pair[1] - pair[0] >= 0.3 - 1e-4, "{pair:?}");
        }
    }

    #[test]
    fn remaining_and_score_are_monotonic() {
        let mut round = RoundState::default();
        let mut last_remaining = round.remaining;
        let mut last_score = round.score;
        for i in 0..200 {
            let player = if i % 3 == 0 { ON_BUTTON } else { FAR };
            let dt = if i % 7 == 0 { -0.2 } else { 0.13 };
            round.advance(dt, Controls::default(), player, BUTTON);
            assert!(round.remaining >= 0.0);
            assert!(round.remaining <= last_remaining);
            assert!(round.score >= last_score && round.score <= last_score + 1);
            last_remaining = round.remaining;
            last_score = round.score;
        }
    }

    #[test]
    fn ended_round_is_frozen() {
        let mut round = RoundState::default();
        round.advance(31.0, Controls::default(), FAR, BUTTON);
        assert_eq!(round.outcome(), Some(Outcome::Failure));
        let snapshot = (round.score, round.remaining, round.cooldown);
        let held = Controls { forward: true, jump: true, ..Default::default() };
        let r = round.advance(0.5, held, ON_BUTTON, BUTTON);
        assert_eq!(r, FrameReport::default());
        assert_eq!((round.score, round.remaining, round.cooldown), snapshot);
    }

    #[test]
    fn diagonal_force_is_not_normalized() {
        let mut round = RoundState::default();
        let held = Controls { left: true, forward: true, ..Default::default() };
        let r = round.advance(0.016, held, FAR, BUTTON);
        assert_eq!(r.force, Vec3::new(-10.0, 0.0, -10.0));
        assert_eq!(r.impulse, None);
    }

    #[test]
    fn opposite_keys_cancel_and_jump_requests_impulse() {
        let c = Controls { left: true, right: true, jump: true, ..Default::default() };
        assert_eq!(movement_force(c, 10.0), Vec3::ZERO);
        let mut round = RoundState::default();
        assert_eq!(round.advance(0.016, c, FAR, BUTTON).impulse, Some(Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn final_hit_on_last_frame_wins() {
        let rules = RulesConfig { target_score: 1, round_time: 0.1, ..Default::default() };
        let mut round = RoundState::new(rules);
        let r = round.advance(0.5, Controls::default(), ON_BUTTON, BUTTON);
        assert_eq!(r.ended, Some(Outcome::Success));
        assert_eq!(round.remaining, 0.0);
    }

    #[test]
    fn messages() {
        assert_eq!(outcome_message(Outcome::Success, 10), "MISSION COMPLETE! Score: 10");
        assert_eq!(outcome_message(Outcome::Failure, 4), "MISSION FAILED. Score: 4");
    }
}
