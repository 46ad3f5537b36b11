//! Phase machine of the title animation.
//!
//! Forming -> Holding -> (PreExit ->) Dissolving -> Complete. Each phase
//! ends once its configured duration has elapsed; the next phase starts
//! exactly where the previous one was scheduled to end, so the run's
//! cumulative time always matches the configured total regardless of frame
//! timing. A single `advance` moves at most one step, so a late frame never
//! skips a phase.

use std::time::Duration;

use crate::config::TitleTimings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Forming,
    Holding,
    PreExit,
    Dissolving,
    Complete,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Forming => "forming",
            Phase::Holding => "holding",
            Phase::PreExit => "pre-exit",
            Phase::Dissolving => "dissolving",
            Phase::Complete => "complete",
        }
    }
}

/// A phase change reported by [`PhaseClock::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Scheduled start of `to` on the host clock.
    pub at: Duration,
}

#[derive(Clone, Debug)]
pub struct PhaseClock {
    timings: TitleTimings,
    phase: Phase,
    phase_start: Duration,
}

impl PhaseClock {
    pub fn new(timings: TitleTimings, now: Duration) -> Self {
        Self {
            timings,
            phase: Phase::Forming,
            phase_start: now,
        }
    }

    /// Back to forming, as on resize.
    pub fn restart(&mut self, now: Duration) {
        self.phase = Phase::Forming;
        self.phase_start = now;
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn phase_start(&self) -> Duration {
        self.phase_start
    }

    pub fn timings(&self) -> &TitleTimings {
        &self.timings
    }

    /// Configured length of `phase`; `None` for complete and for a disabled pre-exit.
    pub fn duration_of(&self, phase: Phase) -> Option<Duration> {
        match phase {
            Phase::Forming => Some(self.timings.forming),
            Phase::Holding => Some(self.timings.holding),
            Phase::PreExit => self.timings.pre_exit,
            Phase::Dissolving => Some(self.timings.dissolving),
            Phase::Complete => None,
        }
    }

    /// Time spent in the current phase. Never negative, even if `now` went backwards.
    #[inline]
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.phase_start)
    }

    /// Fraction of the current phase that has elapsed, clamped to [0, 1].
    pub fn progress(&self, now: Duration) -> f32 {
        match self.duration_of(self.phase) {
            Some(d) if !d.is_zero() => {
                (self.elapsed(now).as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0) as f32
            }
            _ => 1.0,
        }
    }

    fn successor(&self, phase: Phase) -> Phase {
        match phase {
            Phase::Forming => Phase::Holding,
            Phase::Holding if self.timings.pre_exit.is_some() => Phase::PreExit,
            Phase::Holding | Phase::PreExit => Phase::Dissolving,
            Phase::Dissolving | Phase::Complete => Phase::Complete,
        }
    }

    /// Move to the next phase if the current one has run its course.
    pub fn advance(&mut self, now: Duration) -> Option<Transition> {
        let duration = self.duration_of(self.phase)?;
        if self.elapsed(now) < duration {
            return None;
        }
        let from = self.phase;
        let to = self.successor(from);
        self.phase = to;
        self.phase_start += duration;
        log::debug!(
            "[title] {} -> {} at {}ms",
            from.name(),
            to.name(),
            self.phase_start.as_millis()
        );
        Some(Transition {
            from,
            to,
            at: self.phase_start,
        })
    }
}
