// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Id-keyed transitions between consecutive layouts.
//!
//! Sectors are joined on [`SectorId`]. A sector present in both layouts tweens its angles; a new
//! sector appears at its final span and fades in; a sector that disappeared keeps its last span
//! and fades out.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use peniko::Color;

use crate::layout::{ArcSpan, pad_span};
use crate::record::SectorId;

/// Default transition duration.
pub const DEFAULT_DURATION_MS: u32 = 300;

/// The drawn state of one sector at a point in time.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorState {
    /// Join key.
    pub id: SectorId,
    /// Start angle (radians).
    pub start_angle: f64,
    /// End angle (radians).
    pub end_angle: f64,
    /// Pad removed from the drawn wedge.
    pub pad_angle: f64,
    /// Fill color.
    pub fill: Color,
}

impl SectorState {
    /// State of a laid-out span with the given fill.
    pub fn from_span(span: &ArcSpan, fill: Color) -> Self {
        Self {
            id: span.id.clone(),
            start_angle: span.start_angle,
            end_angle: span.end_angle,
            pad_angle: span.pad_angle,
            fill,
        }
    }

    /// Angle halfway through the span.
    pub fn mid_angle(&self) -> f64 {
        0.5 * (self.start_angle + self.end_angle)
    }

    /// Drawn start/end angles after removing the pad; see [`ArcSpan::padded`].
    pub fn padded(&self) -> (f64, f64) {
        pad_span(self.start_angle, self.end_angle, self.pad_angle)
    }

    fn with_fill(&self, fill: Color) -> Self {
        Self {
            fill,
            ..self.clone()
        }
    }

    fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            id: to.id.clone(),
            start_angle: lerp(self.start_angle, to.start_angle, t),
            end_angle: lerp(self.end_angle, to.end_angle, t),
            pad_angle: lerp(self.pad_angle, to.pad_angle, t),
            fill: lerp_color(self.fill, to.fill, t),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    #[expect(clippy::cast_possible_truncation, reason = "progress only needs f32 precision")]
    let t = t as f32;
    let mut out = [0.0_f32; 4];
    for (i, c) in out.iter_mut().enumerate() {
        *c = a.components[i] + (b.components[i] - a.components[i]) * t;
    }
    Color::new(out)
}

/// How a sector takes part in a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// New in the target layout.
    Enter,
    /// Present in both layouts.
    Update,
    /// Gone from the target layout.
    Exit,
}

/// One sector's tween.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionEntry {
    /// Join phase.
    pub phase: Phase,
    /// Record index in the target layout; `None` for exiting sectors.
    pub record: Option<usize>,
    /// Render order of the sector.
    pub render_index: usize,
    /// State at progress 0.
    pub from: SectorState,
    /// State at progress 1.
    pub to: SectorState,
}

impl TransitionEntry {
    /// Evaluates the entry at `t` in `[0, 1]`.
    pub fn at(&self, t: f64) -> SectorState {
        self.from.lerp(&self.to, t)
    }
}

/// A join between the previously drawn sectors and a new layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transition {
    entries: Vec<TransitionEntry>,
    duration_ms: u32,
}

impl Transition {
    /// Joins `target` against the last drawn states.
    ///
    /// `target` pairs each laid-out span with its fill. Entering and updating sectors come first
    /// in render order, exiting sectors after them.
    pub fn between(
        previous: &HashMap<SectorId, SectorState>,
        target: &[(ArcSpan, Color)],
        duration_ms: u32,
    ) -> Self {
        let mut entries = Vec::with_capacity(target.len());
        let seen: HashSet<&SectorId> = target.iter().map(|(span, _)| &span.id).collect();

        for (render_index, (span, fill)) in target.iter().enumerate() {
            let to = SectorState::from_span(span, *fill);
            let (phase, from) = match previous.get(&span.id) {
                Some(prev) => (Phase::Update, prev.clone()),
                None => (Phase::Enter, to.with_fill(Color::TRANSPARENT)),
            };
            entries.push(TransitionEntry {
                phase,
                record: Some(span.record),
                render_index,
                from,
                to,
            });
        }

        let mut exits: Vec<&SectorState> = previous
            .values()
            .filter(|state| !seen.contains(&state.id))
            .collect();
        // Hash order is arbitrary; keep exits deterministic.
        exits.sort_by(|a, b| a.id.cmp(&b.id));
        let first_exit = entries.len();
        entries.extend(exits.into_iter().enumerate().map(|(i, state)| TransitionEntry {
            phase: Phase::Exit,
            record: None,
            render_index: first_exit + i,
            from: state.clone(),
            to: state.with_fill(Color::TRANSPARENT),
        }));

        let (entered, exited) = entries.iter().fold((0, 0), |(n, x), e| match e.phase {
            Phase::Enter => (n + 1, x),
            Phase::Exit => (n, x + 1),
            Phase::Update => (n, x),
        });
        tracing::debug!(
            sectors = target.len(),
            entered,
            exited,
            "sector transition prepared"
        );

        Self {
            entries,
            duration_ms,
        }
    }

    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// The joined entries, in render order.
    pub fn entries(&self) -> &[TransitionEntry] {
        &self.entries
    }

    /// Progress for `elapsed_ms` since the transition started, in `[0, 1]`.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms / f64::from(self.duration_ms)).clamp(0.0, 1.0)
    }

    /// Evaluates every entry at `progress`, clamped to `[0, 1]`.
    ///
    /// Exited sectors are dropped once the transition completes.
    pub fn frame(&self, progress: f64) -> Vec<(&TransitionEntry, SectorState)> {
        let t = if progress.is_nan() {
            1.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.entries
            .iter()
            .filter(|e| t < 1.0 || e.phase != Phase::Exit)
            .map(|e| (e, e.at(t)))
            .collect()
    }

    /// The states at progress 1, keyed for the next join.
    pub fn settled(&self) -> HashMap<SectorId, SectorState> {
        self.entries
            .iter()
            .filter(|e| e.phase != Phase::Exit)
            .map(|e| (e.to.id.clone(), e.to.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;

    fn span(id: &str, record: usize, a0: f64, a1: f64) -> ArcSpan {
        ArcSpan {
            id: SectorId::new(id),
            record,
            start_angle: a0,
            end_angle: a1,
            pad_angle: 0.0,
        }
    }

    #[test]
    fn first_render_enters_everything() {
        let t = Transition::between(
            &HashMap::new(),
            &[(span("a", 0, 0.0, 1.0), css::TOMATO), (span("b", 1, 1.0, 2.0), css::TEAL)],
            DEFAULT_DURATION_MS,
        );
        assert!(t.entries().iter().all(|e| e.phase == Phase::Enter));

        let start = t.frame(0.0);
        assert_eq!(start[0].1.start_angle, 0.0);
        assert_eq!(start[0].1.end_angle, 1.0);
        assert_eq!(start[0].1.fill.components[3], 0.0);

        let end = t.frame(1.0);
        assert_eq!(end[1].1.fill, css::TEAL);
    }

    #[test]
    fn updates_tween_angles_and_exits_fade_out() {
        let first = Transition::between(
            &HashMap::new(),
            &[(span("a", 0, 0.0, 1.0), css::TOMATO), (span("b", 1, 1.0, 2.0), css::TEAL)],
            DEFAULT_DURATION_MS,
        );
        let second = Transition::between(
            &first.settled(),
            &[(span("a", 0, 0.0, 2.0), css::TOMATO)],
            DEFAULT_DURATION_MS,
        );
        let phases: Vec<_> = second.entries().iter().map(|e| e.phase).collect();
        assert_eq!(phases, vec![Phase::Update, Phase::Exit]);

        let mid = second.frame(0.5);
        assert!((mid[0].1.end_angle - 1.5).abs() < 1e-12);
        assert_eq!(mid[1].0.record, None);
        assert_eq!(mid[1].1.start_angle, 1.0);
        assert!(mid[1].1.fill.components[3] < 1.0);

        // Exited sectors disappear once settled.
        assert_eq!(second.frame(1.0).len(), 1);
        assert_eq!(second.settled().len(), 1);
    }

    #[test]
    fn progress_is_clamped() {
        let t = Transition::between(
            &HashMap::new(),
            &[(span("a", 0, 0.0, 1.0), css::TOMATO)],
            DEFAULT_DURATION_MS,
        );
        assert_eq!(t.progress(600.0), 1.0);
        assert_eq!(t.progress(-5.0), 0.0);
        assert_eq!(t.frame(7.0)[0].1.fill, css::TOMATO);
        assert_eq!(Transition::default().progress(10.0), 1.0);
    }
}
