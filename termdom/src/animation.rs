use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::transitions::TransitionConfig;

/// A single active opacity transition.
#[derive(Debug, Clone, Copy)]
struct ActiveTransition {
    from: f32,
    to: f32,
    start: Instant,
    config: TransitionConfig,
}

impl ActiveTransition {
    fn sample(&self, now: Instant) -> f32 {
        let t = self.config.progress(now.saturating_duration_since(self.start));
        self.from + (self.to - self.from) * t
    }

    fn finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.config.duration
    }
}

/// Tracks computed opacity per element and animates changes according to
/// the element's `transition`.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Last computed (target) opacity per element.
    targets: HashMap<String, f32>,
    active: HashMap<String, ActiveTransition>,
    /// Reduced motion flag - when true, transitions complete instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    /// Returns true if any transition is still running at `now`.
    pub fn has_active_transitions(&self, now: Instant) -> bool {
        self.active.values().any(|t| !t.finished(now))
    }

    /// Record the computed opacity of an element. A change starts a
    /// transition from the currently displayed value, unless `config` is
    /// instant. The first value seen for an element is applied directly.
    pub fn update(&mut self, id: &str, target: f32, config: TransitionConfig, now: Instant) {
        let Some(previous) = self.targets.get(id).copied() else {
            self.targets.insert(id.to_string(), target);
            return;
        };
        if previous == target {
            return;
        }

        let from = self.value(id, now).unwrap_or(previous);
        self.targets.insert(id.to_string(), target);

        if config.is_instant() || self.reduced_motion {
            self.active.remove(id);
            return;
        }

        log::trace!("opacity transition on {id}: {from} -> {target} over {:?}", config.duration);
        self.active.insert(
            id.to_string(),
            ActiveTransition {
                from,
                to: target,
                start: now,
                config,
            },
        );
    }

    /// Displayed opacity of an element at `now`.
    pub fn value(&self, id: &str, now: Instant) -> Option<f32> {
        match self.active.get(id) {
            Some(transition) if !transition.finished(now) => Some(transition.sample(now)),
            _ => self.targets.get(id).copied(),
        }
    }

    /// Drop finished transitions and forget elements that no longer exist.
    pub fn prune(&mut self, live: &HashSet<&str>, now: Instant) {
        self.active
            .retain(|id, t| live.contains(id.as_str()) && !t.finished(now));
        self.targets.retain(|id, _| live.contains(id.as_str()));
    }
}
