use std::time::Duration;

/// Configuration for a single property transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// A transition that completes immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }

    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }

    /// Parse the value of a `transition` declaration, e.g. `opacity 0.2s linear`.
    ///
    /// Only opacity transitions are animated, so the property name is
    /// optional and must be `opacity` or `all` when given.
    pub fn parse(value: &str) -> Option<Self> {
        let mut duration = None;
        let mut easing = Easing::Linear;

        for token in value.split_whitespace() {
            if let Some(parsed) = parse_duration(token) {
                if duration.is_some() {
                    // second time value is a delay, which is not supported
                    return None;
                }
                duration = Some(parsed);
            } else if let Some(parsed) = Easing::parse(token) {
                easing = parsed;
            } else if token != "opacity" && token != "all" {
                return None;
            }
        }

        duration.map(|d| Self::new(d, easing))
    }

    /// Progress (0.0 to 1.0, eased) after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.easing.apply(t)
    }
}

fn parse_duration(token: &str) -> Option<Duration> {
    let secs = match token.strip_suffix("ms") {
        Some(ms) => ms.parse::<f32>().ok()? / 1000.0,
        None => token.strip_suffix('s')?.parse::<f32>().ok()?,
    };
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Duration::try_from_secs_f32(secs).ok()
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "linear" => Some(Easing::Linear),
            "ease-in" => Some(Easing::EaseIn),
            "ease-out" => Some(Easing::EaseOut),
            "ease" | "ease-in-out" => Some(Easing::EaseInOut),
            _ => None,
        }
    }
}
