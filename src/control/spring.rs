use std::time::Duration;

/// Envelope fraction remaining once `duration` has elapsed.
const SETTLE_EPSILON: f64 = 1.0e-3;

/// Damped-spring timing for settle animations.
///
/// `initial_velocity` is expressed in total distances per second: `1.0` covers
/// the whole animated range in one second at the starting velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringProfile {
    pub duration: Duration,
    pub damping_ratio: f64,
    pub initial_velocity: f64,
}

impl SpringProfile {
    pub fn new(duration: Duration, damping_ratio: f64, initial_velocity: f64) -> Self {
        Self {
            duration,
            damping_ratio,
            initial_velocity,
        }
    }

    /// Normalized progress at `elapsed`: 0 at the start, exactly 1 from
    /// `duration` on. Under-damped profiles overshoot past 1 on the way.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        let duration = self.duration.as_secs_f64();
        let t = elapsed.as_secs_f64();
        if duration <= 0.0 || t >= duration {
            return 1.0;
        }

        let zeta = self.damping_ratio.max(f64::EPSILON);
        let v0 = self.initial_velocity;

        // displacement from target starts at -1
        let displacement = if zeta < 1.0 {
            let omega = -SETTLE_EPSILON.ln() / (zeta * duration);
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let b = (v0 - zeta * omega) / omega_d;
            (-zeta * omega * t).exp() * (-(omega_d * t).cos() + b * (omega_d * t).sin())
        } else {
            // critically damped; over-damped profiles settle the same way
            let omega = -SETTLE_EPSILON.ln() / duration;
            (-1.0 + (v0 - omega) * t) * (-omega * t).exp()
        };

        1.0 + displacement
    }
}

impl Default for SpringProfile {
    fn default() -> Self {
        Self::new(
            super::SPRING_DURATION,
            super::SPRING_DAMPING,
            super::SPRING_INITIAL_VELOCITY,
        )
    }
}

/// A spring between two scalar values, clocked by host frame timestamps.
#[derive(Debug, Clone)]
pub struct SpringAnimation {
    from: f64,
    to: f64,
    profile: SpringProfile,
    started_at: Option<Duration>,
}

impl SpringAnimation {
    pub fn new(from: f64, to: f64, profile: SpringProfile) -> Self {
        Self {
            from,
            to,
            profile,
            started_at: None,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let p = self.profile.progress(elapsed);
        self.from + (self.to - self.from) * p
    }

    /// Samples the animation at frame time `now`; the first sample latches the
    /// start time. Returns the value and whether the animation has finished.
    pub fn sample(&mut self, now: Duration) -> (f64, bool) {
        let start = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(start);

        if elapsed >= self.profile.duration {
            (self.to, true)
        } else {
            (self.value_at(elapsed), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_progress_endpoints() {
        let profile = SpringProfile::default();
        assert!(profile.progress(Duration::ZERO).abs() < 1e-12);
        assert_eq!(profile.progress(profile.duration), 1.0);
        assert_eq!(profile.progress(ms(5_000)), 1.0);
    }

    #[test]
    fn test_underdamped_profile_overshoots() {
        let profile = SpringProfile::default();
        let peak = (0..300)
            .map(|i| profile.progress(ms(i)))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.05, "peak was {peak}");
    }

    #[test]
    fn test_progress_is_close_to_target_before_snapping() {
        let profile = SpringProfile::default();
        let late = profile.progress(ms(299));
        assert!((late - 1.0).abs() < 0.01, "late progress was {late}");
    }

    #[test]
    fn test_critically_damped_does_not_overshoot_much() {
        let profile = SpringProfile::new(ms(300), 1.0, 0.0);
        for i in 0..300 {
            let p = profile.progress(ms(i));
            assert!(p <= 1.0 + 1e-9, "progress {p} at {i}ms");
        }
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let profile = SpringProfile::new(Duration::ZERO, 0.5, 0.7);
        assert_eq!(profile.progress(Duration::ZERO), 1.0);
    }

    #[test]
    fn test_sample_latches_start_time() {
        let mut animation = SpringAnimation::new(0.0, 1.0, SpringProfile::default());

        let (value, finished) = animation.sample(ms(10_000));
        assert!(value.abs() < 1e-12);
        assert!(!finished);

        let (_, finished) = animation.sample(ms(10_150));
        assert!(!finished);

        let (value, finished) = animation.sample(ms(10_300));
        assert_eq!(value, 1.0);
        assert!(finished);
    }

    #[test]
    fn test_sample_runs_backwards() {
        let mut animation = SpringAnimation::new(0.8, 0.0, SpringProfile::default());
        assert!((animation.sample(ms(0)).0 - 0.8).abs() < 1e-12);
        assert_eq!(animation.sample(ms(400)), (0.0, true));
        assert_eq!(animation.target(), 0.0);
    }
}
