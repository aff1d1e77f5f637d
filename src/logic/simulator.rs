// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Stand-in registration backend with fixed latency and a seeded random outcome.

use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::logic::cancel::CancelToken;
use crate::models::payload::RegistrationPayload;

/// Simulated network round trip.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);
/// Probability that a simulated submission succeeds.
pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;
/// Reason reported for simulated failures.
pub const FAILURE_REASON: &str = "Registration failed. Please try again.";

/// How a submission attempt resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure(String),
}

/// Backend seam. A real implementation posts the payload and maps the response.
///
/// Runs on a worker thread and may block; returns `None` when `cancel` fires first.
pub trait Submitter: Send + Sync {
    fn submit(&self, payload: &RegistrationPayload, cancel: &CancelToken)
    -> Option<SubmissionOutcome>;
}

/// Minimal xorshift64* generator; not cryptographically secure.
#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    /// Seed from the wall clock when no seed is configured.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform sample in `[0, 1)` using the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Knobs for [`SubmissionSimulator`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatorConfig {
    pub delay: Duration,
    pub success_rate: f64,
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SUBMIT_DELAY,
            success_rate: DEFAULT_SUCCESS_RATE,
            seed: None,
        }
    }
}

/// Waits a fixed delay, then rolls success with the configured probability.
#[derive(Debug)]
pub struct SubmissionSimulator {
    delay: Duration,
    success_rate: f64,
    rng: Mutex<Prng>,
}

impl SubmissionSimulator {
    pub fn new(config: &SimulatorConfig) -> Self {
        let rng = config.seed.map(Prng::new).unwrap_or_else(Prng::from_clock);
        Self {
            delay: config.delay,
            success_rate: config.success_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Draw the next outcome without waiting.
    pub fn roll(&self) -> SubmissionOutcome {
        let sample = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .next_f64();
        if sample < self.success_rate {
            SubmissionOutcome::Success
        } else {
            SubmissionOutcome::Failure(FAILURE_REASON.to_string())
        }
    }
}

impl Default for SubmissionSimulator {
    fn default() -> Self {
        Self::new(&SimulatorConfig::default())
    }
}

impl Submitter for SubmissionSimulator {
    fn submit(
        &self,
        payload: &RegistrationPayload,
        cancel: &CancelToken,
    ) -> Option<SubmissionOutcome> {
        let bytes = payload.to_json().map(|json| json.len()).unwrap_or(0);
        debug!(
            submission_id = %payload.submission_id,
            bytes,
            delay_ms = self.delay.as_millis() as u64,
            "simulating registration request"
        );

        if !cancel.sleep(self.delay) {
            info!(submission_id = %payload.submission_id, "submission cancelled");
            return None;
        }

        let outcome = self.roll();
        info!(submission_id = %payload.submission_id, ?outcome, "submission resolved");
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::logic::cancel::CancelScope;
    use crate::models::upload::UploadedFile;

    fn payload() -> RegistrationPayload {
        RegistrationPayload {
            submission_id: uuid::Uuid::new_v4(),
            submitted_at: "2025-01-01T00:00:00+00:00".into(),
            seller_name: "Ada".into(),
            store_name: "Ada's".into(),
            email_address: "ada@example.com".into(),
            contact_number: "09171234567".into(),
            business_address: "Main St".into(),
            business_type: "individual".into(),
            paypal_email: "pay@example.com".into(),
            product_categories: vec!["audio".into()],
            business_permit: UploadedFile::new(
                "p.png".into(),
                "p.png".into(),
                1,
                "image/png".into(),
                "unavailable".into(),
            ),
            agree_terms: true,
        }
    }

    fn simulator(delay_ms: u64, success_rate: f64, seed: u64) -> SubmissionSimulator {
        SubmissionSimulator::new(&SimulatorConfig {
            delay: Duration::from_millis(delay_ms),
            success_rate,
            seed: Some(seed),
        })
    }

    #[test]
    fn defaults_match_documented_timing_and_rate() {
        let sim = SubmissionSimulator::default();
        assert_eq!(sim.delay(), Duration::from_millis(2000));
        assert!((sim.success_rate - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn same_seed_gives_same_outcomes() {
        let a = simulator(0, 0.9, 42);
        let b = simulator(0, 0.9, 42);
        let left: Vec<_> = (0..64).map(|_| a.roll()).collect();
        let right: Vec<_> = (0..64).map(|_| b.roll()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn success_ratio_is_close_to_configured_rate() {
        let sim = simulator(0, 0.9, 7);
        let successes = (0..4000)
            .filter(|_| sim.roll() == SubmissionOutcome::Success)
            .count();
        let ratio = successes as f64 / 4000.0;
        assert!((0.86..=0.94).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn extreme_rates_are_deterministic() {
        let always = simulator(0, 1.0, 1);
        let never = simulator(0, 0.0, 1);
        for _ in 0..32 {
            assert_eq!(always.roll(), SubmissionOutcome::Success);
            assert_eq!(
                never.roll(),
                SubmissionOutcome::Failure(FAILURE_REASON.to_string())
            );
        }
    }

    #[test]
    fn submit_waits_for_delay() {
        let scope = CancelScope::new();
        let sim = simulator(30, 1.0, 3);
        let start = Instant::now();

        let outcome = sim.submit(&payload(), &scope.token());

        assert_eq!(outcome, Some(SubmissionOutcome::Success));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn submit_returns_none_when_cancelled() {
        let scope = CancelScope::new();
        let token = scope.token();
        drop(scope);

        let sim = simulator(10_000, 1.0, 3);
        assert_eq!(sim.submit(&payload(), &token), None);
    }

    #[test]
    fn prng_samples_stay_in_unit_interval() {
        let mut rng = Prng::new(0);
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
