//! # Circuit Breaker Implementation
//!
//! Fault isolation for outbound persistence-API calls following the classic
//! three-state pattern: Closed (normal operation), Open (failing fast) and
//! Half-Open (testing recovery with a single probe).
//!
//! Only qualifying failures advance the failure count: transport errors and
//! 5xx/408 backend statuses (see [`GatewayError::is_circuit_tripping`]).
//! Client-caused errors pass through without touching breaker state, and a
//! call canceled before completion is never recorded at all.

use crate::error::{GatewayError, GatewayResult};
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Circuit breaker states representing the current operational mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitState {
    /// Normal operation - calls pass through, failures counted
    Closed = 0,
    /// Failure mode - calls rejected without reaching the network
    Open = 1,
    /// Testing recovery - exactly one probe call allowed through
    HalfOpen = 2,
}

impl From<u8> for CircuitState {
    fn from(value: u8) -> Self {
        match value {
            0 => CircuitState::Closed,
            2 => CircuitState::HalfOpen,
            _ => CircuitState::Open, // Default to safest state
        }
    }
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "closed"),
            CircuitState::Open => write!(f, "open"),
            CircuitState::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Breaker thresholds, injected from configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerSettings {
    /// Consecutive qualifying failures before the circuit opens
    pub failure_threshold: u32,
    /// How long the circuit stays open before admitting a probe
    pub open_duration: Duration,
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_duration: Duration::from_secs(30),
        }
    }
}

/// Reporting hook for state transitions.
///
/// Injected rather than hardwired so operational logging stays swappable and
/// tests can assert on the exact transition sequence.
pub trait TransitionObserver: Send + Sync {
    fn on_transition(&self, component: &str, from: CircuitState, to: CircuitState);
}

/// Default observer: structured transition logs via tracing
#[derive(Debug, Default)]
pub struct LogTransitionObserver;

impl TransitionObserver for LogTransitionObserver {
    fn on_transition(&self, component: &str, from: CircuitState, to: CircuitState) {
        match to {
            CircuitState::Open => error!(
                component = %component,
                from = %from,
                "🔴 Circuit breaker opened (failing fast)"
            ),
            CircuitState::HalfOpen => info!(
                component = %component,
                from = %from,
                "🟡 Circuit breaker half-open (testing recovery)"
            ),
            CircuitState::Closed => info!(
                component = %component,
                from = %from,
                "🟢 Circuit breaker closed (recovered)"
            ),
        }
    }
}

/// Mutable breaker bookkeeping, updated under one lock
#[derive(Debug, Default)]
struct BreakerWindow {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    probe_started_at: Option<Instant>,
}

/// Core circuit breaker with atomic state reads and mutexed bookkeeping.
///
/// One instance is shared (`Arc`) by every client of a given backend
/// endpoint, so failure counting and transitions are global across all
/// concurrent request-handling tasks.
pub struct CircuitBreaker {
    /// Component name for logging and observer callbacks
    name: String,

    /// Current circuit state (atomic for cheap concurrent reads)
    state: AtomicU8,

    settings: CircuitBreakerSettings,

    window: Mutex<BreakerWindow>,

    observer: Arc<dyn TransitionObserver>,
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("settings", &self.settings)
            .finish()
    }
}

impl CircuitBreaker {
    /// Create a new circuit breaker with the default tracing observer
    pub fn new(name: impl Into<String>, settings: CircuitBreakerSettings) -> Self {
        Self::with_observer(name, settings, Arc::new(LogTransitionObserver))
    }

    /// Create a new circuit breaker with a custom transition observer
    pub fn with_observer(
        name: impl Into<String>,
        settings: CircuitBreakerSettings,
        observer: Arc<dyn TransitionObserver>,
    ) -> Self {
        let name = name.into();
        info!(
            component = %name,
            failure_threshold = settings.failure_threshold,
            open_duration_secs = settings.open_duration.as_secs(),
            "🛡️ Circuit breaker initialized"
        );

        Self {
            name,
            state: AtomicU8::new(CircuitState::Closed as u8),
            settings,
            window: Mutex::new(BreakerWindow::default()),
            observer,
        }
    }

    /// Get current circuit state
    pub fn state(&self) -> CircuitState {
        CircuitState::from(self.state.load(Ordering::Acquire))
    }

    /// Get component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute an operation with circuit breaker protection.
    ///
    /// While open, returns [`GatewayError::CircuitOpen`] without invoking the
    /// operation, so callers can distinguish "unreachable by policy" from a
    /// backend failure.
    pub async fn call<F, T, Fut>(&self, operation: F) -> GatewayResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        if !self.try_acquire().await {
            return Err(GatewayError::circuit_open(&self.name));
        }

        let result = operation().await;

        match &result {
            Ok(_) => self.record_success().await,
            Err(err) if err.is_circuit_tripping() => self.record_failure().await,
            // Client-caused errors (validation, 4xx) say nothing about
            // backend health and leave the breaker untouched.
            Err(_) => self.record_success().await,
        }

        result
    }

    /// Check whether a call may proceed, transitioning Open -> HalfOpen when
    /// the cooldown has elapsed and claiming the single probe slot.
    async fn try_acquire(&self) -> bool {
        match self.state() {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let mut window = self.window.lock().await;
                // Re-check under the lock: another task may have raced us
                if self.state() != CircuitState::Open {
                    return self.state() == CircuitState::Closed;
                }
                match window.opened_at {
                    Some(opened_at) if opened_at.elapsed() >= self.settings.open_duration => {
                        window.probe_started_at = Some(Instant::now());
                        drop(window);
                        self.transition(CircuitState::HalfOpen);
                        true
                    }
                    Some(_) => false,
                    None => {
                        warn!(component = %self.name, "Circuit open but no timestamp recorded");
                        true
                    }
                }
            }
            CircuitState::HalfOpen => {
                let mut window = self.window.lock().await;
                match window.probe_started_at {
                    // A probe whose caller went away would wedge the breaker;
                    // after a full cooldown we assume it was abandoned.
                    Some(started) if started.elapsed() < self.settings.open_duration => false,
                    _ => {
                        window.probe_started_at = Some(Instant::now());
                        true
                    }
                }
            }
        }
    }

    /// Record a successful (or non-qualifying) call outcome
    async fn record_success(&self) {
        let mut window = self.window.lock().await;

        match self.state() {
            CircuitState::Closed => {
                window.consecutive_failures = 0;
            }
            CircuitState::HalfOpen => {
                debug!(component = %self.name, "Probe call succeeded");
                window.consecutive_failures = 0;
                window.opened_at = None;
                window.probe_started_at = None;
                drop(window);
                self.transition(CircuitState::Closed);
            }
            CircuitState::Open => {
                warn!(component = %self.name, "Success recorded while circuit is open");
            }
        }
    }

    /// Record a qualifying failure
    async fn record_failure(&self) {
        let mut window = self.window.lock().await;

        match self.state() {
            CircuitState::Closed => {
                window.consecutive_failures += 1;
                debug!(
                    component = %self.name,
                    consecutive_failures = window.consecutive_failures,
                    "🔻 Qualifying failure recorded"
                );
                if window.consecutive_failures >= self.settings.failure_threshold {
                    window.opened_at = Some(Instant::now());
                    drop(window);
                    self.transition(CircuitState::Open);
                }
            }
            CircuitState::HalfOpen => {
                // Probe failed: reopen and restart the cooldown
                window.opened_at = Some(Instant::now());
                window.probe_started_at = None;
                drop(window);
                self.transition(CircuitState::Open);
            }
            CircuitState::Open => {}
        }
    }

    fn transition(&self, to: CircuitState) {
        let from = CircuitState::from(self.state.swap(to as u8, Ordering::AcqRel));
        if from != to {
            self.observer.on_transition(&self.name, from, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;

    fn test_settings() -> CircuitBreakerSettings {
        CircuitBreakerSettings {
            failure_threshold: 3,
            open_duration: Duration::from_secs(30),
        }
    }

    fn transport_err() -> GatewayError {
        GatewayError::transport("contacts", "connection refused")
    }

    /// Observer that records every transition for assertions
    #[derive(Default)]
    struct RecordingObserver {
        transitions: StdMutex<Vec<(CircuitState, CircuitState)>>,
    }

    impl TransitionObserver for RecordingObserver {
        fn on_transition(&self, _component: &str, from: CircuitState, to: CircuitState) {
            self.transitions.lock().unwrap().push((from, to));
        }
    }

    async fn trip(breaker: &CircuitBreaker, times: u32) {
        for _ in 0..times {
            let _ = breaker
                .call(|| async { Err::<(), _>(transport_err()) })
                .await;
        }
    }

    #[tokio::test]
    async fn stays_closed_on_success() {
        let breaker = CircuitBreaker::new("test", test_settings());

        let result = breaker.call(|| async { Ok::<_, GatewayError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn opens_after_three_consecutive_qualifying_failures() {
        let breaker = CircuitBreaker::new("test", test_settings());

        trip(&breaker, 2).await;
        assert_eq!(breaker.state(), CircuitState::Closed);

        trip(&breaker, 1).await;
        assert_eq!(breaker.state(), CircuitState::Open);
    }

    #[tokio::test]
    async fn open_circuit_rejects_without_invoking_operation() {
        let breaker = CircuitBreaker::new("test", test_settings());
        trip(&breaker, 3).await;

        let calls = AtomicUsize::new(0);
        let result = breaker
            .call(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, GatewayError>(())
            })
            .await;

        assert!(matches!(result, Err(GatewayError::CircuitOpen { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_resets_the_failure_count() {
        let breaker = CircuitBreaker::new("test", test_settings());

        trip(&breaker, 2).await;
        let _ = breaker.call(|| async { Ok::<_, GatewayError>(()) }).await;
        trip(&breaker, 2).await;

        // Never three in a row, so still closed
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn cancelled_calls_are_never_counted_as_failures() {
        let breaker = Arc::new(CircuitBreaker::new("test", test_settings()));

        // Abort three in-flight calls before their operation completes
        for _ in 0..3 {
            let breaker = breaker.clone();
            let handle = tokio::spawn(async move {
                breaker
                    .call(|| async { std::future::pending::<GatewayResult<()>>().await })
                    .await
            });
            tokio::task::yield_now().await;
            handle.abort();
            let _ = handle.await;
        }
        assert_eq!(breaker.state(), CircuitState::Closed);

        // Two real failures on top: still below the threshold, so the
        // aborted calls contributed nothing to the count.
        trip(&breaker, 2).await;
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn non_qualifying_errors_do_not_trip_the_breaker() {
        let breaker = CircuitBreaker::new("test", test_settings());

        for _ in 0..5 {
            let _ = breaker
                .call(|| async { Err::<(), _>(GatewayError::backend("contacts", 400)) })
                .await;
        }

        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn admits_exactly_one_probe_after_the_cooldown() {
        let breaker = CircuitBreaker::new("test", test_settings());
        trip(&breaker, 3).await;

        tokio::time::advance(Duration::from_secs(30)).await;

        // First call after the cooldown is the probe; hold it open by
        // checking state from inside the operation.
        let calls = AtomicUsize::new(0);
        let probe = breaker.call(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(breaker.state(), CircuitState::HalfOpen);

            // A second caller during the probe is rejected without running
            let rejected = breaker
                .call(|| async { Ok::<_, GatewayError>(()) })
                .await;
            assert!(matches!(rejected, Err(GatewayError::CircuitOpen { .. })));

            Ok::<_, GatewayError>(())
        });

        probe.await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_probe_reopens_and_restarts_the_cooldown() {
        let breaker = CircuitBreaker::new("test", test_settings());
        trip(&breaker, 3).await;

        tokio::time::advance(Duration::from_secs(30)).await;
        let _ = breaker
            .call(|| async { Err::<(), _>(transport_err()) })
            .await;
        assert_eq!(breaker.state(), CircuitState::Open);

        // Cooldown restarted: still rejecting before another 30s elapse
        tokio::time::advance(Duration::from_secs(15)).await;
        let result = breaker.call(|| async { Ok::<_, GatewayError>(()) }).await;
        assert!(matches!(result, Err(GatewayError::CircuitOpen { .. })));

        tokio::time::advance(Duration::from_secs(15)).await;
        breaker
            .call(|| async { Ok::<_, GatewayError>(()) })
            .await
            .unwrap();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn observer_sees_the_full_transition_sequence() {
        let observer = Arc::new(RecordingObserver::default());
        let breaker =
            CircuitBreaker::with_observer("test", test_settings(), observer.clone());

        trip(&breaker, 3).await;
        tokio::time::advance(Duration::from_secs(30)).await;
        breaker
            .call(|| async { Ok::<_, GatewayError>(()) })
            .await
            .unwrap();

        let transitions = observer.transitions.lock().unwrap();
        assert_eq!(
            *transitions,
            vec![
                (CircuitState::Closed, CircuitState::Open),
                (CircuitState::Open, CircuitState::HalfOpen),
                (CircuitState::HalfOpen, CircuitState::Closed),
            ]
        );
    }
}
