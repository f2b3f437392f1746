use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::event::{LifecycleEvent, SharedEventDispatcher};
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::kernel::lifecycle::AppLifecyclePhase;
use crate::kernel::service::{ServiceHandle, ServiceRegistry};
use crate::kernel::splash::{self, SplashScreen};
use crate::utils::panic_message;

/// How service `initialize` calls are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitStrategy {
    /// One after another, in declared order
    #[default]
    Sequential,
    /// Started in declared order, awaited together
    Concurrent,
}

/// Tunables for the initialization sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub strategy: InitStrategy,
    /// Upper bound per service. `None` waits indefinitely.
    pub init_timeout: Option<Duration>,
}

/// Settled result of one service's initialization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOutcome {
    pub service: String,
    pub error: Option<String>,
}

impl ServiceOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary produced once initialization settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub phase: AppLifecyclePhase,
    /// One entry per service, in declared order
    pub outcomes: Vec<ServiceOutcome>,
    pub splash_hidden: bool,
}

impl InitReport {
    pub fn failed_services(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.service.as_str())
            .collect()
    }
}

/// Summary of a teardown pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Services whose cleanup was attempted, in the order it ran
    pub attempted: Vec<String>,
    /// `(service, error)` for every cleanup that failed
    pub failed: Vec<(String, String)>,
    /// Whether a still-pending initialization was cancelled first
    pub init_cancelled: bool,
}

/// Sequences service startup and shutdown around the UI mount lifecycle.
///
/// `on_mount` launches initialization as a background task and returns
/// immediately. Once every handle settled the phase becomes `Ready` or
/// `InitializationFailed` and the splash is dismissed in both cases.
/// `on_unmount` cleans every handle up in reverse order, isolating failures.
/// Neither path ever returns a service failure to the caller.
///
/// Both hooks spawn onto the current tokio runtime and must be called from
/// within one.
#[derive(Debug)]
pub struct BootstrapOrchestrator {
    services: Arc<ServiceRegistry>,
    splash: Arc<dyn SplashScreen>,
    events: SharedEventDispatcher,
    options: BootstrapOptions,
    phase: Arc<watch::Sender<AppLifecyclePhase>>,
    mounted: bool,
    unmounted: bool,
    init_task: Option<JoinHandle<InitReport>>,
}

impl BootstrapOrchestrator {
    /// Creates an orchestrator over a fixed, ordered set of services.
    pub fn new(services: ServiceRegistry, splash: Arc<dyn SplashScreen>) -> Self {
        let (phase, _) = watch::channel(AppLifecyclePhase::Uninitialized);
        Self {
            services: Arc::new(services),
            splash,
            events: SharedEventDispatcher::new(),
            options: BootstrapOptions::default(),
            phase: Arc::new(phase),
            mounted: false,
            unmounted: false,
            init_task: None,
        }
    }

    pub fn with_options(mut self, options: BootstrapOptions) -> Self {
        self.options = options;
        self
    }

    /// Publish lifecycle events on an existing dispatcher.
    pub fn with_events(mut self, events: SharedEventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn events(&self) -> &SharedEventDispatcher {
        &self.events
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn phase(&self) -> AppLifecyclePhase {
        *self.phase.borrow()
    }

    /// Receiver that observes every phase transition.
    pub fn subscribe(&self) -> watch::Receiver<AppLifecyclePhase> {
        self.phase.subscribe()
    }

    /// Waits until the phase is `Ready` or `InitializationFailed`.
    ///
    /// Never returns if initialization was cancelled by an early unmount.
    pub async fn settled(&self) -> AppLifecyclePhase {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|phase| phase.is_settled()).await {
            Ok(phase) => *phase,
            Err(_) => self.phase(),
        };
        settled
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// Starts the initialization sequence. Returns without waiting for it.
    pub fn on_mount(&mut self) -> Result<()> {
        if self.mounted || self.unmounted {
            return Err(Error::lifecycle(
                KernelLifecyclePhase::Mount,
                "Orchestrator already mounted",
            ));
        }
        self.mounted = true;

        let previous = self.phase.send_replace(AppLifecyclePhase::Initializing);
        debug_assert!(previous.can_transition_to(AppLifecyclePhase::Initializing));
        log::info!(
            "Initializing {} service(s): [{}]",
            self.services.len(),
            self.services.names().join(", ")
        );

        let ctx = InitContext {
            services: Arc::clone(&self.services),
            splash: Arc::clone(&self.splash),
            events: self.events.clone(),
            options: self.options,
            phase: Arc::clone(&self.phase),
        };
        self.init_task = Some(tokio::spawn(run_initialization(ctx, previous)));
        Ok(())
    }

    /// Awaits the background initialization task and returns its report.
    ///
    /// Returns `None` before mount, after the report was already taken, or if
    /// the task was cancelled.
    pub async fn wait_for_initialization(&mut self) -> Option<InitReport> {
        let task = self.init_task.take()?;
        match task.await {
            Ok(report) => Some(report),
            Err(e) => {
                log::error!("Initialization task did not complete: {}", e);
                None
            }
        }
    }

    /// Tears services down in reverse declared order.
    ///
    /// A still-pending initialization is cancelled first, and no cleanup
    /// starts before the cancelled task has stopped. The returned
    /// handle resolves to a [`TeardownReport`]; dropping it does not stop
    /// the teardown.
    pub fn on_unmount(&mut self) -> Result<JoinHandle<TeardownReport>> {
        if !self.mounted {
            return Err(Error::lifecycle(
                KernelLifecyclePhase::Unmount,
                "Orchestrator was never mounted",
            ));
        }
        if self.unmounted {
            return Err(Error::lifecycle(
                KernelLifecyclePhase::Unmount,
                "Orchestrator already unmounted",
            ));
        }
        self.unmounted = true;

        let pending = match self.init_task.take() {
            Some(task) if !task.is_finished() => {
                log::warn!("Unmounting while services are still initializing; cancelling");
                task.abort();
                Some(task)
            }
            _ => None,
        };

        let services = Arc::clone(&self.services);
        let events = self.events.clone();
        Ok(tokio::spawn(run_cleanup(services, events, pending)))
    }
}

struct InitContext {
    services: Arc<ServiceRegistry>,
    splash: Arc<dyn SplashScreen>,
    events: SharedEventDispatcher,
    options: BootstrapOptions,
    phase: Arc<watch::Sender<AppLifecyclePhase>>,
}

async fn run_initialization(ctx: InitContext, previous: AppLifecyclePhase) -> InitReport {
    ctx.events
        .dispatch(&LifecycleEvent::PhaseChanged { from: previous, to: AppLifecyclePhase::Initializing })
        .await;

    let timeout = ctx.options.init_timeout;
    let outcomes = match ctx.options.strategy {
        InitStrategy::Sequential => {
            let mut outcomes = Vec::with_capacity(ctx.services.len());
            for service in ctx.services.iter() {
                outcomes.push(attempt_initialize(service.as_ref(), timeout).await);
            }
            outcomes
        }
        InitStrategy::Concurrent => {
            join_all(ctx.services.iter().map(|s| attempt_initialize(s.as_ref(), timeout))).await
        }
    };

    for outcome in &outcomes {
        let event = match &outcome.error {
            None => LifecycleEvent::ServiceInitialized { service: outcome.service.clone() },
            Some(error) => LifecycleEvent::ServiceInitializationFailed {
                service: outcome.service.clone(),
                error: error.clone(),
            },
        };
        ctx.events.dispatch(&event).await;
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    let next = if failed == 0 {
        log::info!("All services initialized");
        AppLifecyclePhase::Ready
    } else {
        log::error!(
            "{} of {} service(s) failed to initialize; continuing in degraded mode",
            failed,
            outcomes.len()
        );
        AppLifecyclePhase::InitializationFailed
    };
    let previous = ctx.phase.send_replace(next);
    debug_assert!(previous.can_transition_to(next));
    ctx.events
        .dispatch(&LifecycleEvent::PhaseChanged { from: AppLifecyclePhase::Initializing, to: next })
        .await;

    let dismissed = std::panic::catch_unwind(AssertUnwindSafe(|| splash::dismiss(ctx.splash.as_ref())))
        .unwrap_or_else(|payload| {
            let message = panic_message(&*payload);
            log::warn!("Splash dismissal panicked: {}", message);
            Err(message)
        });
    let splash_hidden = match dismissed {
        Ok(()) => {
            ctx.events.dispatch(&LifecycleEvent::SplashHidden).await;
            true
        }
        Err(error) => {
            ctx.events.dispatch(&LifecycleEvent::SplashHideFailed { error }).await;
            false
        }
    };

    InitReport { phase: next, outcomes, splash_hidden }
}

async fn attempt_initialize(service: &dyn ServiceHandle, timeout: Option<Duration>) -> ServiceOutcome {
    let name = service.name().to_string();
    log::info!("Initializing service: {}", name);

    let guarded = AssertUnwindSafe(service.initialize()).catch_unwind();
    let settled = match timeout {
        Some(limit) => match tokio::time::timeout(limit, guarded).await {
            Ok(settled) => settled,
            Err(_) => Ok(Err(Error::InitializationTimeout {
                service: name.clone(),
                timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            })),
        },
        None => guarded.await,
    };

    let error = match settled {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(payload) => Some(format!("initialize panicked: {}", panic_message(&*payload))),
    };
    match &error {
        None => log::info!("Service '{}' initialized", name),
        Some(e) => log::error!("Service '{}' failed to initialize: {}", name, e),
    }
    ServiceOutcome { service: name, error }
}

async fn run_cleanup(
    services: Arc<ServiceRegistry>,
    events: SharedEventDispatcher,
    pending_init: Option<JoinHandle<InitReport>>,
) -> TeardownReport {
    let init_cancelled = pending_init.is_some();
    if let Some(task) = pending_init {
        // An in-flight poll finishes before the abort lands.
        let _ = task.await;
    }

    log::info!("Cleaning up services...");
    let mut report = TeardownReport { init_cancelled, ..TeardownReport::default() };

    for service in services.iter().rev() {
        let name = service.name().to_string();
        report.attempted.push(name.clone());

        let error = match AssertUnwindSafe(service.cleanup()).catch_unwind().await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(payload) => Some(format!("cleanup panicked: {}", panic_message(&*payload))),
        };
        match error {
            None => {
                log::info!("Service '{}' cleaned up", name);
                events.dispatch(&LifecycleEvent::ServiceCleanedUp { service: name }).await;
            }
            Some(error) => {
                log::warn!("Error cleaning up service {}: {}", name, error);
                events
                    .dispatch(&LifecycleEvent::ServiceCleanupFailed { service: name.clone(), error: error.clone() })
                    .await;
                report.failed.push((name, error));
            }
        }
    }

    log::info!("Service cleanup complete.");
    report
}
