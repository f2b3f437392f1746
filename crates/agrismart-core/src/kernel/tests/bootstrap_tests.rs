use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::event::{EventResult, LifecycleEvent};
use crate::kernel::bootstrap::{BootstrapOptions, BootstrapOrchestrator, InitStrategy};
use crate::kernel::error::{Error, KernelLifecyclePhase};
use crate::kernel::lifecycle::AppLifecyclePhase;
use crate::kernel::service::{ServiceHandle, ServiceRegistry};
use crate::kernel::splash::NoSplash;
use crate::kernel::tests::support::{entries, new_log, MockService, RecordingSplash};

fn registry(services: &[&Arc<MockService>]) -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    for service in services {
        let handle = Arc::clone(*service) as Arc<dyn ServiceHandle>;
        registry.register(handle).expect("unique names");
    }
    registry
}

#[tokio::test]
async fn test_all_services_succeed_reaches_ready() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log));
    let b = Arc::new(MockService::new("B", &log));
    let splash = Arc::new(RecordingSplash::new(&log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b]), splash.clone());
    assert_eq!(orchestrator.phase(), AppLifecyclePhase::Uninitialized);

    orchestrator.on_mount().expect("first mount succeeds");
    // The hook returns before the background task ran.
    assert_eq!(orchestrator.phase(), AppLifecyclePhase::Initializing);
    assert_eq!(splash.hide_count(), 0);

    let report = orchestrator.wait_for_initialization().await.expect("report");
    assert_eq!(report.phase, AppLifecyclePhase::Ready);
    assert_eq!(orchestrator.phase(), AppLifecyclePhase::Ready);
    assert!(report.splash_hidden);
    assert!(report.failed_services().is_empty());
    assert_eq!(splash.hide_count(), 1);
    assert_eq!(entries(&log), vec!["init:A", "settled:A", "init:B", "settled:B"]);
}

#[tokio::test(start_paused = true)]
async fn test_splash_hides_once_after_all_settle_for_every_outcome() {
    for (fail_a, fail_b) in [(false, false), (true, false), (false, true), (true, true)] {
        let log = new_log();
        let mut a = MockService::new("A", &log).delayed(Duration::from_millis(300));
        let mut b = MockService::new("B", &log).delayed(Duration::from_millis(100));
        if fail_a {
            a = a.failing();
        }
        if fail_b {
            b = b.failing();
        }
        let (a, b) = (Arc::new(a), Arc::new(b));
        let splash = Arc::new(RecordingSplash::new(&log));

        for strategy in [InitStrategy::Sequential, InitStrategy::Concurrent] {
            log.lock().unwrap().clear();
            splash.hides.store(0, std::sync::atomic::Ordering::SeqCst);

            let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b]), splash.clone())
                .with_options(BootstrapOptions { strategy, init_timeout: None });
            orchestrator.on_mount().unwrap();
            let report = orchestrator.wait_for_initialization().await.unwrap();

            let expected = if fail_a || fail_b {
                AppLifecyclePhase::InitializationFailed
            } else {
                AppLifecyclePhase::Ready
            };
            assert_eq!(report.phase, expected, "outcome for ({fail_a}, {fail_b}) {strategy:?}");
            assert_eq!(splash.hide_count(), 1, "splash hidden exactly once for ({fail_a}, {fail_b}) {strategy:?}");
            assert_eq!(splash.settled_when_hidden(), Some(2), "both services settled before hide");
        }
    }
}

#[tokio::test]
async fn test_first_failure_does_not_skip_later_services() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log).failing());
    let b = Arc::new(MockService::new("B", &log));
    let splash = Arc::new(RecordingSplash::new(&log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b]), splash.clone());
    orchestrator.on_mount().unwrap();
    let report = orchestrator.wait_for_initialization().await.unwrap();

    assert_eq!(report.phase, AppLifecyclePhase::InitializationFailed);
    assert_eq!(a.init_count(), 1);
    assert_eq!(b.init_count(), 1, "B must still be attempted after A failed");
    assert_eq!(report.failed_services(), vec!["A"]);
    assert!(report.outcomes[1].is_success());
    assert_eq!(splash.hide_count(), 1, "degraded mode still dismisses the splash");
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_strategy_starts_in_order_and_joins_all() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log).delayed(Duration::from_millis(500)));
    let b = Arc::new(MockService::new("B", &log).delayed(Duration::from_millis(50)));
    let splash = Arc::new(RecordingSplash::new(&log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b]), splash.clone())
        .with_options(BootstrapOptions { strategy: InitStrategy::Concurrent, init_timeout: None });
    orchestrator.on_mount().unwrap();
    let report = orchestrator.wait_for_initialization().await.unwrap();

    assert_eq!(entries(&log), vec!["init:A", "init:B", "settled:B", "settled:A"]);
    assert_eq!(report.phase, AppLifecyclePhase::Ready);
    // Outcomes stay in declared order regardless of settle order.
    let names: Vec<_> = report.outcomes.iter().map(|o| o.service.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(splash.settled_when_hidden(), Some(2));
}

#[tokio::test]
async fn test_panicking_service_is_contained() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log).panicking());
    let b = Arc::new(MockService::new("B", &log));
    let splash = Arc::new(RecordingSplash::new(&log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b]), splash.clone());
    orchestrator.on_mount().unwrap();
    let report = orchestrator.wait_for_initialization().await.expect("task must not die");

    assert_eq!(report.phase, AppLifecyclePhase::InitializationFailed);
    let error = report.outcomes[0].error.as_deref().unwrap();
    assert!(error.contains("A exploded"), "unexpected error: {error}");
    assert_eq!(b.init_count(), 1);
    assert_eq!(splash.hide_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_initialization_keeps_phase_initializing() {
    let log = new_log();
    let slow = Arc::new(MockService::new("slow", &log).delayed(Duration::from_secs(60)));
    let splash = Arc::new(RecordingSplash::new(&log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&slow]), splash.clone());
    orchestrator.on_mount().unwrap();

    tokio::time::sleep(Duration::from_secs(59)).await;
    assert_eq!(orchestrator.phase(), AppLifecyclePhase::Initializing);
    assert_eq!(splash.hide_count(), 0, "splash must wait for the attempt to settle");

    assert_eq!(orchestrator.settled().await, AppLifecyclePhase::Ready);
    orchestrator.wait_for_initialization().await.unwrap();
    assert_eq!(splash.hide_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_optional_timeout_fails_stalled_service() {
    let log = new_log();
    let stalled = Arc::new(MockService::new("stalled", &log).delayed(Duration::from_secs(3600)));
    let quick = Arc::new(MockService::new("quick", &log));
    let splash = Arc::new(RecordingSplash::new(&log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&stalled, &quick]), splash.clone())
        .with_options(BootstrapOptions {
            strategy: InitStrategy::Sequential,
            init_timeout: Some(Duration::from_millis(250)),
        });
    orchestrator.on_mount().unwrap();
    let report = orchestrator.wait_for_initialization().await.unwrap();

    assert_eq!(report.phase, AppLifecyclePhase::InitializationFailed);
    let error = report.outcomes[0].error.as_deref().unwrap();
    assert!(error.contains("within 250ms"), "unexpected error: {error}");
    assert!(report.outcomes[1].is_success());
    assert_eq!(splash.hide_count(), 1);
}

#[tokio::test]
async fn test_mount_is_rejected_twice() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log));
    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a]), Arc::new(NoSplash));

    orchestrator.on_mount().unwrap();
    match orchestrator.on_mount() {
        Err(Error::KernelLifecycleError { phase: KernelLifecyclePhase::Mount, .. }) => {}
        other => panic!("expected mount lifecycle error, got {:?}", other),
    }
    orchestrator.wait_for_initialization().await.unwrap();
    assert_eq!(a.init_count(), 1, "initialize attempted exactly once per mount");
}

#[tokio::test]
async fn test_unmount_preconditions() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log));
    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a]), Arc::new(NoSplash));

    assert!(matches!(
        orchestrator.on_unmount(),
        Err(Error::KernelLifecycleError { phase: KernelLifecyclePhase::Unmount, .. })
    ));

    orchestrator.on_mount().unwrap();
    orchestrator.wait_for_initialization().await.unwrap();
    orchestrator.on_unmount().unwrap().await.unwrap();

    assert!(orchestrator.on_unmount().is_err(), "second unmount is rejected");
    assert!(orchestrator.on_mount().is_err(), "no remount after unmount");
    assert_eq!(a.cleanup_count(), 1);
}

#[tokio::test]
async fn test_cleanup_runs_in_reverse_order_despite_failures() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log));
    let b = Arc::new(MockService::new("B", &log).failing_cleanup());
    let c = Arc::new(MockService::new("C", &log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b, &c]), Arc::new(NoSplash));
    orchestrator.on_mount().unwrap();
    orchestrator.wait_for_initialization().await.unwrap();
    log.lock().unwrap().clear();

    let report = orchestrator.on_unmount().unwrap().await.unwrap();

    assert_eq!(entries(&log), vec!["cleanup:C", "cleanup:B", "cleanup:A"]);
    assert_eq!(report.attempted, vec!["C", "B", "A"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "B");
    assert!(!report.init_cancelled);
    for service in [&a, &b, &c] {
        assert_eq!(service.cleanup_count(), 1);
    }
}

#[tokio::test]
async fn test_cleanup_covers_services_after_partial_init_failure() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log).failing());
    let b = Arc::new(MockService::new("B", &log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b]), Arc::new(NoSplash));
    orchestrator.on_mount().unwrap();
    assert_eq!(orchestrator.settled().await, AppLifecyclePhase::InitializationFailed);

    let report = orchestrator.on_unmount().unwrap().await.unwrap();
    assert_eq!(report.attempted, vec!["B", "A"]);
    assert_eq!(a.cleanup_count(), 1);
    assert_eq!(b.cleanup_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_pending_initialization() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log).delayed(Duration::from_secs(600)));
    let b = Arc::new(MockService::new("B", &log));
    let splash = Arc::new(RecordingSplash::new(&log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b]), splash.clone());
    orchestrator.on_mount().unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let report = orchestrator.on_unmount().unwrap().await.unwrap();

    assert!(report.init_cancelled);
    assert_eq!(report.attempted, vec!["B", "A"]);
    assert_eq!(b.init_count(), 0, "B was never reached before cancellation");
    assert_eq!(splash.hide_count(), 0);
    assert_eq!(orchestrator.phase(), AppLifecyclePhase::Initializing);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cleanup_waits_for_in_flight_initialize() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log).busy(Duration::from_millis(200)));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a]), Arc::new(NoSplash));
    orchestrator.on_mount().unwrap();
    while !entries(&log).iter().any(|e| e == "init:A") {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    // initialize is mid-poll on a worker thread; abort cannot interrupt it.
    let report = orchestrator.on_unmount().unwrap().await.unwrap();
    assert!(report.init_cancelled);

    let order = entries(&log);
    let settled = order.iter().position(|e| e == "settled:A").expect("initialize ran to its end");
    let cleanup = order.iter().position(|e| e == "cleanup:A").expect("cleanup ran");
    assert!(settled < cleanup, "cleanup overlapped initialize: {order:?}");
}

#[tokio::test]
async fn test_splash_failure_is_not_surfaced() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log));
    let splash = Arc::new(RecordingSplash::new(&log).failing());

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a]), splash.clone());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    orchestrator
        .events()
        .register_handler("splash.hide_failed", move |event| {
            seen_clone.lock().unwrap().push(event.clone());
            EventResult::Continue
        })
        .await;

    orchestrator.on_mount().unwrap();
    let report = orchestrator.wait_for_initialization().await.unwrap();

    assert_eq!(report.phase, AppLifecyclePhase::Ready);
    assert!(!report.splash_hidden);
    assert_eq!(splash.hide_count(), 1);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_platform_without_splash_is_noop() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log));
    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a]), Arc::new(NoSplash));

    orchestrator.on_mount().unwrap();
    let report = orchestrator.wait_for_initialization().await.unwrap();
    assert_eq!(report.phase, AppLifecyclePhase::Ready);
    assert!(report.splash_hidden);
}

#[tokio::test]
async fn test_lifecycle_events_are_reported_in_order() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log).failing());
    let b = Arc::new(MockService::new("B", &log));

    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a, &b]), Arc::new(NoSplash));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    orchestrator
        .events()
        .register_global_handler(move |event| {
            seen_clone.lock().unwrap().push(event.clone());
            EventResult::Continue
        })
        .await;

    orchestrator.on_mount().unwrap();
    orchestrator.wait_for_initialization().await.unwrap();
    orchestrator.on_unmount().unwrap().await.unwrap();

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen[0],
        LifecycleEvent::PhaseChanged { from: AppLifecyclePhase::Uninitialized, to: AppLifecyclePhase::Initializing }
    );
    assert!(matches!(&seen[1], LifecycleEvent::ServiceInitializationFailed { service, .. } if service == "A"));
    assert_eq!(seen[2], LifecycleEvent::ServiceInitialized { service: "B".to_string() });
    assert_eq!(
        seen[3],
        LifecycleEvent::PhaseChanged {
            from: AppLifecyclePhase::Initializing,
            to: AppLifecyclePhase::InitializationFailed
        }
    );
    assert_eq!(seen[4], LifecycleEvent::SplashHidden);
    assert_eq!(seen[5], LifecycleEvent::ServiceCleanedUp { service: "B".to_string() });
    assert_eq!(seen[6], LifecycleEvent::ServiceCleanedUp { service: "A".to_string() });
    assert_eq!(seen.len(), 7);
}

#[tokio::test]
async fn test_subscribers_observe_settled_phase() {
    let log = new_log();
    let a = Arc::new(MockService::new("A", &log));
    let mut orchestrator = BootstrapOrchestrator::new(registry(&[&a]), Arc::new(NoSplash));
    let mut rx = orchestrator.subscribe();

    orchestrator.on_mount().unwrap();
    let phase = *rx.wait_for(|p| p.is_settled()).await.unwrap();
    assert_eq!(phase, AppLifecyclePhase::Ready);
}
