use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::event::SharedEventDispatcher;
use crate::gate::{HydrationSource, PersistenceGate, Store};
use crate::kernel::bootstrap::{BootstrapOrchestrator, InitReport, TeardownReport};
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::kernel::lifecycle::AppLifecyclePhase;
use crate::kernel::service::ServiceRegistry;
use crate::kernel::splash::{LoggingSplash, NoSplash, SplashScreen};
use crate::services::{NotificationService, OfflineSyncService};
use crate::storage::{AppConfig, FileStateStore};
use crate::view::{HomeScreen, NavigationRoot, RootComposition, View};

/// Notification first, then offline sync. Cleanup runs the other way round.
pub fn default_services(config: &AppConfig) -> Result<ServiceRegistry> {
    ServiceRegistry::new()
        .with(Arc::new(NotificationService::new(config.notifications.clone())))?
        .with(Arc::new(OfflineSyncService::new(&config.offline_sync)))
}

fn default_splash(config: &AppConfig) -> Arc<dyn SplashScreen> {
    if config.splash_active() {
        Arc::new(LoggingSplash)
    } else {
        Arc::new(NoSplash)
    }
}

/// Overrides for [`Application`] collaborators. Anything left unset is built
/// from the configuration.
#[derive(Debug)]
pub struct ApplicationBuilder {
    config: AppConfig,
    services: Option<ServiceRegistry>,
    splash: Option<Arc<dyn SplashScreen>>,
    hydration: Option<Arc<dyn HydrationSource>>,
    navigation: Option<NavigationRoot>,
    events: Option<SharedEventDispatcher>,
}

impl ApplicationBuilder {
    pub fn services(mut self, services: ServiceRegistry) -> Self {
        self.services = Some(services);
        self
    }

    pub fn splash(mut self, splash: Arc<dyn SplashScreen>) -> Self {
        self.splash = Some(splash);
        self
    }

    /// Replace the file-backed state store. State is then not written back
    /// on unmount.
    pub fn hydration_source(mut self, source: Arc<dyn HydrationSource>) -> Self {
        self.hydration = Some(source);
        self
    }

    pub fn navigation(mut self, navigation: NavigationRoot) -> Self {
        self.navigation = Some(navigation);
        self
    }

    pub fn events(mut self, events: SharedEventDispatcher) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<Application> {
        self.config.validate()?;

        let services = match self.services {
            Some(services) => services,
            None => default_services(&self.config)?,
        };
        let splash = self.splash.unwrap_or_else(|| default_splash(&self.config));
        let (hydration, state_file) = match self.hydration {
            Some(source) => (source, None),
            None => {
                let file = FileStateStore::new(self.config.persistence.state_file.clone());
                (Arc::new(file.clone()) as Arc<dyn HydrationSource>, Some(file))
            }
        };
        let navigation = self.navigation.unwrap_or_else(|| NavigationRoot::new(Arc::new(HomeScreen)));

        let mut orchestrator = BootstrapOrchestrator::new(services, splash)
            .with_options(self.config.bootstrap_options());
        if let Some(events) = self.events {
            orchestrator = orchestrator.with_events(events);
        }
        let gate = Arc::new(PersistenceGate::new(Store::new()));
        let composition = RootComposition::new(Arc::clone(&gate), navigation);

        Ok(Application {
            config: self.config,
            orchestrator,
            composition,
            gate,
            hydration,
            state_file,
            hydration_task: None,
        })
    }
}

/// One app instance: the bootstrap orchestrator, the persistence gate and
/// the root view composition wired together.
///
/// `mount` starts service initialization and hydration side by side; the
/// two signals never wait on each other.
#[derive(Debug)]
pub struct Application {
    config: AppConfig,
    orchestrator: BootstrapOrchestrator,
    composition: RootComposition,
    gate: Arc<PersistenceGate>,
    hydration: Arc<dyn HydrationSource>,
    state_file: Option<FileStateStore>,
    hydration_task: Option<JoinHandle<()>>,
}

impl Application {
    pub fn builder(config: AppConfig) -> ApplicationBuilder {
        ApplicationBuilder {
            config,
            services: None,
            splash: None,
            hydration: None,
            navigation: None,
            events: None,
        }
    }

    /// Creates an instance with the default services and file-backed state.
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &BootstrapOrchestrator {
        &self.orchestrator
    }

    pub fn events(&self) -> &SharedEventDispatcher {
        self.orchestrator.events()
    }

    pub fn gate(&self) -> &Arc<PersistenceGate> {
        &self.gate
    }

    pub fn store(&self) -> &Store {
        self.gate.store()
    }

    pub fn phase(&self) -> AppLifecyclePhase {
        self.orchestrator.phase()
    }

    pub fn is_mounted(&self) -> bool {
        self.composition.is_mounted()
    }

    /// Mounts the instance. Returns immediately; initialization and
    /// hydration continue in the background.
    pub fn mount(&mut self) -> Result<()> {
        self.orchestrator.on_mount()?;

        let gate = Arc::clone(&self.gate);
        let source = Arc::clone(&self.hydration);
        self.hydration_task = Some(tokio::spawn(async move {
            // Failures are logged by the gate, which opens regardless.
            let _ = gate.hydrate(source.as_ref()).await;
        }));

        self.composition.mark_mounted();
        log::info!("{} v{} mounted", constants::APP_NAME, constants::APP_VERSION);
        Ok(())
    }

    pub fn render(&mut self) -> View {
        self.composition.render()
    }

    pub fn navigate(&mut self, route: impl Into<String>) {
        self.composition.navigation_mut().navigate(route);
    }

    pub fn render_failed(&self) -> bool {
        self.composition.boundary().has_failed()
    }

    pub async fn wait_until_settled(&self) -> AppLifecyclePhase {
        self.orchestrator.settled().await
    }

    pub async fn wait_until_hydrated(&self) {
        self.gate.wait_hydrated().await
    }

    pub async fn wait_for_initialization(&mut self) -> Option<InitReport> {
        self.orchestrator.wait_for_initialization().await
    }

    /// Tears the instance down: stops a pending hydration, writes the store
    /// back to the state file, then cleans services up in reverse order.
    ///
    /// A state file that failed to load is never overwritten.
    pub fn unmount(&mut self) -> Result<JoinHandle<TeardownReport>> {
        let teardown = self.orchestrator.on_unmount()?;

        if let Some(task) = self.hydration_task.take() {
            task.abort();
        }
        if let Some(file) = &self.state_file {
            if self.gate.hydration_failed() {
                log::warn!(
                    "Not writing state back; {} could not be read and is left untouched",
                    file.path().display()
                );
            } else if self.gate.is_hydrated() {
                if let Err(e) = file.persist(&self.gate.store().snapshot()) {
                    log::warn!("Failed to persist application state: {}", e);
                }
            }
        }
        log::info!("{} unmounted", constants::APP_NAME);
        Ok(teardown)
    }
}
