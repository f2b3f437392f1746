use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::kernel::service::ServiceHandle;
use crate::storage::NotificationConfig;

/// Notification queued for local delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNotification {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Default)]
struct ChannelState {
    registered: bool,
    next_id: u64,
    pending: Vec<LocalNotification>,
}

/// Farmer alerts (weather, disease outbreaks, price moves).
#[derive(Debug)]
pub struct NotificationService {
    config: NotificationConfig,
    state: Mutex<ChannelState>,
}

impl NotificationService {
    pub fn new(config: NotificationConfig) -> Self {
        Self { config, state: Mutex::new(ChannelState::default()) }
    }

    pub async fn is_registered(&self) -> bool {
        self.state.lock().await.registered
    }

    /// Queue a local notification on the registered channel.
    pub async fn schedule(&self, title: impl Into<String>, body: impl Into<String>) -> Result<u64> {
        let mut state = self.state.lock().await;
        if !state.registered {
            return Err(Error::Other(format!(
                "Notification channel '{}' is not registered",
                self.config.channel_id
            )));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.pending.push(LocalNotification { id, title: title.into(), body: body.into() });
        Ok(id)
    }

    pub async fn pending(&self) -> Vec<LocalNotification> {
        self.state.lock().await.pending.clone()
    }
}

#[async_trait]
impl ServiceHandle for NotificationService {
    fn name(&self) -> &str {
        constants::NOTIFICATION_SERVICE
    }

    async fn initialize(&self) -> Result<()> {
        if !self.config.enabled {
            log::info!("Notifications disabled; skipping channel registration");
            return Ok(());
        }
        if self.config.channel_id.trim().is_empty() {
            return Err(Error::init_failed(self.name(), "notification channel id is empty"));
        }
        let mut state = self.state.lock().await;
        state.registered = true;
        log::info!("Registered notification channel '{}'", self.config.channel_id);
        Ok(())
    }

    async fn cleanup(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.registered {
            log::info!(
                "Unregistering notification channel '{}' ({} pending dropped)",
                self.config.channel_id,
                state.pending.len()
            );
        }
        state.registered = false;
        state.pending.clear();
        Ok(())
    }
}
