//! Test doubles shared by the kernel tests.
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::kernel::error::{Error, Result};
use crate::kernel::service::ServiceHandle;
use crate::kernel::splash::SplashScreen;

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Service whose outcome, latency and cleanup behaviour are scripted.
///
/// Records `init:<name>` when called, `settled:<name>` when its initialize
/// resolves and `cleanup:<name>` on cleanup.
#[derive(Debug)]
pub struct MockService {
    name: String,
    log: CallLog,
    delay: Option<Duration>,
    busy: Option<Duration>,
    fail_init: bool,
    panic_init: bool,
    fail_cleanup: bool,
    pub init_calls: AtomicU32,
    pub cleanup_calls: AtomicU32,
}

impl MockService {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: Arc::clone(log),
            delay: None,
            busy: None,
            fail_init: false,
            panic_init: false,
            fail_cleanup: false,
            init_calls: AtomicU32::new(0),
            cleanup_calls: AtomicU32::new(0),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Block the polling thread for `busy` inside `initialize`.
    pub fn busy(mut self, busy: Duration) -> Self {
        self.busy = Some(busy);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_init = true;
        self
    }

    pub fn failing_cleanup(mut self) -> Self {
        self.fail_cleanup = true;
        self
    }

    pub fn init_count(&self) -> u32 {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn cleanup_count(&self) -> u32 {
        self.cleanup_calls.load(Ordering::SeqCst)
    }

    fn record(&self, what: &str) {
        self.log.lock().unwrap().push(format!("{}:{}", what, self.name));
    }
}

#[async_trait]
impl ServiceHandle for MockService {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&self) -> Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.record("init");
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(busy) = self.busy {
            std::thread::sleep(busy);
        }
        self.record("settled");
        if self.panic_init {
            panic!("{} exploded", self.name);
        }
        if self.fail_init {
            return Err(Error::init_failed(&self.name, "scripted failure"));
        }
        Ok(())
    }

    async fn cleanup(&self) -> Result<()> {
        self.cleanup_calls.fetch_add(1, Ordering::SeqCst);
        self.record("cleanup");
        if self.fail_cleanup {
            return Err(Error::ServiceCleanup {
                service: self.name.clone(),
                message: "scripted cleanup failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Splash that counts dismissals and notes how many services had settled
/// when it was hidden.
#[derive(Debug)]
pub struct RecordingSplash {
    log: CallLog,
    fail: bool,
    pub hides: AtomicU32,
    pub settled_at_hide: Mutex<Option<usize>>,
}

impl RecordingSplash {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Arc::clone(log),
            fail: false,
            hides: AtomicU32::new(0),
            settled_at_hide: Mutex::new(None),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn hide_count(&self) -> u32 {
        self.hides.load(Ordering::SeqCst)
    }

    pub fn settled_when_hidden(&self) -> Option<usize> {
        *self.settled_at_hide.lock().unwrap()
    }
}

impl SplashScreen for RecordingSplash {
    fn hide(&self) -> Result<()> {
        self.hides.fetch_add(1, Ordering::SeqCst);
        let settled = self.log.lock().unwrap().iter().filter(|e| e.starts_with("settled:")).count();
        *self.settled_at_hide.lock().unwrap() = Some(settled);
        if self.fail {
            return Err(Error::Splash("native module unavailable".to_string()));
        }
        Ok(())
    }
}
