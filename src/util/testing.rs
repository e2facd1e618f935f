//! Shared test setup: a global tracing subscriber and environment isolation.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Install the test subscriber once per process; honors `RUST_LOG`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive access to process environment variables for one test.
///
/// Every variable touched through the guard is restored when it drops.
pub struct EnvGuard {
    saved: Vec<(String, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn lock() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            saved: Vec::new(),
            _lock: lock,
        }
    }

    /// Lock, clear all `CHALLENGES_*` variables and point the user config
    /// directory at `home`, so no real settings leak into the test.
    pub fn isolated(home: &Path) -> Self {
        let mut guard = Self::lock();
        let inherited: Vec<String> = env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| key.starts_with("CHALLENGES_"))
            .collect();
        for key in inherited {
            guard.remove(&key);
        }
        guard.set("HOME", home.as_os_str());
        guard.set("XDG_CONFIG_HOME", home.join(".config").as_os_str());
        guard
    }

    pub fn set(&mut self, key: &str, value: impl AsRef<OsStr>) {
        self.remember(key);
        env::set_var(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.remember(key);
        env::remove_var(key);
    }

    fn remember(&mut self, key: &str) {
        if !self.saved.iter().any(|(k, _)| k == key) {
            self.saved.push((key.to_string(), env::var_os(key)));
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}
