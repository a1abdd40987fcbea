use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use super::traits::DefaultsStore;
use super::value::DefaultsValue;

/* 📖 # How does the live store map a suite onto the host?

A suite is a named partition shared by everything that opens the same name. On this
host the partition is one JSON document, `<preferences dir>/<suite>.json`, holding a
map from key to DefaultsValue. The store keeps no cached copy: every read loads the
document and every write replaces it, so two stores (or two processes) opened on the
same suite see each other's changes.

Writes go to a sibling temporary file that is then renamed over the document, which
keeps readers from ever observing a half-written partition.
*/

type Partition = BTreeMap<String, DefaultsValue>;

/// Keeps staging files of stores sharing a suite within one process apart.
static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// One lock per partition document, shared by every store in this process that opens it.
static PARTITION_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(Default::default);

fn partition_lock(path: Option<&Path>) -> Arc<Mutex<()>> {
    match path {
        Some(path) => PARTITION_LOCKS
            .lock()
            .entry(path.to_path_buf())
            .or_default()
            .clone(),
        None => Arc::default(),
    }
}

/// Live preference store backed by a named suite on the host.
///
/// Each single operation is serialized against every other store in this process
/// opened on the same partition. Sequences of operations (read, then write derived
/// from the read) are not atomic.
#[derive(Debug)]
pub struct SuiteDefaults {
    suite_name: String,
    partition_path: Option<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl SuiteDefaults {
    /// Open the suite in the platform preference directory.
    pub fn new(suite_name: impl Into<String>) -> Self {
        let suite_name = suite_name.into();
        let partition_path =
            dirs::preference_dir().and_then(|dir| Self::partition_in(&dir, &suite_name));
        let lock = partition_lock(partition_path.as_deref());
        Self {
            suite_name,
            partition_path,
            lock,
        }
    }

    /// Open the suite inside `directory` instead of the platform preference directory.
    pub fn in_directory(suite_name: impl Into<String>, directory: impl AsRef<Path>) -> Self {
        let suite_name = suite_name.into();
        let partition_path = Self::partition_in(directory.as_ref(), &suite_name);
        let lock = partition_lock(partition_path.as_deref());
        Self {
            suite_name,
            partition_path,
            lock,
        }
    }

    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    /// Location of the backing document, or `None` when the suite cannot exist on
    /// this host.
    pub fn partition_path(&self) -> Option<&Path> {
        self.partition_path.as_deref()
    }

    fn partition_in(directory: &Path, suite_name: &str) -> Option<PathBuf> {
        let valid = !suite_name.is_empty()
            && suite_name != "."
            && suite_name != ".."
            && !suite_name.contains(['/', '\\']);
        valid.then(|| directory.join(format!("{}.json", suite_name)))
    }

    /// Load the partition. `None` means it exists but cannot be used.
    fn load(&self, path: &Path) -> Option<Partition> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Some(Partition::new()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preference partition unreadable");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(partition) => Some(partition),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preference partition is corrupt");
                None
            }
        }
    }

    fn store(&self, path: &Path, partition: &Partition) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(partition).map_err(io::Error::other)?;
        let staging = path.with_extension(format!(
            "json.{}-{}.tmp",
            std::process::id(),
            STAGING_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&staging, bytes)?;
        fs::rename(&staging, path).inspect_err(|_| {
            let _ = fs::remove_file(&staging);
        })
    }

    /// Apply `change` to the partition and persist it. Dropped when the partition is
    /// unavailable.
    fn modify(&self, key: &str, change: impl FnOnce(&mut Partition)) {
        let Some(path) = self.partition_path.as_deref() else {
            debug!(suite = %self.suite_name, key, "suite unavailable, write dropped");
            return;
        };
        let _guard = self.lock.lock();
        let Some(mut partition) = self.load(path) else {
            debug!(key, "write dropped");
            return;
        };
        change(&mut partition);
        if let Err(e) = self.store(path, &partition) {
            warn!(path = %path.display(), error = %e, key, "failed to persist preference partition");
        }
    }
}

impl DefaultsStore for SuiteDefaults {
    #[instrument(level = "trace", skip(self), fields(suite = %self.suite_name))]
    fn object(&self, key: &str) -> Option<DefaultsValue> {
        let path = self.partition_path.as_deref()?;
        let _guard = self.lock.lock();
        self.load(path)?.remove(key)
    }

    #[instrument(skip(self, value), fields(suite = %self.suite_name))]
    fn set_object(&self, key: &str, value: Option<DefaultsValue>) {
        match value {
            Some(value) => {
                debug!(kind = value.kind_name(), "storing preference");
                self.modify(key, |partition| {
                    partition.insert(key.to_owned(), value);
                });
            }
            None => self.modify(key, |partition| {
                partition.remove(key);
            }),
        }
    }

    #[instrument(skip(self), fields(suite = %self.suite_name))]
    fn remove_object(&self, key: &str) {
        self.modify(key, |partition| {
            partition.remove(key);
        });
    }
}
