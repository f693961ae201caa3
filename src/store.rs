use crate::model::RootConfig;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use thiserror::Error;
use tokio::sync::mpsc;

/// Key the current document is stored under.
pub const STORAGE_KEY: &str = "l2j_gk_config";

#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("I/O error: {0}")]
    GenericIo(#[from] io::Error),
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

fn classify(e: io::Error, path: &Path) -> IoError {
    match e.kind() {
        io::ErrorKind::NotFound => IoError::FileNotFound(path.display().to_string()),
        io::ErrorKind::PermissionDenied => IoError::PermissionDenied(path.display().to_string()),
        _ => IoError::GenericIo(e),
    }
}

/// A key-value store of text blobs.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, IoError>;
    fn put(&self, key: &str, blob: &str) -> Result<(), IoError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, IoError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(classify(e, &path)),
        }
    }

    fn put(&self, key: &str, blob: &str) -> Result<(), IoError> {
        fs::create_dir_all(&self.dir).map_err(|e| classify(e, &self.dir))?;
        let path = self.path_for(key);
        // Stage beside the target, then rename over it.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, blob).map_err(|e| classify(e, &staging))?;
        fs::rename(&staging, &path).map_err(|e| classify(e, &path))?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, IoError> {
        Ok(self.blobs.read().get(key).cloned())
    }

    fn put(&self, key: &str, blob: &str) -> Result<(), IoError> {
        self.blobs.write().insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Encodes documents to JSON under [`STORAGE_KEY`] in a blob store.
pub struct Persistence<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored document, or `None` when nothing usable is stored.
    pub fn load(&self) -> Option<RootConfig> {
        let blob = match self.store.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Could not read stored document: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&blob) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!("Ignoring undecodable stored document: {}", e);
                None
            }
        }
    }

    pub fn save(&self, cfg: &RootConfig) -> Result<(), IoError> {
        let blob = serde_json::to_string(cfg)?;
        self.store.put(STORAGE_KEY, &blob)
    }

    /// The stored document, falling back to the seed.
    pub fn load_or_seed(&self) -> RootConfig {
        self.load().unwrap_or_else(|| {
            tracing::info!("No stored document, starting from the seed");
            RootConfig::seed()
        })
    }
}

/// Destination for best-effort saves after each successful edit.
pub trait SnapshotSink: Send {
    fn submit(&self, cfg: &RootConfig);
}

impl<S: BlobStore> SnapshotSink for Persistence<S> {
    fn submit(&self, cfg: &RootConfig) {
        if let Err(e) = self.save(cfg) {
            tracing::warn!("Autosave failed: {}", e);
        }
    }
}

/// Sink that discards snapshots.
pub struct NoSave;

impl SnapshotSink for NoSave {
    fn submit(&self, _cfg: &RootConfig) {}
}

/// Writes snapshots on a background thread, in submission order, so the
/// editing flow never waits on the disk.
pub struct Autosave {
    tx: Option<mpsc::UnboundedSender<RootConfig>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Autosave {
    pub fn spawn<S: BlobStore + 'static>(persistence: Persistence<S>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<RootConfig>();
        let worker = thread::spawn(move || {
            while let Some(cfg) = rx.blocking_recv() {
                persistence.submit(&cfg);
            }
            tracing::debug!("Autosave worker stopped");
        });
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }
}

impl SnapshotSink for Autosave {
    fn submit(&self, cfg: &RootConfig) {
        if let Some(tx) = &self.tx {
            if tx.send(cfg.clone()).is_err() {
                tracing::warn!("Autosave worker is gone, snapshot dropped");
            }
        }
    }
}

impl Drop for Autosave {
    // Closing the channel lets the worker drain what is queued, then exit.
    fn drop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

pub fn export_file_name(cfg: &RootConfig) -> String {
    format!("gk_config_{}.json", cfg.npc_id)
}

/// Writes a pretty-printed copy of the document into `dir`.
pub fn export_to_dir(cfg: &RootConfig, dir: &Path) -> Result<PathBuf, IoError> {
    let path = dir.join(export_file_name(cfg));
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .map_err(|e| classify(e, &path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, cfg)?;
    writer.flush()?;
    Ok(path)
}

pub fn import_file(path: &Path) -> Result<RootConfig, IoError> {
    let file = File::open(path).map_err(|e| classify(e, path))?;
    let cfg = serde_json::from_reader(BufReader::new(file))?;
    Ok(cfg)
}
