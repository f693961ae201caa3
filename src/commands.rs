//! Wiring shared by the interactive session and the headless modes.

use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::generation::{
    build_request, generate_with_timeout, GeminiGenerator, Generator, OutputKind, Unconfigured,
};
use crate::model::RootConfig;
use crate::store::{self, Autosave, FileStore, NoSave, Persistence, SnapshotSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn persistence(config: &AppConfig) -> Persistence<FileStore> {
    Persistence::new(FileStore::new(&config.data_dir))
}

/// The document to start from: an explicit import, else whatever is stored,
/// else the seed.
pub fn initial_document(config: &AppConfig, import: Option<&Path>) -> AppResult<RootConfig> {
    match import {
        Some(path) => {
            let cfg = store::import_file(path)?;
            tracing::info!(path = %path.display(), npc_id = %cfg.npc_id, "Imported document");
            Ok(cfg)
        }
        None => Ok(persistence(config).load_or_seed()),
    }
}

pub fn snapshot_sink(config: &AppConfig) -> Box<dyn SnapshotSink> {
    if config.autosave {
        Box::new(Autosave::spawn(persistence(config)))
    } else {
        Box::new(NoSave)
    }
}

pub fn build_generator(config: &AppConfig) -> Arc<dyn Generator> {
    match &config.api_key {
        Some(key) => Arc::new(GeminiGenerator::new(
            key.clone(),
            config.model.clone(),
            config.api_base_url.clone(),
        )),
        None => {
            tracing::warn!("No API key configured, generation requests will fail");
            Arc::new(Unconfigured)
        }
    }
}

pub fn export(cfg: &RootConfig, dir: &Path) -> AppResult<PathBuf> {
    let path = store::export_to_dir(cfg, dir)?;
    tracing::info!(path = %path.display(), "Exported document");
    Ok(path)
}

/// Generates one artifact and waits for it.
pub async fn generate_once(
    config: &AppConfig,
    generator: &dyn Generator,
    cfg: &RootConfig,
    kind: OutputKind,
) -> AppResult<String> {
    let request = build_request(cfg, kind, &config.target_platform)?;
    let text = generate_with_timeout(generator, &request, config.generation_timeout()).await?;
    Ok(text)
}
