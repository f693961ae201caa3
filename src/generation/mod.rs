//! Turning a document into server-side artifacts through an external
//! text-generation service.

mod gemini;
mod results;

pub use gemini::GeminiGenerator;
pub use results::Generations;

use crate::model::RootConfig;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const FAILED_SENTINEL: &str = "Generation failed.";
pub const TIMEOUT_SENTINEL: &str = "Generation timed out.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Generation failed: {0}")]
    Failed(String),

    #[error("Generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl GenerationError {
    /// Text stored in place of a result when generation did not succeed.
    pub fn sentinel(&self) -> &'static str {
        match self {
            GenerationError::Failed(_) => FAILED_SENTINEL,
            GenerationError::Timeout(_) => TIMEOUT_SENTINEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum OutputKind {
    Html,
    NpcXml,
    TeleportXml,
    Java,
}

impl OutputKind {
    pub const ALL: [OutputKind; 4] = [
        OutputKind::Html,
        OutputKind::NpcXml,
        OutputKind::TeleportXml,
        OutputKind::Java,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Html => "HTML",
            OutputKind::NpcXml => "NPC_XML",
            OutputKind::TeleportXml => "TELEPORT_XML",
            OutputKind::Java => "JAVA",
        }
    }

    fn artifact(&self) -> &'static str {
        match self {
            OutputKind::Html => "the gatekeeper dialog HTML pages",
            OutputKind::NpcXml => "the NPC definition XML",
            OutputKind::TeleportXml => "the teleport list XML",
            OutputKind::Java => "the Java bypass handler",
        }
    }

    pub fn next(&self) -> OutputKind {
        let index = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> OutputKind {
        let index = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound call to the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub kind: OutputKind,
    pub instruction: String,
}

pub fn build_request(
    cfg: &RootConfig,
    kind: OutputKind,
    target_platform: &str,
) -> Result<GenerationRequest, GenerationError> {
    let hierarchy = serde_json::to_string(&cfg.categories)
        .map_err(|e| GenerationError::Failed(format!("cannot encode hierarchy: {}", e)))?;
    let skin = cfg
        .skin_id
        .as_deref()
        .map(|skin| format!(" with skin {}", skin))
        .unwrap_or_default();

    let instruction = format!(
        "Act as an L2J Mobius developer. Target: {target}.\n\
         Generate {artifact} ({kind}) for NPC ID {id}{skin} named \"{name}\" (title \"{title}\").\n\
         CRITICAL: Buttons 95x21, textures back=\"bigbutton_over\" fore=\"bigbutton\".\n\
         Hierarchy: {hierarchy}",
        target = target_platform,
        artifact = kind.artifact(),
        kind = kind,
        id = cfg.npc_id,
        skin = skin,
        name = cfg.npc_name,
        title = cfg.npc_title,
        hierarchy = hierarchy,
    );

    Ok(GenerationRequest { kind, instruction })
}

/// The external text-generation service.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String>;

    fn backend_name(&self) -> &'static str;
}

/// Stand-in used when no API key is configured; every call fails.
pub struct Unconfigured;

#[async_trait]
impl Generator for Unconfigured {
    async fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
        anyhow::bail!("no generation API key configured")
    }

    fn backend_name(&self) -> &'static str {
        "unconfigured"
    }
}

/// Runs one request against the generator, bounded by `timeout`.
pub async fn generate_with_timeout(
    generator: &dyn Generator,
    request: &GenerationRequest,
    timeout: Duration,
) -> Result<String, GenerationError> {
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(GenerationError::Failed(format!("{:#}", e))),
        Err(_) => Err(GenerationError::Timeout(timeout)),
    }
}
