use async_trait::async_trait;
use gk_architect::generation::{
    build_request, GenerationRequest, Generations, Generator, OutputKind, FAILED_SENTINEL,
    TIMEOUT_SENTINEL,
};
use gk_architect::model::RootConfig;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Records every instruction it sees; JAVA waits for a signal and then fails.
struct Scripted {
    seen: Mutex<Vec<String>>,
    release_java: Arc<Notify>,
}

#[async_trait]
impl Generator for Scripted {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        self.seen.lock().push(request.instruction.clone());
        if request.kind == OutputKind::Java {
            self.release_java.notified().await;
            anyhow::bail!("quota exceeded");
        }
        Ok(format!("<html><!-- {} --></html>", request.kind))
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

struct Slow;

#[async_trait]
impl Generator for Slow {
    async fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Ok("too late".to_string())
    }

    fn backend_name(&self) -> &'static str {
        "slow"
    }
}

#[tokio::test]
async fn test_html_unaffected_by_java_failure() {
    let release = Arc::new(Notify::new());
    let generator = Arc::new(Scripted {
        seen: Mutex::new(Vec::new()),
        release_java: Arc::clone(&release),
    });
    let generations =
        Generations::new(generator.clone(), "Interlude (C6)", Duration::from_secs(60));
    let cfg = RootConfig::seed();

    let java = generations.request(&cfg, OutputKind::Java);
    let html = generations.request(&cfg, OutputKind::Html);
    html.await.unwrap();

    assert_eq!(
        generations.get(OutputKind::Html).as_deref(),
        Some("<html><!-- HTML --></html>")
    );
    assert!(generations.is_pending(OutputKind::Java));

    release.notify_one();
    java.await.unwrap();

    assert_eq!(generations.get(OutputKind::Java).as_deref(), Some(FAILED_SENTINEL));
    assert_eq!(
        generations.get(OutputKind::Html).as_deref(),
        Some("<html><!-- HTML --></html>")
    );
    assert_eq!(
        generations.completed_kinds(),
        vec![OutputKind::Html, OutputKind::Java]
    );

    let seen = generator.seen.lock();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|text| text.contains("Target: Interlude (C6).")));
}

#[tokio::test]
async fn test_request_uses_snapshot_at_call_time() {
    let release = Arc::new(Notify::new());
    let generator = Arc::new(Scripted {
        seen: Mutex::new(Vec::new()),
        release_java: release,
    });
    let generations = Generations::new(generator.clone(), "C6", Duration::from_secs(60));

    let mut cfg = RootConfig::seed();
    let handle = generations.request(&cfg, OutputKind::NpcXml);
    cfg.npc_name = "Changed Afterwards".to_string();
    handle.await.unwrap();

    let seen = generator.seen.lock();
    assert!(seen[0].contains("named \"Global Gatekeeper\""));
    assert!(!seen[0].contains("Changed Afterwards"));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_sentinel_clears_pending() {
    let generations = Generations::new(Arc::new(Slow), "C6", Duration::from_secs(120));
    let handle = generations.request(&RootConfig::seed(), OutputKind::TeleportXml);
    assert!(generations.any_pending());

    handle.await.unwrap();
    assert_eq!(
        generations.get(OutputKind::TeleportXml).as_deref(),
        Some(TIMEOUT_SENTINEL)
    );
    assert!(!generations.any_pending());
}

#[test]
fn test_request_mentions_every_entity() {
    let request = build_request(&RootConfig::seed(), OutputKind::TeleportXml, "C6").unwrap();
    assert_eq!(request.kind, OutputKind::TeleportXml);
    for needle in [
        "NPC ID 90001",
        "with skin 20001",
        "(TELEPORT_XML)",
        "Town Center",
        "Weapon Shop",
        "82220",
        "bigbutton_over",
    ] {
        assert!(request.instruction.contains(needle), "missing {}", needle);
    }
}
