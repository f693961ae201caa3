use crate::app::AppState;
use crate::store;
use anyhow::Result;

/// Writes the document to `gk_config_<npcId>.json` in the export directory.
pub fn export(app: &mut AppState) -> Result<()> {
    match store::export_to_dir(app.session.config(), &app.export_dir) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Exported document");
            app.set_message(format!("Exported to {}", path.display()));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Export failed");
            app.set_message(format!("Failed to export: {}", e));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::create_test_app;
    use crate::store::import_file;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app();
        app.export_dir = temp_dir.path().to_path_buf();

        export(&mut app).unwrap();

        let path = temp_dir.path().join("gk_config_90001.json");
        assert!(path.exists());
        assert_eq!(&import_file(&path).unwrap(), app.session.config());
        assert!(app.message.as_deref().unwrap().starts_with("Exported to"));
    }

    #[test]
    fn test_export_into_missing_dir_reports() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app();
        app.export_dir = temp_dir.path().join("missing");

        export(&mut app).unwrap();
        assert!(app.message.as_deref().unwrap().starts_with("Failed to export"));
    }
}
