use crate::config::Config;
use crate::config::migrate::fill_missing_keys;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    /// Open the config file in `editor`, `$EDITOR`/`$VISUAL`, or a platform default.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{}'", requested));
                return Ok(());
            }
            _ if requested != default_editor => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    requested, default_editor
                ));
            }
            _ => {}
        }

        let status = Command::new(&default_editor)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if status.success() {
            success(format!("Configuration file edited using '{}'", default_editor));
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "editor '{}' exited with {}",
                default_editor, status
            )))
        }
    }

    /// Report and backfill config keys missing from the file.
    pub fn check(path: &Path) -> AppResult<()> {
        if !path.exists() {
            warning(format!(
                "No configuration file at {:?}; defaults are in use. Run `rdowntime init`.",
                path
            ));
            return Ok(());
        }

        let added = fill_missing_keys(path)?;
        if added.is_empty() {
            success("Configuration file is complete.");
        } else {
            info(format!("Added missing keys: {}", added.join(", ")));
        }
        Ok(())
    }
}
