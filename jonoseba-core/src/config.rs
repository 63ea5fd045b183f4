use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

/// Connection and site settings, read from `jonoseba.conf` in the platform
/// config directory with `JONOSEBA_*` environment overrides on top.
///
/// The admin password ships in client-delivered configuration on purpose:
/// the gate is a convenience, not a security boundary.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api_url: String,
    pub api_key: String,
    pub uploads_bucket: String,
    pub admin_password: String,
    /// Minutes before an admin session expires; empty means it lives for
    /// the whole run, like the original browser-session flag.
    pub session_ttl_minutes: Option<i64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: "https://jonoseba.supabase.co".to_string(),
            api_key: String::new(),
            uploads_bucket: "uploads".to_string(),
            admin_password: "1990-2026".to_string(),
            session_ttl_minutes: None,
        }
    }
}

impl SiteConfig {
    pub fn load() -> Result<Self> {
        let path = conf_file()?;

        if !path.exists() {
            let config = Self::default();
            info!("No config at {:?}, writing defaults", path);
            if let Err(e) = config.save(&path) {
                warn!("Failed to write default config: {}", e);
            }
            return Ok(config.with_env_overrides());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('|') {
                config.set(key.trim(), value.trim());
            }
        }

        info!("Loaded config from {:?}", path);
        Ok(config.with_env_overrides())
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "api_url" => self.api_url = value.to_string(),
            "api_key" => self.api_key = value.to_string(),
            "uploads_bucket" => self.uploads_bucket = value.to_string(),
            "admin_password" => self.admin_password = value.to_string(),
            "session_ttl_minutes" => match value.parse() {
                Ok(minutes) => self.session_ttl_minutes = Some(minutes),
                Err(e) => warn!("Invalid session_ttl_minutes value {:?}: {}", value, e),
            },
            other => warn!("Unknown config key {:?}, ignoring", other),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        for (env, key) in [
            ("JONOSEBA_API_URL", "api_url"),
            ("JONOSEBA_API_KEY", "api_key"),
            ("JONOSEBA_UPLOADS_BUCKET", "uploads_bucket"),
            ("JONOSEBA_ADMIN_PASSWORD", "admin_password"),
            ("JONOSEBA_SESSION_TTL_MINUTES", "session_ttl_minutes"),
        ] {
            if let Ok(value) = std::env::var(env) {
                info!("Overriding {} from environment", key);
                self.set(key, &value);
            }
        }
        self
    }

    fn save(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = String::new();
        content.push_str(&format!("api_url|{}\n", self.api_url));
        content.push_str(&format!("api_key|{}\n", self.api_key));
        content.push_str(&format!("uploads_bucket|{}\n", self.uploads_bucket));
        content.push_str(&format!("admin_password|{}\n", self.admin_password));
        if let Some(minutes) = self.session_ttl_minutes {
            content.push_str(&format!("session_ttl_minutes|{}\n", minutes));
        }
        fs::write(path, content)?;
        Ok(())
    }
}

fn conf_file() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "jonoseba", "jonoseba")
        .context("Failed to get project directories")?;
    Ok(proj_dirs.config_dir().join("jonoseba.conf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pipe_delimited_lines() {
        let mut config = SiteConfig::default();
        config.set("api_url", "https://example.test");
        config.set("session_ttl_minutes", "30");
        assert_eq!(config.api_url, "https://example.test");
        assert_eq!(config.session_ttl_minutes, Some(30));
    }

    #[test]
    fn keeps_defaults_on_bad_ttl() {
        let mut config = SiteConfig::default();
        config.set("session_ttl_minutes", "soon");
        assert_eq!(config.session_ttl_minutes, None);
    }
}
