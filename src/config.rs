use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    /// OAuth app client id override
    #[serde(default)]
    pub(crate) client_id: Option<String>,
    /// Loopback callback port (must match the OAuth app's redirect URI)
    #[serde(default)]
    pub(crate) port: Option<u16>,
    /// Default paint target (NAME or OWNER/NAME)
    #[serde(default)]
    pub(crate) repo: Option<String>,
    #[serde(default)]
    pub(crate) branch: Option<String>,
    #[serde(default)]
    pub(crate) author_name: Option<String>,
    #[serde(default)]
    pub(crate) author_email: Option<String>,
    /// Commit message template; {date} is substituted
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) delay_ms: Option<u64>,
}

impl Config {
    pub(crate) fn load() -> Self {
        Self::load_internal(false)
    }

    pub(crate) fn load_quiet() -> Self {
        Self::load_internal(true)
    }

    fn load_internal(quiet: bool) -> Self {
        // Try config locations in order of priority
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        if !quiet {
                            eprintln!("Loaded config from {}", path.display());
                        }
                        return config;
                    }
                    Err(e) => {
                        if !quiet {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/ghpaint/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("ghpaint").join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/ghpaint/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let macos_path = config_dir.join("ghpaint").join("config.toml");
            if !paths.contains(&macos_path) {
                paths.push(macos_path);
            }
        }

        // 3. Home directory: ~/.ghpaint.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".ghpaint.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
    }

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            no_color = true
            color = "never"
            client_id = "Iv1.custom"
            repo = "octocat/art"
            branch = "graffiti"
            author_name = "Painter"
            author_email = "painter@example.com"
            message = "paint {date}"
            delay_ms = 250
            port = 9000
            "#,
        )
        .unwrap();
        assert!(config.no_color);
        assert!(matches!(config.color, Some(ConfigColorMode::Never)));
        assert_eq!(config.client_id.as_deref(), Some("Iv1.custom"));
        assert_eq!(config.repo.as_deref(), Some("octocat/art"));
        assert_eq!(config.delay_ms, Some(250));
        assert_eq!(config.port, Some(9000));
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.no_color);
        assert!(config.repo.is_none());
        assert!(config.delay_ms.is_none());
    }
}
