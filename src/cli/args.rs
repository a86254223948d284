//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "ghpaint")]
#[command(about = "Paint pixel art onto your GitHub contribution calendar", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output (show API requests)
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        // Only override the color mode if CLI is at its default
        if self.color == ColorMode::Auto
            && let Some(color) = config.color
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            command: None,
            json: false,
            color: ColorMode::Auto,
            no_color: false,
            debug: false,
        }
    }

    #[test]
    fn config_fills_defaults() {
        let config = Config {
            no_color: true,
            debug: true,
            ..Default::default()
        };
        let cli = bare_cli().with_config(&config);
        assert!(cli.no_color);
        assert!(cli.debug);
        assert!(!cli.use_color());
    }

    #[test]
    fn cli_color_choice_beats_config() {
        let config = Config {
            color: Some(ConfigColorMode::Never),
            ..Default::default()
        };
        let mut cli = bare_cli();
        cli.color = ColorMode::Always;
        let cli = cli.with_config(&config);
        assert_eq!(cli.color, ColorMode::Always);
        assert!(cli.use_color());
    }

    #[test]
    fn config_color_applies_when_cli_is_default() {
        let config = Config {
            color: Some(ConfigColorMode::Always),
            ..Default::default()
        };
        let cli = bare_cli().with_config(&config);
        assert_eq!(cli.color, ColorMode::Always);
    }
}
