//! # Output Configuration
//!
//! Controls CLI output appearance (color and emoji) based on terminal
//! capabilities and user preference.
//!
//! The module respects:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` / `CLICOLOR_FORCE=1` - Disable / force colors
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;
use std::str::FromStr;

/// User-facing color preference, parsed from the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Force colors on (overrides NO_COLOR).
    Always,
    /// Force colors off.
    Never,
    /// Detect based on environment and TTY.
    Auto,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "invalid color choice {:?} (expected always, never or auto)",
                other
            )),
        }
    }
}

impl ColorChoice {
    /// Resolve the preference against the environment.
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => environment_supports_color(),
        }
    }

    /// Pick the emoji or its plain-text stand-in according to preference.
    pub fn symbol<'a>(self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.enabled() {
            emoji
        } else {
            plain
        }
    }
}

fn environment_supports_color() -> bool {
    // The presence of NO_COLOR (even empty) disables colors
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}
