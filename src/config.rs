//! Configuration and CLI argument handling

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Which host surface drives the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Surface {
    /// Serve the timer page over HTTP
    Web,
    /// Read commands from stdin and draw the bar on stdout
    Console,
}

/// Screen edge the page pins its seek bar to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Left and right bars fill downwards instead of across
    pub fn is_vertical(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "seekbar-timer")]
#[command(about = "A countdown seek-bar timer served as a browser page or driven from the console")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to (0 picks a free port)
    #[arg(short, long, default_value = "0")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial timer duration in minutes
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(i64).range(1..))]
    pub minutes: i64,

    /// Host surface to run
    #[arg(long, value_enum, default_value_t = Surface::Web)]
    pub surface: Surface,

    /// Screen edge for the page's seek bar
    #[arg(long, value_enum, default_value_t = Edge::Bottom)]
    pub edge: Edge,

    /// Open the timer page in the default browser
    #[arg(long)]
    pub open: bool,

    /// Show a desktop notification when the countdown completes
    #[arg(long)]
    pub notify: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Console mode draws on stdout, so logs go to stderr there
    pub fn logs_to_stderr(&self) -> bool {
        self.surface == Surface::Console
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["seekbar-timer"]).unwrap();
        assert_eq!(config.minutes, 5);
        assert_eq!(config.surface, Surface::Web);
        assert_eq!(config.address(), "127.0.0.1:0");
        assert_eq!(config.log_level(), "info");
        assert!(!config.open);
        assert!(!config.notify);
        assert_eq!(config.edge, Edge::Bottom);
        assert!(!config.logs_to_stderr());
    }

    #[test]
    fn console_surface_with_custom_minutes() {
        let config =
            Config::try_parse_from(["seekbar-timer", "--surface", "console", "-m", "25", "-v"]).unwrap();
        assert_eq!(config.surface, Surface::Console);
        assert_eq!(config.minutes, 25);
        assert_eq!(config.log_level(), "debug");
        assert!(config.logs_to_stderr());
    }

    #[test]
    fn parses_screen_edges() {
        let config = Config::try_parse_from(["seekbar-timer", "--edge", "left"]).unwrap();
        assert_eq!(config.edge, Edge::Left);
        assert!(config.edge.is_vertical());

        let config = Config::try_parse_from(["seekbar-timer", "--edge", "top"]).unwrap();
        assert!(!config.edge.is_vertical());

        assert!(Config::try_parse_from(["seekbar-timer", "--edge", "middle"]).is_err());
    }

    #[test]
    fn edge_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Edge::Right).unwrap(), "right");
    }

    #[test]
    fn rejects_non_positive_minutes() {
        assert!(Config::try_parse_from(["seekbar-timer", "--minutes", "0"]).is_err());
        assert!(Config::try_parse_from(["seekbar-timer", "--minutes=-4"]).is_err());
    }
}
