use std::path::PathBuf;

use clap::Parser;

/// UI RPA Testing Panel: build mock forms and log the interactions.
#[derive(Parser, Debug)]
#[command(name = "rpa-panel", version, about)]
pub struct Args {
    /// Settings file path override.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Log level override (debug, info, warn, error, or a filter directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding the bundled panel assets.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Enable the WebView developer tools.
    #[arg(long)]
    pub devtools: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments() {
        let args = Args::try_parse_from(["rpa-panel"]).unwrap();
        assert!(args.settings.is_none());
        assert!(args.log_level.is_none());
        assert!(args.assets.is_none());
        assert!(!args.devtools);
    }

    #[test]
    fn all_overrides() {
        let args = Args::try_parse_from([
            "rpa-panel",
            "--settings",
            "/tmp/s.json",
            "--log-level",
            "debug",
            "--assets",
            "./assets",
            "--devtools",
        ])
        .unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.assets, Some(PathBuf::from("./assets")));
        assert!(args.devtools);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["rpa-panel", "--config", "x"]).is_err());
    }
}
