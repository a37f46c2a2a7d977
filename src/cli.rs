use clap::Parser;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ZIPLS_LOG";

#[derive(Parser, Debug)]
#[command(name = "zipls")]
#[command(version)]
#[command(about = "List the contents of a ZIP archive, local or over HTTP", long_about = None)]
#[command(after_help = "Examples:\n  \
  zipls data1.zip                              list a local archive\n  \
  zipls https://example.com/archive.zip        list a remote archive via Range requests\n  \
  zipls -vv big.zip                            list with debug logging on stderr")]
pub struct Cli {
    /// ZIP file path or HTTP URL
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log filter directives, overriding -v/-q
    #[arg(long = "log", value_name = "FILTER", env = LOG_ENV)]
    pub log: Option<String>,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.file.starts_with("http://") || self.file.starts_with("https://")
    }

    /// Log filter derived from the flags.
    pub fn log_filter(&self) -> String {
        if let Some(filter) = &self.log {
            return filter.clone();
        }
        if self.quiet {
            return "error".to_string();
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string()
    }
}
