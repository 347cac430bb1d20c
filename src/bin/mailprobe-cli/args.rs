use std::time::Duration;

use clap::Parser;
use mailprobe_lib::ProbeOptions;

/// Probe SMTP deliverability for a batch of e-mail addresses.
#[derive(Parser)]
#[command(name = "mailprobe-cli")]
pub struct Cli {
    /// addresses to probe (one verdict per address, input order kept)
    pub addresses: Vec<String>,

    /// read addresses from stdin (one per line, blank lines skipped)
    #[arg(long)]
    pub stdin: bool,

    /// per-probe timeout (ms), covering connect and first response
    #[arg(long = "timeout", default_value_t = 5_000)]
    pub timeout_ms: u64,

    /// SMTP port to dial
    #[arg(long, default_value_t = 25)]
    pub port: u16,

    /// format: human|json|ndjson
    #[arg(long, default_value = "human")]
    pub format: String,

    /// write the report to a file instead of stdout (JSON/NDJSON only)
    #[arg(long)]
    pub out: Option<String>,
}

impl Cli {
    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            port: self.port,
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}
