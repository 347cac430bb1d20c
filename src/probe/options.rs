use std::time::Duration;

/// Tunables for a single probe.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// SMTP port to dial. 25 everywhere but tests.
    pub port: u16,
    /// Total window for one probe; connect and first-response wait share it.
    pub timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            timeout: Duration::from_secs(5),
        }
    }
}
