use std::fmt;

use crate::probe::ProbeOutcome;

/// Why an address was judged valid or invalid. One reason per verdict: the
/// probe's classification, or the MX short-circuit for addresses that never
/// reached a socket.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictReason {
    NoMxRecords,
    ValidSmtpResponse,
    RejectedBySmtpServer,
    ConnectionFailed,
    TimedOut,
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMxRecords => f.write_str("No MX records found"),
            Self::ValidSmtpResponse => f.write_str("Valid SMTP response"),
            Self::RejectedBySmtpServer => f.write_str("Email rejected by server"),
            Self::ConnectionFailed => f.write_str("SMTP connection failed"),
            Self::TimedOut => f.write_str("SMTP request timed out"),
        }
    }
}

/// Terminal, immutable classification of one address from one probe attempt.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub email: String,
    pub valid: bool,
    pub reason: VerdictReason,
}

impl Verdict {
    /// Verdict for an address whose domain cannot be routed at all: no `@`,
    /// empty domain, or no usable MX records.
    pub(crate) fn unroutable(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            valid: false,
            reason: VerdictReason::NoMxRecords,
        }
    }

    pub(crate) fn from_outcome(email: impl Into<String>, outcome: &ProbeOutcome) -> Self {
        let reason = VerdictReason::from(outcome);
        Self {
            email: email.into(),
            valid: matches!(reason, VerdictReason::ValidSmtpResponse),
            reason,
        }
    }
}

impl From<&ProbeOutcome> for VerdictReason {
    fn from(outcome: &ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Accepted { .. } => Self::ValidSmtpResponse,
            ProbeOutcome::Rejected { .. } => Self::RejectedBySmtpServer,
            ProbeOutcome::Failed { .. } => Self::ConnectionFailed,
            ProbeOutcome::TimedOut => Self::TimedOut,
        }
    }
}
