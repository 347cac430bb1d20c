#![forbid(unsafe_code)]
//! mailprobe_lib — SMTP deliverability probing for e-mail batches (MVP)

pub mod batch;
pub mod mx;
pub mod probe;

pub use batch::{Verdict, VerdictReason, check_address, check_batch};
pub use mx::{MxRecord, MxStatus, resolve_mx};
pub use probe::{ProbeOptions, ProbeOutcome, probe_exchanger};
