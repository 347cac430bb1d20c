//! Batch coordination.
//!
//! [`check_batch`] fans one probe per address out on its own thread and
//! reassembles the verdicts in input order. Probes share no sockets, timers,
//! or resolver state, and one address's failure is a verdict for that
//! address, never an error for the rest of the batch.

mod types;

pub use types::{Verdict, VerdictReason};


use std::thread;

use crate::mx::{self, MxStatus};
use crate::probe::{ProbeOptions, probe_exchanger};

/// Validate every address in `addresses` concurrently.
///
/// The returned list has the same length and order as the input regardless
/// of completion order, and is only returned once every probe has reached a
/// terminal verdict. There is no concurrency cap and no cross-probe
/// cancellation; each probe is bounded by its own `options.timeout`.
pub fn check_batch<S>(addresses: &[S], options: &ProbeOptions) -> Vec<Verdict>
where
    S: AsRef<str> + Sync,
{
    check_batch_with(addresses, |address| check_address(address, options))
}

/// Validate one address: extract the domain, resolve its MX records, probe
/// the most preferred exchanger.
///
/// A missing `@`, an empty domain, or any DNS failure short-circuits to
/// [`VerdictReason::NoMxRecords`]; a malformed address makes no network call
/// at all.
pub fn check_address(address: &str, options: &ProbeOptions) -> Verdict {
    let Some(domain) = domain_of(address) else {
        return Verdict::unroutable(address);
    };
    probe_domain(address, domain, &mx::resolve_mx(domain), options)
}

#[cfg(test)]
pub(crate) fn check_address_with<R>(
    resolver: &R,
    address: &str,
    options: &ProbeOptions,
) -> Verdict
where
    R: crate::mx::LookupMx,
{
    let Some(domain) = domain_of(address) else {
        return Verdict::unroutable(address);
    };
    probe_domain(address, domain, &mx::resolve_mx_with(resolver, domain), options)
}

fn probe_domain(
    address: &str,
    domain: &str,
    status: &MxStatus,
    options: &ProbeOptions,
) -> Verdict {
    match status.preferred() {
        None => Verdict::unroutable(address),
        Some(record) => {
            // First exchanger only: a down primary is reported as a failed
            // connection even when a healthy secondary exists.
            let outcome = probe_exchanger(address, domain, &record.exchange, options);
            Verdict::from_outcome(address, &outcome)
        }
    }
}

/// Fan `verdict_for` out over `addresses`, one scoped thread per address,
/// then join in input order.
pub(crate) fn check_batch_with<S, F>(addresses: &[S], verdict_for: F) -> Vec<Verdict>
where
    S: AsRef<str> + Sync,
    F: Fn(&str) -> Verdict + Sync,
{
    let verdict_for = &verdict_for;
    thread::scope(|scope| {
        let handles: Vec<_> = addresses
            .iter()
            .map(|address| {
                let address = address.as_ref();
                scope.spawn(move || verdict_for(address))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(verdict) => verdict,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

/// The substring after the last `@`, when present and non-empty.
fn domain_of(address: &str) -> Option<&str> {
    match address.rsplit_once('@') {
        Some((_, domain)) if !domain.is_empty() => Some(domain),
        _ => None,
    }
}
