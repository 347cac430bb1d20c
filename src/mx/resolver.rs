use trust_dns_resolver::{Resolver, error::ResolveError};

use super::{MxError, MxRecord, MxStatus};

/// Lookup MX records for `domain` using the system resolver.
///
/// The domain is normalized via IDNA before querying DNS. The resulting
/// [`MxStatus`] contains the sorted list of records (ascending preference,
/// lowest first). One query per call, no caching, no retry: callers that
/// need caching must layer it on top.
pub fn resolve_mx(domain: &str) -> MxStatus {
    let resolver = match Resolver::from_system_conf() {
        Ok(resolver) => resolver,
        Err(err) => return collapsed(&MxError::resolver_init(err)),
    };
    resolve_mx_with(&resolver, domain)
}

/// Same contract as [`resolve_mx`], against an injectable lookup backend.
pub(crate) fn resolve_mx_with<R>(resolver: &R, domain: &str) -> MxStatus
where
    R: LookupMx,
{
    match try_resolve(resolver, domain) {
        Ok(status) => status,
        Err(err) => collapsed(&err),
    }
}

fn try_resolve<R>(resolver: &R, domain: &str) -> Result<MxStatus, MxError>
where
    R: LookupMx,
{
    let ascii = normalize_domain(domain)?;
    let mut records = resolver.lookup_mx(&ascii).map_err(MxError::lookup)?;

    records.sort();
    records.dedup();

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

// Every DNS-layer failure collapses to "no records" at the module boundary.
fn collapsed(err: &MxError) -> MxStatus {
    #[cfg(feature = "with-tracing")]
    tracing::debug!("MX lookup treated as no records: {err}");
    let _ = err;
    MxStatus::NoRecords
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, MxError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(MxError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(MxError::idna)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = Resolver::mx_lookup(self, domain)?;
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        (self.on_lookup)(domain)
    }
}
