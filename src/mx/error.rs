use thiserror::Error;

/// Internal DNS-layer failures. None of these cross the module boundary:
/// every variant collapses to
/// [`MxStatus::NoRecords`](super::MxStatus::NoRecords) before
/// [`resolve_mx`](super::resolve_mx) returns.
#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed: {0}")]
    Idna(String),
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("MX lookup failed: {source}")]
    Lookup {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl MxError {
    pub(crate) fn idna<T: std::fmt::Display>(err: T) -> Self {
        Self::Idna(err.to_string())
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn lookup(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Lookup { source }
    }
}
