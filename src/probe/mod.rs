//! SMTP probing.
//!
//! [`probe_exchanger`] opens one TCP connection to a mail exchanger,
//! pipelines a partial handshake (HELO, MAIL FROM, RCPT TO, QUIT) without
//! reading intermediate replies, and classifies the first inbound chunk.
//! `DATA` is never sent, so a probe can never deliver a message.

mod options;
mod session;
mod types;

pub use options::ProbeOptions;
pub use types::ProbeOutcome;

#[cfg(test)]
pub(crate) mod tests;

use std::io;
use std::time::Instant;

use session::{ProbeSession, first_socket_addr};

/// Probe `exchange` for acceptance of `email`.
///
/// `domain` names the HELO identity and the `test@<domain>` envelope sender,
/// both taken from the recipient's own domain. The whole dialogue is bounded
/// by `options.timeout`, measured from entry: connect and first-response wait
/// split whatever remains of the window. The verdict is read off the first
/// inbound chunk only; a multi-line or delayed final reply is not waited for.
pub fn probe_exchanger(
    email: &str,
    domain: &str,
    exchange: &str,
    options: &ProbeOptions,
) -> ProbeOutcome {
    let outcome = run(email, domain, exchange, options);
    #[cfg(feature = "with-tracing")]
    tracing::debug!("probe of {exchange} for {email}: {outcome:?}");
    outcome
}

fn run(email: &str, domain: &str, exchange: &str, options: &ProbeOptions) -> ProbeOutcome {
    let deadline = Instant::now() + options.timeout;

    let addr = match first_socket_addr(exchange, options.port) {
        Ok(addr) => addr,
        Err(err) => return classify_error(None, &err),
    };

    let mut session = match ProbeSession::connect(&addr, deadline) {
        Ok(session) => session,
        Err(err) => return classify_error(None, &err),
    };

    if let Err(err) = session.send_pipelined(&handshake(email, domain)) {
        return classify_error(Some(&session), &err);
    }

    match session.read_first_chunk() {
        Ok(response) => decide(response),
        Err(err) => classify_error(Some(&session), &err),
    }
}

fn handshake(email: &str, domain: &str) -> [String; 4] {
    [
        format!("HELO {domain}"),
        format!("MAIL FROM:<test@{domain}>"),
        format!("RCPT TO:<{email}>"),
        "QUIT".to_string(),
    ]
}

fn decide(response: String) -> ProbeOutcome {
    if response.contains("250") {
        ProbeOutcome::Accepted { response }
    } else {
        ProbeOutcome::Rejected { response }
    }
}

fn classify_error(session: Option<&ProbeSession>, err: &io::Error) -> ProbeOutcome {
    if is_timeout(err) {
        if let Some(session) = session {
            session.force_close();
        }
        ProbeOutcome::TimedOut
    } else {
        ProbeOutcome::Failed {
            message: err.to_string(),
        }
    }
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    )
}
