use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::{ProbeOptions, ProbeOutcome, probe_exchanger};

pub(crate) fn options(port: u16, timeout_ms: u64) -> ProbeOptions {
    ProbeOptions {
        port,
        timeout: Duration::from_millis(timeout_ms),
    }
}

/// Accepts one connection, reads the four pipelined commands, answers with
/// `response` and returns the commands it saw.
pub(crate) fn spawn_mock_server(
    response: &'static str,
) -> (u16, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let (ready_tx, ready_rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        ready_tx.send(()).ok();
        let (stream, _) = listener.accept().expect("accept");
        serve(stream, response).expect("mock session")
    });
    ready_rx.recv().expect("server ready");
    (port, handle)
}

fn serve(mut stream: TcpStream, response: &str) -> io::Result<Vec<String>> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut commands = Vec::new();
    for _ in 0..4 {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        commands.push(line.trim_end().to_string());
    }
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(commands)
}

#[test]
fn handshake_pipelines_the_four_commands() {
    let commands = super::handshake("user@example.com", "example.com");
    assert_eq!(commands[0], "HELO example.com");
    assert_eq!(commands[1], "MAIL FROM:<test@example.com>");
    assert_eq!(commands[2], "RCPT TO:<user@example.com>");
    assert_eq!(commands[3], "QUIT");
}

#[test]
fn first_chunk_decides_the_outcome() {
    assert!(super::decide("250 2.1.5 Ok\r\n".to_string()).is_accepted());
    // A banner-only first chunk carries no 250 and is read as a rejection.
    assert!(matches!(
        super::decide("220 mx.test ESMTP ready\r\n".to_string()),
        ProbeOutcome::Rejected { .. }
    ));
    assert!(matches!(
        super::decide("550 5.1.1 No such user\r\n".to_string()),
        ProbeOutcome::Rejected { .. }
    ));
}

#[test]
#[ignore = "requires loopback TCP binding"]
fn accepting_server_yields_accepted() {
    let (port, handle) = spawn_mock_server("250 2.1.5 Ok\r\n");

    let outcome = probe_exchanger(
        "user@example.com",
        "example.com",
        "127.0.0.1",
        &options(port, 2_000),
    );
    match outcome {
        ProbeOutcome::Accepted { response } => assert!(response.contains("250")),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let commands = handle.join().expect("server thread");
    assert_eq!(commands[0], "HELO example.com");
    assert_eq!(commands[1], "MAIL FROM:<test@example.com>");
    assert_eq!(commands[2], "RCPT TO:<user@example.com>");
    assert_eq!(commands[3], "QUIT");
}

#[test]
#[ignore = "requires loopback TCP binding"]
fn rejecting_server_yields_rejected() {
    let (port, handle) = spawn_mock_server("550 5.1.1 No such user\r\n");

    let outcome = probe_exchanger(
        "ghost@example.com",
        "example.com",
        "127.0.0.1",
        &options(port, 2_000),
    );
    assert!(matches!(outcome, ProbeOutcome::Rejected { .. }));
    handle.join().expect("server thread");
}

#[test]
#[ignore = "requires loopback TCP binding"]
fn refused_connection_yields_failed() {
    // Bind then drop so the port is free but (very likely) unclaimed.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let outcome = probe_exchanger(
        "user@example.com",
        "example.com",
        "127.0.0.1",
        &options(port, 2_000),
    );
    assert!(matches!(outcome, ProbeOutcome::Failed { .. }));
}

#[test]
#[ignore = "requires loopback TCP binding"]
fn silent_server_yields_timeout_and_closes_the_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let (ready_tx, ready_rx) = mpsc::channel();
    let (closed_tx, closed_rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        ready_tx.send(()).ok();
        let (mut stream, _) = listener.accept().expect("accept");
        // Never reply; drain until the probe tears the connection down.
        let mut sink = [0u8; 256];
        loop {
            match stream.read(&mut sink) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
        closed_tx.send(()).ok();
    });
    ready_rx.recv().expect("server ready");

    let outcome = probe_exchanger(
        "user@example.com",
        "example.com",
        "127.0.0.1",
        &options(port, 300),
    );
    assert!(matches!(outcome, ProbeOutcome::TimedOut));

    closed_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("socket should be closed after the timeout verdict");
    handle.join().expect("server thread");
}
