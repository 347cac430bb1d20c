use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// One TCP connection to a mail exchanger. The deadline is fixed at
/// construction; connect, write, and read each consume whatever remains of
/// the window, so total probe latency never exceeds the caller's timeout.
pub(crate) struct ProbeSession {
    stream: TcpStream,
    deadline: Instant,
}

impl ProbeSession {
    pub(crate) fn connect(addr: &SocketAddr, deadline: Instant) -> io::Result<Self> {
        let window = remaining(deadline)?;
        let stream = TcpStream::connect_timeout(addr, window)?;
        Ok(Self { stream, deadline })
    }

    /// Write every command back to back, CRLF-terminated, without reading
    /// any reply in between.
    pub(crate) fn send_pipelined(&mut self, commands: &[String]) -> io::Result<()> {
        self.stream
            .set_write_timeout(Some(remaining(self.deadline)?))?;
        for command in commands {
            let mut line = command.as_bytes().to_vec();
            line.extend_from_slice(b"\r\n");
            self.stream.write_all(&line)?;
        }
        self.stream.flush()
    }

    /// Block until the first inbound chunk (at most 512 bytes) arrives and
    /// return it as text. A peer that closes before sending anything is an
    /// `UnexpectedEof` error.
    pub(crate) fn read_first_chunk(&mut self) -> io::Result<String> {
        self.stream
            .set_read_timeout(Some(remaining(self.deadline)?))?;
        let mut buf = [0u8; 512];
        let read = self.stream.read(&mut buf)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before any reply",
            ));
        }
        Ok(String::from_utf8_lossy(&buf[..read]).into_owned())
    }

    /// Forced teardown, used when the deadline fires mid-dialogue. Dropping
    /// the session closes the descriptor in every other case.
    pub(crate) fn force_close(&self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

fn remaining(deadline: Instant) -> io::Result<Duration> {
    let window = deadline.saturating_duration_since(Instant::now());
    if window.is_zero() {
        Err(io::Error::new(
            io::ErrorKind::TimedOut,
            "probe deadline elapsed",
        ))
    } else {
        Ok(window)
    }
}

/// The first socket address the exchanger resolves to. Only one address is
/// ever dialled: a probe owns exactly one socket.
pub(crate) fn first_socket_addr(exchange: &str, port: u16) -> io::Result<SocketAddr> {
    let mut addrs = (exchange, port).to_socket_addrs()?;
    addrs.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            "no socket address for exchanger",
        )
    })
}
