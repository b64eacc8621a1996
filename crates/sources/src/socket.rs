//! Socket-backed telemetry source
//!
//! Connects to a TCP endpoint that streams newline-delimited samples; each
//! poll takes the next line. A peer hangup is reported as unavailability,
//! not an error - the sampler just keeps polling and a supervisor may
//! reopen the source.

use std::io::{BufRead, BufReader};
use std::net::TcpStream;

use crate::Source;

/// Telemetry source over a line-oriented TCP stream
#[derive(Debug)]
pub struct SocketSource {
    addr: String,
    reader: Option<BufReader<TcpStream>>,
}

impl SocketSource {
    /// Create a source for `addr` (`host:port`); nothing connects until
    /// [`Source::open`]
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            reader: None,
        }
    }

    /// Address this source connects to
    #[inline]
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Source for SocketSource {
    fn open(&mut self) -> bool {
        match TcpStream::connect(&self.addr) {
            Ok(stream) => {
                tracing::debug!(addr = %self.addr, "telemetry socket connected");
                self.reader = Some(BufReader::new(stream));
                true
            }
            Err(error) => {
                tracing::warn!(addr = %self.addr, %error, "failed to connect telemetry socket");
                false
            }
        }
    }

    fn read(&mut self, out: &mut String) -> bool {
        let Some(reader) = self.reader.as_mut() else {
            return false;
        };

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                tracing::info!(addr = %self.addr, "telemetry socket closed by peer");
                self.reader = None;
                false
            }
            Ok(_) => {
                out.push_str(line.trim());
                true
            }
            Err(error) => {
                tracing::warn!(addr = %self.addr, %error, "socket read failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;
