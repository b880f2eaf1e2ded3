//! Serial-port transport for host-side tooling.
//!
//! Wraps a [`serialport`] handle as a [`Channel`]. The codec core never
//! blocks, so the port is opened with a zero timeout and reads are gated by
//! [`bytes_to_read`](serialport::SerialPort::bytes_to_read); on an embedded
//! target you would implement [`Channel`] over the device HAL instead.

use std::io::{Read, Write};
use std::time::Duration;

use log::{debug, warn};
use serialport::SerialPort;
use thiserror::Error;

use crate::channel::Channel;

/// Returned when a serial channel cannot be opened.
#[derive(Debug, Error)]
pub enum SerialError {
    #[error(transparent)]
    Serialport(#[from] serialport::Error),
}

/// A [`Channel`] backed by a host serial port.
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
}

impl SerialChannel {
    /// Opens `path` at `baud_rate` with a zero read timeout.
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, SerialError> {
        let port = serialport::new(path, baud_rate)
            .timeout(Duration::ZERO)
            .open()?;
        debug!("opened serial port {path} at {baud_rate} baud");
        Ok(Self { port })
    }

    /// Wraps an already configured port. The port should use a zero (or
    /// near-zero) read timeout; the codec expects reads to return
    /// immediately.
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        Self { port }
    }
}

impl Channel for SerialChannel {
    fn available(&self) -> usize {
        match self.port.bytes_to_read() {
            Ok(count) => count as usize,
            Err(error) => {
                warn!("serial byte count query failed: {error}");
                0
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        match self.port.read(buf) {
            Ok(count) => count,
            Err(error) if error.kind() == std::io::ErrorKind::TimedOut => 0,
            Err(error) if error.kind() == std::io::ErrorKind::WouldBlock => 0,
            Err(error) => {
                warn!("serial read failed: {error}");
                0
            }
        }
    }

    fn write(&mut self, buf: &[u8]) -> bool {
        match self.port.write_all(buf) {
            Ok(()) => true,
            Err(error) => {
                warn!("serial write of {} bytes failed: {error}", buf.len());
                false
            }
        }
    }
}
