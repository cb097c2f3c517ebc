//! Byte-stream transport consumed by the game loop
//!
//! The session only ever writes single bytes and reads single bytes. Anything that is
//! ordered, reliable and already connected can stand behind this trait.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

/// Connection-oriented byte transport
pub trait Transport {
    /// Write one byte, blocking until it is accepted
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Read exactly one byte
    ///
    /// Returns `Ok(None)` if the peer closed the stream.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Release the connection. Called at most once per session.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read one byte from any `Read`, retrying on interruption
fn read_one<R: Read>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

impl Transport for TcpStream {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])?;
        self.flush()
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        read_one(self)
    }

    fn shutdown(&mut self) -> io::Result<()> {
        match TcpStream::shutdown(self, Shutdown::Both) {
            // Peer already gone
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

/// Adapter for a separate reader and writer, e.g. a pipe pair or in-memory buffers
pub struct StreamPair<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> StreamPair<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> Transport for StreamPair<R, W> {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.writer.write_all(&[byte])?;
        self.writer.flush()
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        read_one(&mut self.reader)
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
