//! Play against a remote server
//!
//! Resolves the server address, connects over TCP and runs one session.

use crate::error::{ClientError, Result};
use crate::session::{CancelToken, GameLoop, SessionConfig, SessionReport};
use crate::solver::StrategyType;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for a networked game
pub struct PlayConfig {
    pub host: String,
    pub port: u16,
    pub strategy: String,
    pub session: SessionConfig,
}

/// Connect to the first reachable address for `host:port`
///
/// # Errors
///
/// Returns `ClientError::Transport` if the name does not resolve or no address accepts
/// the connection. The last connection error is reported.
pub fn connect(host: &str, port: u16, timeout: Option<Duration>) -> Result<TcpStream> {
    let mut last_err = io::Error::new(
        io::ErrorKind::NotFound,
        format!("no address found for {host}:{port}"),
    );

    for addr in (host, port).to_socket_addrs()? {
        debug!(%addr, "connecting");
        let attempt = match timeout {
            Some(t) => TcpStream::connect_timeout(&addr, t),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => {
                info!(%addr, "connected");
                stream.set_read_timeout(timeout)?;
                stream.set_write_timeout(timeout)?;
                return Ok(stream);
            }
            Err(e) => last_err = e,
        }
    }

    Err(ClientError::Transport(last_err))
}

/// Connect and play one game to its end
///
/// Protocol endings (win, parity error, game lost) are reported in the returned
/// `SessionReport`, not as errors.
///
/// `cancel` is only observed, before each send and after each receive. The session
/// ends with `Outcome::Cancelled` only if the caller cancels it from another thread
/// or a signal handler it installs itself.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the connection cannot be made.
pub fn play_game(config: &PlayConfig, cancel: CancelToken) -> Result<SessionReport> {
    config.session.validate()?;
    let stream = connect(&config.host, config.port, config.session.io_timeout)?;
    let strategy = StrategyType::from_name(&config.strategy, config.session.seed);

    let game = GameLoop::new(stream, strategy, config.session.clone())?.with_cancel_token(cancel);
    Ok(game.run())
}
