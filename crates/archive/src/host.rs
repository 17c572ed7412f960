//! Single-session ownership of the run's socket.

use std::io::{self, Read, Write};
use std::mem;

use compress::{CompressionAlgorithm, StreamMode};

use crate::error::SessionError;
use crate::session::ArchiveSession;

enum HostState<S: Read + Write> {
    Idle(S),
    Active(ArchiveSession<S>),
    Closed,
}

/// Owns the socket until a session takes it, and the session afterwards.
///
/// At most one session is created per host, and the socket is released at
/// most once, by [`SessionHost::close`] or on drop.
pub struct SessionHost<S: Read + Write> {
    state: HostState<S>,
}

impl<S: Read + Write> SessionHost<S> {
    /// Creates a host holding an idle socket.
    pub const fn new(socket: S) -> Self {
        Self {
            state: HostState::Idle(socket),
        }
    }

    /// Creates the run's archive session.
    ///
    /// The selector and mode are validated before the socket is touched. A
    /// second call fails with [`SessionError::AlreadyCreated`].
    pub fn create_session(
        &mut self,
        compression: Option<&str>,
        transfer_mode: &str,
    ) -> Result<&mut ArchiveSession<S>, SessionError> {
        match self.state {
            HostState::Active(_) => return Err(SessionError::AlreadyCreated),
            HostState::Closed => return Err(SessionError::Closed),
            HostState::Idle(_) => {}
        }

        let compression = CompressionAlgorithm::from_selector(compression)?;
        let mode: StreamMode = transfer_mode.parse()?;

        let HostState::Idle(socket) = mem::replace(&mut self.state, HostState::Closed) else {
            return Err(SessionError::Closed);
        };
        self.state = HostState::Active(ArchiveSession::from_parts(socket, compression, &mode));
        self.session_mut()
    }

    /// Returns the active session.
    pub fn session_mut(&mut self) -> Result<&mut ArchiveSession<S>, SessionError> {
        match &mut self.state {
            HostState::Active(session) => Ok(session),
            HostState::Idle(_) => Err(SessionError::NotCreated),
            HostState::Closed => Err(SessionError::Closed),
        }
    }

    /// Reports whether the socket has been released.
    pub const fn is_closed(&self) -> bool {
        matches!(self.state, HostState::Closed)
    }

    /// Finishes any active session and closes the socket.
    ///
    /// Later calls are no-ops.
    pub fn close(&mut self) -> io::Result<()> {
        match mem::replace(&mut self.state, HostState::Closed) {
            HostState::Idle(socket) => drop(socket),
            HostState::Active(session) => {
                let socket = session.finish()?;
                drop(socket);
            }
            HostState::Closed => return Ok(()),
        }
        tracing::debug!(target: "bu::session", "socket closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::MemoryTransport;

    #[test]
    fn second_session_is_rejected() {
        let mut host = SessionHost::new(MemoryTransport::default());
        host.create_session(Some("none"), "w").unwrap();
        let err = host.create_session(Some("none"), "w").unwrap_err();
        assert!(matches!(err, SessionError::AlreadyCreated));
        assert!(host.session_mut().is_ok());
    }

    #[test]
    fn invalid_settings_leave_socket_idle() {
        let mut host = SessionHost::new(MemoryTransport::default());
        assert!(matches!(
            host.create_session(Some("lzma"), "w"),
            Err(SessionError::Compression(_))
        ));
        assert!(matches!(host.session_mut(), Err(SessionError::NotCreated)));
        host.create_session(Some("gzip"), "w").unwrap();
    }

    #[test]
    fn close_is_idempotent_and_terminal() {
        let mut host = SessionHost::new(MemoryTransport::default());
        host.create_session(None, "r").unwrap();
        host.close().unwrap();
        host.close().unwrap();
        assert!(host.is_closed());
        assert!(matches!(
            host.create_session(None, "r"),
            Err(SessionError::Closed)
        ));
    }
}
