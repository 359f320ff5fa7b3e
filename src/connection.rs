use std::fmt;

use crate::errors::{HiveError, HiveResult};
use crate::rpc::HiveRpc;

/// Lifecycle state of the one transport a client owns.
///
/// `OpenTransient` lasts for a single scoped call; `OpenPinned` lasts for a
/// whole [`session`](crate::HiveClient::session). There is no transition
/// between the two open states: a session can only start from `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConnState {
    Closed,
    OpenTransient,
    OpenPinned,
}

/// Receipt for one scoped acquisition. Records whether this scope actually
/// opened the transport, so nested scopes inside a session release nothing.
#[derive(Debug)]
#[must_use = "unreleased scopes leave the transport open"]
pub(crate) struct Scope {
    opened: bool,
}

impl Scope {
    pub(crate) fn opened(&self) -> bool {
        self.opened
    }
}

/// Owns the transport handle and guards every state transition.
///
/// The pinned/transient distinction is the whole point: callers never touch
/// `open`/`close` directly, they go through `acquire`/`release` (one call)
/// or `pin`/`unpin` (one session).
pub(crate) struct Connection<R> {
    rpc: R,
    addr: String,
    state: ConnState,
}

// The stub is the one field with nothing useful to show.
impl<R> fmt::Debug for Connection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("addr", &self.addr)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<R: HiveRpc> Connection<R> {
    pub(crate) fn new(rpc: R, addr: String) -> Connection<R> {
        Connection {
            rpc,
            addr,
            state: ConnState::Closed,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ConnState {
        self.state
    }

    pub(crate) fn rpc_mut(&mut self) -> &mut R {
        &mut self.rpc
    }

    /// Scoped acquisition: open the transport if nothing else holds it open.
    pub(crate) async fn acquire(&mut self) -> HiveResult<Scope> {
        match self.state {
            ConnState::Closed => {
                log::debug!("opening transport to {}", self.addr);
                self.rpc.open(&self.addr).await?;
                self.state = ConnState::OpenTransient;
                Ok(Scope { opened: true })
            }
            ConnState::OpenTransient | ConnState::OpenPinned => Ok(Scope { opened: false }),
        }
    }

    /// Scoped release. Close failures are logged and suppressed: the result
    /// of the operation the scope wrapped takes precedence.
    pub(crate) async fn release(&mut self, scope: Scope) {
        if !scope.opened() {
            return;
        }
        self.state = ConnState::Closed;
        if let Err(err) = self.rpc.close().await {
            log::warn!("failed to close transport after scoped call: {}", err);
        }
    }

    /// Session entry: open the transport and keep it open until `unpin`.
    pub(crate) async fn pin(&mut self) -> HiveResult<()> {
        match self.state {
            ConnState::Closed => {
                log::debug!("opening pinned transport to {}", self.addr);
                self.rpc.open(&self.addr).await?;
                self.state = ConnState::OpenPinned;
                Ok(())
            }
            ConnState::OpenTransient | ConnState::OpenPinned => Err(HiveError::SessionActive),
        }
    }

    /// Session exit. Runs whether or not the session body failed.
    pub(crate) async fn unpin(&mut self) {
        self.state = ConnState::Closed;
        if let Err(err) = self.rpc.close().await {
            log::warn!("failed to close transport at session end: {}", err);
        }
    }

    /// Mark the transport as needing a reopen without closing it. Used when
    /// a cursor is dropped mid-stream and no async close can run.
    pub(crate) fn abandon(&mut self) {
        self.state = ConnState::Closed;
    }
}
