// Author: Dustin Pilgrim
// License: MIT

pub mod poller;
pub mod ticker;

/// Messages the background services feed into the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// One-second display heartbeat.
    Tick,

    /// Time to re-fetch the session list from the server.
    Resync,
}
