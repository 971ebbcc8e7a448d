// Author: Dustin Pilgrim
// License: MIT

pub mod action;
pub mod error;
pub mod events;
pub mod live;
pub mod session;
pub mod store;
pub mod timefmt;
