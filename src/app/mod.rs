// Author: Dustin Pilgrim
// License: MIT

pub mod command;
pub mod watch_mode;
