// Author: Dustin Pilgrim
// License: MIT

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Push a freshly computed `HH:MM:SS` value to the presentation layer.
    /// The runtime decides how to render it (carriage-return redraw, etc.).
    Publish {
        display: String,
    },
}
