//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` and the
//! shim in `main.rs` carries each one out through the host API.

use crate::api::{HttpCall, RequestContext};

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP request through the host.
    ///
    /// The context map is echoed back with the `WebRequestResult` so the
    /// response can be routed to the view that asked for it.
    Request {
        call: HttpCall,
        context: RequestContext,
    },
}
