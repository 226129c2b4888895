// Library root
// -----------
// Everything the `pastectl` binary does lives here so it can be tested
// without spawning a process.
//
// Module responsibilities:
// - `service`: the `PasteService` trait, the `Paste` value and the
//   name-to-backend resolver.
// - `pastebin`, `fpaste`: one backend per paste provider.
// - `highlight`: file extension to highlight-token mapping.
// - `api`: the blocking HTTP client shared by the backends.
// - `cli`: argument parsing and put/get dispatch.
// - `ui`: spinner shown while a request is in flight.
// - `error`: the error type returned by the backends.
pub mod api;
pub mod cli;
pub mod error;
pub mod fpaste;
pub mod highlight;
pub mod pastebin;
pub mod service;
pub mod ui;

pub use error::{Error, Result};
pub use service::{resolve, Paste, PasteService};
