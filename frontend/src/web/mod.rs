//! Browser-facing layer
//!
//! Everything that touches `window` lives here; `route` is the exception
//! and stays DOM-free so the guard can be tested natively.

mod console;
mod http;
pub mod route;
pub mod router;
mod storage;
pub mod theme;

pub use console::init_logging;
pub use http::{FetchTransport, FormPart, HttpRequest, HttpResponse, HttpTransport, UploadFile};
pub use storage::{BrowserStorage, KeyValueStorage};

#[cfg(test)]
pub use http::{MockTransport, RequestBody};
#[cfg(test)]
pub use storage::MemoryStorage;
