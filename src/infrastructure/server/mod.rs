//! Live-reload development server

mod http;
mod live_reload;
mod static_files;

pub use http::{inject_client, DevServer, ServerHandle, RELOAD_PATH};
pub use live_reload::{LiveReload, ReloadKind, ReloadState};
pub use static_files::{resolve as resolve_static, StaticFile, StaticFileError};
