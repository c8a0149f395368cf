pub mod api;
pub mod args;
pub mod error;
pub mod logging;
pub mod model;
pub mod controller {
    pub mod http_handlers;
    pub mod maintenance;
    pub mod ranking;
    pub mod session;
}
pub mod view;

pub const HTMX_PATH: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";
/// Subresource integrity of the file at [`HTMX_PATH`].
pub const HTMX_INTEGRITY: &str =
    "sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz";

pub use error::AdminError;
