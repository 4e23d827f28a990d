//! Profiling utilities based on the `puffin` crate.

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Default address of the puffin HTTP server.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8585";

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Record scopes in-process only (read them through [`GlobalProfiler`]).
    InProcess,
    /// Send profiling data to puffin_viewer via HTTP.
    #[cfg(feature = "profiling")]
    PuffinHttp,
}

/// Global profiling server instance.
#[cfg(feature = "profiling")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Initialize profiling with the specified backend.
///
/// # Example
/// ```no_run
/// use crossplot_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::InProcess);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);

    match backend {
        ProfilingBackend::InProcess => {
            tracing::debug!("Puffin scopes enabled (in-process)");
        }
        #[cfg(feature = "profiling")]
        ProfilingBackend::PuffinHttp => match puffin_http::Server::new(DEFAULT_SERVER_ADDR) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{}", DEFAULT_SERVER_ADDR);
                // Keep the server alive for the rest of the session
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server: {}", e);
            }
        },
    }
}

/// Mark a frame boundary for profiling.
///
/// Call once per user interaction (one filter transition and its
/// re-render) so the viewer groups scopes by interaction.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
