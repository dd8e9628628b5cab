//! Thin binary wiring: reads the host-transport configuration from the environment, opens
//! the concrete host channel, and hands both to `winway_core::run`. No CLI-flag parsing
//! lives here — that's out of scope for this binary.

mod transport;

use std::process::ExitCode;
use winway_core::config::{HostMode, ProxyConfig, DEFAULT_TCP_PORT};

fn main() -> ExitCode {
    env_logger::init();

    let config = config_from_env();
    log::info!("starting winway-proxy in {:?} mode", config.host_mode);

    let result = match config.host_mode {
        HostMode::Stdio => match transport::StdioChannel::new() {
            Ok(host) => winway_core::run(&config, host),
            Err(e) => {
                log::error!("failed to prepare the stdio host channel: {e}");
                return ExitCode::FAILURE;
            }
        },
        HostMode::Tcp { port } => match transport::TcpChannel::bind_and_accept(port) {
            Ok(host) => winway_core::run(&config, host),
            Err(e) => {
                log::error!("failed to bind the tcp host channel: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("winway-proxy exiting: {}", error_reporter::Report::new(e));
            ExitCode::FAILURE
        }
    }
}

/// Builds a [`ProxyConfig`] from `WINWAY_MODE` / `WINWAY_TCP_PORT`, the only environment
/// variables this binary reads. Unset or unrecognised values fall back to stdio mode on
/// port 9999 rather than failing startup.
fn config_from_env() -> ProxyConfig {
    let host_mode = match std::env::var("WINWAY_MODE").as_deref() {
        Ok("tcp") => {
            let port = std::env::var("WINWAY_TCP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TCP_PORT);
            HostMode::Tcp { port }
        }
        Ok("stdio") | Err(_) => HostMode::Stdio,
        Ok(other) => {
            log::warn!("unrecognised WINWAY_MODE {other:?}, falling back to stdio");
            HostMode::Stdio
        }
    };
    ProxyConfig {
        host_mode,
        // No override: `ProxyConfig::resolved_socket_path` already applies the
        // `$XDG_RUNTIME_DIR`/`/tmp` fallback rule.
        socket_path: None,
    }
}
