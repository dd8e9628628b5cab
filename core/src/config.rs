//! Proxy configuration.

/// How the proxy talks to the external presentation host.
///
/// This is the `{mode: stdio|tcp, tcp_port: integer default 9999}` flag. This crate is
/// oblivious to which transport is actually in use; this enum only exists so
/// `winway-proxy` has a typed value to pass down instead of re-deriving it from raw
/// strings at every call site.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HostMode {
    /// The host channel is the process's stdin (INPT in) and stdout (PIXL out).
    Stdio,
    /// The host channel is a TCP connection on the given port.
    Tcp { port: u16 },
}

impl Default for HostMode {
    fn default() -> Self {
        HostMode::Stdio
    }
}

/// The default TCP port used by [`HostMode::Tcp`] when not overridden.
pub const DEFAULT_TCP_PORT: u16 = 9999;

/// Top-level proxy configuration.
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    pub host_mode: HostMode,
    /// Overrides the listening socket path derived from `$XDG_RUNTIME_DIR`.
    /// `None` means "use the default rule".
    pub socket_path: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host_mode: HostMode::default(),
            socket_path: None,
        }
    }
}

/// The socket name this proxy listens on.
pub const SOCKET_NAME: &str = "wayland-winway";

/// Resolves the listening socket path: `$XDG_RUNTIME_DIR/wayland-winway`, falling back to
/// `/tmp/wayland-winway` if the environment variable is unset.
pub fn default_socket_path() -> String {
    match std::env::var("XDG_RUNTIME_DIR") {
        Ok(dir) if !dir.is_empty() => format!("{dir}/{SOCKET_NAME}"),
        _ => format!("/tmp/{SOCKET_NAME}"),
    }
}

impl ProxyConfig {
    pub fn resolved_socket_path(&self) -> String {
        self.socket_path
            .clone()
            .unwrap_or_else(default_socket_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_overrides_default() {
        let cfg = ProxyConfig {
            socket_path: Some("/run/custom".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_socket_path(), "/run/custom");
    }

    #[test]
    fn default_tcp_port_is_9999() {
        assert_eq!(DEFAULT_TCP_PORT, 9999);
    }
}
