//! The accept loop / multiplexer: the single-threaded event loop tying the listening
//! endpoint, every client connection, and the host channel together.
//!
//! Grounded in `wl-proxy/src/state.rs`'s main loop shape (`poll`, then drain whichever fds
//! came back ready) but with one fixed listener and a flat `Connection` map instead of
//! `wl-proxy`'s generic client/server endpoint pairing, since this proxy never has an
//! upstream side to fan out to.

use crate::{
    acceptor,
    config::ProxyConfig,
    connection::Connection,
    host::HostChannel,
    input,
    poll::Poller,
};
use isnt::std_1::primitive::IsntSliceExt;
use std::{
    collections::HashMap,
    os::fd::{AsRawFd, OwnedFd, RawFd},
};

const LISTENER_TOKEN: u64 = u64::MAX;
const HOST_TOKEN: u64 = u64::MAX - 1;

/// Runs the proxy until the host channel reaches EOF (: the only fatal
/// condition) or a fatal bind failure occurs.
///
/// Generic over the concrete [`HostChannel`] rather than a trait object: `winway-proxy`
/// picks stdio or TCP at startup and monomorphizes this loop for whichever one it built,
/// since the core never needs to switch transports mid-run.
pub fn run<H: HostChannel>(config: &ProxyConfig, mut host: H) -> Result<(), std::io::Error> {
    let socket_path = config.resolved_socket_path();
    let listener = acceptor::bind_listener(&socket_path)?;
    let poller = Poller::new()?;
    poller.register_read(listener.as_raw_fd(), LISTENER_TOKEN)?;
    poller.register_read(host.raw_fd(), HOST_TOKEN)?;

    log::info!("listening on {socket_path}");
    // Unlinks the socket file on every exit path (clean host EOF, poll error, `?` early
    // return alike), mirroring `wl-proxy/src/simple.rs`'s `on_drop` scope-guard style for
    // process-exit cleanup.
    let _unlink_on_exit = run_on_drop::on_drop(|| {
        let _ = std::fs::remove_file(&socket_path);
    });

    let mut connections: HashMap<u64, Connection> = HashMap::new();
    let mut fd_to_id: HashMap<RawFd, u64> = HashMap::new();
    let mut next_id: u64 = 0;

    loop {
        let events = poller.wait(-1)?;
        for event in events {
            if event.token == LISTENER_TOKEN {
                accept_new_clients(&listener, &poller, &mut connections, &mut fd_to_id, &mut next_id);
                continue;
            }
            if event.token == HOST_TOKEN {
                if !pump_host(&mut host, &mut connections) {
                    log::info!("host channel reached EOF, shutting down");
                    return Ok(());
                }
                flush_all_outbound(&mut connections, &fd_to_id);
                continue;
            }
            let fd = event.token as RawFd;
            let Some(&id) = fd_to_id.get(&fd) else {
                continue;
            };
            if event.hangup {
                teardown(&poller, &mut connections, &mut fd_to_id, id, fd);
                continue;
            }
            if event.readable && !service_client(&mut connections, &mut host, id, fd) {
                teardown(&poller, &mut connections, &mut fd_to_id, id, fd);
                continue;
            }
            flush_outbound(&mut connections, id, fd);
        }
    }
}

fn accept_new_clients(
    listener: &OwnedFd,
    poller: &Poller,
    connections: &mut HashMap<u64, Connection>,
    fd_to_id: &mut HashMap<RawFd, u64>,
    next_id: &mut u64,
) {
    loop {
        match acceptor::accept(listener) {
            Ok(Some(fd)) => {
                let raw = fd.as_raw_fd();
                let id = *next_id;
                *next_id += 1;
                if let Err(e) = poller.register_read(raw, raw as u64) {
                    log::warn!("failed to register a new client with the multiplexer: {e}");
                    continue;
                }
                fd_to_id.insert(raw, id);
                connections.insert(id, Connection::new(id, fd));
                log::info!("client {id} connected");
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("accept() failed: {e}");
                break;
            }
        }
    }
}

/// Reads one readiness-worth of bytes (and ancillary fds) from a client and drains every
/// whole message now buffered. Returns `false` on EOF or a read error — a normal teardown.
fn service_client<H: HostChannel>(
    connections: &mut HashMap<u64, Connection>,
    host: &mut H,
    id: u64,
    fd: RawFd,
) -> bool {
    let mut buf = [0u8; 4096];
    let (n, fds) = match acceptor::recv(fd, &mut buf) {
        Ok(Some(v)) => v,
        Ok(None) => return true,
        Err(e) => {
            log::warn!("client {id}: read error, disconnecting: {e}");
            return false;
        }
    };
    if n == 0 {
        log::info!("client {id} disconnected");
        return false;
    }
    let Some(conn) = connections.get_mut(&id) else {
        return false;
    };
    conn.fd_queue.extend(fds);
    conn.feed(&buf[..n]);
    conn.drain_messages(host);
    true
}

/// Flushes every connection's outbound buffer after a host-channel event.
///
/// Client sockets are only ever registered for read readiness (`poll.rs`'s
/// `register_read`), so nothing else wakes the loop to write out the events
/// `pump_host`/`input::apply` just enqueued onto an otherwise-idle client. Without this,
/// bytes queued for a client that isn't itself sending requests would sit in
/// `conn.outbound` until that client happened to write something of its own.
fn flush_all_outbound(connections: &mut HashMap<u64, Connection>, fd_to_id: &HashMap<RawFd, u64>) {
    for (&fd, &id) in fd_to_id {
        flush_outbound(connections, id, fd);
    }
}

fn flush_outbound(connections: &mut HashMap<u64, Connection>, id: u64, fd: RawFd) {
    let Some(conn) = connections.get_mut(&id) else {
        return;
    };
    if conn.outbound.is_not_empty() {
        if let Err(e) = acceptor::send_all(fd, &conn.outbound) {
            log::warn!("client {id}: write failed: {e}");
        }
    }
    conn.outbound.clear();
}

/// Reads as many INPT records as are currently available and fans each one out to every
/// connection, sequentially. Returns `false` on host EOF.
fn pump_host<H: HostChannel>(host: &mut H, connections: &mut HashMap<u64, Connection>) -> bool {
    loop {
        match host.try_read_record() {
            Ok(Some(record)) => {
                for conn in connections.values_mut() {
                    for event in input::apply(conn, record) {
                        conn.enqueue(event);
                    }
                }
            }
            Ok(None) => return true,
            Err(crate::error::HostError::Eof) => return false,
            Err(e) => {
                log::warn!("host channel read error: {e}");
                return true;
            }
        }
    }
}

fn teardown(
    poller: &Poller,
    connections: &mut HashMap<u64, Connection>,
    fd_to_id: &mut HashMap<RawFd, u64>,
    id: u64,
    fd: RawFd,
) {
    let _ = poller.deregister(fd);
    fd_to_id.remove(&fd);
    connections.remove(&id);
    log::debug!("client {id} torn down");
}
