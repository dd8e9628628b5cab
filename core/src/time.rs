//! Wall-clock timestamps used in event payloads (`wl_callback.done`, pointer/keyboard `time`).

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, truncated to 32 bits.
///
/// Every place that needs `now_ms & 0xFFFFFFFF` (the `wl_callback.done` serial,
/// `wl_pointer`/`wl_keyboard` event `time` fields) goes through this function.
pub(crate) fn now_ms() -> u32 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (elapsed.as_millis() & 0xffff_ffff) as u32
}
