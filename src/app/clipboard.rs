use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use zeroize::Zeroize;

/// Bumped on every copy; a pending clear only fires if it is still current.
pub static CLIPBOARD_COPY_ID: AtomicU64 = AtomicU64::new(0);

/// Put `text` on the clipboard and wipe it after `timeout`.
///
/// Runs on a background thread; failures are logged and otherwise ignored.
pub fn copy_with_timeout(text: &str, timeout: Duration) {
    let copy_id = CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst) + 1;
    let mut text = text.to_string();

    std::thread::spawn(move || {
        if !set_clipboard(&text) {
            tracing::warn!("clipboard unavailable");
            text.zeroize();
            return;
        }

        std::thread::sleep(timeout);
        text.zeroize();

        if CLIPBOARD_COPY_ID.load(Ordering::SeqCst) == copy_id {
            clear_clipboard();
            tracing::debug!(copy_id, "clipboard cleared");
        }
    });
}

/// Wipe the clipboard now and cancel any pending timed clear.
pub fn clear_now() {
    CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst);
    std::thread::spawn(clear_clipboard);
}

#[cfg(target_os = "linux")]
fn is_wayland() -> bool {
    std::env::var("WAYLAND_DISPLAY").is_ok()
}

#[cfg(target_os = "linux")]
fn set_clipboard(text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let mut command = if is_wayland() {
        Command::new("wl-copy")
    } else {
        let mut c = Command::new("xclip");
        c.args(["-selection", "clipboard"]);
        c
    };

    command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .ok()
        .and_then(|mut c| c.stdin.take()?.write_all(text.as_bytes()).ok())
        .is_some()
}

#[cfg(target_os = "linux")]
fn clear_clipboard() {
    use std::process::{Command, Stdio};

    if is_wayland() {
        let _ = Command::new("wl-copy").arg("--clear").output();
    } else {
        let _ = Command::new("xclip")
            .args(["-selection", "clipboard"])
            .stdin(Stdio::piped())
            .output();
    }
}

// arboard drops the selection with the handle on some platforms, so the
// handle lives in a thread-local for the lifetime of the clearing thread.
#[cfg(not(target_os = "linux"))]
thread_local! {
    static CLIPBOARD: std::cell::RefCell<Option<arboard::Clipboard>> =
        std::cell::RefCell::new(arboard::Clipboard::new().ok());
}

#[cfg(not(target_os = "linux"))]
fn set_clipboard(text: &str) -> bool {
    CLIPBOARD.with(|cb| {
        cb.borrow_mut()
            .as_mut()
            .is_some_and(|clipboard| clipboard.set_text(text).is_ok())
    })
}

#[cfg(not(target_os = "linux"))]
fn clear_clipboard() {
    CLIPBOARD.with(|cb| {
        if let Some(clipboard) = cb.borrow_mut().as_mut() {
            let _ = clipboard.clear();
        }
    });
}
