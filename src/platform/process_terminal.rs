//! Process terminal: stdin/stdout of the current process in raw mode.
//!
//! This is the "dumb" adapter. It cannot read the screen back, so surfaces
//! drawn on it use the plain backend unless it is wrapped in a
//! [`ShadowTerminal`](crate::platform::shadow_terminal::ShadowTerminal).

use std::io;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};

use crate::core::key::{parse_key, Key, KeySequenceSplitter};
use crate::core::terminal::{RestoreHandle, Terminal, TerminalSize};

#[cfg(unix)]
use libc::{self, c_int};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// How long a lone escape byte waits for the rest of a sequence.
const ESCAPE_TIMEOUT_MS: i32 = 25;

const FALLBACK_SIZE: TerminalSize = TerminalSize {
    columns: 80,
    rows: 24,
};

const SHOW_CURSOR: &str = "\x1b[?25h";
const RESET_ATTRIBUTES: &str = "\x1b[0m";
const HIDE_CURSOR: &str = "\x1b[?25l";

#[cfg(unix)]
fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            // Infinite timeout should not return 0, but avoid a tight loop if it does.
            continue;
        }
        if (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }

        return Err(io::Error::other(format!(
            "poll(POLLOUT) returned revents=0x{:x}",
            fds.revents
        )));
    }
}

#[cfg(unix)]
fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> io::Result<usize>,
    FWait: FnMut(c_int) -> io::Result<()>,
{
    let mut written = 0;
    while written < bytes.len() {
        match write_once(fd, &bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "write returned 0"));
            }
            Ok(count) => {
                let remaining = bytes.len() - written;
                if count > remaining {
                    return Err(io::Error::other("write returned more bytes than requested"));
                }
                written += count;
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                continue;
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                wait_writable(fd)?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

#[cfg(unix)]
fn write_fd(fd: c_int, data: &str) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    write_all_fd_with(
        fd,
        data.as_bytes(),
        |fd, buf| {
            let result = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
            if result < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        },
        wait_writable,
    )
}

#[cfg(unix)]
fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

#[cfg(unix)]
fn poll_readable(fd: c_int, timeout_ms: i32) -> bool {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    result > 0 && (fds.revents & libc::POLLIN) != 0
}

#[cfg(unix)]
fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Moves the longest valid UTF-8 prefix of `pending` into a string. Invalid
/// bytes become U+FFFD; a truncated trailing character stays in `pending`.
fn drain_utf8(pending: &mut Vec<u8>) -> String {
    let mut out = String::new();
    loop {
        match std::str::from_utf8(pending) {
            Ok(text) => {
                out.push_str(text);
                pending.clear();
                return out;
            }
            Err(err) => {
                let valid = err.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&pending[..valid]));
                match err.error_len() {
                    Some(len) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        pending.drain(..valid + len);
                    }
                    None => {
                        pending.drain(..valid);
                        return out;
                    }
                }
            }
        }
    }
}

#[cfg(unix)]
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    splitter: KeySequenceSplitter,
    undecoded: Vec<u8>,
}

#[cfg(unix)]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: None,
            splitter: KeySequenceSplitter::new(),
            undecoded: Vec::new(),
        }
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        let original = match self.original_termios {
            Some(original) => original,
            None => {
                let original = get_termios(self.stdin_fd)?;
                self.original_termios = Some(original);
                original
            }
        };
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(self.stdin_fd, &raw)
    }

    fn restore_raw_mode(&mut self) -> io::Result<()> {
        if let Some(original) = self.original_termios.take() {
            set_termios(self.stdin_fd, &original)?;
        }
        Ok(())
    }

    fn read_chunk(&mut self) -> io::Result<()> {
        let mut buf = [0u8; 1024];
        loop {
            let read_len =
                unsafe { libc::read(self.stdin_fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
            if read_len < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err);
            }
            if read_len == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
            }
            self.undecoded.extend_from_slice(&buf[..read_len as usize]);
            let text = drain_utf8(&mut self.undecoded);
            self.splitter.push(&text);
            return Ok(());
        }
    }

    fn next_buffered_key(&mut self) -> Option<Key> {
        while let Some(sequence) = self.splitter.next_sequence() {
            match parse_key(&sequence) {
                Some(key) => return Some(key),
                None => tracing::trace!(?sequence, "ignoring undecodable input"),
            }
        }
        None
    }
}

#[cfg(unix)]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl Terminal for ProcessTerminal {
    fn start(&mut self) -> io::Result<()> {
        self.enable_raw_mode()
    }

    fn stop(&mut self) -> io::Result<()> {
        let shown = write_fd(self.stdout_fd, SHOW_CURSOR);
        self.restore_raw_mode()?;
        shown
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Some(key) = self.next_buffered_key() {
                return Ok(key);
            }
            // An escape prefix with nothing following is a lone escape press.
            if self.splitter.has_pending() && !poll_readable(self.stdin_fd, ESCAPE_TIMEOUT_MS) {
                if let Some(key) = self.splitter.flush().as_deref().and_then(parse_key) {
                    return Ok(key);
                }
                continue;
            }
            self.read_chunk()?;
        }
    }

    fn size(&self) -> TerminalSize {
        read_winsize(self.stdout_fd)
            .map(|(columns, rows)| TerminalSize::new(columns, rows))
            .unwrap_or(FALLBACK_SIZE)
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        let sequence = format!("\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1);
        write_fd(self.stdout_fd, &sequence)
    }

    fn write_raw(&mut self, data: &str) -> io::Result<()> {
        write_fd(self.stdout_fd, data)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        write_fd(self.stdout_fd, if visible { SHOW_CURSOR } else { HIDE_CURSOR })
    }

    /// Puts the tty back the way `start` found it. `None` before `start`.
    fn restore_handle(&self) -> Option<RestoreHandle> {
        let original = self.original_termios?;
        let (stdin_fd, stdout_fd) = (self.stdin_fd, self.stdout_fd);
        Some(Box::new(move || {
            let _ = set_termios(stdin_fd, &original);
            let _ = write_fd(stdout_fd, RESET_ATTRIBUTES);
            let _ = write_fd(stdout_fd, SHOW_CURSOR);
        }))
    }
}

/// Signal handler guard for cleanup hooks.
#[cfg(unix)]
pub struct SignalHookGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

#[cfg(unix)]
impl Drop for SignalHookGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(unix)]
fn run_cleanup_once<F>(cleanup: &Arc<F>, ran: &AtomicBool)
where
    F: Fn() + Send + Sync + 'static + ?Sized,
{
    if !ran.swap(true, Ordering::SeqCst) {
        cleanup();
    }
}

/// Runs `cleanup` once when SIGINT, SIGTERM or SIGHUP arrives, then exits the
/// process.
#[cfg(unix)]
pub fn install_signal_handlers<F>(cleanup: F) -> io::Result<SignalHookGuard>
where
    F: Fn() + Send + Sync + 'static,
{
    let cleanup = Arc::new(cleanup);
    let ran = Arc::new(AtomicBool::new(false));
    let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM, libc::SIGHUP])?;
    let handle = signals.handle();

    let thread = thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            tracing::debug!(signal, "terminating on signal");
            run_cleanup_once(&cleanup, &ran);
            std::process::exit(128 + signal);
        }
    });

    Ok(SignalHookGuard {
        handle,
        thread: Some(thread),
    })
}
