/*!
 * Clipboard support for filexport
 *
 * A `ClipboardWriter` holds an ordered list of strategies and tries them in
 * turn: the platform clipboard API through arboard, and helper commands fed
 * through a short-lived child process.
 *
 * X11 and Wayland selections are served by the process that owns them, so on
 * Linux the helpers (which keep serving after we exit) go first and arboard is
 * the last resort.
 */

use std::env;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened or written
    #[error("System clipboard unavailable: {0}")]
    Unavailable(String),

    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// One way of putting text on the clipboard
pub trait ClipboardStrategy {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Copy text to the clipboard
    fn copy_text(&self, text: &str) -> Result<()>;
}

/// Tries each strategy in order until one succeeds
pub struct ClipboardWriter {
    strategies: Vec<Box<dyn ClipboardStrategy>>,
}

impl ClipboardWriter {
    /// Writer with an explicit strategy order
    pub fn new(strategies: Vec<Box<dyn ClipboardStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategies suited to the current platform
    pub fn system() -> Self {
        Self::for_platform(get_platform())
    }

    fn for_platform(platform: &str) -> Self {
        let api: Box<dyn ClipboardStrategy> = Box::new(SystemClipboard);
        let commands: Box<dyn ClipboardStrategy> = Box::new(CommandClipboard::detect());

        match platform {
            "linux" | "wsl" | "android" => Self::new(vec![commands, api]),
            _ => Self::new(vec![api, commands]),
        }
    }

    /// Names of the strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Copy `text`, reporting only whether any strategy succeeded
    ///
    /// Errors and panics inside a strategy are logged and the next one is
    /// tried; nothing escapes to the caller. While a strategy runs, panic
    /// messages go to the debug log instead of stderr.
    pub fn write(&self, text: &str) -> bool {
        for strategy in &self.strategies {
            let previous_hook = panic::take_hook();
            panic::set_hook(Box::new(|info| log::debug!("Clipboard backend {}", info)));
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| strategy.copy_text(text)));
            panic::set_hook(previous_hook);

            match outcome {
                Ok(Ok(())) => {
                    log::info!("Copied {} bytes using {}", text.len(), strategy.name());
                    return true;
                }
                Ok(Err(e)) => log::debug!("Clipboard strategy {} failed: {}", strategy.name(), e),
                Err(_) => log::debug!("Clipboard strategy {} panicked", strategy.name()),
            }
        }

        log::debug!("All clipboard strategies failed");
        false
    }
}

/// Platform clipboard API via arboard
pub struct SystemClipboard;

impl SystemClipboard {
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn set(
        clipboard: &mut arboard::Clipboard,
        text: &str,
    ) -> std::result::Result<(), arboard::Error> {
        use arboard::SetExtLinux;
        use std::time::{Duration, Instant};

        // The selection dies with the Clipboard; give a clipboard manager time to take it
        clipboard
            .set()
            .wait_until(Instant::now() + Duration::from_millis(500))
            .text(text)
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn set(
        clipboard: &mut arboard::Clipboard,
        text: &str,
    ) -> std::result::Result<(), arboard::Error> {
        clipboard.set_text(text)
    }
}

impl ClipboardStrategy for SystemClipboard {
    fn name(&self) -> &str {
        "system clipboard"
    }

    fn copy_text(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        Self::set(&mut clipboard, text).map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

/// Available clipboard helper commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    /// tmux clipboard
    Tmux,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// Wayland clipboard
    Wayland,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard (via WSL)
    Wsl,
    /// Termux clipboard
    Termux,
}

impl ClipboardProvider {
    /// Program that reads the clipboard text from stdin
    fn program(&self) -> &'static str {
        match self {
            Self::Tmux => "tmux",
            Self::Xclip => "xclip",
            Self::Xsel => "xsel",
            Self::Wayland => "wl-copy",
            Self::MacOS => "pbcopy",
            Self::Wsl => "clip.exe",
            Self::Termux => "termux-clipboard-set",
        }
    }

    fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Tmux => &["load-buffer", "-w", "-"],
            Self::Xclip => &["-selection", "clipboard", "-in"],
            Self::Xsel => &["-b", "-i"],
            Self::Wayland | Self::MacOS | Self::Wsl | Self::Termux => &[],
        }
    }
}

/// Fallback strategy that pipes the text into helper commands
pub struct CommandClipboard {
    providers: Vec<ClipboardProvider>,
}

impl CommandClipboard {
    /// Use the given providers, in order
    pub fn new(providers: Vec<ClipboardProvider>) -> Self {
        Self { providers }
    }

    /// Providers available on this system
    pub fn detect() -> Self {
        Self::new(determine_clipboard_providers())
    }
}

impl ClipboardStrategy for CommandClipboard {
    fn name(&self) -> &str {
        "clipboard command"
    }

    fn copy_text(&self, text: &str) -> Result<()> {
        let mut last_error = ClipboardError::NoClipboardFound;

        for provider in &self.providers {
            let cmd = provider.program();
            match execute_clipboard_command(cmd, provider.args(), text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    log::debug!("{} failed: {}", cmd, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

//--------------------------------------------------------------------
// Public helpers
//--------------------------------------------------------------------

/// Check if a command exists on the system
///
/// # Arguments
/// * `command` - The command to check
///
/// # Returns
/// * `true` - If the command exists and can be executed
/// * `false` - Otherwise
pub fn command_exists(command: &str) -> bool {
    if let Some(paths) = env::var_os("PATH") {
        if env::split_paths(&paths).any(|dir| Path::new(&dir).join(command).exists()) {
            return true;
        }
    }

    // Try to run the command with '--version' flag as fallback
    Command::new(command)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

//--------------------------------------------------------------------
// Internal Implementation
//--------------------------------------------------------------------

/// Execute a command to copy text to clipboard
///
/// The child is always reaped: waited for on success, killed and waited for
/// when feeding it fails.
fn execute_clipboard_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    if let Err(e) = feed_stdin(&mut child, text) {
        let _ = child.kill();
        let _ = child.wait();
        return Err(ClipboardError::CommandFailed(format!(
            "Failed to write to {}: {}",
            cmd, e
        )));
    }

    let status = child
        .wait()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to wait for {}: {}", cmd, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

/// Write the text and close stdin so the helper sees EOF
fn feed_stdin(child: &mut Child, text: &str) -> io::Result<()> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "stdin not captured"))?;
    stdin.write_all(text.as_bytes())?;
    stdin.flush()
}

/// Platform detection cache (using thread-safe lazy initialization)
static PLATFORM: OnceLock<&'static str> = OnceLock::new();

/// Determine the platform (cached)
fn get_platform() -> &'static str {
    PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "linux") {
            if env::var("WSL_DISTRO_NAME").is_ok() {
                "wsl"
            } else {
                "linux"
            }
        } else if cfg!(target_os = "android") {
            "android"
        } else {
            "unknown"
        }
    })
}

/// Determine which clipboard providers to try based on platform and preference
fn determine_clipboard_providers() -> Vec<ClipboardProvider> {
    let mut providers = Vec::with_capacity(3);

    match get_platform() {
        "macos" => {
            if command_exists("pbcopy") {
                providers.push(ClipboardProvider::MacOS);
            }
        }
        "windows" | "wsl" => {
            if command_exists("clip.exe") {
                providers.push(ClipboardProvider::Wsl);
            }
        }
        "linux" => {
            // Try Wayland first
            if command_exists("wl-copy") {
                providers.push(ClipboardProvider::Wayland);
            }

            // Then X11 mechanisms
            if command_exists("xsel") {
                providers.push(ClipboardProvider::Xsel);
            }

            if command_exists("xclip") {
                providers.push(ClipboardProvider::Xclip);
            }
        }
        "android" => {
            if command_exists("termux-clipboard-set") {
                providers.push(ClipboardProvider::Termux);
            }
        }
        _ => {}
    }

    // tmux buffers are the last resort inside a session
    if env::var("TMUX").is_ok() && command_exists("tmux") {
        providers.push(ClipboardProvider::Tmux);
    }

    providers
}
