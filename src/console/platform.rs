//! Platform seam for the console window.
//!
//! The controller never talks to the OS directly; everything it needs
//! from the windowing surface goes through [`WindowHost`] so the state
//! machine can be exercised with a fake host in tests.

use std::io::stdout;

use crossterm::{cursor::MoveTo, execute};

use super::WindowGeometry;

/// How a window placement should affect visibility and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Position the window and make it visible.
    Show,
    /// Position the window and flag it invisible.
    Hide,
    /// Reposition only: no activation, no z-order change.
    NoActivate,
}

/// Capability surface over the OS console window.
///
/// All operations are best-effort; implementations report failure via
/// their return value and never panic.
pub trait WindowHost {
    /// Whether a console window handle currently exists.
    fn has_window(&self) -> bool;

    /// Bounding rectangle of the console window, if one exists.
    fn window_rect(&self) -> Option<WindowGeometry>;

    /// Move/resize the window and apply the given placement.
    fn place(&mut self, geometry: WindowGeometry, placement: Placement) -> bool;

    /// Allocate a fresh console window when none exists.
    fn alloc_console(&mut self) -> bool;

    /// Reset the text cursor to the origin of the console's writable area.
    fn reset_cursor(&mut self);
}

#[cfg(windows)]
pub use win32::Win32Host;

#[cfg(windows)]
mod win32 {
    use windows_sys::Win32::Foundation::RECT;
    use windows_sys::Win32::System::Console::{AllocConsole, GetConsoleWindow};
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        GetWindowRect, SWP_HIDEWINDOW, SWP_NOACTIVATE, SWP_NOZORDER, SWP_SHOWWINDOW, SetWindowPos,
    };

    use super::{Placement, WindowGeometry, WindowHost, reset_console_cursor};

    /// Real Win32 console window host.
    pub struct Win32Host;

    impl Win32Host {
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for Win32Host {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WindowHost for Win32Host {
        fn has_window(&self) -> bool {
            !unsafe { GetConsoleWindow() }.is_null()
        }

        fn window_rect(&self) -> Option<WindowGeometry> {
            let handle = unsafe { GetConsoleWindow() };
            if handle.is_null() {
                return None;
            }
            let mut rect = RECT {
                left: 0,
                top: 0,
                right: 0,
                bottom: 0,
            };
            if unsafe { GetWindowRect(handle, &mut rect) } == 0 {
                return None;
            }
            Some(WindowGeometry::from_rect(
                rect.left,
                rect.top,
                rect.right,
                rect.bottom,
            ))
        }

        fn place(&mut self, geometry: WindowGeometry, placement: Placement) -> bool {
            let handle = unsafe { GetConsoleWindow() };
            if handle.is_null() {
                return false;
            }
            let flags = match placement {
                Placement::Show => SWP_SHOWWINDOW,
                Placement::Hide => SWP_HIDEWINDOW,
                Placement::NoActivate => SWP_NOACTIVATE | SWP_NOZORDER,
            };
            unsafe {
                SetWindowPos(
                    handle,
                    std::ptr::null_mut(),
                    geometry.x,
                    geometry.y,
                    geometry.width,
                    geometry.height,
                    flags,
                ) != 0
            }
        }

        fn alloc_console(&mut self) -> bool {
            unsafe { AllocConsole() != 0 }
        }

        fn reset_cursor(&mut self) {
            reset_console_cursor();
        }
    }
}

/// Host for platforms where the process has no detachable console
/// window. Window operations report failure and the controller absorbs
/// them; the console stream itself still works.
pub struct HeadlessHost;

impl HeadlessHost {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowHost for HeadlessHost {
    fn has_window(&self) -> bool {
        false
    }

    fn window_rect(&self) -> Option<WindowGeometry> {
        None
    }

    fn place(&mut self, _geometry: WindowGeometry, _placement: Placement) -> bool {
        false
    }

    fn alloc_console(&mut self) -> bool {
        false
    }

    fn reset_cursor(&mut self) {
        reset_console_cursor();
    }
}

fn reset_console_cursor() {
    if let Err(e) = execute!(stdout(), MoveTo(0, 0)) {
        log::debug!("cursor reset failed: {}", e);
    }
}

#[cfg(windows)]
pub type NativeHost = Win32Host;

#[cfg(not(windows))]
pub type NativeHost = HeadlessHost;
