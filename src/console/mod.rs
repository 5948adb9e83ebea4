mod geometry;
mod platform;
mod window;

pub use geometry::WindowGeometry;
pub use platform::{HeadlessHost, NativeHost, Placement, WindowHost};
pub use window::{ConsoleWindow, Visibility};

#[cfg(windows)]
pub use platform::Win32Host;
