//! Console window lifecycle controller.
//!
//! Owns the native console window's geometry and visibility,
//! independent of the main editor screen. The window is never
//! destroyed; hiding parks it so the same console can be reused for
//! later runs.

use super::{Placement, WindowGeometry, WindowHost};

/// Visibility state of the console window.
///
/// Owned exclusively by [`ConsoleWindow`]; only its transition
/// operations mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Uninitialized,
    Hidden,
    Visible,
}

/// The single console window controller.
///
/// Constructed once at application startup. Every OS window operation
/// is best-effort: the console is a convenience surface, so failures
/// are logged at low severity and absorbed rather than escalated.
pub struct ConsoleWindow<H: WindowHost> {
    host: H,
    geometry: WindowGeometry,
    state: Visibility,
}

impl<H: WindowHost> ConsoleWindow<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            geometry: WindowGeometry::default(),
            state: Visibility::Uninitialized,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.state
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    /// Neutralize a pre-allocated console window at process start.
    ///
    /// Captures the window's current geometry (the only time geometry
    /// is ever recorded), then collapses it to a 1x1 off-screen
    /// rectangle and flags it invisible. A host that never allocated a
    /// console makes this a no-op. Subsequent calls are ignored.
    pub fn startup_hide(&mut self) {
        if self.state != Visibility::Uninitialized {
            log::debug!("startup_hide called after initialization, ignoring");
            return;
        }
        if !self.host.has_window() {
            log::debug!("no console window present at startup");
            return;
        }
        if let Some(rect) = self.host.window_rect() {
            self.geometry = rect;
        } else {
            log::debug!("could not read console window rect, keeping default geometry");
        }
        if !self.host.place(WindowGeometry::collapsed(), Placement::Hide) {
            log::debug!("startup hide placement failed");
        }
        self.state = Visibility::Hidden;
    }

    /// Restore the window to its recorded geometry and make it the
    /// active focus target, with the text cursor reset to the origin so
    /// output starts from a clean top-left. Idempotent.
    ///
    /// If no window exists at all, allocates a fresh console instead.
    pub fn show(&mut self) {
        if self.host.has_window() {
            if !self.host.place(self.geometry, Placement::Show) {
                log::debug!("show placement failed");
            }
            self.host.reset_cursor();
            self.state = Visibility::Visible;
        } else if self.host.alloc_console() {
            self.host.reset_cursor();
            self.state = Visibility::Visible;
        } else {
            log::warn!("no console window and allocation failed");
        }
    }

    /// Park the window at the recorded geometry and flag it invisible,
    /// without destroying it or its buffer contents. Idempotent.
    pub fn hide(&mut self) {
        if !self.host.has_window() {
            log::debug!("no console window to hide");
            return;
        }
        if !self.host.place(self.geometry, Placement::Hide) {
            log::debug!("hide placement failed");
        }
        self.state = Visibility::Hidden;
    }

    /// Re-establish the window at its recorded geometry without
    /// stealing focus or front-most ordering from the editor.
    ///
    /// A geometry/z-order nudge only; the visibility state is left
    /// untouched.
    pub fn background_restore(&mut self) {
        if !self.host.has_window() {
            return;
        }
        if !self.host.place(self.geometry, Placement::NoActivate) {
            log::debug!("background restore placement failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every placement so tests can assert on call order and
    /// arguments without a real OS window.
    struct FakeHost {
        window: bool,
        rect: Option<WindowGeometry>,
        alloc_succeeds: bool,
        placements: Rc<RefCell<Vec<(WindowGeometry, Placement)>>>,
        allocs: Rc<RefCell<usize>>,
    }

    impl FakeHost {
        fn with_window(rect: WindowGeometry) -> Self {
            Self {
                window: true,
                rect: Some(rect),
                alloc_succeeds: false,
                placements: Rc::new(RefCell::new(Vec::new())),
                allocs: Rc::new(RefCell::new(0)),
            }
        }

        fn without_window() -> Self {
            Self {
                window: false,
                rect: None,
                alloc_succeeds: true,
                placements: Rc::new(RefCell::new(Vec::new())),
                allocs: Rc::new(RefCell::new(0)),
            }
        }
    }

    impl WindowHost for FakeHost {
        fn has_window(&self) -> bool {
            self.window
        }

        fn window_rect(&self) -> Option<WindowGeometry> {
            self.rect
        }

        fn place(&mut self, geometry: WindowGeometry, placement: Placement) -> bool {
            self.placements.borrow_mut().push((geometry, placement));
            true
        }

        fn alloc_console(&mut self) -> bool {
            *self.allocs.borrow_mut() += 1;
            if self.alloc_succeeds {
                self.window = true;
            }
            self.alloc_succeeds
        }

        fn reset_cursor(&mut self) {}
    }

    fn captured() -> WindowGeometry {
        WindowGeometry::new(120, 80, 640, 400)
    }

    #[test]
    fn startup_hide_captures_geometry_and_collapses() {
        let host = FakeHost::with_window(captured());
        let placements = Rc::clone(&host.placements);
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();

        assert_eq!(console.visibility(), Visibility::Hidden);
        assert_eq!(console.geometry(), captured());
        assert_eq!(
            placements.borrow().as_slice(),
            &[(WindowGeometry::collapsed(), Placement::Hide)]
        );
    }

    #[test]
    fn startup_hide_without_window_is_noop() {
        let host = FakeHost::without_window();
        let placements = Rc::clone(&host.placements);
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();

        assert_eq!(console.visibility(), Visibility::Uninitialized);
        assert!(placements.borrow().is_empty());
    }

    #[test]
    fn geometry_is_captured_exactly_once() {
        let mut host = FakeHost::with_window(captured());
        host.rect = Some(captured());
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();
        // A second startup_hide must not re-capture.
        console.startup_hide();
        console.show();
        console.hide();
        console.background_restore();
        console.show();

        assert_eq!(console.geometry(), captured());
    }

    #[test]
    fn show_restores_captured_geometry() {
        let host = FakeHost::with_window(captured());
        let placements = Rc::clone(&host.placements);
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();
        console.show();

        assert_eq!(console.visibility(), Visibility::Visible);
        assert_eq!(
            placements.borrow().last(),
            Some(&(captured(), Placement::Show))
        );
    }

    #[test]
    fn show_is_idempotent() {
        let host = FakeHost::with_window(captured());
        let placements = Rc::clone(&host.placements);
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();
        console.show();
        console.show();

        assert_eq!(console.visibility(), Visibility::Visible);
        // Same placement re-applied harmlessly.
        let calls = placements.borrow();
        assert_eq!(calls[1], calls[2]);
    }

    #[test]
    fn hide_is_idempotent() {
        let host = FakeHost::with_window(captured());
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();
        console.show();
        console.hide();
        let after_first = (console.visibility(), console.geometry());
        console.hide();

        assert_eq!((console.visibility(), console.geometry()), after_first);
        assert_eq!(console.visibility(), Visibility::Hidden);
    }

    #[test]
    fn hide_parks_at_recorded_geometry() {
        let host = FakeHost::with_window(captured());
        let placements = Rc::clone(&host.placements);
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();
        console.show();
        console.hide();

        assert_eq!(
            placements.borrow().last(),
            Some(&(captured(), Placement::Hide))
        );
    }

    #[test]
    fn background_restore_never_changes_visibility() {
        let host = FakeHost::with_window(captured());
        let placements = Rc::clone(&host.placements);
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();
        console.background_restore();
        assert_eq!(console.visibility(), Visibility::Hidden);

        console.show();
        console.background_restore();
        assert_eq!(console.visibility(), Visibility::Visible);

        assert_eq!(
            placements.borrow().last(),
            Some(&(captured(), Placement::NoActivate))
        );
    }

    #[test]
    fn show_without_window_allocates_console() {
        let host = FakeHost::without_window();
        let allocs = Rc::clone(&host.allocs);
        let mut console = ConsoleWindow::new(host);

        console.startup_hide();
        console.show();

        assert_eq!(*allocs.borrow(), 1);
        assert_eq!(console.visibility(), Visibility::Visible);
    }

    #[test]
    fn failed_alloc_is_absorbed() {
        let mut host = FakeHost::without_window();
        host.alloc_succeeds = false;
        let mut console = ConsoleWindow::new(host);

        console.show();
        console.hide();
        console.background_restore();

        // Nothing to assert beyond "did not panic"; state stays put.
        assert_eq!(console.visibility(), Visibility::Uninitialized);
    }
}
