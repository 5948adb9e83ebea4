/// Editor settings that can be customized via the Rhai init script
#[derive(Debug, Clone)]
pub struct Settings {
    pub tab_width: usize,
    pub show_line_numbers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: 4,
            show_line_numbers: true,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }
}
