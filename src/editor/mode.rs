#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Insert,
    Command,
}

impl Mode {
    pub fn display(&self) -> &'static str {
        match self {
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}
