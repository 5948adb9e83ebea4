use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use rhai::{AST, Engine, Scope};

use super::Settings;

/// The Rhai scripting engine for configuration
pub struct ConfigEngine {
    engine: Engine,
    settings: Arc<RwLock<Settings>>,
    ast: Option<AST>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let engine = Self::create_engine(Arc::clone(&settings));

        Self {
            engine,
            settings,
            ast: None,
        }
    }

    fn create_engine(settings: Arc<RwLock<Settings>>) -> Engine {
        let mut engine = Engine::new();

        // Limit script execution for safety
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_tab_width", move |width: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.tab_width = width.clamp(1, 16) as usize;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("get_tab_width", move || -> i64 {
                s.read().map(|s| s.tab_width as i64).unwrap_or(4)
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_show_line_numbers", move |enabled: bool| {
                if let Ok(mut settings) = s.write() {
                    settings.show_line_numbers = enabled;
                }
            });
        }

        // Config scripts may print; there is no screen yet, so drop it.
        engine.register_fn("print", |msg: &str| {
            let _ = msg;
        });

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &PathBuf) -> Result<(), String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        self.eval(&content)
    }

    /// Evaluate a Rhai script string
    pub fn eval(&mut self, script: &str) -> Result<(), String> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| format!("Config parse error: {}", e))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| format!("Config error: {}", e))?;

        self.ast = Some(ast);
        Ok(())
    }

    /// Get the current settings (cloned)
    pub fn settings(&self) -> Settings {
        self.settings.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Get the default config file path
    pub fn config_file() -> Option<PathBuf> {
        super::config_dir().map(|p| p.join("init.rhai"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<(), String> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}
