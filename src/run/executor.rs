//! The script executor collaborator.
//!
//! The runner hands the executor the editor text verbatim; the
//! executor writes its own output directly to the console stream and
//! reports faults without ever taking the host process down.

use rhai::{Engine, Scope};

/// Runs one script from source text.
pub trait ScriptExecutor {
    fn execute(&mut self, source: &str) -> Result<(), String>;
}

/// Production executor: an embedded Rhai engine whose `print` writes
/// straight to stdout (the console stream).
pub struct RhaiExecutor {
    engine: Engine,
}

impl RhaiExecutor {
    pub fn new() -> Self {
        let mut engine = Engine::new();

        // Safety limits. The operations cap turns a runaway loop into
        // an ordinary fault; there is no way to cancel a run mid-flight.
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000_000);

        engine.register_fn("print", |msg: &str| {
            println!("{}", msg);
        });

        Self { engine }
    }
}

impl Default for RhaiExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptExecutor for RhaiExecutor {
    fn execute(&mut self, source: &str) -> Result<(), String> {
        let ast = self
            .engine
            .compile(source)
            .map_err(|e| format!("Script parse error: {}", e))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| format!("Script error: {}", e))?;

        Ok(())
    }
}
