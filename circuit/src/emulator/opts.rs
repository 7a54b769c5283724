use std::env;
use tracing::debug;

/// Options for the emulation gadget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulationOpts {
    /// Upper bound on tracked overflow bits before operands are reduced.
    /// `None` uses the largest bound the native field allows.
    pub max_overflow: Option<usize>,
    /// Whether print operations emit anything.
    pub debug_print: bool,
}

impl Default for EmulationOpts {
    fn default() -> Self {
        let max_overflow = env::var("EMULATION_MAX_OVERFLOW")
            .ok()
            .and_then(|s| s.parse::<usize>().ok());
        let debug_print = env::var("EMULATION_DEBUG_PRINT")
            .map_or_else(|_| true, |s| s.parse::<bool>().unwrap_or(true));
        debug!(
            "emulation opts: max_overflow = {:?}, debug_print = {}",
            max_overflow, debug_print
        );

        Self {
            max_overflow,
            debug_print,
        }
    }
}

impl EmulationOpts {
    pub fn with_max_overflow(mut self, max_overflow: usize) -> Self {
        self.max_overflow = Some(max_overflow);
        self
    }

    pub fn with_debug_print(mut self, debug_print: bool) -> Self {
        self.debug_print = debug_print;
        self
    }
}
