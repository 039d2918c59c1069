//! Console front end for the chewing engine.
//!
//! - `layout`: Da-Chen keyboard layout and syllable table (phf maps)
//! - `backend`: `BopomofoBackend`, a `PhoneticBackend` over that table
//! - `console`: `ConsoleHost`, a `Host` that renders to a transcript
//! - `script`: key script parsing and replay
//! - `config`: `FrontendConfig`, engine settings plus front-end options

pub mod backend;
pub mod config;
pub mod console;
pub mod layout;
pub mod script;

pub use backend::BopomofoBackend;
pub use config::FrontendConfig;
pub use console::ConsoleHost;
pub use script::{parse_script, run_script, ScriptError, Step};

use chewing_core::{ChewingEngine, PhoneticBackend};

pub type ConsoleEngine = ChewingEngine<BopomofoBackend, ConsoleHost>;

/// Engine wired to the built-in backend and a console host.
pub fn console_engine(config: &FrontendConfig) -> ConsoleEngine {
    let mut backend = BopomofoBackend::new();
    backend.set_chinese_mode(!config.start_in_english);
    let host = ConsoleHost::new().with_caps_lock_led(config.caps_lock_led);
    let mut engine = ChewingEngine::new(backend, host, config.base.clone());
    if config.focus_on_start {
        engine.focus_in();
    }
    engine
}
