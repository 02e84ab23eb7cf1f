/* 📖 # Why does the CLI take no arguments?

The pantry always works on the current directory: the three data files and the
optional `pantry.toml` are looked up there under fixed names. Everything the
user does happens in the interactive menu, so there is nothing to parse.

Exit codes:
- 0: the user chose "Beenden" or input ended
- 1: startup failed (no working directory, malformed pantry.toml) or the console broke
*/

use std::env;
use std::process;

use pantry_base::tracing::init_tracing;
use pantry_base::{FilePath, PalHandle, RealPal};
use pantry_engine::console::Console;
use pantry_engine::{CONFIG_FILE, InMemoryStore, Session, load_config};
use tracing::{error, info};

fn main() {
    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });

    let pal = PalHandle::new(RealPal::new(current_dir.clone()));

    let config = match load_config(&pal, &FilePath::from(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config from {}: {}", CONFIG_FILE, e);
            process::exit(1);
        }
    };

    if let Err(e) = init_tracing(config.logging.filter.as_deref()) {
        eprintln!("Warning: Logging disabled: {}", e);
    }
    info!(dir = %current_dir.display(), "pantry started");

    let mut session = Session::new(InMemoryStore::new(), pal, Console::stdio());
    if let Err(e) = session.run() {
        error!(error = %e, "menu loop aborted");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
