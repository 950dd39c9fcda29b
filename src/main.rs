//! fraudstore main entrypoint.

use fraudstore::run;

fn main() {
    if let Err(e) = run() {
        fraudstore::ui::messages::error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
