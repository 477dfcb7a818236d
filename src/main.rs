//! rDowntime main entrypoint.

use rdowntime::run;
use rdowntime::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
