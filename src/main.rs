//! A region and perspective editor for video analytics, built with Rust and
//! the Bevy game engine.

use zona::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    match core::runner::run_app(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}
