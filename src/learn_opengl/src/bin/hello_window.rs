use backend::logging::{init_logging, LoggingConfig};
use backend::system::System;
use learn_opengl::{window_config_from_env, CLEAR_COLOR};

fn main() {
    init_logging(LoggingConfig::default());
    let config = window_config_from_env("LearnOpenGL");

    let mut system = match System::new(&config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("initialization failure: {e}");
            std::process::exit(1);
        }
    };

    let (r, g, b) = CLEAR_COLOR;
    while system.process_io_events() {
        system.clear_screen(r, g, b);
        system.draw_to_screen();
    }
}
