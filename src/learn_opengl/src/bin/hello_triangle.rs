use backend::buffers::{TriangleMesh, VertexAttrib};
use backend::glutils::check_gl_err;
use backend::logging::{init_logging, LoggingConfig};
use backend::shaders::Shaders;
use backend::system::System;
use learn_opengl::*;

fn main() {
    init_logging(LoggingConfig::default());
    let config = window_config_from_env("hello triangle");

    let mut system = match System::new(&config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("initialization failure: {e}");
            std::process::exit(1);
        }
    };

    // GL objects are declared after `system` so they are deleted before the
    // context goes away.
    let shaders = match Shaders::from_str(VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC) {
        Ok(s) => Some(s),
        Err(e) => {
            for cause in e.causes() {
                log::error!("{cause}");
            }
            log::warn!("rendering without the triangle");
            None
        }
    };
    let mesh = TriangleMesh::new(&TRIANGLE, &[VertexAttrib::vec3_packed(POSITION_LOCATION)]);
    if let Err(e) = check_gl_err() {
        log::warn!("after mesh setup: {e}");
    }

    let (r, g, b) = CLEAR_COLOR;
    while system.process_io_events() {
        system.clear_screen(r, g, b);
        if let Some(program) = &shaders {
            program.use_program();
            mesh.draw();
        }
        system.draw_to_screen();
    }

    log::info!("releasing GL resources");
}
