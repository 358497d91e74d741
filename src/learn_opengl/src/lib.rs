use backend::math::Vec3;
use backend::system::WindowConfig;

pub const USAGE: &str = "Usage: hello_window|hello_triangle [OPTIONS]

Options:
  --width N       Window width in pixels (default 800).
  --height N      Window height in pixels (default 600).
  --title TEXT    Window title.
  --no-vsync      Disable vsync; frames are throttled to ~60 per second.
  -h, --help      Show this help message and exit.

Press Escape or close the window to quit. Set RUST_LOG=debug for GL details.";

pub const CLEAR_COLOR: (f32, f32, f32) = (0.2, 0.3, 0.3);

/// Attribute location of `aPos` in the vertex shader.
pub const POSITION_LOCATION: u32 = 0;

// Positions are already in normalized device coordinates.
pub const TRIANGLE: [Vec3; 3] = [
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(0.0, 0.5, 0.0),
];

pub const VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

pub const FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
"#;

#[derive(Debug, PartialEq)]
pub enum Settings {
    Run(WindowConfig),
    Help,
}

impl Settings {
    /// Parses program arguments (without the program name).
    pub fn from_args<I>(args: I, title: &str) -> Result<Settings, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = WindowConfig {
            title: title.to_string(),
            ..WindowConfig::default()
        };
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Settings::Help),
                "--no-vsync" => config.vsync = false,
                "--width" => config.width = parse_dim("--width", args.next())?,
                "--height" => config.height = parse_dim("--height", args.next())?,
                "--title" => {
                    config.title = args
                        .next()
                        .ok_or_else(|| "missing value for --title".to_string())?
                }
                s => return Err(format!("unknown argument '{s}'")),
            }
        }
        Ok(Settings::Run(config))
    }
}

fn parse_dim(flag: &str, value: Option<String>) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    match value.parse::<u32>() {
        Ok(0) => Err(format!("{flag} must be greater than zero")),
        Ok(v) => Ok(v),
        Err(e) => Err(format!("invalid value '{value}' for {flag}: {e}")),
    }
}

/// Parses `std::env::args`, printing usage and exiting on `--help` or bad
/// input.
pub fn window_config_from_env(title: &str) -> WindowConfig {
    match Settings::from_args(std::env::args().skip(1), title) {
        Ok(Settings::Run(config)) => config,
        Ok(Settings::Help) => {
            println!("{USAGE}");
            std::process::exit(0);
        }
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_gives_defaults() {
        let s = Settings::from_args(args(&[]), "hello triangle").unwrap();
        let Settings::Run(config) = s else {
            panic!("expected run settings");
        };
        assert_eq!(config.title, "hello triangle");
        assert_eq!((config.width, config.height), (800, 600));
        assert!(config.vsync);
    }

    #[test]
    fn all_options() {
        let s = Settings::from_args(
            args(&["--width", "1024", "--height", "768", "--title", "tri", "--no-vsync"]),
            "x",
        )
        .unwrap();
        let Settings::Run(config) = s else {
            panic!("expected run settings");
        };
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.title, "tri");
        assert!(!config.vsync);
        assert_eq!(config.gl_version, (3, 3));
    }

    #[test]
    fn help_wins() {
        let s = Settings::from_args(args(&["--width", "10", "--help"]), "x").unwrap();
        assert_eq!(s, Settings::Help);
    }

    #[test]
    fn bad_arguments() {
        assert!(Settings::from_args(args(&["--width"]), "x").is_err());
        assert!(Settings::from_args(args(&["--width", "abc"]), "x").is_err());
        assert!(Settings::from_args(args(&["--height", "0"]), "x").is_err());
        let err = Settings::from_args(args(&["--fullscreen"]), "x").unwrap_err();
        assert_eq!(err, "unknown argument '--fullscreen'");
    }

    fn is_ndc(v: &Vec3) -> bool {
        v.as_array().iter().all(|c| (-1.0..=1.0).contains(c))
    }

    #[test]
    fn triangle_is_in_ndc() {
        assert!(TRIANGLE.iter().all(is_ndc));
        assert!(!is_ndc(&Vec3::new(0.0, 1.5, 0.0)));
        assert_eq!(TRIANGLE[2], Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(std::mem::size_of_val(&TRIANGLE), 9 * std::mem::size_of::<f32>());
    }

    #[test]
    fn vertex_shader_reads_position_location() {
        assert!(VERTEX_SHADER_SRC.starts_with("#version 330 core"));
        let decl = format!("layout (location = {POSITION_LOCATION}) in vec3 aPos;");
        assert!(VERTEX_SHADER_SRC.contains(&decl));
    }

    #[test]
    fn fragment_shader_is_orange() {
        assert!(FRAGMENT_SHADER_SRC.starts_with("#version 330 core"));
        assert!(FRAGMENT_SHADER_SRC.contains("vec4(1.0f, 0.5f, 0.2f, 1.0f)"));
    }
}
