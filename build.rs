// Build script - reads config.yaml at compile time and generates defaults
// This allows changing defaults during development without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Tell Cargo to rerun if config.yaml changes
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_config.rs");

    // Try to read config.yaml from src/, fall back to hardcoded defaults if not found
    let config = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_config(&content)
    } else {
        CompiledConfig::default()
    };

    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const WINDOW_WIDTH: u32 = {window_width};
pub const WINDOW_HEIGHT: u32 = {window_height};
pub const WINDOW_STEP: u32 = {window_step};

pub const UPDATE_MODE: &str = "{update_mode}";
pub const UPDATE_REMOTE: bool = {update_remote};
pub const UPDATE_ON_CHANGE: bool = {update_on_change};
pub const UPDATE_STYLES: bool = {update_styles};
pub const TOKEN_TYPE: &str = "{token_type}";
pub const IGNORE_FIRST_PART_FOR_STYLES: bool = {ignore_first_part_for_styles};
pub const INSPECT_DEEP: bool = {inspect_deep};

pub const WORKSPACE_CONFIG_NAME: &str = "{workspace_config_name}";
pub const DEFAULT_LOG_FILE: &str = "{default_log_file}";

// Inspector accent colors (RGB tuples)
pub const ACCENT: (u8, u8, u8) = {accent};
pub const UNRESOLVED: (u8, u8, u8) = {unresolved};
pub const CIRCULAR: (u8, u8, u8) = {circular};
"#,
        window_width = config.window_width,
        window_height = config.window_height,
        window_step = config.window_step,
        update_mode = config.update_mode,
        update_remote = config.update_remote,
        update_on_change = config.update_on_change,
        update_styles = config.update_styles,
        token_type = config.token_type,
        ignore_first_part_for_styles = config.ignore_first_part_for_styles,
        inspect_deep = config.inspect_deep,
        workspace_config_name = config.workspace_config_name,
        default_log_file = config.default_log_file,
        accent = rgb_tuple(config.accent),
        unresolved = rgb_tuple(config.unresolved),
        circular = rgb_tuple(config.circular),
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled config");
}

struct CompiledConfig {
    window_width: u32,
    window_height: u32,
    window_step: u32,
    update_mode: String,
    update_remote: bool,
    update_on_change: bool,
    update_styles: bool,
    token_type: String,
    ignore_first_part_for_styles: bool,
    inspect_deep: bool,
    workspace_config_name: String,
    default_log_file: String,
    accent: (u8, u8, u8),
    unresolved: (u8, u8, u8),
    circular: (u8, u8, u8),
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self {
            window_width: 400,
            window_height: 600,
            window_step: 50,
            update_mode: "page".to_string(),
            update_remote: true,
            update_on_change: true,
            update_styles: true,
            token_type: "object".to_string(),
            ignore_first_part_for_styles: false,
            inspect_deep: false,
            workspace_config_name: "tokens.yaml".to_string(),
            default_log_file: "token-manager.log".to_string(),
            accent: (24, 160, 251),     // #18a0fb
            unresolved: (242, 201, 76), // #f2c94c
            circular: (235, 87, 87),    // #eb5757
        }
    }
}

fn parse_config(content: &str) -> CompiledConfig {
    let mut config = CompiledConfig::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut section = "";

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Top-level keys open a new section
        if !line.starts_with(' ') && !line.starts_with('\t') {
            section = match trimmed.trim_end_matches(':') {
                "window" => "window",
                "settings" => "settings",
                "workspace" => "workspace",
                "colors" => "colors",
                _ => "",
            };
            continue;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };

        match (section, key) {
            ("window", "width") => config.window_width = value.parse().unwrap_or(400),
            ("window", "height") => config.window_height = value.parse().unwrap_or(600),
            ("window", "step") => config.window_step = value.parse().unwrap_or(50),
            ("settings", "update_mode") => config.update_mode = unquote(value),
            ("settings", "update_remote") => config.update_remote = parse_bool(value),
            ("settings", "update_on_change") => config.update_on_change = parse_bool(value),
            ("settings", "update_styles") => config.update_styles = parse_bool(value),
            ("settings", "token_type") => config.token_type = unquote(value),
            ("settings", "ignore_first_part_for_styles") => {
                config.ignore_first_part_for_styles = parse_bool(value)
            }
            ("settings", "inspect_deep") => config.inspect_deep = parse_bool(value),
            ("workspace", "config_name") => config.workspace_config_name = unquote(value),
            ("workspace", "log_file") => config.default_log_file = unquote(value),
            ("colors", "accent") => config.accent = parse_hex_color(value),
            ("colors", "unresolved") => config.unresolved = parse_hex_color(value),
            ("colors", "circular") => config.circular = parse_hex_color(value),
            _ => {}
        }
    }

    config
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    // Remove inline comments (a # preceded by a space, not a hex color)
    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    if value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn unquote(s: &str) -> String {
    s.trim().trim_matches('"').trim_matches('\'').to_string()
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "1")
}

fn parse_hex_color(s: &str) -> (u8, u8, u8) {
    let s = s.trim().trim_matches('"').trim_matches('\'');
    let s = s.strip_prefix('#').unwrap_or(s);

    if s.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[0..2], 16),
            u8::from_str_radix(&s[2..4], 16),
            u8::from_str_radix(&s[4..6], 16),
        ) {
            return (r, g, b);
        }
    }

    (0, 0, 0)
}

fn rgb_tuple(rgb: (u8, u8, u8)) -> String {
    format!("({}, {}, {})", rgb.0, rgb.1, rgb.2)
}
