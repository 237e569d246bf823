use crate::models::{config, UserConfig};

pub fn handle_config(init: bool) {
    let path = config::get_config_path();

    if init {
        if let Some(existing) = path.as_ref().filter(|p| p.exists()) {
            println!("Config already exists at {}", existing.display());
            return;
        }

        match config::save_config(&UserConfig::default()) {
            Ok(written) => println!("Wrote default config to {}", written.display()),
            Err(e) => {
                eprintln!("Failed to save config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let user_config = config::load_config();
    match &path {
        Some(p) if p.exists() => println!("Config file: {}", p.display()),
        Some(p) => println!("Config file: {} (not created, using defaults)", p.display()),
        None => println!("Config file: unavailable (using defaults)"),
    }
    println!();

    match serde_json::to_string_pretty(&user_config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to render config: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = user_config.validate() {
        println!();
        println!("Warning: {}", e);
    }
}
