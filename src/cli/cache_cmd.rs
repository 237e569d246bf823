use chrono::{Duration, Utc};

use crate::cache::CacheStatus;

use super::CacheAction;

pub fn handle_cache(action: CacheAction) {
    let user_config = super::load_valid_config();
    let cache = super::cache_store(&user_config);

    match action {
        CacheAction::Status => {
            println!("Cache file: {}", cache.path().display());
            let now = Utc::now();
            match cache.status_at(now) {
                Ok(CacheStatus::Missing) => println!("No cached problems."),
                Ok(CacheStatus::Present {
                    written_at,
                    item_count,
                    fresh,
                }) => {
                    println!("Problems:   {}", item_count);
                    println!(
                        "Written:    {} ({})",
                        written_at.format("%Y-%m-%d %H:%M UTC"),
                        format_age(now.signed_duration_since(written_at))
                    );
                    println!(
                        "State:      {} (expires after {}h)",
                        if fresh { "fresh" } else { "expired" },
                        user_config.cache_expiry_hours
                    );
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        CacheAction::Clear => match cache.clear() {
            Ok(true) => println!("Removed {}", cache.path().display()),
            Ok(false) => println!("Cache is already empty."),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
    }
}

fn format_age(age: Duration) -> String {
    let secs = age.num_seconds();
    if secs < 0 {
        return "in the future".to_string();
    }

    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        let mins = secs / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if secs < 86400 {
        let hours = secs / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = secs / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    }
}
