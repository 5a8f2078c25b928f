//! Little Lemon - a terminal front end for the Little Lemon ordering core.
//!
//! Browses the locally cached menu and manages the on-device user profile.

use std::io;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use littlelemon_core::utils::mask_phone;
use littlelemon_core::validation::OnboardingForm;
use littlelemon_core::{
    Category, Config, FileKeyValueStore, MenuCache, MenuClient, MenuFilter, MenuItem, MenuStore,
    ProfileError, ProfileState,
};

const USAGE: &str = "\
Usage:
  littlelemon menu [--search TEXT] [--category NAME]...
  littlelemon refresh
  littlelemon profile
  littlelemon onboard <FIRST_NAME> <EMAIL>
  littlelemon logout";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Menu(MenuFilter),
    Refresh,
    Profile,
    Onboard { first_name: String, email: String },
    Logout,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        bail!("missing command\n\n{USAGE}");
    };

    match name.as_str() {
        "menu" => {
            let mut filter = MenuFilter::new();
            let mut rest = rest.iter();
            while let Some(flag) = rest.next() {
                let value = rest
                    .next()
                    .with_context(|| format!("{flag} needs a value\n\n{USAGE}"))?;
                match flag.as_str() {
                    "--search" | "-s" => filter.set_search(value.as_str()),
                    "--category" | "-c" => {
                        if Category::parse(value).is_none() {
                            bail!(
                                "unknown category {value:?}; expected one of {}",
                                Category::ALL.map(|c| c.key()).join(", ")
                            );
                        }
                        filter = filter.category(value);
                    }
                    other => bail!("unknown option {other:?}\n\n{USAGE}"),
                }
            }
            Ok(Command::Menu(filter))
        }
        "refresh" => Ok(Command::Refresh),
        "profile" => Ok(Command::Profile),
        "onboard" => match rest {
            [first_name, email] => Ok(Command::Onboard {
                first_name: first_name.clone(),
                email: email.clone(),
            }),
            _ => bail!("onboard takes a first name and an email\n\n{USAGE}"),
        },
        "logout" => Ok(Command::Logout),
        "-h" | "--help" | "help" => Ok(Command::Help),
        other => bail!("unknown command {other:?}\n\n{USAGE}"),
    }
}

fn print_items(cache: &MenuCache, items: &[MenuItem]) {
    if items.is_empty() {
        println!("No menu items.");
        return;
    }
    for item in items {
        println!(
            "{:<28} {:>8}  {}",
            item.name,
            item.display_price(),
            Category::parse(&item.category)
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| item.category.clone())
        );
        println!("    {}", item.short_description());
        println!("    {}", cache.image_url(item));
    }
}

fn print_cache_age(cache: &MenuCache) -> Result<()> {
    match cache.last_ingestion()? {
        Some(record) => println!(
            "\n{} items cached {}",
            record.item_count,
            record.age_display()
        ),
        None => println!("\nMenu not cached yet"),
    }
    Ok(())
}

fn open_profile(config: &Config) -> Result<ProfileState> {
    let storage = FileKeyValueStore::new(config.storage_dir()?)
        .context("Failed to open profile storage")?;
    let profile = ProfileState::new(Arc::new(storage));
    profile.bootstrap();
    Ok(profile)
}

fn open_menu_cache(config: &Config) -> Result<MenuCache> {
    let store = MenuStore::open(config.menu_db_path()?).context("Failed to open menu database")?;
    let client = MenuClient::new(config.menu_url())?;
    Ok(MenuCache::new(store, client, config.image_url_template()))
}

fn print_profile(profile: &ProfileState) {
    let user = profile.read();
    if !user.onboarding_completed {
        println!("Not onboarded yet. Run `littlelemon onboard <FIRST_NAME> <EMAIL>`.");
        return;
    }
    println!("[{}] {}", user.initials(), user.full_name());
    println!("Email:     {}", user.email);
    if user.phone.is_empty() {
        println!("Phone:     -");
    } else {
        println!("Phone:     {}", mask_phone(&user.phone));
    }
    println!("Logged in: {}", if user.is_logged_in { "yes" } else { "no" });
    println!("Notifications:");
    println!("  Order statuses:   {}", user.order_statuses);
    println!("  Password changes: {}", user.password_changes);
    println!("  Special offers:   {}", user.special_offers);
    println!("  Newsletter:       {}", user.newsletter);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }
    let config = Config::load()?;
    info!(?command, "Little Lemon starting");

    match command {
        Command::Menu(filter) => {
            let cache = open_menu_cache(&config)?;
            let all = cache.ensure_menu_loaded().await?;
            let items = if filter.is_empty() {
                all
            } else {
                cache.query_menu_items(&filter)?
            };
            print_items(&cache, &items);
            print_cache_age(&cache)?;
        }
        Command::Refresh => {
            let cache = open_menu_cache(&config)?;
            let items = cache.refresh().await?;
            println!("Menu refreshed: {} items", items.len());
        }
        Command::Profile => {
            let profile = open_profile(&config)?;
            print_profile(&profile);
        }
        Command::Onboard { first_name, email } => {
            let profile = open_profile(&config)?;
            let form = OnboardingForm { first_name, email };
            match profile.complete_onboarding(&form) {
                Ok(user) => println!("Welcome, {}!", user.first_name),
                Err(ProfileError::Invalid(errors)) => {
                    eprintln!("Oops\n{}", errors);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Logout => {
            let profile = open_profile(&config)?;
            profile.logout()?;
            println!("Logged out.");
        }
        Command::Help => println!("{USAGE}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_menu_filters() {
        let command = parse_args(&args(&[
            "menu",
            "--search",
            "cake",
            "--category",
            "Desserts",
            "-c",
            "drinks",
        ]))
        .unwrap();
        assert_eq!(
            command,
            Command::Menu(
                MenuFilter::new()
                    .search("cake")
                    .categories(["desserts", "drinks"])
            )
        );
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        assert!(parse_args(&args(&["menu", "--category", "soups"])).is_err());
    }

    #[test]
    fn test_parse_onboard() {
        assert_eq!(
            parse_args(&args(&["onboard", "Ana", "ana@example.com"])).unwrap(),
            Command::Onboard {
                first_name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
            }
        );
        assert!(parse_args(&args(&["onboard", "Ana"])).is_err());
    }

    #[test]
    fn test_parse_help() {
        for flag in ["help", "--help", "-h"] {
            assert_eq!(parse_args(&args(&[flag])).unwrap(), Command::Help);
        }
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["order"])).is_err());
    }
}
