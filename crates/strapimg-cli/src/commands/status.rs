//! Status command handler

use anyhow::Result;

use strapimg_core::paths::expand_home;
use strapimg_core::{Config, JoplinClient};

use crate::output::{Output, OutputFormat};

/// Show whether Joplin is reachable and uploads are configured
pub async fn show(config: &Config, output: &Output) -> Result<()> {
    let host = JoplinClient::new(&config.joplin_url, config.joplin_token.clone());
    let (reachable, joplin_error) = match host.ping().await {
        Ok(ok) => (ok, None),
        Err(e) => (false, Some(e.to_string())),
    };

    let settings = config.settings();
    let resources_dir = expand_home(&settings.resources_path);
    let resources_exist = resources_dir.is_dir();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "joplin": {
                        "url": host.base_url(),
                        "reachable": reachable,
                        "token_set": config.joplin_token.is_some(),
                        "error": joplin_error
                    },
                    "strapi": {
                        "url": settings.strapi_base(),
                        "configured": settings.is_complete()
                    },
                    "resources": {
                        "path": resources_dir,
                        "exists": resources_exist
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!(
                "{}",
                if reachable && settings.is_complete() {
                    "ok"
                } else {
                    "not ready"
                }
            );
        }
        OutputFormat::Human => {
            println!("strapimg Status");
            println!("===============");
            println!();
            println!("Joplin:");
            println!("  URL:       {}", host.base_url());
            println!(
                "  Reachable: {}",
                if reachable { "yes" } else { "no" }
            );
            if let Some(ref e) = joplin_error {
                println!("  Error:     {}", e);
            }
            println!(
                "  Token:     {}",
                if config.joplin_token.is_some() {
                    "set"
                } else {
                    "(not set)"
                }
            );
            println!();
            println!("Strapi:");
            println!(
                "  URL:       {}",
                if settings.strapi_base().is_empty() {
                    "(not set)"
                } else {
                    settings.strapi_base()
                }
            );
            println!(
                "  Uploads:   {}",
                if settings.is_complete() {
                    "configured"
                } else {
                    "missing API key or URL"
                }
            );
            println!();
            println!("Resources:");
            println!("  Location:  {}", resources_dir.display());
            println!(
                "  Exists:    {}",
                if resources_exist { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}
