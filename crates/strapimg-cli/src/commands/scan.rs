//! Scan command handler

use anyhow::Result;

use strapimg_core::paths::{expand_home, resource_file};
use strapimg_core::{scan_images, Config, JoplinClient};

use crate::output::Output;

/// List the note's images and the local files they map to
pub async fn scan(config: &Config, note: Option<String>, output: &Output) -> Result<()> {
    let host = JoplinClient::new(&config.joplin_url, config.joplin_token.clone()).with_note(note);
    let resources_dir = expand_home(&config.resources_path);

    let images: Vec<_> = scan_images(&host)
        .await
        .into_iter()
        .map(|image| {
            let path = resource_file(&resources_dir, &image.id, &image.file_extension);
            (image, path)
        })
        .collect();

    output.print_images(&images);
    Ok(())
}
