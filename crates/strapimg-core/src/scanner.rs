//! Image discovery on the selected note

use tracing::{debug, info, warn};

use crate::error::HostError;
use crate::host::NoteHost;
use crate::models::ImageDescriptor;

/// List the image attachments of the currently selected note
///
/// Returns an empty list when no note is selected or any query fails
/// (graceful degradation, failures are logged).
pub async fn scan_images<H: NoteHost + ?Sized>(host: &H) -> Vec<ImageDescriptor> {
    match scan_images_inner(host).await {
        Ok(images) => images,
        Err(e) => {
            warn!("Error fetching images from note: {}", e);
            Vec::new()
        }
    }
}

async fn scan_images_inner<H: NoteHost + ?Sized>(
    host: &H,
) -> Result<Vec<ImageDescriptor>, HostError> {
    let Some(note) = host.selected_note().await? else {
        info!("No note selected");
        return Ok(Vec::new());
    };

    info!("Fetching resources for note: {}", note.id);

    let mut images = Vec::new();
    for resource_id in host.note_resource_ids(&note.id).await? {
        let resource = host.resource(&resource_id).await?;
        if resource.is_image() {
            images.push(ImageDescriptor::from(resource));
        } else {
            debug!("Skipping {} ({})", resource.id, resource.mime);
        }
    }

    Ok(images)
}
