//! Note rewriting
//!
//! Replaces Joplin's internal image links (`![title](:/id)`) with links to
//! the hosted copy.

use regex::{NoExpand, Regex};
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::RewriteError;
use crate::host::NoteHost;
use crate::models::ImageDescriptor;

/// Result of rewriting one image's links
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The note was updated
    Rewritten { link: String, replacements: usize },
    /// The internal link was not in the note, nothing was written
    PatternNotFound,
}

/// URL the note should point at for an uploaded file
///
/// Relative URLs are joined to the Strapi base URL, absolute ones (e.g.
/// from a cloud storage provider) are kept.
pub fn hosted_url(settings: &Settings, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let base = settings.strapi_base();
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

/// Pattern matching the internal link of `image`
///
/// Title and id are matched literally.
pub fn link_pattern(image: &ImageDescriptor) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"!\[{}\]\(:/{}\)",
        regex::escape(&image.title),
        regex::escape(&image.id)
    ))
}

/// Replace every internal link of `image` in `body` with `hosted`
///
/// Returns the new body and the number of replacements, or `None` when the
/// body has no link to the image.
pub fn replace_image_link(
    body: &str,
    image: &ImageDescriptor,
    hosted: &str,
) -> Result<Option<(String, usize)>, regex::Error> {
    let pattern = link_pattern(image)?;
    let count = pattern.find_iter(body).count();
    if count == 0 {
        return Ok(None);
    }

    let new_link = format!("![{}]({})", image.title, hosted);
    let updated = pattern.replace_all(body, NoExpand(&new_link)).into_owned();
    Ok(Some((updated, count)))
}

/// Point the selected note at the uploaded copy of `image`
///
/// The note is fetched fresh so earlier rewrites in the same run are kept.
/// Failures are logged and returned.
pub async fn rewrite_note<H: NoteHost + ?Sized>(
    host: &H,
    image: &ImageDescriptor,
    url: &str,
    settings: &Settings,
) -> Result<RewriteOutcome, RewriteError> {
    let result = rewrite_note_inner(host, image, url, settings).await;
    if let Err(ref e) = result {
        warn!("Error replacing image link in note: {}", e);
    }
    result
}

async fn rewrite_note_inner<H: NoteHost + ?Sized>(
    host: &H,
    image: &ImageDescriptor,
    url: &str,
    settings: &Settings,
) -> Result<RewriteOutcome, RewriteError> {
    let note = host
        .selected_note()
        .await?
        .ok_or(RewriteError::NoteNotFound)?;
    if note.body.is_empty() {
        return Err(RewriteError::EmptyBody { note_id: note.id });
    }

    let hosted = hosted_url(settings, url);
    let Some((body, replacements)) = replace_image_link(&note.body, image, &hosted)? else {
        info!("No link to {} found in note {}", image.id, note.id);
        return Ok(RewriteOutcome::PatternNotFound);
    };

    host.update_note_body(&note.id, &body).await?;
    info!(
        "Replaced {} link(s) for image {} with {}",
        replacements, image.title, hosted
    );

    Ok(RewriteOutcome::Rewritten {
        link: hosted,
        replacements,
    })
}
