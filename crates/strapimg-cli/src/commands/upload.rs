//! Upload command handler

use anyhow::Result;

use strapimg_core::{run_pipeline, Config, JoplinClient, PipelineOutcome, StrapiUploader};

use crate::output::Output;

/// Upload the note's images to Strapi and relink them
///
/// Only missing settings and an image-less note produce messages. The
/// per-image report is printed with `--summary` or `--json`.
pub async fn upload(
    config: &Config,
    note: Option<String>,
    summary: bool,
    output: &Output,
) -> Result<()> {
    let settings = config.settings();
    let host = JoplinClient::new(&config.joplin_url, config.joplin_token.clone()).with_note(note);
    let uploader = StrapiUploader::new();

    if let PipelineOutcome::Completed(report) =
        run_pipeline(&host, &uploader, output, &settings).await
    {
        if summary || output.is_json() {
            output.print_report(&report);
        }
    }

    Ok(())
}
