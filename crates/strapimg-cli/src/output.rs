//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::path::PathBuf;

use strapimg_core::{ImageDescriptor, ImageOutcome, Notifier, PipelineReport};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a note's images with the local file each maps to
    pub fn print_images(&self, images: &[(ImageDescriptor, PathBuf)]) {
        match self.format {
            OutputFormat::Human => {
                if images.is_empty() {
                    println!("No images found.");
                    return;
                }
                for (image, path) in images {
                    let marker = if path.exists() { " " } else { "!" };
                    println!(
                        "{}{} | {} | {} | {}",
                        marker,
                        short_id(&image.id),
                        truncate(&image.title, 35),
                        image.mime,
                        path.display()
                    );
                }
                println!("\n{} image(s)", images.len());
                if images.iter().any(|(_, p)| !p.exists()) {
                    println!("! = resource file missing");
                }
            }
            OutputFormat::Json => {
                let json: Vec<_> = images
                    .iter()
                    .map(|(image, path)| {
                        serde_json::json!({
                            "id": image.id,
                            "title": image.title,
                            "file_extension": image.file_extension,
                            "mime": image.mime,
                            "path": path,
                            "exists": path.exists()
                        })
                    })
                    .collect();
                print_json(&json);
            }
            OutputFormat::Quiet => {
                for (image, _) in images {
                    println!("{}", image.id);
                }
            }
        }
    }

    /// Print per-image results of an upload run
    pub fn print_report(&self, report: &PipelineReport) {
        match self.format {
            OutputFormat::Human => {
                for entry in &report.images {
                    println!(
                        "{}",
                        describe_outcome(&entry.image.title, &entry.outcome)
                    );
                }
                println!(
                    "\n{} of {} image(s) uploaded and relinked",
                    report.succeeded(),
                    report.total()
                );
            }
            OutputFormat::Json => print_json(report),
            OutputFormat::Quiet => {
                for entry in &report.images {
                    if let ImageOutcome::Rewritten { url, .. } = &entry.outcome {
                        println!("{}", url);
                    }
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

impl Notifier for Output {
    /// Messages from the upload command are shown even in quiet mode (on stderr)
    fn show_message(&self, message: &str) {
        match self.format {
            OutputFormat::Quiet => eprintln!("{}", message),
            _ => self.message(message),
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// One line describing what happened to an image
fn describe_outcome(title: &str, outcome: &ImageOutcome) -> String {
    match outcome {
        ImageOutcome::Rewritten { url, replacements } => {
            format!("✓ {} -> {} ({} link(s))", title, url, replacements)
        }
        ImageOutcome::LinkNotFound { url } => {
            format!("- {} uploaded to {}, but no link found in note", title, url)
        }
        ImageOutcome::UploadFailed { error } => format!("✗ {}: {}", title, error),
        ImageOutcome::NoUrl => format!("✗ {}: upload response had no URL", title),
        ImageOutcome::RewriteFailed { url, error } => {
            format!("✗ {} uploaded to {}, note not updated: {}", title, url, error)
        }
    }
}

/// First 8 characters of a resource id
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("äöüäöüäöüäöü", 6), "äöü...");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_describe_outcome() {
        let line = describe_outcome(
            "a.png",
            &ImageOutcome::Rewritten {
                url: "https://cms/uploads/a.png".to_string(),
                replacements: 2,
            },
        );
        assert_eq!(line, "✓ a.png -> https://cms/uploads/a.png (2 link(s))");

        let line = describe_outcome(
            "b.png",
            &ImageOutcome::UploadFailed {
                error: "Upload rejected with status 500: ".to_string(),
            },
        );
        assert!(line.starts_with("✗ b.png"));
    }
}
