//! User-facing messages

/// Shows a message to the person who ran the command
pub trait Notifier {
    fn show_message(&self, message: &str);
}
