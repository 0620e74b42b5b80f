mod create_document;
mod delete_document;
mod get_document;
mod get_user_documents;
mod reminders;
mod stats;
mod update_document;

pub use create_document::{NewDocument, create_document};
pub use delete_document::{delete_document, soft_delete_document};
pub use get_document::get_document;
pub use get_user_documents::get_user_documents;
pub use reminders::{DueReminder, get_due_reminders, mark_reminder_sent};
pub use stats::{StatusCounts, UpcomingRow, get_status_counts, get_upcoming_expirations};
pub use update_document::{DocumentPatch, update_document};
