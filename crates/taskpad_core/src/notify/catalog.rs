//! User-facing copy for controller notifications.

use super::Message;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Built-in catalog languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    English,
    Indonesian,
}

/// Unknown locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl Display for UnknownLocale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported locale `{}`; expected en|id", self.0)
    }
}

impl Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "id" | "indonesian" => Ok(Self::Indonesian),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// Every message the controller can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    pub empty_title: Message,
    pub task_added: Message,
    pub task_updated: Message,
    pub delete_confirm: Message,
    pub task_deleted: Message,
    pub edit_target_missing: Message,
    pub storage_failed: Message,
    pub id_exhausted: Message,
}

impl MessageCatalog {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::English => Self::english(),
            Locale::Indonesian => Self::indonesian(),
        }
    }

    pub fn english() -> Self {
        Self {
            empty_title: Message::new("Oops!", "Task title must not be empty!"),
            task_added: Message::new("Done!", "Task added"),
            task_updated: Message::new("Done!", "Task updated"),
            delete_confirm: Message::new("Delete this task?", "This action cannot be undone"),
            task_deleted: Message::new("Deleted!", "Task deleted"),
            edit_target_missing: Message::new("Oops!", "The task being edited no longer exists"),
            storage_failed: Message::new("Storage error", "Your changes could not be saved"),
            id_exhausted: Message::new("Oops!", "No more tasks can be added to this list"),
        }
    }

    pub fn indonesian() -> Self {
        Self {
            empty_title: Message::new("Oops!", "Judul tugas tidak boleh kosong!"),
            task_added: Message::new("Berhasil!", "Tugas berhasil ditambahkan"),
            task_updated: Message::new("Berhasil!", "Tugas berhasil diupdate"),
            delete_confirm: Message::new("Hapus tugas ini?", "Tindakan ini tidak bisa dibatalkan"),
            task_deleted: Message::new("Terhapus!", "Tugas berhasil dihapus"),
            edit_target_missing: Message::new("Oops!", "Tugas yang diedit sudah tidak ada"),
            storage_failed: Message::new("Gagal!", "Perubahan tidak bisa disimpan"),
            id_exhausted: Message::new("Oops!", "Tidak bisa menambah tugas lagi ke daftar ini"),
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}
