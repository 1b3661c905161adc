//! User-facing console text.
//!
//! Every line printed for the user comes from a per-language table. Templates
//! use `{name}` placeholders that [`Language::render`] fills in.

use std::fmt::Display;

/// Language used for console report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    English,
    #[value(name = "pl")]
    Polish,
}

/// Keys into the message tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    TiffSaved,
    PreviewClosed,
    FileFailed,
    InvalidPath,
    NoRawFiles,
    Summary,
}

impl Message {
    pub const ALL: [Message; 6] = [
        Message::TiffSaved,
        Message::PreviewClosed,
        Message::FileFailed,
        Message::InvalidPath,
        Message::NoRawFiles,
        Message::Summary,
    ];
}

// Indexed by `Message as usize`.
const ENGLISH: [&str; Message::ALL.len()] = [
    "TIFF file saved: {path}",
    "Preview closed: {path}",
    "Error in {path}: {error}",
    "The provided path {path} is neither a folder nor a file.",
    "No RAW files found in {path}",
    "Done: {converted} file(s) processed, {failed} failed.",
];

const POLISH: [&str; Message::ALL.len()] = [
    "Zapisano plik TIFF: {path}",
    "Zamknięto podgląd: {path}",
    "Błąd w pliku {path}: {error}",
    "Podana ścieżka {path} nie jest ani folderem, ani plikiem.",
    "Nie znaleziono plików RAW w {path}",
    "Gotowe: przetworzono plików: {converted}, błędów: {failed}.",
];

impl Language {
    pub fn template(self, message: Message) -> &'static str {
        let table = match self {
            Language::English => &ENGLISH,
            Language::Polish => &POLISH,
        };
        table[message as usize]
    }

    /// Fills the template for `message` with the given named arguments.
    pub fn render(self, message: Message, args: &[(&str, &dyn Display)]) -> String {
        let mut text = self.template(message).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), &value.to_string());
        }
        text
    }
}
