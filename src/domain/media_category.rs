/// Extensions accepted at the upload boundary, lower-case and without the dot.
pub const ACCEPTED_EXTENSIONS: [&str; 8] = ["pdf", "png", "jpg", "jpeg", "bmp", "tiff", "webp", "txt"];

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tiff", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    Text,
    Pdf,
    Image,
}

impl MediaCategory {
    /// Infers the category from the filename extension, case-insensitively.
    /// Returns `None` for anything outside [`ACCEPTED_EXTENSIONS`].
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = file_extension(filename)?;

        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            ext if IMAGE_EXTENSIONS.contains(&ext) => Some(Self::Image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Image => "image",
        }
    }
}

/// Lower-cased text after the last dot of `filename`, if it is non-empty.
/// A bare `.txt` counts as having the `txt` extension.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

/// Guesses the MIME type of an image from its leading bytes.
pub fn sniff_image_mime(data: &[u8]) -> &'static str {
    match data {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'B', b'M', ..] => "image/bmp",
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => "image/tiff",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}
