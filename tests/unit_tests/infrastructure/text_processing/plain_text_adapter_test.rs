use truthbot::application::ports::{FileLoader, FileLoaderError};
use truthbot::domain::{MediaCategory, VerificationRequest};
use truthbot::infrastructure::text_processing::{PlainTextAdapter, decode_lossy};

#[tokio::test]
async fn given_valid_utf8_bytes_when_extracting_then_returns_string() {
    let adapter = PlainTextAdapter;
    let text_bytes = "Le café est fermé.".as_bytes();
    let request = VerificationRequest::new(
        "readme.txt".to_string(),
        MediaCategory::Text,
        text_bytes.len() as u64,
    );

    let result = adapter.extract_text(text_bytes, &request).await;

    assert_eq!(result.unwrap(), "Le café est fermé.");
}

#[tokio::test]
async fn given_invalid_utf8_bytes_when_extracting_then_drops_undecodable_bytes() {
    let adapter = PlainTextAdapter;
    let bytes: &[u8] = &[b'a', 0xFF, b'b', 0xFE, 0xFD, b'c'];
    let request = VerificationRequest::new(
        "broken.txt".to_string(),
        MediaCategory::Text,
        bytes.len() as u64,
    );

    let result = adapter.extract_text(bytes, &request).await;

    assert_eq!(result.unwrap(), "abc");
}

#[tokio::test]
async fn given_non_text_category_when_extracting_then_returns_unsupported() {
    let adapter = PlainTextAdapter;
    let data = b"some data";
    let request = VerificationRequest::new("file.pdf".to_string(), MediaCategory::Pdf, data.len() as u64);

    let result = adapter.extract_text(data, &request).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedMediaCategory(_))
    ));
}

#[test]
fn given_only_invalid_bytes_when_decoding_lossy_then_returns_empty() {
    assert_eq!(decode_lossy(&[0xFF, 0xFE, 0xFD]), "");
}
