use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to decode input as {encoding}")]
pub struct DecodeError {
    pub encoding: String,
}

/// Decode raw bytes into UTF-8 text using: BOM -> caller-stated label ->
/// chardetng fallback.
pub fn decode_text(bytes: &[u8], encoding_label: Option<&str>) -> Result<String, DecodeError> {
    // 1) BOM aware decode using encoding_rs helper
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    // 2) Encoding label stated by the caller
    if let Some(label) = encoding_label {
        if let Some(enc) = Encoding::for_label(label.trim().as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    // 3) chardetng detection over the full input
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<String, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError {
            encoding: enc.name().to_string(),
        });
    }
    Ok(text.into_owned())
}
