//! Content-type resolution for served files.
//!
//! [`resolve`] maps a file name (and, as a fallback, its leading bytes) to a
//! `Content-Type` header value. The lookup order is:
//!
//! 1. The extension table from `mime_guess`. A hit returns immediately, with a
//!    UTF-8 charset appended for textual types.
//! 2. Otherwise the content is sniffed by signature.
//! 3. A fixed table of web-asset extensions overrides the sniffed value.

/// Number of leading bytes considered when sniffing.
const SNIFF_LEN: usize = 512;

const UTF8_CHARSET: &str = "; charset=utf-8";

/// Web-asset types that sniffing cannot reliably detect.
const WEB_OVERRIDES: &[(&str, &str)] = &[
    (".js", "application/javascript; charset=utf-8"),
    (".mjs", "application/javascript; charset=utf-8"),
    (".json", "application/json; charset=utf-8"),
    (".wasm", "application/wasm"),
    (".svg", "image/svg+xml"),
    (".webp", "image/webp"),
    (".woff", "font/woff"),
    (".woff2", "font/woff2"),
    (".ttf", "font/ttf"),
    (".otf", "font/otf"),
    (".ico", "image/x-icon"),
    (".webmanifest", "application/manifest+json"),
];

/// Resolve the content type for `file_name` whose contents are `data`.
pub fn resolve(file_name: &str, data: &[u8]) -> String {
    let ext = extension(file_name);

    if let Some(mime) = type_by_extension(ext) {
        return if is_textual(mime) {
            format!("{mime}{UTF8_CHARSET}")
        } else {
            mime.to_string()
        };
    }

    let sniffed = sniff(data);
    web_override(ext).unwrap_or(sniffed).to_string()
}

/// Fixed content type for well-known web-asset extensions.
pub fn web_override(ext: &str) -> Option<&'static str> {
    WEB_OVERRIDES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Extension of the final path element, including the leading dot.
///
/// Returns an empty string when the final element has no dot.
pub fn extension(file_name: &str) -> &str {
    let base_start = file_name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match file_name[base_start..].rfind('.') {
        Some(dot) => &file_name[base_start + dot..],
        None => "",
    }
}

/// Look up the MIME type registered for an extension such as `.mp4`.
pub fn type_by_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    if ext.is_empty() {
        return None;
    }
    mime_guess::from_ext(ext).first_raw()
}

fn is_textual(mime: &str) -> bool {
    mime.starts_with("text/") || mime == "application/javascript" || mime == "application/json"
}

// ---------------------------------------------------------------------------
// Sniffing
// ---------------------------------------------------------------------------

/// Tags whose presence at the start of a document marks it as HTML.
const HTML_TAGS: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// Exact byte prefixes.
const MAGIC: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"%!PS-Adobe-", "application/postscript"),
    (b"\xFE\xFF", "text/plain; charset=utf-16be"),
    (b"\xFF\xFE", "text/plain; charset=utf-16le"),
    (b"\xEF\xBB\xBF", "text/plain; charset=utf-8"),
    (b"\x00\x00\x01\x00", "image/x-icon"),
    (b"\x00\x00\x02\x00", "image/x-icon"),
    (b"BM", "image/bmp"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"wOFF", "font/woff"),
    (b"wOF2", "font/woff2"),
    (b"OggS\x00", "application/ogg"),
    (b"ID3", "audio/mpeg"),
    (b"\x1A\x45\xDF\xA3", "video/webm"),
    (b"\x00asm", "application/wasm"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1F\x8B\x08", "application/x-gzip"),
];

/// RIFF sub-formats, identified by the four bytes at offset 8.
const RIFF_FORMS: &[(&[u8], &str)] = &[
    (b"WEBPVP", "image/webp"),
    (b"WAVE", "audio/wave"),
    (b"AVI ", "video/avi"),
];

/// Guess a content type from the leading bytes of a file.
///
/// Always returns a value; unrecognised binary data is
/// `application/octet-stream`.
pub fn sniff(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];

    let trimmed = trim_leading_whitespace(data);
    if HTML_TAGS.iter().any(|tag| matches_html_tag(trimmed, tag)) {
        return "text/html; charset=utf-8";
    }
    if starts_with_ignore_case(trimmed, b"<?xml") {
        return "text/xml; charset=utf-8";
    }

    if let Some((_, mime)) = MAGIC.iter().find(|(magic, _)| data.starts_with(magic)) {
        return *mime;
    }

    if data.len() >= 12 && data.starts_with(b"RIFF") {
        if let Some((_, mime)) = RIFF_FORMS
            .iter()
            .find(|(form, _)| data[8..].starts_with(form))
        {
            return *mime;
        }
    }

    // ISO base media: the first box is `ftyp`.
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return "video/mp4";
    }

    if !data.iter().any(|&b| is_binary_byte(b)) {
        return "text/plain; charset=utf-8";
    }

    "application/octet-stream"
}

fn trim_leading_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !matches!(b, b'\t' | b'\n' | 0x0C | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.len() >= prefix.len() && data[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// The tag must be followed by a space or `>` so `<BR` does not match `<BRAND`.
fn matches_html_tag(data: &[u8], tag: &[u8]) -> bool {
    starts_with_ignore_case(data, tag) && matches!(data.get(tag.len()), Some(b' ' | b'>'))
}

fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
