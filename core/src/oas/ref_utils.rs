#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for resolving `$ref` targets with respect to the document's `$self`.
//!
//! These utilities never fetch external documents, but allow absolute or relative
//! references to be treated as local when the document part matches the current
//! document's `$self` URI.

use percent_encoding::percent_decode_str;
use std::path::Path;
use url::Url;

/// A `$ref` split into its document part and optional fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedReference<'a> {
    /// Everything before `#` (empty for local references).
    pub document: &'a str,
    /// Everything after `#`, if a `#` is present.
    pub fragment: Option<&'a str>,
}

/// Splits a `$ref` at the first `#`.
pub(crate) fn parse_reference(ref_str: &str) -> ParsedReference<'_> {
    match ref_str.split_once('#') {
        Some((document, fragment)) => ParsedReference {
            document,
            fragment: Some(fragment),
        },
        None => ParsedReference {
            document: ref_str,
            fragment: None,
        },
    }
}

/// Normalizes a `$ref` to a local JSON Pointer (e.g. `#/definitions/Pet`) if it targets the
/// current document as identified by `$self`.
///
/// Returns `None` if the reference is external or lacks a fragment.
pub(crate) fn normalize_ref_to_local(ref_str: &str, self_uri: Option<&str>) -> Option<String> {
    let parsed = parse_reference(ref_str);
    let fragment = parsed.fragment?;
    if parsed.document.is_empty() {
        return Some(format!("#{}", fragment));
    }
    let self_uri = self_uri?;
    if ref_doc_matches_self(parsed.document, self_uri) {
        return Some(format!("#{}", fragment));
    }
    None
}

/// Splits a local pointer (`#/a/b`) into decoded segments.
///
/// Returns `None` for fragments that are not JSON Pointers (e.g. `#anchor`).
pub(crate) fn pointer_segments(local: &str) -> Option<Vec<String>> {
    let pointer = local.strip_prefix('#').unwrap_or(local);
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let rest = pointer.strip_prefix('/')?;
    Some(rest.split('/').map(decode_pointer_segment).collect())
}

/// The last decoded pointer segment of a `$ref`, used as the referenced schema's name.
pub(crate) fn ref_name(ref_str: &str) -> Option<String> {
    let fragment = parse_reference(ref_str).fragment?;
    let last = fragment.rsplit('/').next()?;
    let name = decode_pointer_segment(last);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn ref_doc_matches_self(ref_doc: &str, self_uri: &str) -> bool {
    if ref_doc == self_uri {
        return true;
    }

    if let (Ok(ref_url), Ok(self_url)) = (Url::parse(ref_doc), Url::parse(self_uri)) {
        return ref_url.scheme() == self_url.scheme()
            && ref_url.host() == self_url.host()
            && ref_url.port() == self_url.port()
            && ref_url.path() == self_url.path();
    }

    // `$self` given as an absolute path (e.g. "/api/swagger.yaml").
    if self_uri.starts_with('/') {
        if let Ok(ref_url) = Url::parse(ref_doc) {
            return ref_url.path() == self_uri;
        }
    }

    if !self_uri.contains("://") && !ref_doc.contains("://") {
        return Path::new(ref_doc) == Path::new(self_uri);
    }

    false
}
