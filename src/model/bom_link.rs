//! BOM-Link references.
//!
//! A BOM-Link addresses a whole BOM or one element inside it:
//! `urn:cdx:<serial-uuid>/<version>` optionally followed by
//! `#<percent-encoded bom-ref>`.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;
use uuid::Uuid;

static BOM_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^urn:cdx:([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})/([1-9][0-9]*)(?:#(.+))?$")
        .expect("BOM-Link pattern is valid")
});

/// Error parsing a BOM-Link.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BomLinkError {
    #[error("not a BOM-Link: '{0}'")]
    Malformed(String),
    #[error("BOM-Link revision out of range: '{0}'")]
    Revision(String),
    #[error("BOM-Link fragment is not valid percent-encoded UTF-8")]
    Fragment,
}

/// Parsed BOM-Link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BomLink {
    pub serial: Uuid,
    pub revision: u32,
    /// Decoded `bom-ref` of the addressed element
    pub element: Option<String>,
}

impl BomLink {
    /// Link to a whole document.
    #[must_use]
    pub fn document(serial: Uuid, revision: u32) -> Self {
        Self {
            serial,
            revision,
            element: None,
        }
    }

    /// Link to one element of a document.
    #[must_use]
    pub fn element(serial: Uuid, revision: u32, bom_ref: impl Into<String>) -> Self {
        Self {
            serial,
            revision,
            element: Some(bom_ref.into()),
        }
    }

    /// Whether `value` looks like a BOM-Link.
    #[must_use]
    pub fn is_bom_link(value: &str) -> bool {
        BOM_LINK_RE.is_match(value)
    }
}

impl FromStr for BomLink {
    type Err = BomLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = BOM_LINK_RE
            .captures(s.trim())
            .ok_or_else(|| BomLinkError::Malformed(s.to_string()))?;
        let serial = Uuid::parse_str(&caps[1]).map_err(|_| BomLinkError::Malformed(s.to_string()))?;
        let revision = caps[2]
            .parse::<u32>()
            .map_err(|_| BomLinkError::Revision(caps[2].to_string()))?;
        let element = caps
            .get(3)
            .map(|m| percent_decode(m.as_str()))
            .transpose()?;
        Ok(Self {
            serial,
            revision,
            element,
        })
    }
}

impl fmt::Display for BomLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "urn:cdx:{}/{}", self.serial.hyphenated(), self.revision)?;
        if let Some(element) = &self.element {
            write!(f, "#{}", percent_encode(element))?;
        }
        Ok(())
    }
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b':' | b'@' | b'/')
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if is_unreserved(b) {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

fn percent_decode(value: &str) -> Result<String, BomLinkError> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = value.get(i + 1..i + 3).ok_or(BomLinkError::Fragment)?;
            let byte = u8::from_str_radix(hex, 16).map_err(|_| BomLinkError::Fragment)?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| BomLinkError::Fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIAL: &str = "3e671687-395b-41f5-a30f-a58921a69b79";

    #[test]
    fn test_parse_document_link() {
        let link: BomLink = format!("urn:cdx:{SERIAL}/1").parse().unwrap();
        assert_eq!(link.serial.to_string(), SERIAL);
        assert_eq!(link.revision, 1);
        assert_eq!(link.element, None);
    }

    #[test]
    fn test_element_ref_is_percent_encoded() {
        let serial = Uuid::parse_str(SERIAL).unwrap();
        let link = BomLink::element(serial, 2, "pkg:npm/a b@1.0");
        let text = link.to_string();
        assert_eq!(text, format!("urn:cdx:{SERIAL}/2#pkg:npm/a%20b@1.0"));
        assert_eq!(text.parse::<BomLink>().unwrap(), link);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            "urn:uuid:3e671687".parse::<BomLink>(),
            Err(BomLinkError::Malformed(_))
        ));
        assert!(format!("urn:cdx:{SERIAL}/0").parse::<BomLink>().is_err());
        assert!(format!("urn:cdx:{SERIAL}/1#%zz").parse::<BomLink>().is_err());
        assert!(BomLink::is_bom_link(&format!("urn:cdx:{SERIAL}/7#x")));
    }
}
