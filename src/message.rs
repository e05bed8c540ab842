//! Decoder adapter: raw RFC 822 bytes to a structured message with
//! X-header names merged into the address lists.
//!
//! MIME decoding is delegated to `mail_parser`; this module only reshapes
//! its output and drives `names::reconcile_names` once per address kind.

use std::path::Path;

use chrono::{DateTime, Utc};
use mail_parser::{HeaderValue, MessageParser, MimeHeaders};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::address::{Address, AddressKind, HeaderLine};
use crate::config::ReconcileConfig;
use crate::error::MessageError;
use crate::names::{self, Outcome};

/// A decoded message ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Message-ID, or a generated `gen-<uuid>` when the header is missing.
    pub id: String,
    pub message_id: Option<String>,
    pub subject: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub from: Vec<Address>,
    pub to: Vec<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reply_to: Vec<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub in_reply_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    pub text: Option<String>,
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    pub header_lines: Vec<HeaderLine>,
}

impl ParsedMessage {
    /// The address list for a kind.
    pub fn addresses(&self, kind: AddressKind) -> &[Address] {
        match kind {
            AddressKind::From => &self.from,
            AddressKind::To => &self.to,
            AddressKind::Cc => &self.cc,
            AddressKind::Bcc => &self.bcc,
        }
    }

    fn addresses_mut(&mut self, kind: AddressKind) -> &mut Vec<Address> {
        match kind {
            AddressKind::From => &mut self.from,
            AddressKind::To => &mut self.to,
            AddressKind::Cc => &mut self.cc,
            AddressKind::Bcc => &mut self.bcc,
        }
    }
}

/// Attachment metadata. Content is not carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Generated per decode; not stable across runs.
    pub id: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    /// `attachment`, `inline`, ... when the part declares one.
    pub content_disposition: Option<String>,
    pub content_id: Option<String>,
    pub size: usize,
}

/// Decode one raw message and merge X-header display names.
pub fn parse_message(raw: &[u8], config: &ReconcileConfig) -> Result<ParsedMessage, MessageError> {
    let parsed = MessageParser::default()
        .parse(raw)
        .ok_or(MessageError::Unparseable { size: raw.len() })?;

    let message_id = parsed.message_id().map(str::to_string);
    let id = message_id
        .clone()
        .unwrap_or_else(|| format!("gen-{}", Uuid::new_v4()));

    let header_lines = header_lines(&parsed);

    let mut message = ParsedMessage {
        id,
        message_id,
        subject: parsed.subject().map(str::to_string),
        date: parsed
            .date()
            .and_then(|d| DateTime::from_timestamp(d.to_timestamp(), 0)),
        from: addresses_from(parsed.from()),
        to: addresses_from(parsed.to()),
        cc: addresses_from(parsed.cc()),
        bcc: addresses_from(parsed.bcc()),
        reply_to: addresses_from(parsed.reply_to()),
        in_reply_to: text_list(parsed.in_reply_to()),
        references: text_list(parsed.references()),
        text: parsed.body_text(0).map(|t| t.into_owned()),
        html: parsed.body_html(0).map(|h| h.into_owned()),
        attachments: parsed.attachments().map(attachment_meta).collect(),
        header_lines,
    };

    reconcile_message(&mut message, config);
    Ok(message)
}

/// Read a message from disk and decode it.
pub fn parse_file(path: &Path, config: &ReconcileConfig) -> Result<ParsedMessage, MessageError> {
    let raw = std::fs::read(path)?;
    parse_message(&raw, config)
}

/// Merge X-header names into every configured address kind.
///
/// A malformed X-header only skips its own kind.
pub fn reconcile_message(message: &mut ParsedMessage, config: &ReconcileConfig) {
    for kind in AddressKind::ALL {
        if !config.reconciles(kind) {
            continue;
        }
        let Some(line) = find_header_line(&message.header_lines, kind).cloned() else {
            continue;
        };
        match names::reconcile_names(&line, message.addresses_mut(kind)) {
            Ok(Outcome::Unaligned { addresses }) => {
                debug!(id = %message.id, %kind, addresses, "X-header not aligned, names unchanged");
            }
            Ok(_) => {}
            Err(e) => {
                warn!(id = %message.id, %kind, "Skipping X-header: {e}");
            }
        }
    }
}

/// First header line carrying the kind's X-header.
pub fn find_header_line(lines: &[HeaderLine], kind: AddressKind) -> Option<&HeaderLine> {
    lines.iter().find(|l| l.key == kind.x_header_key())
}

/// Flatten a decoded address header into `Address` values.
///
/// Entries without an address (bare group names, undisclosed recipients)
/// are skipped.
pub fn addresses_from(addr: Option<&mail_parser::Address>) -> Vec<Address> {
    let Some(addr) = addr else {
        return Vec::new();
    };
    let to_address = |a: &mail_parser::Addr| {
        let id = a.address.as_deref()?.trim();
        if id.is_empty() {
            return None;
        }
        let mut address = Address::new(id);
        address.name = a
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Some(address)
    };
    match addr {
        mail_parser::Address::List(addrs) => addrs.iter().filter_map(to_address).collect(),
        mail_parser::Address::Group(groups) => groups
            .iter()
            .flat_map(|g| g.addresses.iter().filter_map(to_address))
            .collect(),
    }
}

fn header_lines(parsed: &mail_parser::Message) -> Vec<HeaderLine> {
    parsed
        .headers_raw()
        .map(|(name, value)| HeaderLine::new(name, format!("{name}:{value}")))
        .collect()
}

fn text_list(value: &HeaderValue) -> Vec<String> {
    match value {
        HeaderValue::Text(text) => vec![text.to_string()],
        HeaderValue::TextList(list) => list.iter().map(|t| t.to_string()).collect(),
        _ => Vec::new(),
    }
}

fn attachment_meta(part: &mail_parser::MessagePart) -> Attachment {
    let content_type = MimeHeaders::content_type(part).map(|ct| match ct.subtype() {
        Some(sub) => format!("{}/{}", ct.ctype(), sub),
        None => ct.ctype().to_string(),
    });
    Attachment {
        id: Uuid::new_v4().to_string(),
        filename: MimeHeaders::attachment_name(part).map(str::to_string),
        content_type,
        content_disposition: MimeHeaders::content_disposition(part)
            .map(|cd| cd.ctype().to_string()),
        content_id: MimeHeaders::content_id(part).map(str::to_string),
        size: part.contents().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "From: jane@x.com\r\n\
To: bob@y.com, \"Carol\" <carol@z.com>\r\n\
Subject: Q3 numbers\r\n\
Message-ID: <abc123@x.com>\r\n\
Date: Mon, 14 May 2001 16:39:00 -0700\r\n\
X-From: Jane Doe\r\n\
X-To: Bob Smith <bob@y.com>, Carol <carol@z.com>\r\n\
X-cc: \r\n\
\r\n\
See attached.\r\n";

    fn parse(raw: &str) -> ParsedMessage {
        parse_message(raw.as_bytes(), &ReconcileConfig::default()).unwrap()
    }

    #[test]
    fn decodes_basic_fields() {
        let msg = parse(RAW);
        assert_eq!(msg.id, "abc123@x.com");
        assert_eq!(msg.subject.as_deref(), Some("Q3 numbers"));
        assert_eq!(msg.from, vec![Address::new("jane@x.com")]);
        assert!(msg.cc.is_empty());
        assert!(msg.text.as_deref().is_some_and(|t| t.contains("See attached.")));
        assert_eq!(
            msg.date.map(|d| d.to_rfc3339()).as_deref(),
            Some("2001-05-14T23:39:00+00:00")
        );
    }

    #[test]
    fn header_lines_keep_raw_prefix() {
        let msg = parse(RAW);
        let line = find_header_line(&msg.header_lines, AddressKind::To).unwrap();
        assert_eq!(line.key, "x-to");
        assert!(line.line.starts_with("X-To:"));
    }

    #[test]
    fn x_header_names_are_merged() {
        let msg = parse(RAW);
        assert_eq!(msg.to[0], Address::new("bob@y.com").with_name("Bob Smith"));
        // Decoder-supplied name wins.
        assert_eq!(msg.to[1], Address::new("carol@z.com").with_name("Carol"));
        // Bare X-From text has no address syntax to anchor a name.
        assert!(msg.from[0].name.is_none());
    }

    #[test]
    fn disabled_config_leaves_names_alone() {
        let config = ReconcileConfig {
            enabled: false,
            ..Default::default()
        };
        let msg = parse_message(RAW.as_bytes(), &config).unwrap();
        assert!(msg.to[0].name.is_none());
    }

    #[test]
    fn missing_message_id_gets_generated_id() {
        let msg = parse("From: a@b.com\r\nSubject: hi\r\n\r\nbody\r\n");
        assert!(msg.id.starts_with("gen-"));
        assert!(msg.message_id.is_none());
    }

    #[test]
    fn empty_cc_is_omitted_from_json() {
        let json = serde_json::to_value(parse(RAW)).unwrap();
        assert!(json.get("cc").is_none());
        assert_eq!(json["to"][0]["name"], "Bob Smith");
    }

    #[test]
    fn attachment_metadata_is_collected() {
        let msg = parse(
            "From: a@b.com\r\n\
To: c@d.com\r\n\
Subject: report\r\n\
MIME-Version: 1.0\r\n\
Content-Type: multipart/mixed; boundary=\"XYZ\"\r\n\
\r\n\
--XYZ\r\n\
Content-Type: text/plain\r\n\
\r\n\
See attached.\r\n\
--XYZ\r\n\
Content-Type: text/csv\r\n\
Content-Disposition: attachment; filename=\"q3.csv\"\r\n\
\r\n\
a,b\r\n\
1,2\r\n\
--XYZ--\r\n",
        );

        assert_eq!(msg.attachments.len(), 1);
        let att = &msg.attachments[0];
        assert_eq!(att.filename.as_deref(), Some("q3.csv"));
        assert_eq!(att.content_type.as_deref(), Some("text/csv"));
        assert_eq!(att.content_disposition.as_deref(), Some("attachment"));
        assert!(att.size > 0);
        assert!(!att.id.is_empty());
    }

    #[test]
    fn group_addresses_are_flattened() {
        let msg = parse("From: a@b.com\r\nTo: Team: x@y.com, z@y.com;\r\n\r\nbody\r\n");
        let ids: Vec<&str> = msg.to.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["x@y.com", "z@y.com"]);
    }
}
