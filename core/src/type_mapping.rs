#![deny(missing_docs)]

//! # Type Mapping
//!
//! Static tables mapping schema kinds and formats to Rust type names.
//!
//! - **Kind table**: `integer` -> `i64`, `string` -> `String`, ...
//! - **Format table**: `int32` -> `i32`, `date-time` -> `DateTime`, `password` -> `Secret<String>`, ...
//! - **Custom formatters**: format types that need their own (de)serialization code.
//! - **Zero values**: initializer expressions per target type name.
//!
//! Formats are compared with dashes removed, so `date-time` and `datetime` are the same key.

/// Rust type used for values without any declared structure.
pub const DYNAMIC_TYPE: &str = "serde_json::Value";

/// Target type of the binary stream format (and of `file` kinds).
pub const STREAM_TYPE: &str = "Vec<u8>";

/// The format name that marks a binary stream.
pub const BINARY_FORMAT: &str = "binary";

const KIND_TYPES: &[(&str, &str)] = &[
    ("integer", "i64"),
    ("number", "f64"),
    ("boolean", "bool"),
    ("string", "String"),
    ("file", STREAM_TYPE),
];

const FORMAT_TYPES: &[(&str, &str)] = &[
    // Sized numerics
    ("int8", "i8"),
    ("int16", "i16"),
    ("int32", "i32"),
    ("int64", "i64"),
    ("uint8", "u8"),
    ("uint16", "u16"),
    ("uint32", "u32"),
    ("uint64", "u64"),
    ("float", "f32"),
    ("double", "f64"),
    // Payloads
    ("byte", "Base64"),
    ("binary", STREAM_TYPE),
    // Time
    ("date", "NaiveDate"),
    ("datetime", "DateTime"),
    ("duration", "Duration"),
    // Identifiers
    ("uuid", "Uuid"),
    ("uuid3", "Uuid"),
    ("uuid4", "Uuid"),
    ("uuid5", "Uuid"),
    ("bsonobjectid", "ObjectId"),
    // Network
    ("email", "Email"),
    ("hostname", "Hostname"),
    ("ipv4", "Ipv4Addr"),
    ("ipv6", "Ipv6Addr"),
    ("cidr", "IpNet"),
    ("mac", "MacAddr"),
    ("uri", "Url"),
    // Misc strings
    ("password", "Secret<String>"),
    ("isbn", "Isbn"),
    ("isbn10", "Isbn10"),
    ("isbn13", "Isbn13"),
    ("creditcard", "CreditCard"),
    ("ssn", "Ssn"),
    ("hexcolor", "HexColor"),
    ("rgbcolor", "RgbColor"),
];

const CUSTOM_FORMATTERS: &[&str] = &[
    "Base64",
    "NaiveDate",
    "DateTime",
    "Duration",
    "Uuid",
    "ObjectId",
    "Email",
    "Hostname",
    "Ipv4Addr",
    "Ipv6Addr",
    "IpNet",
    "MacAddr",
    "Url",
    "Secret<String>",
    "Isbn",
    "Isbn10",
    "Isbn13",
    "CreditCard",
    "Ssn",
    "HexColor",
    "RgbColor",
];

const ZERO_VALUES: &[(&str, &str)] = &[
    ("i8", "0"),
    ("i16", "0"),
    ("i32", "0"),
    ("i64", "0"),
    ("u8", "0"),
    ("u16", "0"),
    ("u32", "0"),
    ("u64", "0"),
    ("f32", "0.0"),
    ("f64", "0.0"),
    ("bool", "false"),
    ("String", "String::new()"),
    (STREAM_TYPE, "Vec::new()"),
    (DYNAMIC_TYPE, "serde_json::Value::Null"),
    ("Base64", "Base64::default()"),
    ("NaiveDate", "NaiveDate::default()"),
    ("DateTime", "DateTime::default()"),
    ("Duration", "Duration::default()"),
    ("Uuid", "Uuid::nil()"),
    ("ObjectId", "ObjectId::default()"),
    ("Email", "Email::default()"),
    ("Hostname", "Hostname::default()"),
    ("Ipv4Addr", "Ipv4Addr::UNSPECIFIED"),
    ("Ipv6Addr", "Ipv6Addr::UNSPECIFIED"),
    ("IpNet", "IpNet::default()"),
    ("MacAddr", "MacAddr::default()"),
    ("Url", "Url::default()"),
    ("Secret<String>", "Secret::default()"),
    ("Isbn", "Isbn::default()"),
    ("Isbn10", "Isbn10::default()"),
    ("Isbn13", "Isbn13::default()"),
    ("CreditCard", "CreditCard::default()"),
    ("Ssn", "Ssn::default()"),
    ("HexColor", "HexColor::default()"),
    ("RgbColor", "RgbColor::default()"),
];

/// Normalizes a format string into its table key (dashes removed).
pub fn format_key(format: &str) -> String {
    format.replace('-', "")
}

/// Returns true when the format (in any dash spelling) is the binary stream format.
pub fn is_binary_format(format: &str) -> bool {
    format_key(format) == BINARY_FORMAT
}

/// Looks up the Rust type for a schema format such as `int32` or `date-time`.
pub fn format_type(format: &str) -> Option<&'static str> {
    let key = format_key(format);
    FORMAT_TYPES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, tpe)| *tpe)
}

/// Looks up the Rust type for a bare schema kind such as `integer` or `boolean`.
pub fn kind_type(kind: &str) -> Option<&'static str> {
    KIND_TYPES
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, tpe)| *tpe)
}

/// Returns true when values of `target_type` need dedicated (de)serialization code.
pub fn is_custom_formatter(target_type: &str) -> bool {
    CUSTOM_FORMATTERS.contains(&target_type)
}

/// Canonical zero/default expression for a target type name, if known.
pub fn zero_value(target_type: &str) -> Option<&'static str> {
    ZERO_VALUES
        .iter()
        .find(|(name, _)| *name == target_type)
        .map(|(_, zero)| *zero)
}
