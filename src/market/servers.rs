//! Marketplace realm table.
//!
//! The store UI scopes listings to a realm through a `<select>` whose option
//! values are opaque numeric codes. The codes are site data, not ours; when the
//! site adds a realm, extend this table.

/// Realm name and its select-option code on the store page.
pub type ServerEntry = (&'static str, &'static str);

/// All realms known to the store, in site order.
pub static SERVERS: &[ServerEntry] = &[
    ("Marmara", "409"),
    ("Bagjanamu", "418"),
    ("Arkadaşlar", "413"),
    ("Barbaros", "57"),
    ("Dandanakan", "51"),
    ("Fırtına", "439"),
    ("Lodos", "438"),
    ("Star", "437"),
    ("Safir", "436"),
    ("Lucifer", "431"),
    ("Charon", "426"),
    ("Ezel", "59"),
    ("Germania", "70"),
    ("Teutonia", "71"),
    ("Europe", "502"),
    ("Tigerghost", "524"),
    ("Chimera", "531"),
    ("Oceana", "540"),
    ("Nyx", "541"),
];

/// Fallback realm when a name is not in the table.
pub const DEFAULT_SERVER: &str = "Marmara";
const DEFAULT_CODE: &str = "409";

/// Returns the select-option code for a realm name, defaulting to Marmara
/// for unknown names (the site's own default).
pub fn selector_code(name: &str) -> &'static str {
    SERVERS.iter().find(|(n, _)| *n == name).map(|(_, code)| *code).unwrap_or(DEFAULT_CODE)
}

/// Returns all known realms.
pub fn all() -> &'static [ServerEntry] {
    SERVERS
}
