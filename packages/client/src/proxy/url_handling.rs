//! URL text helpers for proxy parsing
//!
//! Percent-decoding of user-info, explicit port recovery and redaction of
//! credentials before a URL reaches a log line or an error message.

use url::Url;

use crate::error::{self, Result};

/// Percent-decode one user-info component (username or password).
pub(crate) fn decode_userinfo(raw: &str) -> Result<String> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| error::invalid_proxy_url(format!("credentials are not valid UTF-8: {e}")))
}

/// Port written in the URL text.
///
/// The URL parser drops a port equal to the scheme default (`http://proxy:80`
/// parses with `port() == None`), so the authority text is consulted before
/// concluding the port is missing.
pub(crate) fn explicit_port(url: &Url, raw: &str) -> Option<u16> {
    if let Some(port) = url.port() {
        return Some(port);
    }

    let default = url.port_or_known_default()?;
    let (_, port_text) = authority(raw)?.rsplit_once(':')?;
    port_text.parse::<u16>().ok().filter(|port| *port == default)
}

/// Host and port portion of a URL string, without user-info.
fn authority(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    Some(match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    })
}

/// Replace any user-info in a proxy URL string with `***`.
///
/// Works on unparseable input too, since it feeds error messages for URLs
/// that failed to parse. There a password may hold an unencoded `/`, `?` or
/// `#`, so everything up to the last `@` is treated as user-info.
pub fn redact(raw: &str) -> String {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return raw.to_owned();
    };
    let userinfo_end = if Url::parse(raw).is_ok() {
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        rest[..end].rfind('@')
    } else {
        rest.rfind('@')
    };
    match userinfo_end {
        Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
        None => raw.to_owned(),
    }
}
