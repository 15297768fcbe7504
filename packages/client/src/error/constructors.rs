use super::types::{BoxError, Error, Kind};

/// Creates an `Error` for a proxy URL that cannot be parsed into an endpoint.
pub fn invalid_proxy_url<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidProxyUrl).with(e.into())
}

/// Creates an `Error` for a proxy scheme outside the recognized set.
pub fn unsupported_scheme(scheme: &str) -> Error {
    Error::new(Kind::UnsupportedScheme).with(format!(
        "unsupported proxy scheme `{scheme}`; expected http, https, socks5 or socks5h"
    ))
}

/// Creates an `Error` for a failed transport installation.
pub fn transport_install<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::TransportInstall).with(e.into())
}

/// Creates an `Error` for a credential manager failure.
pub fn credentials<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Credentials).with(e.into())
}

/// Creates an `Error` for a socket connection failure.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}
