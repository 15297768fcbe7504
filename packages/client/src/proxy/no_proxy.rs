//! `NO_PROXY` exclusion rules
//!
//! Entries are comma separated. Supported forms:
//! * `*` matches every host
//! * `example.com` and `.example.com` match the domain and all subdomains
//! * `10.1.2.3` and `::1` match that address
//! * `192.168.0.0/16` and `fd00::/8` match the subnet

use std::net::IpAddr;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Rule {
    Wildcard,
    Domain(String),
    Ip(IpAddr),
    Subnet(IpAddr, u8),
}

/// Hosts the HTTP client should reach without a proxy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoProxy {
    rules: Vec<Rule>,
}

impl NoProxy {
    /// Parse a `NO_PROXY` value. Returns `None` when it holds no entries.
    #[must_use]
    pub fn parse(list: &str) -> Option<Self> {
        let rules: Vec<Rule> = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_rule)
            .collect();

        if rules.is_empty() {
            None
        } else {
            Some(Self { rules })
        }
    }

    /// Whether `host` bypasses the proxy. IPv6 hosts may be bracketed.
    #[must_use]
    pub fn matches(&self, host: &str) -> bool {
        let host = normalize(host);
        let ip = host.parse::<IpAddr>().ok();

        self.rules.iter().any(|rule| match rule {
            Rule::Wildcard => true,
            Rule::Domain(domain) => {
                host == *domain
                    || host
                        .strip_suffix(domain.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            }
            Rule::Ip(addr) => ip == Some(*addr),
            Rule::Subnet(network, prefix) => {
                ip.is_some_and(|ip| in_subnet(ip, *network, *prefix))
            }
        })
    }
}

fn parse_rule(entry: &str) -> Rule {
    if entry == "*" {
        return Rule::Wildcard;
    }

    if let Some((network, prefix)) = entry.split_once('/') {
        if let (Ok(network), Ok(prefix)) = (network.parse::<IpAddr>(), prefix.parse::<u8>()) {
            let width = if network.is_ipv4() { 32 } else { 128 };
            if prefix <= width {
                return Rule::Subnet(network, prefix);
            }
        }
    }

    let host = normalize(entry);
    match host.parse::<IpAddr>() {
        Ok(ip) => Rule::Ip(ip),
        Err(_) => Rule::Domain(host.trim_start_matches('.').to_owned()),
    }
}

fn normalize(host: &str) -> String {
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

fn in_subnet(ip: IpAddr, network: IpAddr, prefix: u8) -> bool {
    match (ip, network) {
        (IpAddr::V4(ip), IpAddr::V4(network)) => {
            same_prefix(u32::from(ip).into(), u32::from(network).into(), prefix, 32)
        }
        (IpAddr::V6(ip), IpAddr::V6(network)) => {
            same_prefix(u128::from(ip), u128::from(network), prefix, 128)
        }
        _ => false,
    }
}

fn same_prefix(a: u128, b: u128, prefix: u8, width: u8) -> bool {
    let shift = u32::from(width - prefix);
    a.checked_shr(shift).unwrap_or(0) == b.checked_shr(shift).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_rules_match_subdomains_only() {
        let rules = NoProxy::parse("example.com, .internal").unwrap();
        assert!(rules.matches("example.com"));
        assert!(rules.matches("api.example.com"));
        assert!(rules.matches("svc.internal"));
        assert!(!rules.matches("notexample.com"));
        assert!(!rules.matches("example.org"));
    }

    #[test]
    fn ip_and_subnet_rules() {
        let rules = NoProxy::parse("127.0.0.1,10.0.0.0/8,fd00::/8").unwrap();
        assert!(rules.matches("127.0.0.1"));
        assert!(rules.matches("10.200.3.4"));
        assert!(rules.matches("[fd12::1]"));
        assert!(!rules.matches("11.0.0.1"));
        assert!(!rules.matches("localhost"));
    }

    #[test]
    fn zero_prefix_matches_family() {
        let rules = NoProxy::parse("0.0.0.0/0").unwrap();
        assert!(rules.matches("8.8.8.8"));
        assert!(!rules.matches("::1"));
    }

    #[test]
    fn wildcard_and_empty() {
        assert!(NoProxy::parse("*").unwrap().matches("anything"));
        assert!(NoProxy::parse(" , ").is_none());
    }
}
