use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{DomainKind, PResult, Parser};
use crate::diagnostics::{InvalidEmail, Reason, WarningKind};
use crate::lexer::TokenKind;

const IPV6_TAG: &str = "IPv6:";

impl Parser<'_, '_> {
    /// `[` IPv4 `]` or `[IPv6:` IPv6 `]`.
    pub(super) fn domain_literal(&mut self) -> PResult<(String, DomainKind)> {
        let open = self.lexer.next_token();
        self.count_domain(&open)?;
        let mut content = String::new();

        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::CloseBracket => {
                    self.count_domain(&token)?;
                    break;
                }
                TokenKind::GenericChars | TokenKind::Dot | TokenKind::Colon => {
                    self.count_domain(&token)?;
                    content.push_str(token.text);
                }
                TokenKind::Eof => {
                    return Err(InvalidEmail::at(Reason::DomainLiteralMalformed, &open));
                }
                _ => return Err(InvalidEmail::at(Reason::DomainLiteralMalformed, &token)),
            }
        }

        let ip = parse_address_literal(&content)
            .ok_or_else(|| InvalidEmail::at(Reason::DomainLiteralMalformed, &open))?;
        if ip.is_ipv6() && compresses_single_group(&content[IPV6_TAG.len()..]) {
            self.warn(WarningKind::Ipv6Deprecated, open.position);
        }
        self.warn(WarningKind::DomainLiteral, open.position);

        Ok((format!("[{content}]"), DomainKind::Literal(ip)))
    }
}

/// Content of a domain literal, brackets excluded.
fn parse_address_literal(content: &str) -> Option<IpAddr> {
    match strip_ipv6_tag(content) {
        Some(rest) => rest.parse::<Ipv6Addr>().ok().map(IpAddr::V6),
        None => content.parse::<Ipv4Addr>().ok().map(IpAddr::V4),
    }
}

fn strip_ipv6_tag(content: &str) -> Option<&str> {
    let head = content.get(..IPV6_TAG.len())?;
    if head.eq_ignore_ascii_case(IPV6_TAG) {
        Some(&content[IPV6_TAG.len()..])
    } else {
        None
    }
}

/// RFC 5321 §4.1.3: `::` must stand for at least two groups.
fn compresses_single_group(text: &str) -> bool {
    let Some((head, tail)) = text.split_once("::") else {
        return false;
    };
    group_count(head) + group_count(tail) == 7
}

fn group_count(part: &str) -> usize {
    if part.is_empty() {
        return 0;
    }
    part.split(':')
        .map(|group| if group.contains('.') { 2 } else { 1 })
        .sum()
}
