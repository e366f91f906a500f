//! Format predicates: `email`, `url`, `ipformat` and `macAddress`

use crate::coerce::{Coerced, ValueType};
use crate::error::RuleError;
use crate::rule::RuleParam;
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::IpAddr;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

static MAC_ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("MAC address pattern is valid")
});

/// Base used to resolve relative references such as `/path?q=1`
static RELATIVE_BASE: Lazy<Option<url::Url>> =
    Lazy::new(|| url::Url::parse("http://localhost/").ok());

fn text_matches(input: Coerced<'_>, check: impl Fn(&str) -> bool) -> bool {
    input.as_text().map(check).unwrap_or(false)
}

/// `local@domain.tld` with a final label of two or more letters
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

#[async_trait]
impl Predicate for Email {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        Ok(text_matches(input, |email| EMAIL_REGEX.is_match(email)))
    }
}

/// An absolute URI, or a relative reference rooted at `/`
#[derive(Debug, Clone, Copy, Default)]
pub struct Url;

impl Url {
    fn is_uri_reference(value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        if url::Url::parse(value).is_ok() {
            return true;
        }
        value.starts_with('/')
            && RELATIVE_BASE
                .as_ref()
                .map(|base| base.join(value).is_ok())
                .unwrap_or(false)
    }
}

#[async_trait]
impl Predicate for Url {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        Ok(text_matches(input, Self::is_uri_reference))
    }
}

/// An IPv4 or IPv6 literal
#[derive(Debug, Clone, Copy, Default)]
pub struct IpFormat;

#[async_trait]
impl Predicate for IpFormat {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        Ok(text_matches(input, |ip| ip.parse::<IpAddr>().is_ok()))
    }
}

/// Six two-digit hex groups separated by `:` or `-`
#[derive(Debug, Clone, Copy, Default)]
pub struct MacAddress;

#[async_trait]
impl Predicate for MacAddress {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        Ok(text_matches(input, |mac| MAC_ADDRESS_REGEX.is_match(mac)))
    }
}
