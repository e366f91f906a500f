//! Date predicates: `date` and `dateFormat`

use super::text_param;
use crate::coerce::{Coerced, ValueType};
use crate::error::RuleError;
use crate::rule::{RuleKind, RuleParam};
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Layouts accepted by `date`: ISO, day-first with `-` and `/`, and year/day/month
pub const ACCEPTED_DATE_LAYOUTS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%d/%m"];

/// Map a `dateFormat` token to its parse layout
pub fn layout_for(token: &str) -> Option<&'static str> {
    match token {
        "YYYY/MM/DD" => Some("%Y/%m/%d"),
        "YYYY/DD/MM" => Some("%Y/%d/%m"),
        "YYYY-MM-DD" => Some("%Y-%m-%d"),
        "YYYY-DD-MM" => Some("%Y-%d-%m"),
        _ => None,
    }
}

static YEAR_FIRST_DASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date shape is valid"));

static YEAR_FIRST_SLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}/[0-9]{2}/[0-9]{2}$").expect("date shape is valid"));

static DAY_FIRST_DASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").expect("date shape is valid"));

static DAY_FIRST_SLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("date shape is valid"));

/// Fixed-width shape of a layout: four-digit year, two-digit month and day
fn shape_of(layout: &str) -> Option<&'static Regex> {
    match layout {
        "%Y-%m-%d" | "%Y-%d-%m" => Some(&*YEAR_FIRST_DASH),
        "%Y/%m/%d" | "%Y/%d/%m" => Some(&*YEAR_FIRST_SLASH),
        "%d-%m-%Y" => Some(&*DAY_FIRST_DASH),
        "%d/%m/%Y" => Some(&*DAY_FIRST_SLASH),
        _ => None,
    }
}

// chrono accepts unpadded and signed numbers, so the shape is checked first
fn parses_as(value: &str, layout: &str) -> bool {
    shape_of(layout).is_some_and(|shape| shape.is_match(value))
        && NaiveDate::parse_from_str(value, layout).is_ok()
}

/// Passes when the value parses under any accepted layout
#[derive(Debug, Clone, Copy, Default)]
pub struct Date;

#[async_trait]
impl Predicate for Date {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let value = input.as_text().unwrap_or_default();
        Ok(ACCEPTED_DATE_LAYOUTS
            .iter()
            .any(|layout| parses_as(value, layout)))
    }
}

/// Passes when the value parses under the layout named by the parameter.
///
/// An unknown format token is a plain failure, not a configuration error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateFormat;

#[async_trait]
impl Predicate for DateFormat {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let token = text_param(&RuleKind::DateFormat, param)?;
        let value = input.as_text().unwrap_or_default();
        Ok(layout_for(&token)
            .map(|layout| parses_as(value, layout))
            .unwrap_or(false))
    }
}
