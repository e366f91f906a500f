//! Rule declarations and the rule-spec parser
//!
//! A rule spec is a pipe-delimited list of tokens such as
//! `"required|max:20|min:2"`. Each token names a rule kind and, after the
//! first `:`, an optional parameter.

use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separates rule tokens inside a rule spec
pub const RULE_SEPARATOR: char = '|';
/// Separates a rule kind from its parameter
pub const PARAM_SEPARATOR: char = ':';
/// Separates the items of a list parameter
pub const LIST_SEPARATOR: char = ',';

/// Known rule kinds, plus `Other` for names resolved through a custom predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    Max,
    Min,
    Email,
    Url,
    ActiveUrl,
    IpFormat,
    Date,
    DateFormat,
    Between,
    In,
    NotIn,
    Accepted,
    Size,
    Confirmed,
    DoesntEndWith,
    DoesntStartWith,
    MacAddress,
    Gt,
    Lt,
    Gte,
    Lte,
    Other(String),
}

impl RuleKind {
    /// Every built-in kind, in declaration order
    pub const BUILTIN: [RuleKind; 22] = [
        RuleKind::Required,
        RuleKind::Max,
        RuleKind::Min,
        RuleKind::Email,
        RuleKind::Url,
        RuleKind::ActiveUrl,
        RuleKind::IpFormat,
        RuleKind::Date,
        RuleKind::DateFormat,
        RuleKind::Between,
        RuleKind::In,
        RuleKind::NotIn,
        RuleKind::Accepted,
        RuleKind::Size,
        RuleKind::Confirmed,
        RuleKind::DoesntEndWith,
        RuleKind::DoesntStartWith,
        RuleKind::MacAddress,
        RuleKind::Gt,
        RuleKind::Lt,
        RuleKind::Gte,
        RuleKind::Lte,
    ];

    /// Canonical name as written in a rule spec
    pub fn as_str(&self) -> &str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Max => "max",
            RuleKind::Min => "min",
            RuleKind::Email => "email",
            RuleKind::Url => "url",
            RuleKind::ActiveUrl => "active_url",
            RuleKind::IpFormat => "ipformat",
            RuleKind::Date => "date",
            RuleKind::DateFormat => "dateFormat",
            RuleKind::Between => "between",
            RuleKind::In => "in",
            RuleKind::NotIn => "notIn",
            RuleKind::Accepted => "accepted",
            RuleKind::Size => "size",
            RuleKind::Confirmed => "confirmed",
            RuleKind::DoesntEndWith => "doesnt_end_with",
            RuleKind::DoesntStartWith => "doesnt_start_with",
            RuleKind::MacAddress => "macAddress",
            RuleKind::Gt => "gt",
            RuleKind::Lt => "lt",
            RuleKind::Gte => "gte",
            RuleKind::Lte => "lte",
            RuleKind::Other(name) => name.as_str(),
        }
    }

    /// Kinds whose parameter is a comma-separated list
    pub fn takes_list(&self) -> bool {
        matches!(self, RuleKind::Between | RuleKind::In | RuleKind::NotIn)
    }

    /// Kinds whose parameter is literal text, even when it looks numeric
    pub fn takes_text(&self) -> bool {
        matches!(
            self,
            RuleKind::DateFormat | RuleKind::DoesntEndWith | RuleKind::DoesntStartWith
        )
    }
}

impl FromStr for RuleKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = RuleKind::BUILTIN
            .iter()
            .find(|kind| kind.as_str() == s)
            .cloned()
            .unwrap_or_else(|| RuleKind::Other(s.to_string()));
        Ok(kind)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule parameter, typed once at parse time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleParam {
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl RuleParam {
    /// Type a raw parameter for the given rule kind
    pub fn parse(kind: &RuleKind, raw: &str) -> Self {
        if kind.takes_list() {
            return RuleParam::List(raw.split(LIST_SEPARATOR).map(str::to_string).collect());
        }
        if kind.takes_text() {
            return RuleParam::Text(raw.to_string());
        }
        match raw.parse::<i64>() {
            Ok(number) => RuleParam::Integer(number),
            Err(_) => RuleParam::Text(raw.to_string()),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RuleParam::Integer(number) => Some(*number),
            _ => None,
        }
    }

    /// Items of a list parameter; a scalar counts as a single item
    pub fn items(&self) -> Vec<String> {
        match self {
            RuleParam::List(items) => items.clone(),
            RuleParam::Integer(number) => vec![number.to_string()],
            RuleParam::Text(text) => vec![text.clone()],
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            RuleParam::Integer(number) => Value::from(*number),
            RuleParam::Text(text) => Value::from(text.as_str()),
            RuleParam::List(items) => Value::from(items.clone()),
        }
    }
}

impl fmt::Display for RuleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParam::Integer(number) => write!(f, "{}", number),
            RuleParam::Text(text) => f.write_str(text),
            RuleParam::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// A single parsed rule: kind plus optional parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub param: Option<RuleParam>,
}

impl Rule {
    /// Create a rule without a parameter
    pub fn new(kind: RuleKind) -> Self {
        Self { kind, param: None }
    }

    /// Create a rule with a parameter
    pub fn with_param(kind: RuleKind, param: RuleParam) -> Self {
        Self {
            kind,
            param: Some(param),
        }
    }

    /// Parse one token such as `"max:20"` or `"required"`.
    ///
    /// The kind ends at the first `:`; everything after it is the parameter,
    /// so `dateFormat:YYYY-MM-DD` and `in:a:b` keep their full parameter.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.split_once(PARAM_SEPARATOR) {
            Some((name, raw)) => {
                let kind = parse_kind(name);
                let param = RuleParam::parse(&kind, raw);
                Self::with_param(kind, param)
            }
            None => Self::new(parse_kind(token)),
        }
    }
}

fn parse_kind(name: &str) -> RuleKind {
    match name.parse() {
        Ok(kind) => kind,
        Err(infallible) => match infallible {},
    }
}

impl FromStr for Rule {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Rule::parse(s))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}{}{}", self.kind, PARAM_SEPARATOR, param),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Split a full rule spec into its rules, in declaration order.
///
/// Empty tokens are ignored, so `"required||max:2"` yields two rules.
pub fn parse_rule_spec(spec: &str) -> Vec<Rule> {
    spec.split(RULE_SEPARATOR)
        .filter(|token| !token.trim().is_empty())
        .map(Rule::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule_without_parameter() {
        let rule = Rule::parse("required");
        assert_eq!(rule.kind, RuleKind::Required);
        assert!(rule.param.is_none());
    }

    #[test]
    fn test_parse_integer_parameter() {
        let rule = Rule::parse("max:20");
        assert_eq!(rule.kind, RuleKind::Max);
        assert_eq!(rule.param, Some(RuleParam::Integer(20)));
    }

    #[test]
    fn test_parse_text_parameter() {
        let rule = Rule::parse("dateFormat:YYYY-MM-DD");
        assert_eq!(rule.kind, RuleKind::DateFormat);
        assert_eq!(rule.param, Some(RuleParam::Text("YYYY-MM-DD".to_string())));
    }

    #[test]
    fn test_list_kinds_split_on_commas() {
        let rule = Rule::parse("in:driver,client,admin");
        assert_eq!(
            rule.param,
            Some(RuleParam::List(vec![
                "driver".to_string(),
                "client".to_string(),
                "admin".to_string(),
            ]))
        );

        let rule = Rule::parse("between:1,40");
        assert_eq!(rule.param.unwrap().items(), vec!["1", "40"]);
    }

    #[test]
    fn test_only_first_separator_splits() {
        let rule = Rule::parse("doesnt_start_with:http://");
        assert_eq!(rule.kind, RuleKind::DoesntStartWith);
        assert_eq!(rule.param, Some(RuleParam::Text("http://".to_string())));
    }

    #[test]
    fn test_affix_parameters_stay_literal() {
        let rule = Rule::parse("doesnt_start_with:007");
        assert_eq!(rule.param, Some(RuleParam::Text("007".to_string())));
        assert_eq!(rule.to_string(), "doesnt_start_with:007");
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let rule = Rule::parse("uppercase");
        assert_eq!(rule.kind, RuleKind::Other("uppercase".to_string()));
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in RuleKind::BUILTIN.iter() {
            assert_eq!(&parse_kind(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_rule_round_trip() {
        for token in [
            "required",
            "max:20",
            "between:1,40",
            "in:driver,client,admin",
            "dateFormat:YYYY/MM/DD",
            "gte:-3",
        ] {
            assert_eq!(Rule::parse(token).to_string(), token);
        }
        // "+5" is an integer parameter and re-serializes without the sign
        assert_eq!(Rule::parse("gt:+5").to_string(), "gt:5");
    }

    #[test]
    fn test_parse_rule_spec() {
        let rules = parse_rule_spec("required|max:20|min:2");
        let kinds: Vec<&RuleKind> = rules.iter().map(|r| &r.kind).collect();
        assert_eq!(kinds, vec![&RuleKind::Required, &RuleKind::Max, &RuleKind::Min]);

        assert_eq!(parse_rule_spec("required||max:2").len(), 2);
        assert!(parse_rule_spec("").is_empty());
    }
}
