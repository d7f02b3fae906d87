//! Conjunctive policy parsing.
//!
//! The provider understands policies that are a plain conjunction of attribute
//! tokens. Tokens are bare words (`ATTR1`), numbers (`7`) or double-quoted
//! strings (`"A B"`), separated by the case-insensitive keyword `and`.
use pest::Parser;
use pest_derive::Parser;
use crate::error::SchemeError;

pub mod msp;

#[derive(Parser)]
#[grammar = "utils/policy/conjunction.pest"]
pub(crate) struct ConjunctionPolicyParser;

/// Parses a conjunctive policy into its ordered attribute tokens.
///
/// # Arguments
///
///	* `policy` - A policy such as `ATTR1 and ATTR2`
///
pub fn parse(policy: &str) -> Result<Vec<String>, SchemeError> {
    let mut pairs = ConjunctionPolicyParser::parse(Rule::content, policy)?;
    let content = match pairs.next() {
        Some(content) => content,
        None => return Err(SchemeError::new("empty policy")),
    };
    let mut attributes: Vec<String> = Vec::new();
    for pair in content.into_inner() {
        let token = match pair.as_rule() {
            Rule::bare => pair.as_str(),
            Rule::quoted => match pair.into_inner().next() {
                Some(inner) => inner.as_str(),
                None => return Err(SchemeError::new("empty quoted attribute")),
            },
            _ => continue,
        };
        if attributes.iter().any(|known| known == token) {
            return Err(SchemeError::new(&format!("duplicate attribute {} in policy", token)));
        }
        attributes.push(token.to_string());
    }
    Ok(attributes)
}

/// Checks that every attribute required by the policy is held.
pub fn satisfies(held: &[String], required: &[String]) -> bool {
    !required.is_empty() && required.iter().all(|attr| held.contains(attr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_parsing() {
        let attrs = parse("ATTR1 and ATTR2 and ATTR3").unwrap();
        assert_eq!(attrs, vec!["ATTR1", "ATTR2", "ATTR3"]);
    }

    #[test]
    fn test_numeric_and_quoted_parsing() {
        assert_eq!(parse("1 AND 2 and 3").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(parse(r#""A" and "B C""#).unwrap(), vec!["A", "B C"]);
        assert_eq!(parse("android and band").unwrap(), vec!["android", "band"]);
    }

    #[test]
    fn test_single_attribute() {
        assert_eq!(parse("ATTR1").unwrap(), vec!["ATTR1"]);
    }

    #[test]
    fn test_rejected_policies() {
        assert!(parse("").is_err());
        assert!(parse("A or B").is_err());
        assert!(parse("A and").is_err());
        assert!(parse("and").is_err());
        assert!(parse("A and A").is_err());
    }

    #[test]
    fn test_satisfies() {
        let held = vec![String::from("A"), String::from("B"), String::from("C")];
        assert!(satisfies(&held, &[String::from("A"), String::from("C")]));
        assert!(!satisfies(&held, &[String::from("A"), String::from("D")]));
        assert!(!satisfies(&held, &[]));
    }
}
