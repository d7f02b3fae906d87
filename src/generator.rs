//! Attribute lists and conjunctive policies for a sweep point.
use crate::adapter::SchemeDescriptor;

/// The attributes of one sweep point and the policy requiring all of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSet {
    pub attributes: Vec<String>,
    pub policy: String,
}

/// Builds the tokens `1..=count` in the descriptor's naming convention and
/// their conjunction in its policy grammar.
///
/// The output only depends on the inputs. `count` must be at least one.
pub fn generate(descriptor: &SchemeDescriptor, count: usize) -> AttributeSet {
    let attributes: Vec<String> = (1..=count).map(|i| descriptor.naming.render(i)).collect();
    let policy = descriptor.grammar.conjoin(&attributes);
    AttributeSet { attributes, policy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{Construction, PolicyGrammar, Quoting};
    use crate::utils::policy::parse;

    #[test]
    fn test_waters11_tokens() {
        let set = generate(&SchemeDescriptor::waters11(), 3);
        assert_eq!(set.attributes, vec!["1", "2", "3"]);
        assert_eq!(set.policy, "1 and 2 and 3");
    }

    #[test]
    fn test_prefixed_tokens() {
        let set = generate(&SchemeDescriptor::bsw07(), 2);
        assert_eq!(set.attributes, vec!["ATTR1", "ATTR2"]);
        assert_eq!(set.policy, "ATTR1 and ATTR2");
        let single = generate(&SchemeDescriptor::ac17(), 1);
        assert_eq!(single.policy, "ATTR1");
    }

    #[test]
    fn test_deterministic() {
        for descriptor in [SchemeDescriptor::bsw07(), SchemeDescriptor::ac17(), SchemeDescriptor::waters11()] {
            for count in 1..=8 {
                assert_eq!(generate(&descriptor, count), generate(&descriptor, count));
            }
        }
    }

    #[test]
    fn test_policy_parses_back_to_attributes() {
        let quoted = SchemeDescriptor::new("quoted", Construction::Plain, "role {}", PolicyGrammar::new("AND", Quoting::Double));
        for descriptor in [SchemeDescriptor::bsw07(), SchemeDescriptor::waters11(), quoted] {
            let set = generate(&descriptor, 6);
            assert_eq!(parse(&set.policy).unwrap(), set.attributes);
        }
    }
}
