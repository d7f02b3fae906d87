use serde::{Deserialize, Serialize};

/// How a variant is constructed beyond the pairing group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Construction {
    /// No extra parameters.
    Plain,
    /// A fixed security parameter, e.g. the AC17 assumption size.
    SecurityParameter(usize),
    /// The maximum attribute count of the sweep, for variants whose public
    /// parameters are sized by it.
    AttributeBound,
}

impl Construction {
    /// The integers handed to the variant's constructor.
    pub fn arguments(&self, max_attributes: usize) -> Vec<usize> {
        match self {
            Construction::Plain => Vec::new(),
            Construction::SecurityParameter(value) => vec![*value],
            Construction::AttributeBound => vec![max_attributes],
        }
    }
}

/// Attribute token template; `{}` is replaced by the attribute index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeNaming(String);

impl AttributeNaming {
    pub const PLACEHOLDER: &'static str = "{}";

    pub fn new(template: &str) -> Self {
        AttributeNaming(template.to_string())
    }

    pub fn render(&self, index: usize) -> String {
        if self.0.contains(Self::PLACEHOLDER) {
            self.0.replace(Self::PLACEHOLDER, &index.to_string())
        } else {
            format!("{}{}", self.0, index)
        }
    }
}

/// Whether policy tokens are written bare or in double quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quoting {
    Bare,
    Double,
}

/// The policy string grammar of a variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyGrammar {
    pub conjunction: String,
    pub quoting: Quoting,
}

impl PolicyGrammar {
    pub fn new(conjunction: &str, quoting: Quoting) -> Self {
        PolicyGrammar {
            conjunction: conjunction.to_string(),
            quoting,
        }
    }

    pub fn quote(&self, token: &str) -> String {
        match self.quoting {
            Quoting::Bare => token.to_string(),
            Quoting::Double => format!("\"{}\"", token),
        }
    }

    /// Joins tokens into a conjunction.
    pub fn conjoin(&self, tokens: &[String]) -> String {
        let quoted: Vec<String> = tokens.iter().map(|t| self.quote(t)).collect();
        quoted.join(&format!(" {} ", self.conjunction))
    }
}

impl Default for PolicyGrammar {
    fn default() -> Self {
        PolicyGrammar::new("and", Quoting::Bare)
    }
}

/// Identifies one CP-ABE variant and the conventions it is driven with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDescriptor {
    pub name: String,
    pub construction: Construction,
    pub naming: AttributeNaming,
    #[serde(default)]
    pub grammar: PolicyGrammar,
}

impl SchemeDescriptor {
    pub fn new(name: &str, construction: Construction, naming: &str, grammar: PolicyGrammar) -> Self {
        SchemeDescriptor {
            name: name.to_string(),
            construction,
            naming: AttributeNaming::new(naming),
            grammar,
        }
    }

    pub fn bsw07() -> Self {
        SchemeDescriptor::new("BSW07", Construction::Plain, "ATTR{}", PolicyGrammar::default())
    }

    pub fn ac17() -> Self {
        SchemeDescriptor::new(
            "ac17",
            Construction::SecurityParameter(crate::schemes::ac17::ASSUMPTION_SIZE),
            "ATTR{}",
            PolicyGrammar::default(),
        )
    }

    pub fn waters11() -> Self {
        SchemeDescriptor::new("waters11", Construction::AttributeBound, "{}", PolicyGrammar::default())
    }
}

/// The descriptors known to a sweep, looked up by name.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemeCatalog {
    descriptors: Vec<SchemeDescriptor>,
}

impl SchemeCatalog {
    pub fn builtin() -> Self {
        SchemeCatalog {
            descriptors: vec![
                SchemeDescriptor::bsw07(),
                SchemeDescriptor::ac17(),
                SchemeDescriptor::waters11(),
            ],
        }
    }

    /// Adds a descriptor, replacing any with the same name.
    pub fn register(&mut self, descriptor: SchemeDescriptor) {
        self.descriptors.retain(|known| known.name != descriptor.name);
        self.descriptors.push(descriptor);
    }

    /// Exact name match first, then a case-insensitive one.
    pub fn get(&self, name: &str) -> Option<&SchemeDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.name == name)
            .or_else(|| self.descriptors.iter().find(|d| d.name.eq_ignore_ascii_case(name)))
    }

    pub fn names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name.as_str()).collect()
    }
}

impl Default for SchemeCatalog {
    fn default() -> Self {
        SchemeCatalog::builtin()
    }
}
