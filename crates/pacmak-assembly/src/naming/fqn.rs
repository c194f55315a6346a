use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static MODULE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][A-Za-z0-9_/-]*$").expect("valid module segment regex"));

static TYPE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").expect("valid type segment regex"));

/// Fqn represents a fully qualified type name: `<module-path>.<type-path>`.
///
/// The module path is one or more lowercase-leading segments; the first may
/// carry an `@` scope marker (`@scope/lib`). The type path is one or more
/// segments starting with an uppercase letter, more than one for nested
/// types (`lib.Outer.Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fqn {
    pub module_path: Vec<String>,
    pub type_path: Vec<String>,
}

impl Fqn {
    pub fn new(module_path: Vec<String>, type_path: Vec<String>) -> Self {
        Self {
            module_path,
            type_path,
        }
    }

    /// Parse an Fqn, returning `None` when the string does not follow the
    /// `<module-path>.<type-path>` grammar.
    pub fn parse(s: &str) -> Option<Self> {
        let segments: Vec<&str> = s.split('.').collect();
        let split = segments
            .iter()
            .position(|seg| seg.starts_with(|c: char| c.is_ascii_uppercase()))?;
        if split == 0 {
            return None;
        }

        let (module, types) = segments.split_at(split);
        for (i, seg) in module.iter().enumerate() {
            let seg = if i == 0 {
                seg.strip_prefix('@').unwrap_or(seg)
            } else {
                seg
            };
            if !MODULE_SEGMENT.is_match(seg) {
                return None;
            }
        }
        if !types.iter().all(|seg| TYPE_SEGMENT.is_match(seg)) {
            return None;
        }

        Some(Self::new(
            module.iter().map(|s| s.to_string()).collect(),
            types.iter().map(|s| s.to_string()).collect(),
        ))
    }

    /// The module part as it appears in the assembly, e.g. `@scope/lib.sub`.
    pub fn module(&self) -> String {
        self.module_path.join(".")
    }

    /// The innermost type name.
    pub fn local_name(&self) -> &str {
        self.type_path.last().map(String::as_str).unwrap_or_default()
    }

    pub fn is_nested(&self) -> bool {
        self.type_path.len() > 1
    }
}

impl std::fmt::Display for Fqn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module(), self.type_path.join("."))
    }
}

impl From<Fqn> for String {
    fn from(fqn: Fqn) -> String {
        fqn.to_string()
    }
}

impl TryFrom<String> for Fqn {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Fqn::parse(&s).ok_or_else(|| format!("Invalid FQN string: {}", s))
    }
}
