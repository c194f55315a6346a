/// A Cursor for navigating the assembly with context.
///
/// Segments are relative: entering namespace `lib.sub` under `lib` pushes
/// `sub`, so [`Cursor::location`] reads `lib.sub.Calculator.add`.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    path_stack: Vec<String>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a named segment of the tree (pushes to path stack).
    pub fn enter(&mut self, segment: &str) {
        self.path_stack.push(segment.to_string());
    }

    /// Enter a namespace given its full name.
    pub fn enter_namespace(&mut self, full_name: &str) {
        let segment = if self.path_stack.is_empty() {
            full_name
        } else {
            let parent = self.location();
            full_name
                .strip_prefix(parent.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(full_name)
        };
        self.enter(segment);
    }

    /// Exit the current segment (pops from path stack).
    pub fn exit(&mut self) {
        self.path_stack.pop();
    }

    /// Dotted location of the current node, for diagnostics.
    pub fn location(&self) -> String {
        self.path_stack.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_segments_are_relative() {
        let mut cursor = Cursor::new();
        cursor.enter_namespace("jsii-calc");
        cursor.enter_namespace("jsii-calc.submodule");
        cursor.enter("Calculator");
        assert_eq!(cursor.location(), "jsii-calc.submodule.Calculator");

        cursor.exit();
        cursor.exit();
        assert_eq!(cursor.location(), "jsii-calc");
    }

    #[test]
    fn test_unrelated_child_namespace_kept_whole() {
        let mut cursor = Cursor::new();
        cursor.enter_namespace("lib");
        cursor.enter_namespace("library.x");
        assert_eq!(cursor.location(), "lib.library.x");
    }
}
