//! Tree rendering functionality for debugging and visualization.

use super::Tree;

impl<T> Tree<T>
where
    T: std::fmt::Display + Clone + 'static,
{
    /// Render the tree structure as a string for debugging.
    ///
    /// Forces the whole tree; only call this on trees known to be finite.
    /// Use [`Tree::render_depth`] when the shrink sequence may be unbounded.
    pub fn render(&self) -> String {
        self.render_depth(usize::MAX)
    }

    /// Render the tree down to `max_depth` levels below the root.
    pub fn render_depth(&self, max_depth: usize) -> String {
        let mut result = String::new();
        self.render_recursive(&mut result, "", true, max_depth);
        result
    }

    fn render_recursive(&self, result: &mut String, prefix: &str, is_last: bool, depth: usize) {
        result.push_str(prefix);
        if is_last {
            result.push_str("└── ");
        } else {
            result.push_str("├── ");
        }
        result.push_str(&format!("{}\n", self.value));

        if depth == 0 {
            return;
        }

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let children: Vec<Tree<T>> = self.children().collect();
        for (i, child) in children.iter().enumerate() {
            let child_is_last = i == children.len() - 1;
            child.render_recursive(result, &child_prefix, child_is_last, depth - 1);
        }
    }

    /// Render the tree structure compactly, showing only values.
    pub fn render_compact(&self) -> String {
        let children: Vec<String> = self
            .children()
            .map(|child| child.render_compact())
            .collect();
        if children.is_empty() {
            format!("{}", self.value)
        } else {
            format!("{}[{}]", self.value, children.join(", "))
        }
    }

    /// Render the root outcome followed by its immediate shrink candidates.
    pub fn render_shrinks(&self) -> String {
        let shrinks: Vec<String> = self
            .children()
            .map(|child| format!("{}", child.value()))
            .collect();
        if shrinks.is_empty() {
            format!("{} (no shrinks)", self.value)
        } else {
            format!("{} → [{}]", self.value, shrinks.join(", "))
        }
    }
}
