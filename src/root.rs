//! Rendering roots that carry the light/dark style-scope marker.

use std::fmt;

/// Something that can carry style-scope markers, like class tokens on a
/// document's top-level element.
///
/// The store only ever calls [`swap_markers`](StyleRoot::swap_markers) with
/// both theme markers in `remove`, so after each call exactly one of them is
/// present.
pub trait StyleRoot {
    /// Removes every token in `remove`, then adds `add`, as a single step.
    fn swap_markers(&mut self, remove: &[&str], add: &str);
}

impl<R: StyleRoot + ?Sized> StyleRoot for Box<R> {
    fn swap_markers(&mut self, remove: &[&str], add: &str) {
        (**self).swap_markers(remove, add);
    }
}

/// An ordered set of class tokens.
///
/// # Example
///
/// ```rust
/// use colorpref::{ClassList, StyleRoot};
///
/// let mut root = ClassList::from_tokens(["antialiased", "light"]);
/// root.swap_markers(&["light", "dark"], "dark");
/// assert!(root.contains("dark"));
/// assert!(!root.contains("light"));
/// assert_eq!(root.to_string(), "antialiased dark");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Creates an empty class list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a class list from tokens, dropping duplicates.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for token in tokens {
            list.add(token.as_ref());
        }
        list
    }

    /// Adds a token if it is not already present.
    pub fn add(&mut self, token: &str) {
        if !token.is_empty() && !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }

    /// Removes a token if present.
    pub fn remove(&mut self, token: &str) {
        self.tokens.retain(|t| t != token);
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Tokens in insertion order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl StyleRoot for ClassList {
    fn swap_markers(&mut self, remove: &[&str], add: &str) {
        self.tokens.retain(|t| !remove.contains(&t.as_str()));
        self.add(add);
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_ignores_duplicates_and_empty() {
        let mut list = ClassList::new();
        list.add("dark");
        list.add("dark");
        list.add("");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_swap_keeps_unrelated_tokens() {
        let mut list = ClassList::from_tokens(["font-sans", "dark", "scroll-smooth"]);
        list.swap_markers(&["light", "dark"], "light");
        assert_eq!(list.to_string(), "font-sans scroll-smooth light");
    }

    #[test]
    fn test_swap_is_idempotent() {
        let mut once = ClassList::from_tokens(["root"]);
        once.swap_markers(&["light", "dark"], "dark");
        let mut twice = once.clone();
        twice.swap_markers(&["light", "dark"], "dark");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_swap_clears_both_markers_first() {
        let mut list = ClassList::from_tokens(["light", "dark"]);
        list.swap_markers(&["light", "dark"], "light");
        assert_eq!(list.tokens().collect::<Vec<_>>(), vec!["light"]);
    }

    #[test]
    fn test_remove() {
        let mut list = ClassList::from_tokens(["a", "b"]);
        list.remove("a");
        list.remove("missing");
        assert!(!list.contains("a"));
        assert!(list.contains("b"));
    }
}
