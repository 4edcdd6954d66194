//! Collect-then-apply string replacement.

/// Collects distinct string replacements and applies them in one pass each.
///
/// Patterns are deduplicated on [`add`](Self::add): registering the same
/// `from` twice keeps the first replacement. Each distinct pattern is then
/// replaced everywhere at once by [`apply`](Self::apply), so repeated
/// occurrences of a placeholder never trigger repeated scans.
///
/// # Example
///
/// ```
/// use mdcook_renderer::Replacements;
///
/// let mut text = "`class:Account` and `class:Account`".to_owned();
/// let mut replacements = Replacements::new();
/// replacements.add("`class:Account`", "[Account](/classes/Account.html)");
/// replacements.add("`class:Account`", "ignored duplicate");
/// replacements.apply(&mut text);
///
/// assert_eq!(
///     text,
///     "[Account](/classes/Account.html) and [Account](/classes/Account.html)"
/// );
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    /// Create a new empty replacements collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a replacement: all occurrences of `from` will be replaced with `to`.
    ///
    /// Ignored if `from` is already registered. Replacements are applied in
    /// the order they are added.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        if self.items.iter().any(|(existing, _)| *existing == from) {
            return;
        }
        self.items.push((from, to.into()));
    }

    /// Apply all registered replacements.
    ///
    /// Note: This consumes the replacements to prevent accidental reuse.
    pub fn apply(self, text: &mut String) {
        for (from, to) in self.items {
            if text.contains(&from) {
                *text = text.replace(&from, &to);
            }
        }
    }

    /// Check if there are any replacements registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of distinct replacements registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
