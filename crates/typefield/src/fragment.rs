//! Regex fragments contributed by converters and their structural analysis.

use regex_syntax::hir::{Hir, HirKind, Look};

/// Fragment used for fields without a more specific pattern.
pub const DEFAULT_PATTERN: &str = r".+?";

/// A regular-expression substring plus the metadata needed to embed it.
///
/// Fragments match regardless of letter case unless
/// [`PatternFragment::case_sensitive`] is requested. Either way the source is
/// wrapped in an inline `(?i:...)` or `(?-i:...)` group, so the fragment keeps
/// its case behaviour wherever a host splices it.
///
/// # Examples
/// ```
/// use typefield::PatternFragment;
/// let fragment = PatternFragment::new(r"(\d+)-(\d+)").with_group_count(2);
/// assert_eq!(fragment.as_str(), r"(?i:(\d+)-(\d+))");
/// assert_eq!(fragment.group_count(), 2);
/// assert!(!fragment.is_case_sensitive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFragment {
    body: String,
    source: String,
    group_count: usize,
    case_sensitive: bool,
}

impl PatternFragment {
    /// Wrap a raw regex source with no anonymous groups, matching it without
    /// regard to letter case.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let body = source.into();
        Self {
            source: format!("(?i:{body})"),
            body,
            group_count: 0,
            case_sensitive: false,
        }
    }

    /// Take `source` as already self-contained, recording its case behaviour.
    pub(crate) fn verbatim(source: String, case_sensitive: bool) -> Self {
        Self {
            body: source.clone(),
            source,
            group_count: 0,
            case_sensitive,
        }
    }

    /// Declare how many anonymous capturing groups the source contains.
    #[must_use]
    pub fn with_group_count(mut self, group_count: usize) -> Self {
        self.group_count = group_count;
        self
    }

    /// Make the fragment distinguish letter case.
    ///
    /// ```
    /// use typefield::PatternFragment;
    /// let fragment = PatternFragment::new("[a-z]+").case_sensitive();
    /// assert_eq!(fragment.as_str(), "(?-i:[a-z]+)");
    /// assert!(fragment.is_case_sensitive());
    /// ```
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.source = format!("(?-i:{})", self.body);
        self.case_sensitive = true;
        self
    }

    /// Make the fragment match regardless of letter case, undoing
    /// [`PatternFragment::case_sensitive`].
    ///
    /// ```
    /// use typefield::PatternFragment;
    /// let fragment = PatternFragment::new("yes");
    /// assert_eq!(fragment.clone().case_sensitive().case_insensitive(), fragment);
    /// ```
    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.source = format!("(?i:{})", self.body);
        self.case_sensitive = false;
        self
    }

    /// Build an alternation of escaped literals.
    ///
    /// Longer literals are tried first so a literal that prefixes another
    /// cannot shadow it once the fragment is embedded without anchors. Equal
    /// lengths keep their input order.
    ///
    /// ```
    /// use typefield::PatternFragment;
    /// let fragment = PatternFragment::alternation(["one", "one-two", "a.b"], false);
    /// assert_eq!(fragment.as_str(), r"(?i:one\-two|a\.b|one)");
    /// ```
    #[must_use]
    pub fn alternation<I, S>(literals: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut escaped: Vec<String> = literals
            .into_iter()
            .map(|literal| regex::escape(literal.as_ref()))
            .collect();
        escaped.sort_by(|a, b| b.len().cmp(&a.len()));
        let fragment = Self::new(escaped.join("|"));
        if case_sensitive {
            fragment.case_sensitive()
        } else {
            fragment
        }
    }

    /// Regex source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Declared number of anonymous capturing groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Whether the fragment distinguishes letter case.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

impl Default for PatternFragment {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

/// Structure of a parsed fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FragmentShape {
    pub anonymous_groups: usize,
    pub named_groups: usize,
    pub anchored: bool,
    pub matches_empty: bool,
}

fn is_anchor(look: Look) -> bool {
    matches!(
        look,
        Look::Start | Look::End | Look::StartLF | Look::EndLF | Look::StartCRLF | Look::EndCRLF
    )
}

/// Parse `pattern` and count its capturing groups and anchors.
pub(crate) fn analyse(pattern: &str) -> Result<FragmentShape, regex_syntax::Error> {
    let hir = regex_syntax::parse(pattern)?;
    let mut shape = FragmentShape {
        matches_empty: hir.properties().minimum_len() == Some(0),
        ..FragmentShape::default()
    };
    let mut pending: Vec<&Hir> = vec![&hir];
    while let Some(node) = pending.pop() {
        match node.kind() {
            HirKind::Capture(capture) => {
                if capture.name.is_some() {
                    shape.named_groups += 1;
                } else {
                    shape.anonymous_groups += 1;
                }
                pending.push(&capture.sub);
            }
            HirKind::Repetition(repetition) => pending.push(&repetition.sub),
            HirKind::Concat(children) | HirKind::Alternation(children) => {
                pending.extend(children.iter());
            }
            HirKind::Look(look) => shape.anchored |= is_anchor(*look),
            _ => {}
        }
    }
    Ok(shape)
}
