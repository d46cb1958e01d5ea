//! Immutable request-path construction.
//!
//! A [`RequestPath`] describes one addressable location in the remote
//! resource tree: ordered literal segments, at most one id selector on the
//! terminal segment, and ordered query decorations. Paths are values —
//! deriving a child clones the parent and never mutates it, so sibling
//! derivations are always independent.
//!
//! # Id rendering
//!
//! Two selector conventions exist in the wild; which one a path uses is
//! fixed at root construction:
//!
//! - [`SelectorStyle::Slash`] renders `tasks/42` (the Graph convention, default)
//! - [`SelectorStyle::Parenthesized`] renders `tasks('42')` (the OData convention)
//!
//! # Example
//!
//! ```rust
//! use graph_todo::queryable::RequestPath;
//!
//! let lists = RequestPath::new()
//!     .with_segment("me")?
//!     .with_segment("todo")?
//!     .with_segment("lists")?;
//!
//! let one = lists.with_id("AAMkAD")?;
//! assert_eq!(lists.to_request_path(), "me/todo/lists");
//! assert_eq!(one.to_request_path(), "me/todo/lists/AAMkAD");
//! # Ok::<(), graph_todo::queryable::InvalidPathError>(())
//! ```

use crate::queryable::errors::InvalidPathError;

/// How an id selector is rendered into the wire path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectorStyle {
    /// Render the id as its own path segment: `tasks/42`.
    #[default]
    Slash,
    /// Render the id in OData parentheses: `tasks('42')`.
    Parenthesized,
}

/// A path segment literal validated at compile time.
///
/// Resource types declare their default path segments as constants; the
/// validation runs during constant evaluation, so an illegal literal fails
/// the build instead of a request.
///
/// # Example
///
/// ```rust
/// use graph_todo::queryable::StaticSegment;
///
/// const LISTS: StaticSegment = StaticSegment::new("lists");
/// assert_eq!(LISTS.as_str(), "lists");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticSegment(&'static str);

impl StaticSegment {
    /// Creates a validated segment literal.
    ///
    /// # Panics
    ///
    /// Panics during constant evaluation if the literal is empty or contains
    /// characters illegal in a path segment.
    #[must_use]
    pub const fn new(segment: &'static str) -> Self {
        assert!(!segment.is_empty(), "path segment must not be empty");
        let bytes = segment.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            assert!(
                is_legal_segment_byte(bytes[i]),
                "path segment contains an illegal character"
            );
            i += 1;
        }
        Self(segment)
    }

    /// Returns the segment literal.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Returns `true` if the byte may appear in a path segment.
const fn is_legal_segment_byte(byte: u8) -> bool {
    !matches!(
        byte,
        b'/' | b'?' | b'#' | b'&' | b'=' | b' ' | b'\t' | b'\r' | b'\n'
    ) && byte >= 0x20
}

/// One segment of a path, optionally carrying an id selector.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Segment {
    name: String,
    id: Option<String>,
}

/// An immutable, hierarchical resource address.
///
/// See the [module documentation](self) for construction semantics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<Segment>,
    query: Vec<(String, String)>,
    style: SelectorStyle,
}

impl RequestPath {
    /// Creates an empty root path with the default selector style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty root path with the given selector style.
    ///
    /// The style is inherited by every path derived from this one.
    #[must_use]
    pub fn with_style(style: SelectorStyle) -> Self {
        Self {
            segments: Vec::new(),
            query: Vec::new(),
            style,
        }
    }

    /// Returns the selector style this path renders with.
    #[must_use]
    pub const fn style(&self) -> SelectorStyle {
        self.style
    }

    /// Returns `true` if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if the terminal segment carries an id selector.
    #[must_use]
    pub fn has_selector(&self) -> bool {
        self.segments
            .last()
            .is_some_and(|segment| segment.id.is_some())
    }

    /// Returns a new path with a literal segment appended.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPathError::EmptySegment`] for an empty name and
    /// [`InvalidPathError::IllegalSegment`] if the name contains characters
    /// illegal in a path segment.
    pub fn with_segment(&self, name: &str) -> Result<Self, InvalidPathError> {
        if name.is_empty() {
            return Err(InvalidPathError::EmptySegment);
        }
        if !name.bytes().all(is_legal_segment_byte) {
            return Err(InvalidPathError::IllegalSegment {
                segment: name.to_string(),
            });
        }

        let mut derived = self.clone();
        derived.segments.push(Segment {
            name: name.to_string(),
            id: None,
        });
        Ok(derived)
    }

    /// Returns a new path with a pre-validated segment appended.
    pub(crate) fn with_static_segment(&self, segment: StaticSegment) -> Self {
        let mut derived = self.clone();
        derived.segments.push(Segment {
            name: segment.as_str().to_string(),
            id: None,
        });
        derived
    }

    /// Returns a new path with an id selector on the terminal segment.
    ///
    /// At most one id selector may terminate an address before a subsequent
    /// segment starts a new chain.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPathError::EmptyId`] for an empty id,
    /// [`InvalidPathError::SelectionOnEmptyPath`] if the path has no
    /// segments, and [`InvalidPathError::AlreadySelected`] if the terminal
    /// segment already carries an id.
    pub fn with_id(&self, id: &str) -> Result<Self, InvalidPathError> {
        if id.is_empty() {
            return Err(InvalidPathError::EmptyId);
        }

        let mut derived = self.clone();
        let Some(terminal) = derived.segments.last_mut() else {
            return Err(InvalidPathError::SelectionOnEmptyPath);
        };

        if let Some(existing) = &terminal.id {
            return Err(InvalidPathError::AlreadySelected {
                segment: terminal.name.clone(),
                existing: existing.clone(),
            });
        }

        terminal.id = Some(id.to_string());
        Ok(derived)
    }

    /// Returns a new path with a query decoration appended.
    ///
    /// Decorations render in insertion order and are percent-encoded at
    /// render time.
    #[must_use]
    pub fn with_query(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut derived = self.clone();
        derived.query.push((key.into(), value.into()));
        derived
    }

    /// Renders the accumulated state into the literal wire path.
    ///
    /// Pure function of the current state: calling it twice yields
    /// identical output.
    #[must_use]
    pub fn to_request_path(&self) -> String {
        let mut rendered = String::new();

        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                rendered.push('/');
            }
            rendered.push_str(&segment.name);

            if let Some(id) = &segment.id {
                match self.style {
                    SelectorStyle::Slash => {
                        rendered.push('/');
                        rendered.push_str(&urlencoding::encode(id));
                    }
                    SelectorStyle::Parenthesized => {
                        rendered.push_str("('");
                        rendered.push_str(&id.replace('\'', "''"));
                        rendered.push_str("')");
                    }
                }
            }
        }

        for (index, (key, value)) in self.query.iter().enumerate() {
            rendered.push(if index == 0 { '?' } else { '&' });
            rendered.push_str(&urlencoding::encode(key));
            rendered.push('=');
            rendered.push_str(&urlencoding::encode(value));
        }

        rendered
    }
}

// Verify path types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestPath>();
    assert_send_sync::<StaticSegment>();
    assert_send_sync::<SelectorStyle>();
};
