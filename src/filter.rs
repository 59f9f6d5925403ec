//! Filter state for listing pages, kept in the URL query string.
//!
//! A listing page's filter selection lives entirely in its URL. On each
//! request the query string is parsed into a [`FilterState`]; every filter
//! control on the rendered page links to the query string of the state that
//! clicking it would produce ([`FilterState::toggled`]). Pages are therefore
//! shareable, reloadable, and the browser's history is the undo stack.
//!
//! ## Dimensions
//!
//! | Dimension | Param | Identity | Values |
//! |-----------|-------|----------|--------|
//! | Year | `year` | `all` | calendar year or year label |
//! | Classification | `classification` (legacy `filter`) | `all` | tag |
//! | Status | `status` | `all` | `current`, `past` |
//! | Format | `format` | `all` | `solo`, `group` |
//! | View | `view` | `grid` | `grid`, `list` |
//!
//! Identity values are never stored and never written to the URL, so the
//! unfiltered page is always the bare path.

use std::collections::{BTreeMap, HashMap};
use url::form_urlencoded;

/// Identity value of every filtering dimension.
pub const ALL: &str = "all";

/// A named axis a listing can be filtered or displayed by.
///
/// Declaration order is the order parameters appear in generated URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Year,
    Classification,
    Status,
    Format,
    View,
}

impl Dimension {
    /// Query parameter name written to URLs.
    pub fn param(self) -> &'static str {
        match self {
            Dimension::Year => "year",
            Dimension::Classification => "classification",
            Dimension::Status => "status",
            Dimension::Format => "format",
            Dimension::View => "view",
        }
    }

    /// Older parameter names still accepted on read, lowest precedence last.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Dimension::Classification => &["filter"],
            _ => &[],
        }
    }

    /// The "no selection" value.
    pub fn identity(self) -> &'static str {
        match self {
            Dimension::View => ViewMode::Grid.as_str(),
            _ => ALL,
        }
    }

    /// Whether this dimension narrows the item set (view only changes layout).
    pub fn is_filtering(self) -> bool {
        !matches!(self, Dimension::View)
    }

    /// Canonical stored value, or `None` for identity and unrecognized values.
    fn canonical(self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(self.identity()) {
            return None;
        }
        let allowed: &[&str] = match self {
            Dimension::Status => &["current", "past"],
            Dimension::Format => &["solo", "group"],
            Dimension::View => &["list"],
            Dimension::Year | Dimension::Classification => return Some(value.to_string()),
        };
        allowed
            .iter()
            .find(|a| a.eq_ignore_ascii_case(value))
            .map(|a| a.to_string())
    }
}

/// Layout of a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// Active selection per dimension for one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selections: BTreeMap<Dimension, String>,
}

impl FilterState {
    /// A state with every dimension at its identity value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the selections for `recognized` dimensions from a raw query string.
    ///
    /// Unrecognized parameters are ignored. When a dimension's primary name
    /// and a legacy alias are both present, the primary name wins. The first
    /// occurrence of a repeated parameter is used.
    pub fn initialize(query: Option<&str>, recognized: &[Dimension]) -> Self {
        let mut params: HashMap<String, String> = HashMap::new();
        for (key, value) in form_urlencoded::parse(query.unwrap_or("").as_bytes()) {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        let mut state = Self::new();
        for &dim in recognized {
            let names = std::iter::once(dim.param()).chain(dim.aliases().iter().copied());
            let raw = names
                .filter_map(|name| params.get(name))
                .find(|v| !v.trim().is_empty());
            if let Some(value) = raw.and_then(|v| dim.canonical(v)) {
                state.selections.insert(dim, value);
            }
        }
        state
    }

    /// Current value of a dimension (its identity when unset).
    pub fn get(&self, dim: Dimension) -> &str {
        self.selections
            .get(&dim)
            .map(String::as_str)
            .unwrap_or(dim.identity())
    }

    /// Whether `value` is the current value of `dim`.
    pub fn is_active(&self, dim: Dimension, value: &str) -> bool {
        match dim.canonical(value) {
            Some(v) => self.selections.get(&dim) == Some(&v),
            None => !self.selections.contains_key(&dim),
        }
    }

    /// Select `value` for `dim`. Selecting the active value again deselects it.
    pub fn set_filter(&mut self, dim: Dimension, value: &str) {
        match dim.canonical(value) {
            Some(v) if self.selections.get(&dim) != Some(&v) => {
                self.selections.insert(dim, v);
            }
            _ => {
                self.selections.remove(&dim);
            }
        }
    }

    /// The state [`set_filter`](Self::set_filter) would produce, leaving `self` untouched.
    pub fn toggled(&self, dim: Dimension, value: &str) -> Self {
        let mut next = self.clone();
        next.set_filter(dim, value);
        next
    }

    /// The state with `dim` reset to its identity value.
    pub fn cleared(&self, dim: Dimension) -> Self {
        let mut next = self.clone();
        next.selections.remove(&dim);
        next
    }

    /// Non-identity filtering selections, in dimension order.
    pub fn active_filters(&self) -> impl Iterator<Item = (Dimension, &str)> {
        self.selections
            .iter()
            .filter(|(dim, _)| dim.is_filtering())
            .map(|(dim, value)| (*dim, value.as_str()))
    }

    pub fn view_mode(&self) -> ViewMode {
        match self.get(Dimension::View) {
            "list" => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }

    /// Query string of all non-identity selections, without a leading `?`.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (dim, value) in &self.selections {
            serializer.append_pair(dim.param(), value);
        }
        serializer.finish()
    }

    /// `base` with this state's query appended (no `?` when unfiltered).
    pub fn href(&self, base: &str) -> String {
        let query = self.to_query();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{query}")
        }
    }
}
