use serde::Serialize;

/// Outcome of an analysis that needs a minimum amount of history.
///
/// `Insufficient` means "not applicable yet" and is different from
/// `NoPattern`, which means the data was examined and nothing qualified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Analysis<T> {
    Insufficient { required: usize, available: usize },
    NoPattern,
    Found(T),
}

impl<T> Analysis<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Analysis::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_found(&self) -> Option<&T> {
        match self {
            Analysis::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Analysis::Insufficient { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Analysis<U> {
        match self {
            Analysis::Insufficient {
                required,
                available,
            } => Analysis::Insufficient {
                required,
                available,
            },
            Analysis::NoPattern => Analysis::NoPattern,
            Analysis::Found(value) => Analysis::Found(f(value)),
        }
    }
}

impl<T> Analysis<Vec<T>> {
    /// `Found` for a non-empty list, `NoPattern` otherwise.
    pub fn from_list(items: Vec<T>) -> Self {
        if items.is_empty() {
            Analysis::NoPattern
        } else {
            Analysis::Found(items)
        }
    }
}
