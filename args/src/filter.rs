use std::{fmt, sync::Arc};

type Predicate = dyn Fn(&str) -> bool + Send + Sync;

/// Selects which arguments of a table get processed.
#[derive(Clone, Default)]
pub enum NameFilter {
    #[default]
    All,
    /// Accept names for which the predicate returns `true`.
    Predicate(Arc<Predicate>),
    /// Accept names present in the list.
    Names(Vec<String>),
}

impl NameFilter {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        NameFilter::Predicate(Arc::new(f))
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameFilter::Names(names.into_iter().map(Into::into).collect())
    }

    pub fn accepts(&self, name: &str) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Predicate(f) => f(name),
            NameFilter::Names(names) => names.iter().any(|n| n == name),
        }
    }
}

impl fmt::Debug for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFilter::All => write!(f, "All"),
            NameFilter::Predicate(_) => write!(f, "Predicate(..)"),
            NameFilter::Names(names) => f.debug_tuple("Names").field(names).finish(),
        }
    }
}

/// Keep the names accepted by `name_filter`, preserving their order.
pub fn filter_names<'a, I>(names: I, name_filter: &NameFilter) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().filter(|n| name_filter.accepts(n)).collect()
}
