//! Pagination envelope shared by all listing endpoints.

use serde::Deserialize;

/// The envelope every paginated endpoint wraps its items in.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
struct ListingData<T> {
    /// Fullname of the last item, used to request the next page
    #[serde(default)]
    after: Option<String>,

    children: Vec<Thing<T>>,
}

/// A single item inside a [`Listing`]; its `kind` prefix is not needed.
#[derive(Debug, Clone, Deserialize)]
struct Thing<T> {
    data: T,
}

impl<T> Listing<T> {
    /// Returns the cursor for the next page, if the service reports one.
    pub fn after(&self) -> Option<&str> {
        self.data.after.as_deref()
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.data.children.len()
    }

    /// Returns true if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.data.children.is_empty()
    }

    /// Consumes the listing, yielding its items in the order served.
    pub fn into_items(self) -> impl Iterator<Item = T> {
        self.data.children.into_iter().map(|thing| thing.data)
    }
}
