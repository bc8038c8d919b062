use crate::Pagination;

/// Outcome of one step of a resource operation, applied by [`crate::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceMsg<T> {
    /// An operation was sent; clears the previous error.
    Started,
    /// A list fetch succeeded; replaces items and pagination wholesale.
    Listed {
        items: Vec<T>,
        pagination: Option<Pagination>,
    },
    /// A single-item fetch succeeded.
    Fetched(T),
    /// A create succeeded; the backend's copy of the new entity.
    Created(T),
    /// An update succeeded; the backend's copy of the updated entity.
    Updated(T),
    /// A delete succeeded.
    Deleted { id: String },
    /// The operation failed terminally.
    Failed { message: String },
}
