//! Resource types served by Jsondeck.
//!
//! Users and posts share one record shape but use different identity
//! fields: users are keyed by `id`, posts by `post_id`. The asymmetry is
//! part of the stored data and is kept as-is.

use core::fmt;

/// A resource collection with its own backing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    /// The `users` collection, keyed by `id`.
    Users,
    /// The `posts` collection, keyed by `post_id`.
    Posts,
}

impl ResourceKind {
    /// Every resource kind, in routing order.
    pub const ALL: [Self; 2] = [Self::Users, Self::Posts];

    /// The collection name, also used as the first path segment.
    pub const fn collection_name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
        }
    }

    /// The record field used to look up and match records.
    pub const fn identity_field(self) -> &'static str {
        match self {
            Self::Users => "id",
            Self::Posts => "post_id",
        }
    }

    /// File name of the backing document.
    pub const fn document_name(self) -> &'static str {
        match self {
            Self::Users => "users.json",
            Self::Posts => "posts.json",
        }
    }

    /// Resolve a path segment to a resource kind.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection_name() == segment)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_name())
    }
}
