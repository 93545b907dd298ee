//! The resource table: one descriptor per served collection.
//!
//! Routing walks [`RESOURCES`] in order and the first descriptor whose
//! segment matches wins. Handlers are shared; a descriptor only supplies
//! the collection, the member template, and the wording of responses.

use jsondeck_store::ResourceKind;

/// Static description of one served collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Backing collection.
    pub kind: ResourceKind,
    /// Single-parameter member template, e.g. `/users/:id`.
    pub template: &'static str,
    /// Capitalized singular noun used in messages.
    pub noun: &'static str,
    /// Lowercase singular, also the payload key for one record.
    pub item_key: &'static str,
    /// Payload key for the full collection.
    pub list_key: &'static str,
    /// Payload key for a newly created record.
    pub created_key: &'static str,
}

impl ResourceSpec {
    /// Path segment selecting this resource.
    pub const fn segment(&self) -> &'static str {
        self.kind.collection_name()
    }

    /// Identity field of the backing records.
    pub const fn identity_field(&self) -> &'static str {
        self.kind.identity_field()
    }
}

/// `/users`, keyed by `id`.
pub const USERS: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Users,
    template: "/users/:id",
    noun: "User",
    item_key: "user",
    list_key: "users",
    created_key: "newUser",
};

/// `/posts`, keyed by `post_id`.
pub const POSTS: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Posts,
    template: "/posts/:id",
    noun: "Post",
    item_key: "post",
    list_key: "posts",
    created_key: "newPost",
};

/// All served resources, in match order.
pub static RESOURCES: [ResourceSpec; 2] = [USERS, POSTS];

/// Find the resource served under `segment`.
pub fn lookup(segment: &str) -> Option<&'static ResourceSpec> {
    RESOURCES.iter().find(|spec| spec.segment() == segment)
}
