//! Collection item types

use crate::element::CollectionElement;
use crate::event::Events;
use crate::id::ElementId;
use crate::request::{RequestAuth, RequestBody};
use crate::response::Response;

use super::group::{ItemGroup, ItemList};

/// Filter for tree lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Container items.
    Folder,
    /// Leaf request items.
    Request,
}

/// A folder containing requests and other folders.
#[derive(Debug)]
pub struct Folder {
    id: ElementId,
    parent: Option<ElementId>,
    /// Folder name; also its lookup key.
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Scripts run for every request below this folder.
    pub events: Events,
    /// Auth inherited by requests below this folder.
    pub auth: Option<RequestAuth>,
    pub(super) items: ItemList,
}

impl Folder {
    /// Creates a new empty folder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ElementId::generate(),
            parent: None,
            name: name.into(),
            description: None,
            events: Events::new(),
            auth: None,
            items: ItemList::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the id of the containing group.
    #[must_use]
    pub const fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

impl Clone for Folder {
    /// Produces a detached copy with fresh identities throughout.
    fn clone(&self) -> Self {
        let id = ElementId::generate();
        Self {
            id,
            parent: None,
            name: self.name.clone(),
            description: self.description.clone(),
            events: self.events.clone(),
            auth: self.auth.clone(),
            items: self.items.clone_under(id),
        }
    }
}

impl CollectionElement for Folder {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl ItemGroup for Folder {
    fn children(&self) -> &ItemList {
        &self.items
    }

    fn children_mut(&mut self) -> &mut ItemList {
        &mut self.items
    }
}

/// A request item: one HTTP request and its saved example responses.
#[derive(Debug)]
pub struct Request {
    id: ElementId,
    parent: Option<ElementId>,
    /// Request name; also its lookup key.
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Pre-request and test scripts.
    pub events: Events,
    /// The HTTP request.
    pub request: RequestBody,
    /// Example responses.
    pub responses: Vec<Response>,
}

impl Request {
    /// Creates a request item.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestBody) -> Self {
        Self {
            id: ElementId::generate(),
            parent: None,
            name: name.into(),
            description: None,
            events: Events::new(),
            request,
            responses: Vec::new(),
        }
    }

    /// Returns the id of the containing group.
    #[must_use]
    pub const fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Appends an example response.
    pub fn add_response(&mut self, response: Response) {
        self.responses.push(response);
    }

    /// Removes the first example response with the given name.
    pub fn remove_response(&mut self, name: &str) -> Option<Response> {
        let index = self.responses.iter().position(|r| r.name == name)?;
        Some(self.responses.remove(index))
    }
}

impl Clone for Request {
    /// Produces a detached copy with a fresh identity.
    fn clone(&self) -> Self {
        Self {
            id: ElementId::generate(),
            parent: None,
            name: self.name.clone(),
            description: self.description.clone(),
            events: self.events.clone(),
            request: self.request.clone(),
            responses: self.responses.clone(),
        }
    }
}

impl CollectionElement for Request {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// An item in a collection (either a folder or a request).
#[derive(Debug, Clone)]
pub enum Item {
    /// A folder containing other items
    Folder(Folder),
    /// A request
    Request(Request),
}

impl Item {
    /// Returns the kind of this item.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Folder(_) => ItemKind::Folder,
            Self::Request(_) => ItemKind::Request,
        }
    }

    /// Returns the name of this item.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::Request(r) => &r.name,
        }
    }

    /// Renames this item.
    pub fn set_name(&mut self, name: impl Into<String>) {
        match self {
            Self::Folder(f) => f.name = name.into(),
            Self::Request(r) => r.name = name.into(),
        }
    }

    /// Returns the description of this item.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Folder(f) => f.description.as_deref(),
            Self::Request(r) => r.description.as_deref(),
        }
    }

    /// Returns the id of the containing group.
    #[must_use]
    pub const fn parent(&self) -> Option<ElementId> {
        match self {
            Self::Folder(f) => f.parent,
            Self::Request(r) => r.parent,
        }
    }

    pub(super) const fn set_parent(&mut self, parent: Option<ElementId>) {
        match self {
            Self::Folder(f) => f.parent = parent,
            Self::Request(r) => r.parent = parent,
        }
    }

    /// Returns the scripts of this item.
    #[must_use]
    pub const fn events(&self) -> &Events {
        match self {
            Self::Folder(f) => &f.events,
            Self::Request(r) => &r.events,
        }
    }

    /// Returns the scripts of this item mutably.
    pub const fn events_mut(&mut self) -> &mut Events {
        match self {
            Self::Folder(f) => &mut f.events,
            Self::Request(r) => &mut r.events,
        }
    }

    /// Returns the folder, if this item is one.
    #[must_use]
    pub const fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(f) => Some(f),
            Self::Request(_) => None,
        }
    }

    /// Returns the folder mutably, if this item is one.
    pub const fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Self::Folder(f) => Some(f),
            Self::Request(_) => None,
        }
    }

    /// Returns the request, if this item is one.
    #[must_use]
    pub const fn as_request(&self) -> Option<&Request> {
        match self {
            Self::Request(r) => Some(r),
            Self::Folder(_) => None,
        }
    }

    /// Returns the request mutably, if this item is one.
    pub const fn as_request_mut(&mut self) -> Option<&mut Request> {
        match self {
            Self::Request(r) => Some(r),
            Self::Folder(_) => None,
        }
    }

    pub(super) fn matches(&self, key: &str, filter: Option<ItemKind>) -> bool {
        self.name() == key && filter.is_none_or(|kind| kind == self.kind())
    }
}

impl CollectionElement for Item {
    fn id(&self) -> ElementId {
        match self {
            Self::Folder(f) => f.id,
            Self::Request(r) => r.id,
        }
    }

    fn key(&self) -> Option<&str> {
        Some(self.name())
    }
}

impl From<Folder> for Item {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

impl From<Request> for Item {
    fn from(request: Request) -> Self {
        Self::Request(request)
    }
}
