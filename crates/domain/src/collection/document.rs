//! The collection root.

use crate::element::{CollectionElement, DEFAULT_COLLECTION_SCHEMA};
use crate::error::{DomainError, DomainResult};
use crate::event::{Event, EventType, Events};
use crate::id::{CollectionId, ElementId};
use crate::property::{Property, PropertyList};
use crate::request::{RequestAuth, RequestBody};
use crate::token::resolve_tokens;
use crate::url::Url;

use super::group::{ItemGroup, ItemList};
use super::item::{Folder, Item, ItemKind, Request};

/// Name given to collections created without one.
pub const DEFAULT_COLLECTION_NAME: &str = "New Collection";

/// Document metadata stored under `info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    /// Collection name.
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Id assigned by the remote collection API.
    pub postman_id: Option<CollectionId>,
    /// Id of the exporting user.
    pub exporter_id: Option<String>,
    /// Schema URI.
    pub schema: String,
}

impl CollectionInfo {
    /// Creates metadata with the default schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            postman_id: None,
            exporter_id: None,
            schema: DEFAULT_COLLECTION_SCHEMA.to_string(),
        }
    }
}

/// The root of a collection document.
#[derive(Debug)]
pub struct Collection {
    id: ElementId,
    /// Document metadata.
    pub info: CollectionInfo,
    items: ItemList,
    /// Collection-level scripts.
    pub events: Events,
    /// Collection variables resolved by `{{name}}` tokens.
    pub variables: PropertyList,
    /// Default auth for every request.
    pub auth: Option<RequestAuth>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_info(CollectionInfo::new(name))
    }

    /// Creates an empty collection from existing metadata.
    #[must_use]
    pub fn with_info(info: CollectionInfo) -> Self {
        Self {
            id: ElementId::generate(),
            info,
            items: ItemList::default(),
            events: Events::new(),
            variables: PropertyList::new(),
            auth: None,
        }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Renames the collection.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.info.name = name.into();
    }

    /// Returns the remote id, if the collection has been published.
    #[must_use]
    pub const fn postman_id(&self) -> Option<&CollectionId> {
        self.info.postman_id.as_ref()
    }

    /// Records the remote id.
    pub fn set_postman_id(&mut self, id: CollectionId) {
        self.info.postman_id = Some(id);
    }

    /// Adds or replaces a collection variable.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NullKeyValue`] if the variable has neither key nor value.
    pub fn add_variable(&mut self, variable: Property) -> DomainResult<()> {
        self.variables.add(variable)?;
        Ok(())
    }

    /// Returns a collection variable by key.
    #[must_use]
    pub fn variable(&self, key: &str) -> Option<&Property> {
        self.variables.get(Some(key))
    }

    /// Removes a collection variable by key.
    pub fn remove_variable(&mut self, key: &str) -> Option<Property> {
        self.variables.remove(Some(key))
    }

    /// Replaces `{{name}}` tokens with collection variable values.
    ///
    /// Substitution is a single pass; values containing tokens are not
    /// resolved again. A variable without a value substitutes the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::VariableResolution`] for a token with no variable.
    pub fn resolve_variables(&self, text: &str) -> DomainResult<String> {
        self.resolve_variables_with(text, &PropertyList::new())
    }

    /// Like [`Collection::resolve_variables`], with `overrides` shadowing the
    /// collection variables.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::VariableResolution`] for a token found in neither list.
    pub fn resolve_variables_with(
        &self,
        text: &str,
        overrides: &PropertyList,
    ) -> DomainResult<String> {
        resolve_tokens(text, |name| {
            overrides
                .get(Some(name))
                .or_else(|| self.variables.get(Some(name)))
                .map(|p| p.value().unwrap_or_default())
        })
    }

    /// Resolves path variables and then `{{name}}` tokens in a URL.
    ///
    /// # Errors
    ///
    /// Fails if either a path token or a `{{name}}` token is unresolved.
    pub fn resolve_url(&self, url: &Url) -> DomainResult<String> {
        self.resolve_variables(&url.get_url(true)?)
    }

    /// Appends a new empty folder to the root.
    ///
    /// # Errors
    ///
    /// Never fails for a freshly created folder.
    pub fn add_folder(&mut self, name: impl Into<String>) -> DomainResult<ElementId> {
        self.add_item(Folder::new(name).into())
    }

    /// Appends a new request to the root.
    ///
    /// # Errors
    ///
    /// Never fails for a freshly created request.
    pub fn add_request(
        &mut self,
        name: impl Into<String>,
        request: RequestBody,
    ) -> DomainResult<ElementId> {
        self.add_item(Request::new(name, request).into())
    }

    /// Merges `other` into this collection as a new folder under `parent`.
    ///
    /// The folder is named after `other` and receives all of its top-level
    /// items. With `copy_variables`, `other`'s variables are merged into this
    /// collection's (last write wins). With `copy_scripts`, `other`'s
    /// collection-level scripts are attached to the new folder.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAction`] if `parent` is neither this
    /// collection nor a folder in it.
    pub fn add_collection(
        &mut self,
        other: Self,
        parent: ElementId,
        copy_scripts: bool,
        copy_variables: bool,
    ) -> DomainResult<ElementId> {
        if parent != self.id && !matches!(self.find_by_id(parent), Some(Item::Folder(_))) {
            return Err(DomainError::InvalidAction(format!(
                "{parent} is not a group in this collection"
            )));
        }

        let Self {
            info,
            mut items,
            events,
            variables,
            ..
        } = other;

        let mut folder = Folder::new(info.name);
        folder.description = info.description;
        let folder_id = folder.id();
        for item in items.take_all() {
            folder.add_item(item)?;
        }
        if copy_scripts {
            folder.events = events;
        }
        if copy_variables {
            self.variables.add_all(&variables);
        }

        if parent == self.id {
            self.add_item(folder.into())?;
        } else if let Some(Item::Folder(target)) = self.find_by_id_mut(parent) {
            target.add_item(folder.into())?;
        }
        Ok(folder_id)
    }

    /// Moves the item named `item_key` into the folder named `parent_key`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if either name is unknown, otherwise
    /// the errors of [`ItemGroup::move_item`].
    pub fn move_item_by_key(&mut self, item_key: &str, parent_key: &str) -> DomainResult<()> {
        let item = self
            .get_item(item_key, None)
            .ok_or_else(|| DomainError::NotFound(item_key.to_owned()))?
            .id();
        let parent = self
            .get_item(parent_key, Some(ItemKind::Folder))
            .ok_or_else(|| DomainError::NotFound(parent_key.to_owned()))?
            .id();
        self.move_item(item, parent)
    }

    /// Returns the ids of the groups above `id`, innermost first, ending with
    /// this collection.
    #[must_use]
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let Some(path) = self.path_to(id) else {
            return Vec::new();
        };
        let mut ids: Vec<ElementId> = path.iter().rev().skip(1).map(|i| i.id()).collect();
        ids.push(self.id);
        ids
    }

    /// Returns the scripts that apply to an item, outermost first: the
    /// collection's, each enclosing folder's, then the item's own.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if `id` is not in this collection.
    pub fn script_chain(&self, id: ElementId, listen: EventType) -> DomainResult<Vec<&Event>> {
        let path = self
            .path_to(id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        Ok(std::iter::once(&self.events)
            .chain(path.into_iter().map(Item::events))
            .filter_map(|events| events.get(listen))
            .collect())
    }

    /// Returns the number of requests at any depth.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.get_items(Some(ItemKind::Request)).len()
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION_NAME)
    }
}

impl Clone for Collection {
    /// Produces a copy with fresh identities throughout.
    fn clone(&self) -> Self {
        let id = ElementId::generate();
        Self {
            id,
            info: self.info.clone(),
            items: self.items.clone_under(id),
            events: self.events.clone(),
            variables: self.variables.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl CollectionElement for Collection {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        None
    }
}

impl ItemGroup for Collection {
    fn children(&self) -> &ItemList {
        &self.items
    }

    fn children_mut(&mut self) -> &mut ItemList {
        &mut self.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn get(url: &str) -> RequestBody {
        RequestBody::get(url).unwrap()
    }

    #[test]
    fn test_default_collection() {
        let collection = Collection::default();
        assert_eq!(collection.name(), DEFAULT_COLLECTION_NAME);
        assert_eq!(collection.info.schema, DEFAULT_COLLECTION_SCHEMA);
        assert!(collection.children().is_empty());
        assert_eq!(collection.key(), None);
    }

    #[test]
    fn test_resolve_variables() {
        let mut collection = Collection::new("api");
        collection
            .add_variable(Property::new("base", "https://api.com"))
            .unwrap();

        assert_eq!(
            collection.resolve_variables("{{base}}/x").unwrap(),
            "https://api.com/x"
        );
        collection.remove_variable("base");
        assert_eq!(
            collection.resolve_variables("{{base}}/x"),
            Err(DomainError::VariableResolution("base".into()))
        );
    }

    #[test]
    fn test_resolve_null_value_is_empty() {
        let mut collection = Collection::new("api");
        collection.add_variable(Property::with_key("token")).unwrap();
        assert_eq!(collection.resolve_variables("Bearer {{token}}").unwrap(), "Bearer ");
    }

    #[test]
    fn test_overrides_shadow_variables() {
        let mut collection = Collection::new("api");
        collection.add_variable(Property::new("host", "prod")).unwrap();
        let env = PropertyList::try_from_iter([Property::new("host", "staging")]).unwrap();

        assert_eq!(
            collection.resolve_variables_with("{{host}}", &env).unwrap(),
            "staging"
        );
    }

    #[test]
    fn test_resolve_url() {
        let mut collection = Collection::new("api");
        collection
            .add_variable(Property::new("base", "https://api.com"))
            .unwrap();
        let mut url = Url::parse("{{base}}/users/:id").unwrap();
        url.set_path_variable_value("id", "7").unwrap();

        assert_eq!(collection.resolve_url(&url).unwrap(), "https://api.com/users/7");
    }

    #[test]
    fn test_add_collection() {
        let mut target = Collection::new("target");
        target.add_variable(Property::new("shared", "old")).unwrap();
        let target_id = target.id();

        let mut other = Collection::new("other");
        other.add_request("ping", get("https://other.com/ping")).unwrap();
        other.add_folder("nested").unwrap();
        other.add_variable(Property::new("shared", "new")).unwrap();
        other.events.set_pre_request_script("console.log('hi');");

        let folder_id = target.add_collection(other, target_id, true, true).unwrap();

        let folder = target.get_folder("other").unwrap();
        assert_eq!(folder.id(), folder_id);
        assert_eq!(folder.parent(), Some(target_id));
        assert_eq!(folder.children().len(), 2);
        assert_eq!(folder.get_item("ping", None).unwrap().parent(), Some(folder_id));
        assert!(folder.events.pre_request().is_some());
        assert_eq!(target.variables.value_of("shared"), Some("new"));
    }

    #[test]
    fn test_add_collection_into_folder_without_copies() {
        let mut target = Collection::new("target");
        let folder = target.add_folder("imports").unwrap();
        let mut other = Collection::new("other");
        other.add_variable(Property::new("x", "1")).unwrap();
        other.events.set_test_script("pm.test('x', () => {});");

        target.add_collection(other, folder, false, false).unwrap();

        let added = target.get_folder("other").unwrap();
        assert_eq!(added.parent(), Some(folder));
        assert!(added.events.is_empty());
        assert!(target.variables.is_empty());
    }

    #[test]
    fn test_add_collection_rejects_unknown_parent() {
        let mut target = Collection::new("target");
        let result = target.add_collection(Collection::new("o"), ElementId::generate(), true, true);
        assert!(matches!(result, Err(DomainError::InvalidAction(_))));
    }

    #[test]
    fn test_move_item_by_key() {
        let mut collection = Collection::new("c");
        collection.add_folder("source").unwrap();
        collection.add_folder("target").unwrap();
        collection
            .get_item_mut("source", None)
            .and_then(Item::as_folder_mut)
            .unwrap()
            .add_item(Request::new("req", get("https://x.io")).into())
            .unwrap();

        collection.move_item_by_key("req", "target").unwrap();

        let source = collection.get_folder("source").unwrap();
        let target = collection.get_folder("target").unwrap();
        assert!(source.get_items(None).is_empty());
        assert_eq!(target.get_items(None).len(), 1);
        assert_eq!(
            collection.get_item("req", None).unwrap().parent(),
            Some(target.id())
        );
        assert!(matches!(
            collection.move_item_by_key("nope", "target"),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_script_chain_and_ancestors() {
        let mut collection = Collection::new("c");
        collection.events.set_pre_request_script("root();");
        let outer = collection.add_folder("outer").unwrap();

        let mut inner = Folder::new("inner");
        inner.events.set_pre_request_script("inner();");
        let mut request = Request::new("leaf", get("https://x.io"));
        request.events.set_pre_request_script("leaf();");
        request.events.set_test_script("test();");
        let leaf = inner.add_item(request.into()).unwrap();
        let inner_id = inner.id();
        collection
            .get_item_mut("outer", None)
            .and_then(Item::as_folder_mut)
            .unwrap()
            .add_item(inner.into())
            .unwrap();

        let sources: Vec<String> = collection
            .script_chain(leaf, EventType::PreRequest)
            .unwrap()
            .iter()
            .map(|e| e.source_code())
            .collect();
        assert_eq!(sources, vec!["root();", "inner();", "leaf();"]);
        assert_eq!(
            collection.script_chain(leaf, EventType::Test).unwrap().len(),
            1
        );
        assert_eq!(
            collection.ancestors(leaf),
            vec![inner_id, outer, collection.id()]
        );
    }

    #[test]
    fn test_clone_is_detached_copy() {
        let mut collection = Collection::new("c");
        collection.add_request("r", get("https://x.io")).unwrap();
        let copy = collection.clone();

        assert_ne!(copy.id(), collection.id());
        assert_eq!(copy.request_count(), 1);
        assert_eq!(copy.get_item("r", None).unwrap().parent(), Some(copy.id()));
    }
}
