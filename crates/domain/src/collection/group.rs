//! Ordered child containers and the tree operations shared by folders and
//! the collection root.

use crate::element::CollectionElement;
use crate::error::{DomainError, DomainResult};
use crate::id::ElementId;

use super::item::{Folder, Item, ItemKind, Request};

/// The ordered children of a group.
///
/// Only the owning group attaches or detaches entries, which keeps every
/// child's parent id in sync with the group that holds it.
#[derive(Debug, Default)]
pub struct ItemList {
    items: Vec<Item>,
}

impl ItemList {
    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over direct children in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Returns the direct child at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub(super) fn clone_under(&self, owner: ElementId) -> Self {
        let mut copy = Self::default();
        for item in &self.items {
            copy.attach(owner, item.clone(), None);
        }
        copy
    }

    pub(super) fn attach(&mut self, owner: ElementId, mut item: Item, position: Option<usize>) {
        item.set_parent(Some(owner));
        match position {
            Some(index) => self.items.insert(index, item),
            None => self.items.push(item),
        }
    }

    pub(super) fn take_all(&mut self) -> Vec<Item> {
        self.items
            .drain(..)
            .map(|mut item| {
                item.set_parent(None);
                item
            })
            .collect()
    }

    fn detach_at(&mut self, index: usize) -> Item {
        let mut item = self.items.remove(index);
        item.set_parent(None);
        item
    }

    fn find_by_key(&self, key: &str, filter: Option<ItemKind>) -> Option<&Item> {
        for item in &self.items {
            if item.matches(key, filter) {
                return Some(item);
            }
            if let Item::Folder(folder) = item
                && let Some(found) = folder.items.find_by_key(key, filter)
            {
                return Some(found);
            }
        }
        None
    }

    fn find_by_key_mut(&mut self, key: &str, filter: Option<ItemKind>) -> Option<&mut Item> {
        for item in &mut self.items {
            if item.matches(key, filter) {
                return Some(item);
            }
            if let Item::Folder(folder) = item
                && let Some(found) = folder.items.find_by_key_mut(key, filter)
            {
                return Some(found);
            }
        }
        None
    }

    fn find_by_id(&self, id: ElementId) -> Option<&Item> {
        for item in &self.items {
            if item.id() == id {
                return Some(item);
            }
            if let Item::Folder(folder) = item
                && let Some(found) = folder.items.find_by_id(id)
            {
                return Some(found);
            }
        }
        None
    }

    fn find_by_id_mut(&mut self, id: ElementId) -> Option<&mut Item> {
        for item in &mut self.items {
            if item.id() == id {
                return Some(item);
            }
            if let Item::Folder(folder) = item
                && let Some(found) = folder.items.find_by_id_mut(id)
            {
                return Some(found);
            }
        }
        None
    }

    fn path_to<'a>(&'a self, id: ElementId, path: &mut Vec<&'a Item>) -> bool {
        for item in &self.items {
            path.push(item);
            if item.id() == id {
                return true;
            }
            if let Item::Folder(folder) = item
                && folder.items.path_to(id, path)
            {
                return true;
            }
            path.pop();
        }
        false
    }

    fn collect<'a>(&'a self, filter: Option<ItemKind>, out: &mut Vec<&'a Item>) {
        for item in &self.items {
            match item {
                Item::Request(_) if filter != Some(ItemKind::Folder) => out.push(item),
                Item::Request(_) => {}
                Item::Folder(folder) => {
                    if filter == Some(ItemKind::Folder) {
                        out.push(item);
                    }
                    folder.items.collect(filter, out);
                }
            }
        }
    }

    /// Detaches the item with `id` anywhere below, returning its former parent
    /// and position.
    fn take_by_id(&mut self, owner: ElementId, id: ElementId) -> Option<(ElementId, usize, Item)> {
        if let Some(index) = self.items.iter().position(|i| i.id() == id) {
            return Some((owner, index, self.detach_at(index)));
        }
        for item in &mut self.items {
            if let Item::Folder(folder) = item {
                let folder_id = folder.id();
                if let Some(taken) = folder.items.take_by_id(folder_id, id) {
                    return Some(taken);
                }
            }
        }
        None
    }

    /// Attaches `item` to the group `target` (this list's owner or any folder
    /// below). Hands the item back if no such group exists.
    fn attach_to(
        &mut self,
        owner: ElementId,
        target: ElementId,
        item: Item,
        position: Option<usize>,
    ) -> Result<(), Item> {
        if target == owner {
            self.attach(owner, item, position);
            return Ok(());
        }
        match self.find_by_id_mut(target) {
            Some(Item::Folder(folder)) => {
                let folder_id = folder.id();
                folder.items.attach(folder_id, item, position);
                Ok(())
            }
            _ => Err(item),
        }
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A container item: a [`Folder`] or the collection root.
pub trait ItemGroup: CollectionElement {
    /// Returns the direct children.
    fn children(&self) -> &ItemList;

    /// Returns the direct children mutably.
    fn children_mut(&mut self) -> &mut ItemList;

    /// Appends an item, making this group its parent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RecursiveItemAdd`] if `item` is this group.
    fn add_item(&mut self, item: Item) -> DomainResult<ElementId> {
        let id = item.id();
        if id == self.id() {
            return Err(DomainError::RecursiveItemAdd(item.name().to_owned()));
        }
        let owner = self.id();
        self.children_mut().attach(owner, item, None);
        Ok(id)
    }

    /// Inserts an item at `position` among the direct children.
    ///
    /// # Errors
    ///
    /// - [`DomainError::DuplicateItem`] if a direct child has the same key.
    /// - [`DomainError::RecursiveItemAdd`] if `item` is this group or, being a
    ///   folder, already contains this group's key.
    /// - [`DomainError::IndexOutOfRange`] if `position` exceeds the child count.
    fn insert_item(&mut self, item: Item, position: usize) -> DomainResult<ElementId> {
        let id = item.id();
        if id == self.id() {
            return Err(DomainError::RecursiveItemAdd(item.name().to_owned()));
        }
        if self.children().iter().any(|c| c.name() == item.name()) {
            return Err(DomainError::DuplicateItem(item.name().to_owned()));
        }
        if let (Item::Folder(folder), Some(own_key)) = (&item, self.key())
            && folder.get_item(own_key, None).is_some()
        {
            return Err(DomainError::RecursiveItemAdd(format!(
                "{} already contains {own_key}",
                folder.name
            )));
        }
        let len = self.children().len();
        if position > len {
            return Err(DomainError::IndexOutOfRange {
                index: position,
                len,
            });
        }
        let owner = self.id();
        self.children_mut().attach(owner, item, Some(position));
        Ok(id)
    }

    /// Depth-first, pre-order search by key; the first match wins.
    fn get_item(&self, key: &str, filter: Option<ItemKind>) -> Option<&Item> {
        self.children().find_by_key(key, filter)
    }

    /// Mutable variant of [`ItemGroup::get_item`].
    fn get_item_mut(&mut self, key: &str, filter: Option<ItemKind>) -> Option<&mut Item> {
        self.children_mut().find_by_key_mut(key, filter)
    }

    /// Returns the first folder named `key` at any depth.
    fn get_folder(&self, key: &str) -> Option<&Folder> {
        self.get_item(key, Some(ItemKind::Folder))
            .and_then(Item::as_folder)
    }

    /// Returns the first request named `key` at any depth.
    fn get_request(&self, key: &str) -> Option<&Request> {
        self.get_item(key, Some(ItemKind::Request))
            .and_then(Item::as_request)
    }

    /// Returns the first request named `key` at any depth, mutably.
    fn get_request_mut(&mut self, key: &str) -> Option<&mut Request> {
        self.get_item_mut(key, Some(ItemKind::Request))
            .and_then(Item::as_request_mut)
    }

    /// Flattens the subtree.
    ///
    /// With no filter, returns every leaf request; with a filter, every item
    /// of that kind at any depth.
    fn get_items(&self, filter: Option<ItemKind>) -> Vec<&Item> {
        let mut out = Vec::new();
        self.children().collect(filter, &mut out);
        out
    }

    /// Finds an item anywhere below by id.
    fn find_by_id(&self, id: ElementId) -> Option<&Item> {
        self.children().find_by_id(id)
    }

    /// Finds an item anywhere below by id, mutably.
    fn find_by_id_mut(&mut self, id: ElementId) -> Option<&mut Item> {
        self.children_mut().find_by_id_mut(id)
    }

    /// Returns the chain of items from a direct child down to `id`, inclusive.
    fn path_to(&self, id: ElementId) -> Option<Vec<&Item>> {
        let mut path = Vec::new();
        self.children().path_to(id, &mut path).then_some(path)
    }

    /// Removes the first direct child with the given key.
    fn remove_item(&mut self, key: &str) -> Option<Item> {
        let list = self.children_mut();
        let index = list.items.iter().position(|c| c.name() == key)?;
        Some(list.detach_at(index))
    }

    /// Removes a direct child by id.
    fn remove_item_by_id(&mut self, id: ElementId) -> Option<Item> {
        let list = self.children_mut();
        let index = list.items.iter().position(|c| c.id() == id)?;
        Some(list.detach_at(index))
    }

    /// Moves an item within this tree to the group `new_parent` (this group
    /// or any folder below it).
    ///
    /// The move is atomic: on failure the tree is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`DomainError::RecursiveItemAdd`] if `item` is `new_parent` or
    ///   contains it.
    /// - [`DomainError::InvalidAction`] if `item` is not attached below this
    ///   group, or `new_parent` is not a group in this tree.
    fn move_item(&mut self, item: ElementId, new_parent: ElementId) -> DomainResult<()> {
        if item == new_parent {
            return Err(DomainError::RecursiveItemAdd(format!(
                "cannot move {item} into itself"
            )));
        }
        let moving = self.find_by_id(item).ok_or_else(|| {
            DomainError::InvalidAction(format!("item {item} has no parent in this tree"))
        })?;
        if let Item::Folder(folder) = moving
            && folder.find_by_id(new_parent).is_some()
        {
            return Err(DomainError::RecursiveItemAdd(format!(
                "{} contains the target group",
                folder.name
            )));
        }
        let owner = self.id();
        if new_parent != owner && !matches!(self.find_by_id(new_parent), Some(Item::Folder(_))) {
            return Err(DomainError::InvalidAction(format!(
                "{new_parent} is not a group in this tree"
            )));
        }

        let list = self.children_mut();
        let (old_parent, index, detached) = list.take_by_id(owner, item).ok_or_else(|| {
            DomainError::InvalidAction(format!("item {item} has no parent in this tree"))
        })?;
        let Err(detached) = list.attach_to(owner, new_parent, detached, None) else {
            return Ok(());
        };
        let name = detached.name().to_owned();
        Err(match list.attach_to(owner, old_parent, detached, Some(index)) {
            Ok(()) => {
                DomainError::InvalidAction(format!("{new_parent} is not a group in this tree"))
            }
            Err(_) => DomainError::InvalidAction(format!(
                "{name} could not be restored under {old_parent} after a failed move"
            )),
        })
    }
}
