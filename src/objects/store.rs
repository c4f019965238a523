use crate::objects::{Object, ObjectId};
use std::collections::HashMap;

static NULL: Object = Object::Null;

/// In-memory store of indirect objects.
///
/// Resolution follows a single level of indirection: a `Reference`
/// entry resolves to the stored object, anything else resolves to
/// itself. A dangling reference resolves to `Null` rather than
/// failing, matching how viewers treat missing objects.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: HashMap<ObjectId, Object>,
    next_number: u32,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ObjectId, object: Object) {
        self.next_number = self.next_number.max(id.number());
        self.objects.insert(id, object);
    }

    /// Stores an object under a freshly allocated number.
    pub fn put(&mut self, object: Object) -> ObjectId {
        self.next_number += 1;
        let id = ObjectId::new(self.next_number, 0);
        self.objects.insert(id, object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.objects.get(id).unwrap_or(&NULL),
            _ => object,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Dictionary;

    #[test]
    fn test_insert_and_get() {
        let mut store = ObjectStore::new();
        let id = ObjectId::new(4, 0);
        store.insert(id, Object::Integer(42));

        assert_eq!(store.get(id), Some(&Object::Integer(42)));
        assert_eq!(store.get(ObjectId::new(5, 0)), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_allocates_fresh_numbers() {
        let mut store = ObjectStore::new();
        store.insert(ObjectId::new(7, 0), Object::Null);

        let id = store.put(Object::Integer(1));
        assert_eq!(id.number(), 8);

        let id2 = store.put(Object::Integer(2));
        assert_eq!(id2.number(), 9);
        assert_eq!(store.get(id2), Some(&Object::Integer(2)));
    }

    #[test]
    fn test_resolve_reference() {
        let mut store = ObjectStore::new();
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name("Font".to_string()));
        let id = store.put(Object::Dictionary(dict));

        let entry = Object::Reference(id);
        let resolved = store.resolve(&entry);
        assert_eq!(
            resolved.as_dict().and_then(|d| d.get_name("Type")),
            Some("Font")
        );
    }

    #[test]
    fn test_resolve_direct_object_is_identity() {
        let store = ObjectStore::new();
        let obj = Object::Integer(9);
        assert_eq!(store.resolve(&obj), &obj);
    }

    #[test]
    fn test_resolve_dangling_reference_yields_null() {
        let store = ObjectStore::new();
        let entry = Object::Reference(ObjectId::new(99, 0));
        assert!(store.resolve(&entry).is_null());
    }
}
