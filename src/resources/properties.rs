use crate::objects::{Dictionary, Object};

/// Mapping of resource names to marked-content property dictionaries.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyList {
    dict: Dictionary,
}

impl PropertyList {
    pub fn new(dict: Dictionary) -> Self {
        Self { dict }
    }

    /// Property dictionary registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Dictionary> {
        self.dict.get_dict(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.dict.keys()
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    pub(crate) fn into_object(self) -> Object {
        Object::Dictionary(self.dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mut oc = Dictionary::new();
        oc.set("Type", Object::Name("OCG".to_string()));

        let mut dict = Dictionary::new();
        dict.set("MC0", Object::Dictionary(oc));
        dict.set("MC1", Object::Integer(1));

        let props = PropertyList::new(dict);
        assert_eq!(props.len(), 2);
        assert!(props.get("MC0").is_some());
        assert!(props.get("MC1").is_none());
        assert!(props.get("MC2").is_none());

        let names: Vec<_> = props.names().map(String::as_str).collect();
        assert_eq!(names, vec!["MC0", "MC1"]);
    }

    #[test]
    fn test_empty() {
        let props = PropertyList::new(Dictionary::new());
        assert!(props.is_empty());
        assert_eq!(props.into_object(), Object::Dictionary(Dictionary::new()));
    }
}
