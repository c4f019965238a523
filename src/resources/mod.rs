//! Resource registry over a resource dictionary, ISO 32000-1 §7.8.3.
//!
//! A [`Resources`] wraps one resource dictionary and hands out typed
//! views over its categories (fonts, XObjects, color spaces, graphics
//! states, patterns, shadings, properties). Categories materialize
//! lazily on first access and stay cached until [`Resources::clear_cache`]
//! or a whole-category setter replaces them.

mod properties;

pub use properties::PropertyList;

use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{PdfError, Result};
use crate::graphics::{ColorSpace, ExtGState, Pattern, Shading, XObject};
use crate::objects::{Dictionary, Object, ObjectId, ObjectStore};
use crate::text::{Font, GlyphList};

/// The seven categories a resource dictionary can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Font,
    XObject,
    ColorSpace,
    ExtGState,
    Pattern,
    Shading,
    Properties,
}

impl ResourceKind {
    /// Key of this category's sub-dictionary in the resource dictionary.
    pub fn dict_key(&self) -> &'static str {
        match self {
            ResourceKind::Font => "Font",
            ResourceKind::XObject => "XObject",
            ResourceKind::ColorSpace => "ColorSpace",
            ResourceKind::ExtGState => "ExtGState",
            ResourceKind::Pattern => "Pattern",
            ResourceKind::Shading => "Shading",
            ResourceKind::Properties => "Properties",
        }
    }
}

/// Typed registry over a resource dictionary.
///
/// Holds the backing dictionary, the object store indirect references
/// resolve against, and one cache per category. Font and XObject caches
/// also keep a reverse map from resource identity to name so that
/// adding the same resource twice returns the existing name instead of
/// a duplicate entry.
///
/// Caches are not resynchronized against the backing dictionary; all
/// mutation goes through the registry, which keeps dictionary, cache
/// and reverse map in step.
pub struct Resources {
    dict: Dictionary,
    store: Rc<ObjectStore>,
    fonts: Option<IndexMap<String, Rc<Font>>>,
    font_names: Option<HashMap<usize, String>>,
    xobjects: Option<IndexMap<String, Rc<XObject>>>,
    xobject_names: Option<HashMap<usize, String>>,
    color_spaces: Option<IndexMap<String, Rc<ColorSpace>>>,
    graphics_states: Option<IndexMap<String, Rc<ExtGState>>>,
    patterns: Option<IndexMap<String, Rc<Pattern>>>,
    shadings: Option<IndexMap<String, Rc<Shading>>>,
}

impl Resources {
    /// Registry over a fresh, empty resource dictionary.
    pub fn new() -> Self {
        Self::from_dict(Dictionary::new(), Rc::new(ObjectStore::new()))
    }

    /// Registry over an existing resource dictionary.
    pub fn from_dict(dict: Dictionary, store: Rc<ObjectStore>) -> Self {
        Self {
            dict,
            store,
            fonts: None,
            font_names: None,
            xobjects: None,
            xobject_names: None,
            color_spaces: None,
            graphics_states: None,
            patterns: None,
            shadings: None,
        }
    }

    /// The backing resource dictionary.
    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    /// Consumes the registry, yielding the backing dictionary.
    pub fn into_dict(self) -> Dictionary {
        self.dict
    }

    /// The object store indirect references resolve against.
    pub fn store(&self) -> &Rc<ObjectStore> {
        &self.store
    }

    /// Fonts by resource name, decoded with the default glyph list.
    ///
    /// A registry without a `Font` sub-dictionary gets an empty one
    /// installed, so the returned map is never absent. Entries that are
    /// not dictionaries are skipped; a font dictionary that fails to
    /// decode fails the whole call.
    pub fn fonts(&mut self) -> Result<&IndexMap<String, Rc<Font>>> {
        self.fonts_with(None)
    }

    /// Like [`Resources::fonts`], with a caller-supplied glyph list for
    /// decoding. The glyph list only matters on the call that first
    /// materializes the cache.
    pub fn fonts_with(
        &mut self,
        glyph_list: Option<&GlyphList>,
    ) -> Result<&IndexMap<String, Rc<Font>>> {
        if self.fonts.is_none() {
            let fonts = self.load_fonts(glyph_list)?;
            debug!(count = fonts.len(), "materialized font resources");
            self.font_names = Some(reverse_map(&fonts));
            self.fonts = Some(fonts);
        }
        Ok(self.fonts.get_or_insert_with(IndexMap::new))
    }

    fn load_fonts(&mut self, glyph_list: Option<&GlyphList>) -> Result<IndexMap<String, Rc<Font>>> {
        let key = ResourceKind::Font.dict_key();
        let mut fonts = IndexMap::new();
        if !self.dict.contains_key(key) {
            // later additions need a sub-dictionary to land in
            self.dict.set(key, Dictionary::new());
            return Ok(fonts);
        }

        if let Some(Object::Dictionary(sub)) = self.dict.get(key).map(|e| self.store.resolve(e)) {
            // two entries naming the same indirect object share one font
            let mut seen: HashMap<ObjectId, Rc<Font>> = HashMap::new();
            for (name, entry) in sub.iter() {
                let Object::Dictionary(font_dict) = self.store.resolve(entry) else {
                    continue;
                };
                let font = match entry.as_reference() {
                    Some(id) => match seen.get(&id) {
                        Some(existing) => Rc::clone(existing),
                        None => {
                            let font = Rc::new(Font::from_dict(font_dict, glyph_list)?);
                            seen.insert(id, Rc::clone(&font));
                            font
                        }
                    },
                    None => Rc::new(Font::from_dict(font_dict, glyph_list)?),
                };
                fonts.insert(name.clone(), font);
            }
        }
        Ok(fonts)
    }

    /// XObjects by resource name.
    ///
    /// Never absent, same as fonts. An entry that fails to decode is
    /// logged and skipped, so one broken image does not hide the rest.
    pub fn xobjects(&mut self) -> &IndexMap<String, Rc<XObject>> {
        if self.xobjects.is_none() {
            let xobjects = self.load_xobjects();
            debug!(count = xobjects.len(), "materialized xobject resources");
            self.xobject_names = Some(reverse_map(&xobjects));
            self.xobjects = Some(xobjects);
        }
        self.xobjects.get_or_insert_with(IndexMap::new)
    }

    fn load_xobjects(&mut self) -> IndexMap<String, Rc<XObject>> {
        let key = ResourceKind::XObject.dict_key();
        let mut xobjects = IndexMap::new();
        if !self.dict.contains_key(key) {
            self.dict.set(key, Dictionary::new());
            return xobjects;
        }

        if let Some(Object::Dictionary(sub)) = self.dict.get(key).map(|e| self.store.resolve(e)) {
            for (name, entry) in sub.iter() {
                // indirect entries get the object number appended, so a
                // short name reused across contexts stays unambiguous
                let label = match entry.as_reference() {
                    Some(id) => format!("{name}#{}", id.number()),
                    None => name.clone(),
                };
                match XObject::create(self.store.resolve(entry), &label, &self.store) {
                    Ok(xobject) => {
                        xobjects.insert(name.clone(), Rc::new(xobject));
                    }
                    Err(error) => {
                        warn!(resource = name.as_str(), %error, "skipping undecodable xobject");
                    }
                }
            }
        }
        xobjects
    }

    /// Color spaces by resource name, or `None` when the category is
    /// missing or empty.
    ///
    /// Patterns materialize first so the `Pattern` color space can
    /// carry them. Any entry that fails to decode fails the call.
    pub fn color_spaces(&mut self) -> Result<Option<&IndexMap<String, Rc<ColorSpace>>>> {
        let key = ResourceKind::ColorSpace.dict_key();
        if self.color_spaces.is_none() && self.dict.contains_key(key) {
            self.ensure_patterns()?;
            let patterns = self.patterns.clone().unwrap_or_default();
            let mut spaces = IndexMap::new();
            if let Some(Object::Dictionary(sub)) = self.dict.get(key).map(|e| self.store.resolve(e))
            {
                for (name, entry) in sub.iter() {
                    let space = ColorSpace::create(self.store.resolve(entry), Some(&patterns))
                        .map_err(|error| {
                            PdfError::ColorSpaceError(format!("color space {name}: {error}"))
                        })?;
                    spaces.insert(name.clone(), Rc::new(space));
                }
            }
            self.color_spaces = Some(spaces);
        }
        Ok(self.color_spaces.as_ref().filter(|m| !m.is_empty()))
    }

    /// Graphics state parameter dictionaries by resource name, or
    /// `None` when the category is missing or empty. Entries that are
    /// not dictionaries are skipped.
    pub fn graphics_states(&mut self) -> Option<&IndexMap<String, Rc<ExtGState>>> {
        let key = ResourceKind::ExtGState.dict_key();
        if self.graphics_states.is_none() && self.dict.contains_key(key) {
            let mut states = IndexMap::new();
            if let Some(Object::Dictionary(sub)) = self.dict.get(key).map(|e| self.store.resolve(e))
            {
                for (name, entry) in sub.iter() {
                    if let Some(state_dict) = self.store.resolve(entry).as_dict() {
                        states.insert(name.clone(), Rc::new(ExtGState::from_dict(state_dict)));
                    }
                }
            }
            self.graphics_states = Some(states);
        }
        self.graphics_states.as_ref().filter(|m| !m.is_empty())
    }

    /// Patterns by resource name, or `None` when the category is
    /// missing or empty. Any entry that fails to decode fails the call.
    pub fn patterns(&mut self) -> Result<Option<&IndexMap<String, Rc<Pattern>>>> {
        self.ensure_patterns()?;
        Ok(self.patterns.as_ref().filter(|m| !m.is_empty()))
    }

    fn ensure_patterns(&mut self) -> Result<()> {
        let key = ResourceKind::Pattern.dict_key();
        if self.patterns.is_none() && self.dict.contains_key(key) {
            let mut patterns = IndexMap::new();
            if let Some(Object::Dictionary(sub)) = self.dict.get(key).map(|e| self.store.resolve(e))
            {
                for (name, entry) in sub.iter() {
                    let pattern_dict = self.store.resolve(entry).as_dict().ok_or_else(|| {
                        PdfError::PatternError(format!("pattern {name} is not a dictionary"))
                    })?;
                    patterns.insert(name.clone(), Rc::new(Pattern::from_dict(pattern_dict)?));
                }
            }
            self.patterns = Some(patterns);
        }
        Ok(())
    }

    /// Shadings by resource name, or `None` when the category is
    /// missing or empty. Any entry that fails to decode fails the call.
    pub fn shadings(&mut self) -> Result<Option<&IndexMap<String, Rc<Shading>>>> {
        let key = ResourceKind::Shading.dict_key();
        if self.shadings.is_none() && self.dict.contains_key(key) {
            let mut shadings = IndexMap::new();
            if let Some(Object::Dictionary(sub)) = self.dict.get(key).map(|e| self.store.resolve(e))
            {
                for (name, entry) in sub.iter() {
                    let shading_dict = self.store.resolve(entry).as_dict().ok_or_else(|| {
                        PdfError::ShadingError(format!("shading {name} is not a dictionary"))
                    })?;
                    shadings.insert(name.clone(), Rc::new(Shading::from_dict(shading_dict)?));
                }
            }
            self.shadings = Some(shadings);
        }
        Ok(self.shadings.as_ref().filter(|m| !m.is_empty()))
    }

    /// Marked-content properties, or `None` when the category is
    /// missing. Built fresh on every call, never cached.
    pub fn properties(&self) -> Option<PropertyList> {
        let entry = self.dict.get(ResourceKind::Properties.dict_key())?;
        match self.store.resolve(entry) {
            Object::Dictionary(dict) => Some(PropertyList::new(dict.clone())),
            _ => None,
        }
    }

    pub fn set_properties(&mut self, properties: Option<PropertyList>) {
        let key = ResourceKind::Properties.dict_key();
        match properties {
            Some(properties) => self.dict.set(key, properties.into_object()),
            None => {
                self.dict.remove(key);
            }
        }
    }

    /// Registers a font under a generated `F`-prefixed name and returns
    /// that name. Adding a font that is already registered returns its
    /// existing name and changes nothing.
    pub fn add_font(&mut self, font: Rc<Font>) -> Result<String> {
        self.fonts()?;
        if let Some(existing) = self.lookup_font_name(&font) {
            return Ok(existing);
        }
        let key = next_unique_key(self.fonts.get_or_insert_with(IndexMap::new), "F");
        Ok(self.insert_font(font, key))
    }

    /// Registers a font under a caller-chosen name. An existing entry
    /// under that name is overwritten; a font that is already
    /// registered keeps its existing name, which is returned.
    pub fn add_font_with_key(&mut self, font: Rc<Font>, key: &str) -> Result<String> {
        self.fonts()?;
        if let Some(existing) = self.lookup_font_name(&font) {
            return Ok(existing);
        }
        Ok(self.insert_font(font, key.to_string()))
    }

    fn lookup_font_name(&self, font: &Rc<Font>) -> Option<String> {
        self.font_names
            .as_ref()
            .and_then(|names| names.get(&identity(font)))
            .cloned()
    }

    fn insert_font(&mut self, font: Rc<Font>, key: String) -> String {
        let value = font.to_object();
        self.font_names
            .get_or_insert_with(HashMap::new)
            .insert(identity(&font), key.clone());
        if let Some(replaced) = self
            .fonts
            .get_or_insert_with(IndexMap::new)
            .insert(key.clone(), font)
        {
            // the reverse map must not keep pointing at the evicted font
            if let Some(names) = self.font_names.as_mut() {
                names.remove(&identity(&replaced));
            }
        }
        self.sub_dict_mut(ResourceKind::Font).set(key.as_str(), value);
        key
    }

    /// Registers an XObject under a generated name with the given
    /// prefix and returns that name. Adding an XObject that is already
    /// registered returns its existing name and changes nothing.
    pub fn add_xobject(&mut self, xobject: Rc<XObject>, prefix: &str) -> String {
        self.xobjects();
        if let Some(existing) = self
            .xobject_names
            .as_ref()
            .and_then(|names| names.get(&identity(&xobject)))
        {
            return existing.clone();
        }

        let key = next_unique_key(self.xobjects.get_or_insert_with(IndexMap::new), prefix);
        let value = xobject.to_object();
        self.xobject_names
            .get_or_insert_with(HashMap::new)
            .insert(identity(&xobject), key.clone());
        self.xobjects
            .get_or_insert_with(IndexMap::new)
            .insert(key.clone(), xobject);
        self.sub_dict_mut(ResourceKind::XObject)
            .set(key.as_str(), value);
        key
    }

    /// Removes the font registered under `name`. Removing a name that
    /// is not registered does nothing, and never installs a sub-dictionary.
    pub fn remove_font(&mut self, name: &str) {
        self.remove_backing_entry(ResourceKind::Font, name);
        if let Some(fonts) = self.fonts.as_mut() {
            if let Some(font) = fonts.shift_remove(name) {
                if let Some(names) = self.font_names.as_mut() {
                    names.remove(&identity(&font));
                }
            }
        }
    }

    /// Removes the XObject registered under `name`.
    pub fn remove_xobject(&mut self, name: &str) {
        self.remove_backing_entry(ResourceKind::XObject, name);
        if let Some(xobjects) = self.xobjects.as_mut() {
            if let Some(xobject) = xobjects.shift_remove(name) {
                if let Some(names) = self.xobject_names.as_mut() {
                    names.remove(&identity(&xobject));
                }
            }
        }
    }

    fn remove_backing_entry(&mut self, kind: ResourceKind, name: &str) {
        let present = matches!(
            self.dict.get(kind.dict_key()).map(|e| self.store.resolve(e)),
            Some(Object::Dictionary(_))
        );
        if present {
            self.sub_dict_mut(kind).remove(name);
        }
    }

    /// Replaces the font category wholesale. `Some` rewrites the
    /// backing sub-dictionary to mirror the map; `None` removes the
    /// category entirely.
    pub fn set_fonts(&mut self, fonts: Option<IndexMap<String, Rc<Font>>>) {
        match fonts {
            Some(fonts) => {
                self.rewrite_category(ResourceKind::Font, &fonts, |font| font.to_object());
                self.font_names = Some(reverse_map(&fonts));
                self.fonts = Some(fonts);
            }
            None => {
                self.dict.remove(ResourceKind::Font.dict_key());
                self.fonts = None;
                self.font_names = None;
            }
        }
    }

    /// Replaces the XObject category wholesale.
    pub fn set_xobjects(&mut self, xobjects: Option<IndexMap<String, Rc<XObject>>>) {
        match xobjects {
            Some(xobjects) => {
                self.rewrite_category(ResourceKind::XObject, &xobjects, |x| x.to_object());
                self.xobject_names = Some(reverse_map(&xobjects));
                self.xobjects = Some(xobjects);
            }
            None => {
                self.dict.remove(ResourceKind::XObject.dict_key());
                self.xobjects = None;
                self.xobject_names = None;
            }
        }
    }

    /// Replaces the color space category wholesale.
    pub fn set_color_spaces(&mut self, spaces: Option<IndexMap<String, Rc<ColorSpace>>>) {
        match spaces {
            Some(spaces) => {
                self.rewrite_category(ResourceKind::ColorSpace, &spaces, |cs| cs.to_object());
                self.color_spaces = Some(spaces);
            }
            None => {
                self.dict.remove(ResourceKind::ColorSpace.dict_key());
                self.color_spaces = None;
            }
        }
    }

    /// Replaces the graphics state category wholesale.
    pub fn set_graphics_states(&mut self, states: Option<IndexMap<String, Rc<ExtGState>>>) {
        match states {
            Some(states) => {
                self.rewrite_category(ResourceKind::ExtGState, &states, |gs| gs.to_object());
                self.graphics_states = Some(states);
            }
            None => {
                self.dict.remove(ResourceKind::ExtGState.dict_key());
                self.graphics_states = None;
            }
        }
    }

    /// Replaces the pattern category wholesale.
    pub fn set_patterns(&mut self, patterns: Option<IndexMap<String, Rc<Pattern>>>) {
        match patterns {
            Some(patterns) => {
                self.rewrite_category(ResourceKind::Pattern, &patterns, |p| p.to_object());
                self.patterns = Some(patterns);
            }
            None => {
                self.dict.remove(ResourceKind::Pattern.dict_key());
                self.patterns = None;
            }
        }
    }

    /// Replaces the shading category wholesale.
    pub fn set_shadings(&mut self, shadings: Option<IndexMap<String, Rc<Shading>>>) {
        match shadings {
            Some(shadings) => {
                self.rewrite_category(ResourceKind::Shading, &shadings, |s| s.to_object());
                self.shadings = Some(shadings);
            }
            None => {
                self.dict.remove(ResourceKind::Shading.dict_key());
                self.shadings = None;
            }
        }
    }

    fn rewrite_category<T>(
        &mut self,
        kind: ResourceKind,
        map: &IndexMap<String, Rc<T>>,
        to_object: impl Fn(&T) -> Object,
    ) {
        let mut sub = Dictionary::new();
        for (name, value) in map {
            sub.set(name.as_str(), to_object(value));
        }
        self.dict.set(kind.dict_key(), sub);
    }

    /// Drops every cache, leaving the backing dictionary untouched. The
    /// next accessor call re-reads the dictionary from scratch.
    pub fn clear_cache(&mut self) {
        self.fonts = None;
        self.font_names = None;
        self.xobjects = None;
        self.xobject_names = None;
        self.color_spaces = None;
        self.graphics_states = None;
        self.patterns = None;
        self.shadings = None;
    }

    /// Mutable access to a category's sub-dictionary, installing an
    /// inline one first if the entry is missing or held by reference.
    /// A referenced sub-dictionary gets detached by cloning it inline,
    /// so writes never reach a dictionary other pages may share.
    fn sub_dict_mut(&mut self, kind: ResourceKind) -> &mut Dictionary {
        let key = kind.dict_key();
        let inline = matches!(self.dict.get(key), Some(Object::Dictionary(_)));
        if !inline {
            let detached = match self.dict.get(key).map(|e| self.store.resolve(e)) {
                Some(Object::Dictionary(shared)) => shared.clone(),
                _ => Dictionary::new(),
            };
            self.dict.set(key, detached);
        }
        match self.dict.get_mut(key) {
            Some(Object::Dictionary(sub)) => sub,
            _ => unreachable!("sub-dictionary installed above"),
        }
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

fn identity<T>(value: &Rc<T>) -> usize {
    Rc::as_ptr(value) as usize
}

fn reverse_map<T>(map: &IndexMap<String, Rc<T>>) -> HashMap<usize, String> {
    map.iter()
        .map(|(name, value)| (identity(value), name.clone()))
        .collect()
}

/// First `prefix`-plus-counter name, counting from zero, that is not a
/// key of `map`.
pub(crate) fn next_unique_key<T>(map: &IndexMap<String, T>, prefix: &str) -> String {
    let mut counter = 0u32;
    loop {
        let candidate = format!("{prefix}{counter}");
        if !map.contains_key(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
