//! Glossary & Recipe: the semantic top layer — step-path navigation through
//! nested containers, maps, and compressed blocks, and translation between
//! string names and integer map keys.

use std::collections::HashMap;

use crate::container::Container;
use crate::ingredient::Ingredient;
use crate::library::Library;
use crate::map::Map;
use crate::marker::Kind;
use crate::zip::decode_zip;

/// A bidirectional name ↔ index mapping derived from a Recipe's first
/// top-level Library.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    name_to_index: HashMap<String, u32>,
    index_to_name: Vec<String>,
}

impl Glossary {
    pub fn from_library(lib: &Library) -> Self {
        let index_to_name: Vec<String> = lib.entries().to_vec();
        let name_to_index = index_to_name
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx as u32))
            .collect();
        Glossary {
            name_to_index,
            index_to_name,
        }
    }

    /// Unknown names map to index 0, not an error.
    pub fn index_of(&self, name: &str) -> u32 {
        self.name_to_index.get(name).copied().unwrap_or(0)
    }

    /// Unknown indices map to the empty string, not an error.
    pub fn name_of(&self, index: u32) -> String {
        self.index_to_name.get(index as usize).cloned().unwrap_or_default()
    }

    pub fn xlate_names(&self, names: &[&str]) -> Vec<u32> {
        names.iter().map(|n| self.index_of(n)).collect()
    }

    pub fn xlate_indices(&self, indices: &[u32]) -> Vec<String> {
        indices.iter().map(|i| self.name_of(*i)).collect()
    }
}

/// A top-level Container plus an extracted Glossary, with step-path
/// navigation.
#[derive(Debug, Clone)]
pub struct Recipe {
    root: Container,
    glossary: Option<Glossary>,
}

impl Recipe {
    /// If `root` is a Container it is adopted as-is; otherwise it is
    /// wrapped in a single-element Container. The first top-level Library
    /// child, if any, becomes the Glossary.
    pub fn new(root: Ingredient<'static>) -> anyhow::Result<Self> {
        let container = if root.kind() == Kind::Container {
            Container::from_ingredient(&root)?
        } else {
            Container::from_children(vec![root])
        };
        let glossary = container
            .children()
            .iter()
            .find(|child| child.kind() == Kind::Library)
            .and_then(|lib_ingr| Library::from_ingredient(lib_ingr).ok())
            .map(|lib| Glossary::from_library(&lib));
        Ok(Recipe {
            root: container,
            glossary,
        })
    }

    /// Construct a sub-Recipe directly from an already-adopted root
    /// container, inheriting `parent_glossary` if the new root has none of
    /// its own.
    fn new_with_inherited_glossary(root: Ingredient<'static>, parent_glossary: Option<Glossary>) -> anyhow::Result<Self> {
        let mut recipe = Recipe::new(root)?;
        if recipe.glossary.is_none() {
            recipe.glossary = parent_glossary;
        }
        Ok(recipe)
    }

    pub fn glossary(&self) -> Option<&Glossary> {
        self.glossary.as_ref()
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    /// Walk `steps` from the Recipe's root. Containers are indexed, Maps are
    /// keyed, Compressed nodes are transparently (and lazily) unwrapped
    /// without consuming a step, and any other kind terminates navigation —
    /// remaining steps yield the not-found `Null` sentinel.
    pub fn ingredient(&self, steps: &[u32]) -> anyhow::Result<Ingredient<'static>> {
        let mut current = self.root.to_ingredient()?;
        for &step in steps {
            current = unwrap_zip(current);
            current = match current.kind() {
                Kind::Container => Container::from_ingredient(&current)
                    .ok()
                    .and_then(|c| c.get(step as usize).cloned())
                    .unwrap_or_else(Ingredient::null),
                Kind::Map => Map::from_ingredient(&current)
                    .map(|m| m.get(step))
                    .unwrap_or_else(|_| Ingredient::null()),
                _ => Ingredient::null(),
            };
        }
        Ok(current)
    }

    /// Navigate to `steps` and return a sub-Recipe rooted there, inheriting
    /// this Recipe's Glossary if the navigated value has none of its own.
    pub fn recipe(&self, steps: &[u32]) -> anyhow::Result<Recipe> {
        let value = self.ingredient(steps)?;
        Recipe::new_with_inherited_glossary(value, self.glossary.clone())
    }
}

/// Transparently decompress `i` if it is a Zip, repeatedly (in case of
/// nested Zips), without consuming any navigation step. Decompression is
/// lazy — only invoked when the navigator actually visits a Zip node, never
/// eagerly expanding unused subtrees.
fn unwrap_zip(mut i: Ingredient<'static>) -> Ingredient<'static> {
    while i.kind() == Kind::Zip {
        match decode_zip(&i) {
            Ok(inner) => i = inner,
            Err(_) => break,
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container as Ctr;
    use crate::scalar::encode_string;

    fn nested_container_with_glossary() -> Ingredient<'static> {
        let lib = Library::from_entries(vec![
            "first".into(),
            "second".into(),
            "third".into(),
            "third-first".into(),
        ]);

        let mut inner_map = Map::new();
        inner_map.insert(3, encode_string("First Child of the Third Element").unwrap());

        let mut outer_map = Map::new();
        outer_map.insert(0, encode_string("First Element").unwrap());
        outer_map.insert(1, encode_string("Second Element").unwrap());
        outer_map.insert(2, inner_map.to_ingredient().unwrap());

        let mut root = Ctr::new();
        root.push(lib.to_ingredient().unwrap());
        root.push(outer_map.to_ingredient().unwrap());
        root.to_ingredient().unwrap()
    }

    #[test]
    fn glossary_translates_names_and_indices_both_ways() {
        let root = nested_container_with_glossary();
        let recipe = Recipe::new(root).unwrap();
        let glossary = recipe.glossary().unwrap();

        assert_eq!(
            glossary.xlate_names(&["third", "second", "third-first"]),
            vec![2, 1, 3]
        );
        assert_eq!(
            glossary.xlate_indices(&[2, 1, 3]),
            vec!["third".to_string(), "second".to_string(), "third-first".to_string()]
        );
        assert_eq!(glossary.xlate_names(&["unknown"]), vec![0]);
        assert_eq!(glossary.xlate_indices(&[99]), vec!["".to_string()]);
    }

    #[test]
    fn navigation_unwraps_compressed_nodes_without_consuming_a_step() {
        let mut inner = Ctr::new();
        inner.push(encode_string("deep").unwrap());
        let inner_ingr = inner.to_ingredient().unwrap();
        let zipped = crate::zip::encode_zip(&inner_ingr).unwrap();

        let mut root = Ctr::new();
        root.push(zipped);
        let recipe = Recipe::new(root.to_ingredient().unwrap()).unwrap();

        // [0] selects root's first child, the Zip node. [0] again is then
        // applied to it: since it's compressed, it unwraps to `inner` first
        // (the unwrap itself consumes no step), and that second [0] selects
        // "deep" from the unwrapped container.
        let value = recipe.ingredient(&[0, 0]).unwrap();
        assert_eq!(crate::scalar::to_string(&value), "deep");
    }

    #[test]
    fn out_of_range_step_yields_not_found_sentinel() {
        let root = nested_container_with_glossary();
        let recipe = Recipe::new(root).unwrap();
        assert!(recipe.ingredient(&[99]).unwrap().is_null());
        assert!(recipe.ingredient(&[1, 42]).unwrap().is_null());
    }
}
