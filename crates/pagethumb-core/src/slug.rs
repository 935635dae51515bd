//! Entity name to filename slug.

use std::collections::HashMap;

/// Derive the filesystem-safe slug for an entity name.
///
/// Lowercases, turns spaces into hyphens and drops `(`, `)` and `.`.
/// Every other character is kept, so `"Padmé Amidala"` becomes
/// `"padmé-amidala"` and `"R2-D2"` becomes `"r2-d2"`.
pub fn slugify(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '(' | ')' | '.'))
        .flat_map(char::to_lowercase)
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

/// A slug claimed by more than one entity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub slug: String,
    /// Names mapping to `slug`, in input order. The last one wins on disk.
    pub names: Vec<String>,
}

/// Find names that would overwrite each other's output file.
pub fn find_collisions<S: AsRef<str>>(names: &[S]) -> Vec<SlugCollision> {
    let mut order: Vec<String> = Vec::new();
    let mut by_slug: HashMap<String, Vec<String>> = HashMap::new();

    for name in names {
        let name = name.as_ref();
        let slug = slugify(name);
        let entry = by_slug.entry(slug.clone()).or_default();
        if entry.is_empty() {
            order.push(slug);
        }
        entry.push(name.to_string());
    }

    order
        .into_iter()
        .filter_map(|slug| {
            let names = by_slug.remove(&slug)?;
            (names.len() > 1).then_some(SlugCollision { slug, names })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENTITIES;

    #[test]
    fn test_parenthetical_disambiguator() {
        assert_eq!(slugify("Rey (Star Wars)"), "rey-star-wars");
        assert_eq!(slugify("Finn (Star Wars)"), "finn-star-wars");
    }

    #[test]
    fn test_basic_names() {
        assert_eq!(slugify("Yoda"), "yoda");
        assert_eq!(slugify("Obi-Wan Kenobi"), "obi-wan-kenobi");
        assert_eq!(slugify("C-3PO"), "c-3po");
        assert_eq!(slugify("Jabba the Hutt"), "jabba-the-hutt");
    }

    #[test]
    fn test_periods_removed() {
        assert_eq!(slugify("Dr. Aphra"), "dr-aphra");
    }

    #[test]
    fn test_non_ascii_lowercased_and_kept() {
        assert_eq!(slugify("Padmé Amidala"), "padmé-amidala");
        assert_eq!(slugify("ÉMILE"), "émile");
    }

    #[test]
    fn test_idempotent_over_builtin_list() {
        for name in DEFAULT_ENTITIES {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "slug of {name:?} is not stable");
            assert_eq!(slugify(name), once);
        }
    }

    #[test]
    fn test_builtin_list_has_no_collisions() {
        assert!(find_collisions(DEFAULT_ENTITIES).is_empty());
    }

    #[test]
    fn test_collisions_reported_in_input_order() {
        let names = ["Rey (Star Wars)", "Yoda", "Rey Star Wars", "yoda.", "Han Solo"];
        let collisions = find_collisions(&names);
        assert_eq!(
            collisions,
            vec![
                SlugCollision {
                    slug: "rey-star-wars".to_string(),
                    names: vec!["Rey (Star Wars)".to_string(), "Rey Star Wars".to_string()],
                },
                SlugCollision {
                    slug: "yoda".to_string(),
                    names: vec!["Yoda".to_string(), "yoda.".to_string()],
                },
            ]
        );
    }
}
