//! Category taxonomy and keyword table.
//!
//! Maps every routable [`Category`] to a [`CategoryProfile`]: the role that
//! handles it and the lowercase keywords that identify it in ticket text.
//! The standard table is literal data compiled into the binary. It is built
//! once per process and shared read-only; there is no reload path.
//!
//! `General` never has a profile. It is the fallback when nothing matches,
//! and its role is [`defaults::DEFAULT_ROLE`].

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

use cafm_core::{defaults, Category, Error, Result};

/// Responsible role and keyword list for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProfile {
    pub category: Category,
    /// Role looked up when auto-assigning, e.g. "Plumber"
    pub role: String,
    /// Lowercase keywords, unique within the profile, in declaration order
    pub keywords: Vec<String>,
}

impl CategoryProfile {
    pub fn new(category: Category, role: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            category,
            role: role.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Standard profiles in declaration order. Order matters: it breaks
/// classification ties and orders extracted keywords.
const STANDARD_PROFILES: &[(Category, &str, &[&str])] = &[
    (
        Category::Plumbing,
        "Plumber",
        &[
            "leak", "pipe", "water", "sink", "toilet", "drain", "faucet", "tap", "clog",
            "clogged", "flush", "shower", "plumbing", "sewage", "valve", "flood", "pressure",
            "basin",
        ],
    ),
    (
        Category::Electrical,
        "Electrician",
        &[
            "electrical",
            "electric",
            "electricity",
            "power",
            "outlet",
            "socket",
            "light",
            "lights",
            "bulb",
            "switch",
            "wiring",
            "wire",
            "breaker",
            "fuse",
            "circuit",
            "voltage",
            "lamp",
            "spark",
            "outage",
        ],
    ),
    (
        Category::Cleaning,
        "Cleaner",
        &[
            "clean", "cleaning", "dirty", "dust", "trash", "garbage", "spill", "stain", "mop",
            "vacuum", "rubbish", "smell", "odor", "waste", "litter", "hygiene", "restroom", "bin",
        ],
    ),
    (
        Category::AssetManagement,
        "AssetManager",
        &[
            "asset",
            "furniture",
            "chair",
            "desk",
            "table",
            "equipment",
            "inventory",
            "cabinet",
            "shelf",
            "door",
            "window",
            "broken",
            "replace",
            "damaged",
            "locker",
            "whiteboard",
        ],
    ),
    (
        Category::Hvac,
        "HvacTechnician",
        &[
            "hvac",
            "heating",
            "heater",
            "cooling",
            "air",
            "conditioning",
            "conditioner",
            "temperature",
            "thermostat",
            "ventilation",
            "vent",
            "fan",
            "hot",
            "cold",
            "boiler",
            "radiator",
            "humidity",
            "filter",
        ],
    ),
    (
        Category::Security,
        "SecurityOfficer",
        &[
            "security",
            "lock",
            "locked",
            "key",
            "keys",
            "alarm",
            "camera",
            "cctv",
            "badge",
            "access",
            "intruder",
            "theft",
            "stolen",
            "guard",
            "gate",
            "door",
            "surveillance",
        ],
    ),
    (
        Category::It,
        "ItSupport",
        &[
            "computer",
            "laptop",
            "network",
            "wifi",
            "internet",
            "printer",
            "email",
            "password",
            "software",
            "monitor",
            "keyboard",
            "mouse",
            "server",
            "projector",
            "login",
            "screen",
            "access",
            "phone",
        ],
    ),
];

static STANDARD: Lazy<Arc<Taxonomy>> = Lazy::new(|| {
    Arc::new(Taxonomy {
        profiles: STANDARD_PROFILES
            .iter()
            .map(|(category, role, keywords)| CategoryProfile::new(*category, *role, keywords))
            .collect(),
    })
});

/// Read-only `Category → CategoryProfile` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    profiles: Vec<CategoryProfile>,
}

impl Taxonomy {
    /// The compiled-in taxonomy, built on first use.
    pub fn standard() -> &'static Taxonomy {
        &STANDARD
    }

    /// Shared handle to the compiled-in taxonomy; every call returns the
    /// same allocation.
    pub fn shared() -> Arc<Taxonomy> {
        Arc::clone(&STANDARD)
    }

    /// Build a custom taxonomy.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a profile targets `General`, a category has
    /// more than one profile, or a keyword is empty, not lowercase, contains
    /// whitespace, or repeats within its profile.
    pub fn new(profiles: Vec<CategoryProfile>) -> Result<Self> {
        let mut seen_categories = HashSet::new();

        for profile in &profiles {
            if profile.category == Category::General {
                return Err(Error::InvalidInput(
                    "General is the fallback category and cannot have a profile".to_string(),
                ));
            }
            if !seen_categories.insert(profile.category) {
                return Err(Error::InvalidInput(format!(
                    "Duplicate profile for category {}",
                    profile.category
                )));
            }
            if profile.role.trim().is_empty() {
                return Err(Error::InvalidInput(format!(
                    "Profile for {} has an empty role",
                    profile.category
                )));
            }

            let mut seen_keywords = HashSet::new();
            for keyword in &profile.keywords {
                if keyword.is_empty()
                    || keyword.chars().any(char::is_whitespace)
                    || keyword.to_lowercase() != *keyword
                {
                    return Err(Error::InvalidInput(format!(
                        "Invalid keyword '{}' in {} profile",
                        keyword, profile.category
                    )));
                }
                if !seen_keywords.insert(keyword.as_str()) {
                    return Err(Error::InvalidInput(format!(
                        "Duplicate keyword '{}' in {} profile",
                        keyword, profile.category
                    )));
                }
            }
        }

        Ok(Self { profiles })
    }

    /// Profiles in declaration order.
    pub fn profiles(&self) -> &[CategoryProfile] {
        &self.profiles
    }

    /// Profile for `category`, if it has one.
    pub fn profile(&self, category: Category) -> Option<&CategoryProfile> {
        self.profiles.iter().find(|p| p.category == category)
    }

    /// Role responsible for `category`, or the default role when the
    /// category has no profile.
    pub fn role_for(&self, category: Category) -> &str {
        self.profile(category)
            .map(|p| p.role.as_str())
            .unwrap_or(defaults::DEFAULT_ROLE)
    }

    /// Every `(keyword, category)` pair in profile-then-keyword order.
    pub fn keyword_entries(&self) -> impl Iterator<Item = (&str, Category)> + '_ {
        self.profiles
            .iter()
            .flat_map(|p| p.keywords.iter().map(move |k| (k.as_str(), p.category)))
    }

    /// Total number of `(keyword, category)` pairs.
    pub fn keyword_count(&self) -> usize {
        self.profiles.iter().map(|p| p.keywords.len()).sum()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_standard_is_built_once() {
        let a = Taxonomy::shared();
        let b = Taxonomy::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(std::ptr::eq(a.as_ref(), Taxonomy::standard()));
    }

    #[test]
    fn test_standard_taxonomy_passes_validation() {
        let standard = Taxonomy::standard();
        let rebuilt = Taxonomy::new(standard.profiles().to_vec());
        assert!(rebuilt.is_ok(), "standard table invalid: {:?}", rebuilt.err());
    }

    #[test]
    fn test_every_category_except_general_has_one_profile() {
        let standard = Taxonomy::standard();
        for category in Category::ALL {
            let count = standard
                .profiles()
                .iter()
                .filter(|p| p.category == category)
                .count();
            let expected = if category == Category::General { 0 } else { 1 };
            assert_eq!(count, expected, "profile count for {}", category);
        }
    }

    #[test]
    fn test_declaration_order() {
        let order: Vec<Category> = Taxonomy::standard()
            .profiles()
            .iter()
            .map(|p| p.category)
            .collect();
        assert_eq!(
            order,
            vec![
                Category::Plumbing,
                Category::Electrical,
                Category::Cleaning,
                Category::AssetManagement,
                Category::Hvac,
                Category::Security,
                Category::It,
            ]
        );
    }

    #[test]
    fn test_role_for_profiled_categories() {
        let t = Taxonomy::standard();
        assert_eq!(t.role_for(Category::Plumbing), "Plumber");
        assert_eq!(t.role_for(Category::Electrical), "Electrician");
        assert_eq!(t.role_for(Category::Cleaning), "Cleaner");
        assert_eq!(t.role_for(Category::AssetManagement), "AssetManager");
        assert_eq!(t.role_for(Category::Hvac), "HvacTechnician");
        assert_eq!(t.role_for(Category::Security), "SecurityOfficer");
        assert_eq!(t.role_for(Category::It), "ItSupport");
    }

    #[test]
    fn test_role_for_general_is_default() {
        assert_eq!(
            Taxonomy::standard().role_for(Category::General),
            defaults::DEFAULT_ROLE
        );
    }

    #[test]
    fn test_keywords_repeat_across_profiles() {
        let t = Taxonomy::standard();
        let door_categories: Vec<Category> = t
            .keyword_entries()
            .filter(|(k, _)| *k == "door")
            .map(|(_, c)| c)
            .collect();
        assert_eq!(
            door_categories,
            vec![Category::AssetManagement, Category::Security]
        );
    }

    #[test]
    fn test_plumbing_profile_contains_core_terms() {
        let plumbing = Taxonomy::standard().profile(Category::Plumbing).unwrap();
        for k in ["leak", "pipe", "water", "sink"] {
            assert!(plumbing.keywords.iter().any(|kw| kw == k), "missing {}", k);
        }
        assert!(!plumbing.keywords.iter().any(|kw| kw == "leaking"));
    }

    #[test]
    fn test_new_rejects_general_profile() {
        let err = Taxonomy::new(vec![CategoryProfile::new(
            Category::General,
            "Anyone",
            &["misc"],
        )]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_duplicate_category() {
        let err = Taxonomy::new(vec![
            CategoryProfile::new(Category::It, "ItSupport", &["laptop"]),
            CategoryProfile::new(Category::It, "Helpdesk", &["printer"]),
        ]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_duplicate_keyword_within_profile() {
        let err = Taxonomy::new(vec![CategoryProfile::new(
            Category::Cleaning,
            "Cleaner",
            &["mop", "mop"],
        )]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_uppercase_or_spaced_keyword() {
        assert!(Taxonomy::new(vec![CategoryProfile::new(
            Category::Cleaning,
            "Cleaner",
            &["Mop"],
        )])
        .is_err());
        assert!(Taxonomy::new(vec![CategoryProfile::new(
            Category::Cleaning,
            "Cleaner",
            &["wet floor"],
        )])
        .is_err());
    }

    #[test]
    fn test_custom_taxonomy_unprofiled_category_uses_default_role() {
        let t = Taxonomy::new(vec![CategoryProfile::new(
            Category::It,
            "Helpdesk",
            &["laptop"],
        )])
        .unwrap();
        assert_eq!(t.role_for(Category::It), "Helpdesk");
        assert_eq!(t.role_for(Category::Plumbing), defaults::DEFAULT_ROLE);
        assert_eq!(t.keyword_count(), 1);
    }
}
