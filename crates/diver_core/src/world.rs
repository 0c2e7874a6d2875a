//! World (genre) identifiers.

use serde::{Deserialize, Serialize};

/// The genre a story is set in.
///
/// The identifier form is snake_case, so worlds round-trip through settings
/// files, CLI arguments and serialized sessions as plain strings.
///
/// # Examples
///
/// ```
/// use diver_core::World;
///
/// let world: World = "martial_arts".parse().unwrap();
/// assert_eq!(world, World::MartialArts);
/// assert_eq!(world.to_string(), "martial_arts");
/// assert_eq!(world.label(), "Martial Arts World");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum World {
    /// Spiritual cultivation towards immortality
    Cultivation,
    /// Wandering martial artists, sects and honour duels
    MartialArts,
    /// Wizards, dragons and epic quests
    Fantasy,
    /// Advanced technology and space exploration
    SciFi,
    /// A modern city with hidden supernatural elements
    ModernUrban,
}

impl World {
    /// Human-readable name for menus and headers.
    pub fn label(&self) -> &'static str {
        match self {
            World::Cultivation => "Cultivation World",
            World::MartialArts => "Martial Arts World",
            World::Fantasy => "Fantasy World",
            World::SciFi => "Sci-Fi World",
            World::ModernUrban => "Modern Urban World",
        }
    }

    /// All worlds in menu order.
    pub fn all() -> impl Iterator<Item = World> {
        <World as strum::IntoEnumIterator>::iter()
    }
}
