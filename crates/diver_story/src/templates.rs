//! World template catalog.

use diver_core::World;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Setting description for each world, placed at the top of every prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldTemplates {
    templates: BTreeMap<World, String>,
}

impl Default for WorldTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WorldTemplates {
    /// The built-in one-line settings.
    pub fn builtin() -> Self {
        let templates = World::all()
            .map(|world| (world, Self::default_for(world).to_string()))
            .collect();
        Self { templates }
    }

    /// Built-in template for a single world.
    pub fn default_for(world: World) -> &'static str {
        match world {
            World::Cultivation => {
                "A realm of immortal sects and spiritual energy, where cultivators refine qi \
                 through painful breakthroughs and the strong devour the weak."
            }
            World::MartialArts => {
                "A land of rival schools and wandering swordsmen, bound by codes of honour, \
                 blood debts and secret manuals."
            }
            World::Fantasy => {
                "A realm of magic, ancient ruins and dragons, where kingdoms rise and fall on \
                 the deeds of unlikely heroes."
            }
            World::SciFi => {
                "A future of starships, megacorporations and uncharted worlds, where technology \
                 outpaces the people who wield it."
            }
            World::ModernUrban => {
                "A present-day city where the supernatural hides in plain sight behind office \
                 towers, night markets and subway tunnels."
            }
        }
    }

    /// Built-in templates overlaid with `<dir>/<world>.txt` files.
    ///
    /// Missing, unreadable or blank files keep the built-in text.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut catalog = Self::builtin();

        for world in World::all() {
            let path = dir.join(format!("{}.txt", world.as_ref()));
            match std::fs::read_to_string(&path) {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(%world, path = %path.display(), "Loaded world template");
                    catalog.templates.insert(world, text.trim().to_string());
                }
                Ok(_) => {
                    warn!(%world, path = %path.display(), "World template is empty, using built-in");
                }
                Err(e) => {
                    warn!(%world, path = %path.display(), error = %e, "World template unavailable, using built-in");
                }
            }
        }

        catalog
    }

    /// Replaces one world's template.
    pub fn with(mut self, world: World, template: impl Into<String>) -> Self {
        self.templates.insert(world, template.into());
        self
    }

    /// Template text for `world`.
    pub fn get(&self, world: World) -> &str {
        self.templates
            .get(&world)
            .map(String::as_str)
            .unwrap_or_else(|| Self::default_for(world))
    }
}
