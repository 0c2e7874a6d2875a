//! `worlds` command handler.

use diver::DiverSettings;
use diver_core::{CharacterSheet, World};

/// Prints every world with its template and sample protagonist.
#[tracing::instrument(skip_all)]
pub fn handle_worlds_command(settings: &DiverSettings) {
    let templates = settings.templates();
    for world in World::all() {
        println!("{:<14} {}", world.as_ref(), world.label());
        println!("               {}", templates.get(world));
        println!("               Sample: {}\n", CharacterSheet::sample(world));
    }
}
