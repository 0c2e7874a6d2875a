//! Offline provider that replays canned scenes.

use async_trait::async_trait;
use diver_core::{GenerationParams, World};
use diver_error::ProviderError;
use diver_interface::ProviderClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument};

const OPENINGS: [(World, &str); 5] = [
    (
        World::Cultivation,
        "Mist rolls over the stone steps of the Azure Peak Sect as the gatekeeper \
         studies you. Three trial paths wind up the mountain: one bathed in gold, \
         one crackling with lightning, one lost in shadow.\n\n\
         DECISION_POINT\n\
         1. Climb the golden path\n\
         2. Brave the lightning path\n\
         3. Slip into the shadowed path\n\
         4. Ask the gatekeeper about the trials",
    ),
    (
        World::MartialArts,
        "Dawn light cuts through the bamboo as a runner stumbles into the courtyard. \
         The school's sacred manuals were stolen overnight, and your master turns to \
         you for counsel.\n\n\
         DECISION_POINT\n\
         1. Chase the thieves at once\n\
         2. Search the library for clues\n\
         3. Split the disciples into two groups\n\
         4. Ask your master who might be responsible",
    ),
    (
        World::Fantasy,
        "The tavern falls quiet when an elf slams a faded map onto the bar and \
         swears the dragon's hoard is real. The dwarf beside her laughs, then both \
         turn to look at you.\n\n\
         DECISION_POINT\n\
         1. Offer to read the map\n\
         2. Side with the skeptical dwarf\n\
         3. Ask about the legend of the hoard\n\
         4. Keep drinking and listen",
    ),
    (
        World::SciFi,
        "Alarms pulse through the hull of the salvage ship as an unregistered \
         vessel drifts into scanner range, its transponder broadcasting your name.\n\n\
         DECISION_POINT\n\
         1. Hail the vessel\n\
         2. Power up the cutting lasers\n\
         3. Run a deep scan first\n\
         4. Wake the captain",
    ),
    (
        World::ModernUrban,
        "Your phone buzzes at 3 a.m. with a photo of your apartment door, taken \
         from the hallway, and a single line: we need to talk.\n\n\
         DECISION_POINT\n\
         1. Open the door\n\
         2. Call the police\n\
         3. Reply to the message\n\
         4. Leave by the fire escape",
    ),
];

const CONTINUATIONS: [&str; 3] = [
    "Your choice sets events in motion faster than you expected. A stranger \
     steps out of the crowd, eyes fixed on you, and presses a sealed letter \
     into your hand before vanishing.\n\n\
     DECISION_POINT\n\
     1. Open the letter immediately\n\
     2. Follow the stranger\n\
     3. Hide the letter and move on",
    "The ground trembles. Whatever you disturbed is awake now, and the only \
     way forward lies through a narrow passage lit by a cold blue glow.\n\n\
     DECISION_POINT\n\
     1. Press through the passage\n\
     2. Stand and wait for it to come to you\n\
     3. Retreat and gather allies\n\
     4. Study the glow before moving",
    "An old rival appears at the worst possible moment, smiling as if they \
     had been expecting you all along. They offer a truce, for a price.\n\n\
     DECISION_POINT\n\
     1. Accept the truce\n\
     2. Refuse and prepare to fight\n\
     3. Ask what the price is",
];

/// Provider that never touches the network.
///
/// The first turn of a story gets an opening scene for the world named in
/// the prompt; later turns cycle through generic continuations.
#[derive(Debug, Default)]
pub struct DemoClient {
    turn: AtomicUsize,
}

impl DemoClient {
    /// Creates a demo client.
    pub fn new() -> Self {
        Self::default()
    }

    fn opening_for(prompt: &str) -> &'static str {
        let world = OPENINGS
            .iter()
            .find(|(world, _)| prompt.contains(world.label()))
            .unwrap_or(&OPENINGS[2]);
        world.1
    }
}

#[async_trait]
impl ProviderClient for DemoClient {
    #[instrument(skip(self, prompt, _params), fields(provider = "demo", prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let scene = if prompt.contains("[Decision Made:") {
            let turn = self.turn.fetch_add(1, Ordering::Relaxed);
            CONTINUATIONS[turn % CONTINUATIONS.len()]
        } else {
            Self::opening_for(prompt)
        };
        debug!(chars = scene.len(), "Serving demo scene");
        Ok(scene.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "demo"
    }

    fn model_name(&self) -> &str {
        "demo"
    }
}
