//! `play` command handler: a line-oriented story driver.

use super::PlayArgs;
use anyhow::Context;
use diver::DiverSettings;
use diver_core::{CharacterSheet, DecisionPoint, SessionState, World};
use diver_error::{DiverError, DiverErrorKind, StoryErrorKind};
use diver_interface::ProviderClient;
use diver_models::{Credentials, ProviderConfig, ProviderKind, RetryingClient};
use diver_story::StoryEngine;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

/// Reads answers from stdin.
struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `question` and returns the trimmed answer, or `None` at end of input.
    async fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        println!("{}", question);
        let line = self.lines.next_line().await.context("Failed to read input")?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

/// Runs an interactive story until the user quits or input ends.
#[tracing::instrument(skip_all, fields(demo = args.demo, sample = args.sample))]
pub async fn handle_play_command(settings: DiverSettings, args: PlayArgs) -> anyhow::Result<()> {
    let mut settings = settings;
    if args.demo {
        settings = settings.with_provider(ProviderConfig::for_kind(ProviderKind::Demo));
    }
    if args.free_text {
        settings = settings.allow_free_text();
    }

    let provider = settings
        .provider()
        .connect(&Credentials::from_env())
        .context("No usable provider; set an API key or pass --demo")?;
    let client = RetryingClient::new(provider, settings.retry().clone());
    let engine = StoryEngine::new(client, settings.templates(), settings.engine_config())?;

    let mut terminal = Terminal::new();
    let mut session = SessionState::new();

    let Some(world) = pick_world(&mut terminal, args.world).await? else {
        return Ok(());
    };
    session.select_world(world)?;

    let character = if args.sample {
        CharacterSheet::sample(world)
    } else {
        match create_character(&mut terminal).await? {
            Some(character) => character,
            None => return Ok(()),
        }
    };
    session.create_character(character)?;

    println!(
        "\n{} in the {}, narrated by {}.\nType a number or your own action; 'quit' ends the story.\n",
        session.character().map(|c| c.name().as_str()).unwrap_or_default(),
        world.label(),
        engine.provider().provider_name()
    );

    run_story(&engine, &mut session, &mut terminal).await?;

    println!("\n===== TRANSCRIPT =====\n");
    println!("{}", session.history().transcript());
    Ok(())
}

async fn run_story<P: ProviderClient>(
    engine: &StoryEngine<P>,
    session: &mut SessionState,
    terminal: &mut Terminal,
) -> anyhow::Result<()> {
    let mut choice: Option<String> = None;

    loop {
        match engine.advance(session, choice.as_deref()).await {
            Ok(scene) => show_scene(session.history().len(), &scene),
            Err(e) => {
                if !report_turn_error(&e, session) {
                    return Err(e.into());
                }
            }
        }

        let Some(pending) = session.history().pending().cloned() else {
            // The opening turn failed, so there is nothing to answer yet.
            if ask_retry(terminal).await? {
                choice = None;
                continue;
            }
            return Ok(());
        };

        choice = loop {
            let Some(answer) = terminal.ask("> ").await? else {
                return Ok(());
            };
            if answer.eq_ignore_ascii_case("quit") {
                return Ok(());
            }
            match resolve_answer(&pending, &answer) {
                Some(resolved) => break Some(resolved),
                None => println!("Pick one of the numbered options or type an action."),
            }
        };
    }
}

/// Prints a turn failure; returns false if the failure should end the program.
fn report_turn_error(error: &DiverError, session: &SessionState) -> bool {
    match error.kind() {
        DiverErrorKind::Provider(e) => {
            warn!(error = %e, "Turn failed");
            println!("\nThe storyteller could not answer: {}\n", e.kind());
            true
        }
        DiverErrorKind::Story(e) => match e.kind() {
            StoryErrorKind::Parse { index, .. } => {
                if let Some(entry) = session.history().get(*index) {
                    show_scene(index + 1, entry);
                }
                println!("(No options were offered this time; describe what you do.)");
                true
            }
            StoryErrorKind::InvalidState(message) => {
                println!("\n{}\n", message);
                true
            }
            StoryErrorKind::InvalidCharacter(_) => false,
        },
        DiverErrorKind::Config(_) => false,
    }
}

async fn ask_retry(terminal: &mut Terminal) -> anyhow::Result<bool> {
    let answer = terminal.ask("Try again? [Y/n]").await?;
    Ok(matches!(answer.as_deref(), Some("") | Some("y") | Some("Y") | Some("yes")))
}

/// Maps a typed answer onto a choice label; numbers select options.
fn resolve_answer(pending: &DecisionPoint, answer: &str) -> Option<String> {
    if answer.is_empty() {
        return None;
    }
    if let Ok(n) = answer.parse::<usize>() {
        return pending.choices().get(n.checked_sub(1)?).cloned();
    }
    Some(answer.to_string())
}

fn show_scene(number: usize, scene: &DecisionPoint) {
    println!("\n--- Chapter {} ---\n\n{}\n", number, scene.narrative());
    for (i, choice) in scene.choices().iter().enumerate() {
        println!("  {}. {}", i + 1, choice);
    }
}

async fn pick_world(terminal: &mut Terminal, preset: Option<World>) -> anyhow::Result<Option<World>> {
    if let Some(world) = preset {
        return Ok(Some(world));
    }
    let worlds: Vec<World> = World::all().collect();
    println!("Choose a world:");
    for (i, world) in worlds.iter().enumerate() {
        println!("  {}. {}", i + 1, world.label());
    }

    loop {
        let Some(answer) = terminal.ask("> ").await? else {
            return Ok(None);
        };
        let picked = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| worlds.get(n.checked_sub(1)?).copied())
            .or_else(|| answer.parse::<World>().ok());
        match picked {
            Some(world) => {
                info!(%world, "World chosen");
                return Ok(Some(world));
            }
            None => println!("Enter a number from 1 to {}.", worlds.len()),
        }
    }
}

async fn create_character(terminal: &mut Terminal) -> anyhow::Result<Option<CharacterSheet>> {
    loop {
        let Some(name) = terminal.ask("Character name:").await? else {
            return Ok(None);
        };
        let Some(background) = terminal.ask("Background:").await? else {
            return Ok(None);
        };
        let Some(traits) = terminal.ask("Traits (comma separated):").await? else {
            return Ok(None);
        };
        let Some(goal) = terminal.ask("Goal:").await? else {
            return Ok(None);
        };

        let traits = traits
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        let character = CharacterSheet::new(name, background, traits, goal);

        let issues = character.validate();
        if issues.is_empty() {
            return Ok(Some(character));
        }
        for issue in issues {
            println!("  - {}", issue);
        }
        println!("Let's try that again.\n");
    }
}
