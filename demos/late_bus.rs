//! Headless playthrough of the sample story.
//!
//! Drives the engine the way a presentation host would: advancing logical
//! time, skipping reveals, clicking objects and choices, and printing every
//! command batch to stdout.

use scene_engine::core::command::Command;
use scene_engine::core::engine::Engine;
use scene_engine::schema::scene::ObjectId;
use scene_engine::schema::story::Story;
use std::path::Path;

enum Step {
    /// Click the choice at this index, then let the transition play out.
    Choice(usize),
    /// Inspect an interactive object.
    Object(&'static str),
    /// Click through the reveal.
    Skip,
    /// Let time pass.
    Wait(u64),
}

fn render(commands: &[Command]) {
    // Per-character frames are too chatty for stdout; print only the final
    // text state of the batch.
    let last_reveal = commands
        .iter()
        .rposition(|c| matches!(c, Command::RevealText(_)));
    for (i, command) in commands.iter().enumerate() {
        match command {
            Command::RevealText(text) => {
                if Some(i) == last_reveal && !text.is_empty() {
                    println!("{text}");
                }
            }
            Command::FadeOut => println!("           . . ."),
            Command::SetChapterLabel(label) => {
                if !label.is_empty() {
                    println!("== {label} ==");
                }
            }
            Command::ShowObjects(objects) => {
                for object in objects {
                    let mark = if object.visited { "*" } else { " " };
                    println!("  [{mark}] {}", object.label);
                }
            }
            Command::ShowChoices(choices) => {
                for choice in choices {
                    if choice.enabled {
                        println!("  ({}) {}", choice.index + 1, choice.text);
                    } else {
                        let hint = choice.hint.as_deref().unwrap_or("");
                        println!("  (x) {} [{hint}]", choice.text);
                    }
                }
            }
            Command::AppendText(text) => println!("      {text}"),
            Command::ShowToast(message) => println!("  ~ {message} ~"),
            Command::ShowThoughtPopup(text) => println!("  ...{text}..."),
            Command::FadeIn
            | Command::SetBackground(_)
            | Command::ClearText
            | Command::HideToast
            | Command::HideThoughtPopup => {}
        }
    }
}

fn main() {
    let story = Story::load_from_ron(Path::new("story_data/late_bus.ron"))
        .expect("story_data/late_bus.ron should parse");
    let mut engine = Engine::new(story);

    render(&engine.start());
    render(&engine.advance(800));

    let script = [
        Step::Skip,      // finish the chapter 1 text
        Step::Choice(0), // board the bus
        Step::Skip,
        Step::Choice(0), // the wrong answer: a toast, then a loop back
        Step::Skip,
        Step::Choice(0),
        Step::Skip,
        Step::Choice(1), // pay, switching to his perspective
        Step::Skip,
        Step::Wait(1200), // long enough for the inner voice to surface
        Step::Choice(0),  // the apartment
        Step::Skip,
        Step::Object("photo"),
        Step::Object("letter"), // two objects unlock the exit
        Step::Choice(0),
        Step::Skip,
        Step::Choice(0), // the shrimp story
        Step::Skip,
        Step::Choice(0),
        Step::Skip,
        Step::Choice(1), // the bunny story
        Step::Skip,
        Step::Choice(0),
        Step::Skip,
        Step::Choice(2), // the monkey story
        Step::Skip,
        Step::Choice(0),
        Step::Skip,
        Step::Choice(3), // the psycho story
        Step::Skip,
        Step::Choice(0),
        Step::Skip,
        Step::Choice(4), // all four heard, the finale is open
        Step::Skip,
        Step::Choice(0), // restart
        Step::Skip,
    ];

    for step in script {
        match step {
            Step::Choice(index) => {
                render(&engine.click_choice(index));
                render(&engine.advance(800));
            }
            Step::Object(id) => render(&engine.click_object(&ObjectId::new(id))),
            Step::Skip => render(&engine.skip_reveal()),
            Step::Wait(ms) => render(&engine.advance(ms)),
        }
    }

    println!();
    println!(
        "playthrough done: scene {}, chapter {}",
        engine.current_scene(),
        engine.progress().chapter()
    );
}
