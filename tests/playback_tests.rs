//! Playback integration tests: transitions, reveal, toast, thought popup.

use scene_engine::core::command::Command;
use scene_engine::core::engine::Engine;
use scene_engine::schema::story::{SceneId, Story};
use std::path::Path;

fn load_story() -> Story {
    Story::load_from_ron(Path::new("tests/fixtures/test_story.ron")).unwrap()
}

/// An engine idle and settled on the given scene.
fn settled_at(id: &str) -> Engine {
    let mut engine = Engine::new(load_story());
    engine.start();
    engine.advance(10_000);
    engine.request_transition(&SceneId::new(id), true);
    engine.advance(10_000);
    engine
}

fn click_and_settle(engine: &mut Engine, index: usize) -> Vec<Command> {
    let mut out = engine.click_choice(index);
    out.extend(engine.advance(10_000));
    out
}

fn settle_builds(out: &[Command]) -> Vec<&Command> {
    out.iter()
        .filter(|c| {
            matches!(
                c,
                Command::ShowObjects(_) | Command::ShowChoices(_) | Command::ShowThoughtPopup(_)
            )
        })
        .collect()
}

#[test]
fn every_scene_is_reachable_and_guard_clears() {
    let story = load_story();
    for id in story.scenes.keys() {
        let mut engine = Engine::new(load_story());
        engine.start();
        engine.advance(10_000);
        engine.request_transition(id, false);
        engine.advance(10_000);
        assert_eq!(engine.current_scene(), id, "scene {id} did not settle");
        assert!(!engine.is_transitioning(), "guard stuck for scene {id}");
        assert!(!engine.is_revealing(), "reveal stuck for scene {id}");
    }
}

#[test]
fn skip_produces_identical_settle_to_natural_reveal() {
    // Natural completion.
    let mut natural = Engine::new(load_story());
    natural.start();
    natural.advance(10_000);
    let mut natural_out = natural.request_transition(&SceneId::new("3.0"), true);
    natural_out.extend(natural.advance(20_000));

    // Skipped mid-reveal.
    let mut skipped = Engine::new(load_story());
    skipped.start();
    skipped.advance(10_000);
    let mut skipped_out = skipped.request_transition(&SceneId::new("3.0"), true);
    skipped_out.extend(skipped.advance(100));
    skipped_out.extend(skipped.skip_reveal());
    skipped_out.extend(skipped.advance(20_000));

    assert_eq!(settle_builds(&natural_out), settle_builds(&skipped_out));

    // The dependent UI is built exactly once per scene either way.
    let choice_builds = |out: &[Command]| {
        out.iter()
            .filter(|c| matches!(c, Command::ShowChoices(_)))
            .count()
    };
    assert_eq!(choice_builds(&natural_out), 1);
    assert_eq!(choice_builds(&skipped_out), 1);
}

#[test]
fn skip_outside_reveal_is_noop() {
    let mut engine = settled_at("1.0");
    assert!(engine.skip_reveal().is_empty());
}

#[test]
fn wrong_turn_scene_shows_toast_and_leaving_hides_it() {
    let mut engine = settled_at("2.0");

    // "Промолчать" loops into the wrong-answer scene.
    let out = click_and_settle(&mut engine, 0);
    assert_eq!(engine.current_scene(), &SceneId::new("2.1_wrong"));
    assert!(out.contains(&Command::ShowToast(
        "Это решение ни на что не повлияет".to_string()
    )));

    // 10s later the toast has auto-hidden; re-entering re-shows it, and
    // transitioning away before expiry hides it at the swap.
    let out = click_and_settle(&mut engine, 0);
    assert_eq!(engine.current_scene(), &SceneId::new("2.0"));
    assert!(!out.contains(&Command::HideToast));

    let mut out = engine.click_choice(0);
    out.extend(engine.advance(1_200));
    assert!(out.contains(&Command::ShowToast(
        "Это решение ни на что не повлияет".to_string()
    )));
    let mut out = engine.click_choice(0);
    out.extend(engine.advance(300));
    assert!(out.contains(&Command::HideToast));
}

#[test]
fn toast_auto_hides_after_duration() {
    let mut engine = settled_at("2.0");
    let out = click_and_settle(&mut engine, 0);
    let shown = out
        .iter()
        .position(|c| matches!(c, Command::ShowToast(_)))
        .unwrap();
    let hidden = out.iter().position(|c| c == &Command::HideToast).unwrap();
    assert!(shown < hidden);
}

#[test]
fn thought_popup_appears_after_exact_delay() {
    let mut engine = settled_at("1.0");
    engine.request_transition(&SceneId::new("3.0"), true);

    // "Он смотрит в окно." is 18 characters: the reveal settles at 18 * 22,
    // and the popup is due 1000ms later.
    let out = engine.advance(18 * 22 + 999);
    assert!(!out
        .iter()
        .any(|c| matches!(c, Command::ShowThoughtPopup(_))));

    let out = engine.advance(1);
    assert!(out.contains(&Command::ShowThoughtPopup("Зачем я здесь?".to_string())));
}

#[test]
fn transitioning_away_cancels_pending_popup() {
    let mut engine = settled_at("1.0");
    engine.request_transition(&SceneId::new("3.0"), true);
    // Settled, popup pending, not yet visible.
    let mut out = engine.advance(500);
    out.extend(engine.request_transition(&SceneId::new("4.0"), false));
    out.extend(engine.advance(20_000));

    assert_eq!(engine.current_scene(), &SceneId::new("4.0"));
    assert!(!out
        .iter()
        .any(|c| matches!(c, Command::ShowThoughtPopup(_))));
}

#[test]
fn leaving_hides_visible_popup() {
    let mut engine = settled_at("3.0");
    // settled_at advanced far enough for the popup to be on screen.
    let mut out = engine.request_transition(&SceneId::new("4.0"), false);
    out.extend(engine.advance(300));
    assert!(out.contains(&Command::HideThoughtPopup));
}

#[test]
fn dismissing_popup_hides_it_once() {
    let mut engine = settled_at("3.0");
    assert_eq!(engine.dismiss_thought(), vec![Command::HideThoughtPopup]);
    assert!(engine.dismiss_thought().is_empty());
}

#[test]
fn one_bulk_advance_equals_many_small_ones() {
    let mut bulk = Engine::new(load_story());
    let mut bulk_out = bulk.start();
    bulk_out.extend(bulk.advance(2_000));

    let mut stepped = Engine::new(load_story());
    let mut stepped_out = stepped.start();
    for _ in 0..2_000 {
        stepped_out.extend(stepped.advance(1));
    }

    assert_eq!(bulk_out, stepped_out);
    assert_eq!(bulk.now(), stepped.now());
}

#[test]
fn restart_choice_resets_progress_to_defaults() {
    let mut engine = settled_at("3.0");
    assert!(engine.progress().perspective().is_some());

    engine.request_transition(&SceneId::new("6.0"), true);
    engine.advance(10_000);
    click_and_settle(&mut engine, 0);

    assert_eq!(engine.current_scene(), &SceneId::new("1.0"));
    assert_eq!(engine.progress().chapter(), 1);
    assert!(engine.progress().perspective().is_none());
    assert_eq!(engine.progress().visited_object_count(), 0);
    assert!(engine.progress().daughter_scenes().is_empty());
}

#[test]
fn start_after_play_resets_everything() {
    let mut engine = settled_at("5.1_shrimp");
    assert!(!engine.progress().daughter_scenes().is_empty());

    engine.start();
    engine.advance(10_000);
    assert_eq!(engine.current_scene(), &SceneId::new("1.0"));
    assert!(engine.progress().daughter_scenes().is_empty());
    assert_eq!(engine.progress().chapter(), 1);
}
