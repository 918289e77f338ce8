use quad_flow::game::{
    Simulation,
    input::Key,
    readout::{Anchor, Caption, PAUSE_PROMPT, Readout, TITLE_PROMPT},
    session::{Phase, Session},
    shooter::ShooterScene,
    skate::SkateScene,
};

use crate::common::test_utils::{hold, playing, run, tap};

mod common;

#[test]
fn title_ignores_game_keys_until_return() {
    let mut session: Session<ShooterScene> = Session::default();
    assert_eq!(tap(&mut session, Key::Spawn), None);
    hold(&mut session, &[Key::Forward]);
    run(&mut session, 10);
    assert_eq!(session.phase(), Phase::Title);
    assert!(session.scene().is_none());

    assert_eq!(tap(&mut session, Key::Start), Some(Phase::Playing));
    assert!(session.scene().unwrap().enemies().is_empty());
}

#[test]
fn quitting_from_pause_starts_over() {
    let mut session = playing(ShooterScene::default);
    tap(&mut session, Key::Spawn);
    hold(&mut session, &[Key::Forward]);
    run(&mut session, 10);

    // Q only quits while paused.
    assert_eq!(tap(&mut session, Key::Quit), None);
    assert_eq!(tap(&mut session, Key::Pause), Some(Phase::Paused));
    assert_eq!(tap(&mut session, Key::Quit), Some(Phase::Title));
    assert!(session.scene().is_none());

    tap(&mut session, Key::Start);
    let scene = session.scene().unwrap();
    assert!(scene.enemies().is_empty());
    assert_eq!(scene.camera().position.z, 5.0);
}

#[test]
fn phase_change_releases_held_keys() {
    let mut session = playing(SkateScene::default);
    hold(&mut session, &[Key::Forward]);
    run(&mut session, 5);
    tap(&mut session, Key::Pause);
    tap(&mut session, Key::Pause);

    // Forward was cleared by the pause, so the skater only coasts now.
    let speed = session.scene().unwrap().speed();
    run(&mut session, 1);
    assert!(session.scene().unwrap().speed() < speed);
}

#[test]
fn focus_loss_freezes_the_skater() {
    let mut session = playing(SkateScene::default);
    hold(&mut session, &[Key::Forward]);
    run(&mut session, 5);
    session.set_focused(false);
    let frozen = session.scene().unwrap().view();
    run(&mut session, 50);
    assert_eq!(session.scene().unwrap().view(), frozen);

    session.set_focused(true);
    hold(&mut session, &[Key::Forward]);
    run(&mut session, 1);
    assert_ne!(session.scene().unwrap().view(), frozen);
}

#[test]
fn holding_escape_stays_paused() {
    let mut session = playing(ShooterScene::default);
    assert_eq!(session.key_event(Key::Pause, true), Some(Phase::Paused));
    for _ in 0..3 {
        assert_eq!(session.key_event(Key::Pause, true), None);
    }
    assert_eq!(session.phase(), Phase::Paused);

    session.key_event(Key::Pause, false);
    assert_eq!(tap(&mut session, Key::Pause), Some(Phase::Playing));
}

#[test]
fn captions_follow_the_phase() {
    let mut session: Session<ShooterScene> = Session::default();
    assert_eq!(session.captions(), vec![Caption::new(Anchor::Centre, TITLE_PROMPT)]);

    tap(&mut session, Key::Start);
    let captions = session.captions();
    assert_eq!(captions.len(), 1);
    assert_eq!(captions[0].anchor, Anchor::TopLeft);
    assert!(captions[0].text.starts_with("Position: (0.00, 20.00, 5.00)\nRotation:"));
    assert!(captions[0].text.ends_with("Health: 100"));

    tap(&mut session, Key::Pause);
    assert_eq!(
        session.captions().last(),
        Some(&Caption::new(Anchor::Centre, PAUSE_PROMPT))
    );
}

#[test]
fn combo_label_is_captioned_above_the_preview() {
    let mut session = playing(SkateScene::default);
    assert_eq!(session.captions().len(), 1);

    tap(&mut session, Key::Action);
    let captions = session.captions();
    assert_eq!(
        captions.last(),
        Some(&Caption::new(Anchor::AboveCorner, "Ollie (+100)\nCombo: 100"))
    );
}
