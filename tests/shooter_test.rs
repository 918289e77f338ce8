use quad_flow::game::{config::ShooterConfig, input::Key, shooter::ShooterScene};

use crate::common::test_utils::{hold, playing, release, run, run_until, tap};

mod common;

#[test]
fn pitch_stays_within_limits_while_looking() {
    let mut session = playing(ShooterScene::default);
    hold(&mut session, &[Key::LookUp]);
    for _ in 0..500 {
        run(&mut session, 1);
        let pitch = session.scene().unwrap().camera().pitch.0;
        assert!((-89.0..=89.0).contains(&pitch));
    }
    assert_eq!(session.scene().unwrap().camera().pitch.0, -89.0);

    release(&mut session, &[Key::LookUp]);
    hold(&mut session, &[Key::LookDown]);
    run(&mut session, 500);
    assert_eq!(session.scene().unwrap().camera().pitch.0, 89.0);
}

#[test]
fn walking_stops_short_of_the_arena_wall() {
    let mut session = playing(ShooterScene::default);
    hold(&mut session, &[Key::Forward]);
    run(&mut session, 2000);
    // Starting at z = 5 in steps of 1, the last step inside |z| < 990 ends at -989.
    assert_eq!(session.scene().unwrap().camera().position.z, -989.0);
}

#[test]
fn enemy_reaching_the_player_vanishes_and_hits_once() {
    let mut session = playing(ShooterScene::default);
    tap(&mut session, Key::Spawn);
    assert_eq!(session.scene().unwrap().enemies().len(), 1);

    let start = ShooterConfig::DEFAULT.player_health;
    let mut hits = 0;
    let mut health = start;
    let contact = run_until(&mut session, 2000, |session| {
        let scene = session.scene().unwrap();
        if scene.health() != health {
            hits += 1;
            health = scene.health();
            // Damage and removal land on the same tick.
            assert!(scene.enemies().is_empty());
        }
        scene.enemies().is_empty()
    });

    assert!(contact.is_some());
    run(&mut session, 100);
    assert_eq!(hits, 1);
    assert_eq!(session.scene().unwrap().health(), start - 5);
}

#[test]
fn displayed_health_bottoms_out_at_zero() {
    let mut session = playing(ShooterScene::default);
    for _ in 0..25 {
        tap(&mut session, Key::Spawn);
    }
    run(&mut session, 2000);

    let scene = session.scene().unwrap();
    assert!(scene.enemies().is_empty());
    assert_eq!(scene.health(), -25);
    assert_eq!(scene.displayed_health(), 0);
    assert_eq!(scene.health_fraction(), 0.0);
}

#[test]
fn two_shots_kill_an_enemy_in_range() {
    let mut session = playing(ShooterScene::default);
    tap(&mut session, Key::Spawn);
    // Out of range right after spawning.
    tap(&mut session, Key::Action);
    assert_eq!(session.scene().unwrap().enemies()[0].health, 100);

    run(&mut session, 600);
    tap(&mut session, Key::Action);
    tap(&mut session, Key::Action);
    run(&mut session, 1);
    assert!(session.scene().unwrap().enemies().is_empty());
    assert_eq!(session.scene().unwrap().health(), 100);
}
