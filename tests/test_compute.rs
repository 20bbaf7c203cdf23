mod common;

use common::*;

use space_shooter::compute::{init_state, SimulationLoop};
use space_shooter::config::GameConfig;
use space_shooter::enemies::{spawn_chance, speed_bonus};
use space_shooter::entities::{Arena, Rect, Weapon, AGE_DECREMENT, BULLET_AGE, SHIP_WIDTH};
use space_shooter::render::{Fill, Rgba, Stroke};

fn tick(state: &mut space_shooter::compute::GameState, sound: &mut RecordingSound) {
    state.update(16, &mut zero_rng(), sound);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_with_no_enemies_leaves_score_and_reaches_the_edge() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.fire(&mut sound);

    assert_eq!(s.bullets.len(), 1);
    let b = &s.bullets.units()[0];
    assert_eq!(b.age, BULLET_AGE);
    assert_eq!(b.end, ARENA_W);
    assert_eq!((b.x, b.y, b.start), (400.0, 335.0, 400.0));
    assert_eq!(b.kind, Weapon::Laser);
    assert_eq!(s.score.count(), 0);
    assert_eq!(sound.played, vec!["lasershot"]);
}

#[test]
fn fire_kills_enemy_in_line_and_clips_the_beam() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.score.up(2000);
    s.enemies.spawn_at(600.0, 300.0);

    s.fire(&mut sound);

    assert!(s.enemies.is_empty());
    assert_eq!(s.score.count(), 2010);
    assert_eq!(s.bullets.units()[0].end, 600.0);
    assert_eq!(s.explosions.len(), 1);
    let e = &s.explosions.units()[0];
    assert_eq!((e.x, e.y, e.age), (650.0, 335.0, 1.0));
    assert_eq!(sound.played, vec!["explosion", "lasershot"]);
}

#[test]
fn fire_takes_first_enumerated_enemy_not_nearest() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    let far = s.enemies.spawn_at(700.0, 300.0);
    let near = s.enemies.spawn_at(500.0, 300.0);

    s.fire(&mut sound);

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies.units()[0].id, near);
    assert_ne!(near, far);
    assert_eq!(s.bullets.units()[0].end, 700.0);
    assert_eq!(s.score.count(), 10);
}

#[test]
fn fire_ignores_enemies_behind_or_off_line() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.enemies.spawn_at(350.0, 300.0); // behind the muzzle
    s.enemies.spawn_at(600.0, 340.0); // below the muzzle row
    s.enemies.spawn_at(600.0, 200.0); // above it

    s.fire(&mut sound);

    assert_eq!(s.enemies.len(), 3);
    assert_eq!(s.score.count(), 0);
    assert_eq!(s.bullets.units()[0].end, ARENA_W);
}

#[test]
fn fire_vertical_span_is_inclusive() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.enemies.spawn_at(600.0, 335.0); // top edge on the muzzle row
    s.fire(&mut sound);
    assert!(s.enemies.is_empty());

    s.enemies.spawn_at(600.0, 265.0); // bottom edge on the muzzle row
    s.fire(&mut sound);
    assert!(s.enemies.is_empty());
    assert_eq!(s.score.count(), 20);
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn projectile_age_drops_by_fixed_step_until_removed() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.fire(&mut sound);

    let mut expected = BULLET_AGE;
    let mut ticks = 0;
    loop {
        s.bullets.advance();
        ticks += 1;
        expected -= AGE_DECREMENT;
        if expected <= 0.0 {
            assert!(s.bullets.is_empty(), "still alive at age {expected}");
            break;
        }
        assert_eq!(s.bullets.units()[0].age, expected);
        assert!(ticks < 100);
    }
    assert_eq!(ticks, 25);
}

#[test]
fn projectile_head_never_passes_its_end() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.enemies.spawn_at(620.0, 300.0);
    s.fire(&mut sound);

    let mut heads = Vec::new();
    for _ in 0..8 {
        s.bullets.advance();
        heads.push(s.bullets.units()[0].x);
    }
    assert_eq!(heads[..4], [450.0, 500.0, 550.0, 600.0]);
    assert!(heads.iter().all(|&x| x <= 620.0));
    assert_eq!(heads[7], 600.0);
}

#[test]
fn laser_draws_a_fading_beam_and_muzzle_glow() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.fire(&mut sound);
    s.bullets.advance();

    let mut canvas = RecordingCanvas::default();
    s.bullets.render(&mut canvas);

    // age 0.48 → v = trunc(0.48 * 71) = 34
    let color = Rgba::rgba(255, 34, 34, 0.5);
    assert_eq!(
        canvas.ops,
        vec![
            Op::Line((450.0, 335.0), (800.0, 335.0), Stroke { color, width: 1.0 + 34.0 / 6.0 }),
            Op::Fill(
                Rect::new(366.0, 301.0, 68.0, 68.0),
                Fill::radial((400.0, 335.0), 0.0, 34.0, color, Rgba::rgba(255, 17, 17, 0.0)),
                1.0,
            ),
        ]
    );
}

#[test]
fn reserved_weapon_shots_are_inert() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.player.weapon = Weapon::Tesla;
    s.fire(&mut sound);
    for _ in 0..40 {
        s.bullets.advance();
    }
    assert_eq!(s.bullets.units()[0].age, BULLET_AGE);
    assert_eq!(sound.played, vec!["teslashot"]);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_past_left_edge_is_removed_and_score_reset() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.score.up(500);
    s.enemies.spawn_at(-SHIP_WIDTH - 1.0, 300.0);

    tick(&mut s, &mut sound);

    assert!(s.enemies.is_empty());
    assert_eq!(s.score.count(), 0);
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(sound.played, vec!["explosion", "death"]);
}

#[test]
fn enemy_exactly_at_minus_width_counts_as_leaked() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.score.up(40);
    s.enemies.spawn_at(-SHIP_WIDTH, 0.0);
    tick(&mut s, &mut sound);
    assert!(s.enemies.is_empty());
    assert_eq!(s.score.count(), 0);
}

#[test]
fn enemy_ramming_player_is_removed_and_score_reset() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.score.up(70);
    s.enemies.spawn_at(404.0, 300.0); // overlaps after one step

    tick(&mut s, &mut sound);

    assert!(s.enemies.is_empty());
    assert_eq!(s.score.count(), 0);
    assert!(sound.played.contains(&"death".to_string()));
}

#[test]
fn enemy_flies_left_faster_with_score() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.enemies.spawn_at(700.0, 0.0);
    tick(&mut s, &mut sound);
    assert_eq!(s.enemies.units()[0].x, 695.0);

    s.score.up(300);
    tick(&mut s, &mut sound);
    assert_eq!(s.enemies.units()[0].x, 688.0);
    assert!(sound.played.is_empty());
}

#[test]
fn spawn_chance_and_speed_scale_with_score() {
    assert_eq!(spawn_chance(0), 1);
    assert_eq!(spawn_chance(999), 1);
    assert_eq!(spawn_chance(1000), 2);
    assert_eq!(spawn_chance(25_000), 26);
    assert_eq!(speed_bonus(149), 0.0);
    assert_eq!(speed_bonus(150), 1.0);
    assert_eq!(speed_bonus(2000), 13.0);
}

#[test]
fn spawn_roll_enters_at_right_edge_on_lattice() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.update(16, &mut max_rng(), &mut sound);

    assert_eq!(s.enemies.len(), 1);
    let e = &s.enemies.units()[0];
    assert_eq!(e.x, ARENA_W);
    assert_eq!(e.y, 540.0);
    assert_eq!(e.y % 10.0, 0.0);
}

#[test]
fn low_roll_does_not_spawn() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    for _ in 0..100 {
        tick(&mut s, &mut sound);
    }
    assert!(s.enemies.is_empty());
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_moves_at_capped_speed_and_snaps() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.move_pointer(345.0, 300.0);
    tick(&mut s, &mut sound);
    assert_eq!(s.player.x, 340.0);

    s.move_pointer(340.0, 0.0);
    tick(&mut s, &mut sound);
    assert_eq!(s.player.y, 50.0); // 300 - 250
}

#[test]
fn player_right_edge_keeps_ten_unit_slack() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.move_pointer(2000.0, 2000.0);
    tick(&mut s, &mut sound);
    tick(&mut s, &mut sound);
    assert_eq!(s.player.x, ARENA_W - SHIP_WIDTH + 10.0);
    assert_eq!(s.player.y, ARENA_H - 70.0);
}

#[test]
fn player_left_and_top_clamp_to_zero() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.move_pointer(-500.0, -500.0);
    tick(&mut s, &mut sound);
    tick(&mut s, &mut sound);
    assert_eq!((s.player.x, s.player.y), (0.0, 0.0));
}

#[test]
fn exhaust_cycles_through_three_frames() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    let mut frames = Vec::new();
    for _ in 0..4 {
        tick(&mut s, &mut sound);
        frames.push(s.player.flame_frame);
    }
    assert_eq!(frames, vec![7, 14, 0, 7]);
    assert_eq!(s.player.exhaust_alpha, 0.2);
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[test]
fn explosions_drift_fade_and_expire() {
    let mut s = make_state();
    s.explosions.add(100.0, 100.0);
    s.explosions.advance(16);
    let e = &s.explosions.units()[0];
    assert_eq!((e.x, e.age), (100.0, 1.0));

    s.explosions.advance(16);
    let e = &s.explosions.units()[0];
    assert_eq!(e.x, 92.0);
    assert_eq!(e.age, 1.0 - AGE_DECREMENT);

    for _ in 0..60 {
        s.explosions.advance(16);
    }
    assert!(s.explosions.is_empty());
}

#[test]
fn kill_explosion_is_first_drawn_full_size_on_the_wreck() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.enemies.spawn_at(600.0, 300.0);
    s.fire(&mut sound);
    tick(&mut s, &mut sound);

    let mut canvas = RecordingCanvas::default();
    s.explosions.render(&mut canvas);
    let (rect, fill) = Fill::glow(
        Rgba::rgba(100, 150, 255, 1.0),
        Rgba::rgba(255, 0, 0, 0.0),
        650.0,
        335.0,
        151.0,
    );
    assert_eq!(canvas.ops, vec![Op::Fill(rect, fill, 1.0)]);

    tick(&mut s, &mut sound);
    let mut canvas = RecordingCanvas::default();
    s.explosions.render(&mut canvas);
    // age 0.98 → size trunc(0.98 * 151) = 147, alpha rounds to 1.0
    let (rect, fill) = Fill::glow(
        Rgba::rgba(100, 150, 255, 1.0),
        Rgba::rgba(255, 0, 0, 0.0),
        642.0,
        335.0,
        147.0,
    );
    assert_eq!(canvas.ops, vec![Op::Fill(rect, fill, 1.0)]);
}

#[test]
fn kill_flash_decays_with_time() {
    let mut s = make_state();
    s.explosions.add(0.0, 0.0);
    assert_eq!(s.explosions.flash_brightness(), 1.5);
    s.explosions.advance(250);
    assert_eq!(s.explosions.flash_brightness(), 1.25);
    s.explosions.advance(500);
    assert_eq!(s.explosions.flash_brightness(), 1.0);
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[test]
fn spend_only_when_covered() {
    let mut s = make_state();
    s.score.up(30);
    assert!(!s.score.spend(31));
    assert_eq!(s.score.count(), 30);
    assert!(s.score.spend(30));
    assert_eq!(s.score.count(), 0);
}

#[test]
fn clear_plays_death() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.score.up(5);
    s.score.clear(&mut sound);
    assert_eq!(s.score.count(), 0);
    assert_eq!(sound.played, vec!["death"]);
}

// ── Loop ──────────────────────────────────────────────────────────────────────

#[test]
fn paused_loop_neither_updates_nor_draws() {
    let mut sim = SimulationLoop::new(make_state());
    let mut canvas = RecordingCanvas::default();
    let mut sound = RecordingSound::default();

    assert!(sim.tick(0, &mut zero_rng(), &mut canvas, &mut sound));
    assert_eq!(sim.state.frame, 1);

    sim.pause();
    canvas.ops.clear();
    assert!(!sim.tick(16, &mut zero_rng(), &mut canvas, &mut sound));
    assert!(!sim.tick(32, &mut zero_rng(), &mut canvas, &mut sound));
    assert_eq!(sim.state.frame, 1);
    assert!(canvas.ops.is_empty());

    sim.resume();
    assert!(sim.tick(5_000, &mut zero_rng(), &mut canvas, &mut sound));
    assert_eq!(sim.state.frame, 2);
}

#[test]
fn render_runs_back_to_front() {
    let mut s = make_state();
    let mut sound = RecordingSound::default();
    s.enemies.spawn_at(600.0, 300.0);
    s.fire(&mut sound);
    s.enemies.spawn_at(600.0, 100.0);

    let mut canvas = RecordingCanvas::default();
    s.render(&mut canvas);
    let ops = &canvas.ops;

    let pos = |pred: &dyn Fn(&Op) -> bool| ops.iter().position(|o| pred(o)).unwrap();
    let background = pos(&|o| matches!(o, Op::Fill(_, Fill::Linear { .. }, _)));
    let enemy = pos(&|o| matches!(o, Op::Sprite(src, _, _) if src.x == 10.0));
    let exhaust = pos(&|o| matches!(o, Op::Sprite(src, _, _) if src.x == 20.0));
    let ship = pos(&|o| matches!(o, Op::Sprite(src, _, _) if src.x == 0.0));
    let beam = pos(&|o| matches!(o, Op::Line(..)));
    let vignette = ops
        .iter()
        .rposition(|o| matches!(o, Op::Fill(_, Fill::Radial { r0, .. }, _) if *r0 == 300.0))
        .unwrap();

    assert_eq!(background, 0);
    assert!(background < enemy);
    assert!(enemy < exhaust);
    assert!(exhaust < ship);
    assert!(ship < beam);
    assert!(beam < vignette);
    assert!(matches!(ops[ops.len() - 2], Op::Flash(_)));
    assert_eq!(ops.last(), Some(&Op::Text("10".to_string())));
}

// ── Config ────────────────────────────────────────────────────────────────────

#[test]
fn negative_enemy_speed_never_sends_enemies_backwards() {
    let config = GameConfig::from_json("inline", r#"{ "enemy_speed": -5 }"#).unwrap();
    let mut s = init_state(&config, Arena::new(ARENA_W, ARENA_H), &mut zero_rng());
    let mut sound = RecordingSound::default();
    s.enemies.spawn_at(700.0, 100.0);

    for _ in 0..100 {
        tick(&mut s, &mut sound);
    }
    assert_eq!(s.enemies.len(), 1);
    assert!(s.enemies.units()[0].x <= 700.0);
    assert_eq!(s.enemies.units()[0].speed, 0.0);
}
