use tui_arcade::engine::GameEnv;
use tui_arcade::hub::{shell_2048, shell_fall, shell_snake};
use tui_arcade::input::KeyInput;
use tui_arcade::shell::ids;
use tui_arcade::term::{ArcadeView, FrameBuffer, HitMap, HitTarget, Viewport};

fn render<G>(shell: &tui_arcade::shell::GameShell<G>, vp: Viewport) -> (FrameBuffer, HitMap)
where
    G: tui_arcade::engine::Game + tui_arcade::term::BoardView,
{
    let mut fb = FrameBuffer::new(1, 1);
    let mut hits = HitMap::new();
    ArcadeView::new("TEST").render_into(shell, vp, &mut fb, &mut hits);
    (fb, hits)
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_frames_the_2048_board() {
    let shell = shell_2048(GameEnv::in_memory("2048", 1)).unwrap();
    let vp = Viewport::new(60, 30);
    let (fb, _) = render(&shell, vp);

    assert_eq!((fb.width(), fb.height()), (60, 30));
    assert_eq!(fb.row_text(0).trim(), "TEST");
    assert_eq!(fb.row_text(1).trim(), "Score 0   Best 0");

    // 24x12 board plus border, centred
    let (x, y) = (17, 8);
    assert_eq!(fb.get(x, y).unwrap().ch, '┌');
    assert_eq!(fb.get(x + 25, y).unwrap().ch, '┐');
    assert_eq!(fb.get(x, y + 13).unwrap().ch, '└');
    assert_eq!(fb.get(x + 25, y + 13).unwrap().ch, '┘');
}

#[test]
fn term_view_start_overlay_carries_the_start_button() {
    let mut shell = shell_2048(GameEnv::in_memory("2048", 1)).unwrap();
    let (fb, hits) = render(&shell, Viewport::new(60, 30));

    let start = HitTarget::Element(ids::START_BTN.to_string());
    let rect = hits.rect_of(&start).expect("start button is clickable");
    assert!(fb.row_text(rect.y).contains("[ Start ]"));
    // The board takes no gestures under an overlay
    assert!(hits.rect_of(&HitTarget::Board).is_none());
    // D-pad controls are listed below the board
    assert!(hits
        .rect_of(&HitTarget::Element(".upBtn".to_string()))
        .is_some());

    shell.key_down(&KeyInput::named("Enter"));
    let (fb, hits) = render(&shell, Viewport::new(60, 30));
    assert!(hits.rect_of(&start).is_none());
    assert!(hits.rect_of(&HitTarget::Board).is_some());
    assert!(!screen_text(&fb).contains("[ Start ]"));
}

#[test]
fn term_view_lifecycle_buttons_follow_state() {
    let mut shell = shell_snake(GameEnv::in_memory("snake", 1), 10, 8).unwrap();
    let (fb, _) = render(&shell, Viewport::new(60, 30));
    let text = screen_text(&fb);
    assert!(text.contains("[ Play ]"));
    assert!(!text.contains("[ Pause ]"));
    assert!(text.contains("press Enter"));

    shell.key_down(&KeyInput::named("Enter"));
    let (fb, hits) = render(&shell, Viewport::new(60, 30));
    let text = screen_text(&fb);
    assert!(!text.contains("[ Play ]"));
    assert!(text.contains("[ Pause ]"));
    assert!(text.contains("[ Stop ]"));
    let pause = hits
        .rect_of(&HitTarget::Element(ids::PAUSE.to_string()))
        .unwrap();
    assert_eq!(
        hits.hit(pause.x, pause.y),
        Some(&HitTarget::Element(ids::PAUSE.to_string()))
    );

    shell.click(ids::PAUSE);
    let (fb, _) = render(&shell, Viewport::new(60, 30));
    assert!(screen_text(&fb).contains("PAUSED"));
}

#[test]
fn term_view_game_over_overlay_shows_final_score() {
    let mut shell = shell_snake(GameEnv::in_memory("snake", 1), 4, 3).unwrap();
    shell.key_down(&KeyInput::named("Enter"));
    shell.key_down(&KeyInput::named("ArrowUp"));
    for _ in 0..5 {
        shell.tick(100);
    }

    let (fb, hits) = render(&shell, Viewport::new(60, 30));
    let text = screen_text(&fb);
    assert!(text.contains("Game over"));
    assert!(text.contains("Score 0"));
    assert!(hits
        .rect_of(&HitTarget::Element(ids::RESTART_BTN.to_string()))
        .is_some());
}

#[test]
fn term_view_falling_blocks_has_next_panel() {
    let shell = shell_fall(GameEnv::in_memory("geometric-fall", 1)).unwrap();
    let (fb, _) = render(&shell, Viewport::new(80, 34));
    let text = screen_text(&fb);
    assert!(text.contains("NEXT"));
    assert!(text.contains("LINES"));
    assert!(text.contains("[ Start ]"));
}

#[test]
fn term_view_survives_tiny_viewports() {
    let shell = shell_fall(GameEnv::in_memory("geometric-fall", 1)).unwrap();
    for (w, h) in [(0, 0), (1, 1), (10, 4), (23, 9)] {
        let (fb, _) = render(&shell, Viewport::new(w, h));
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
}
