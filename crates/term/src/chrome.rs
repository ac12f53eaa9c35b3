//! ArcadeView: the page around a game board.
//!
//! Reads the shell's [`Surface`] back (score slots, lifecycle buttons,
//! overlay screens, on-screen controls) and draws it around the board.
//! Every clickable region is recorded in a [`HitMap`] so the host can turn
//! mouse presses into `click` and pointer calls.

use tui_arcade_engine::Game;
use tui_arcade_shell::{ids, ElementKind, GameShell, Surface};
use tui_arcade_types::AppState;

use crate::boards::BoardView;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::layout::{HitMap, HitTarget, Rect, Viewport};

/// Overlay screen, the score slot it shows and the button it carries
const OVERLAYS: [(&str, &str, &str); 3] = [
    (ids::START_SCREEN, "", ids::START_BTN),
    (ids::GAME_OVER_SCREEN, ids::FINAL_SCORE, ids::RESTART_BTN),
    (ids::WIN_SCREEN, ids::WIN_SCORE, ids::WIN_RESTART_BTN),
];

const TITLE: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0));
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const BUTTON: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(120, 190, 230)).bold();
const CONTROL: CellStyle = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(60, 60, 80));
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(20, 20, 30));
const HINT: CellStyle = CellStyle::new(Rgb::new(150, 150, 150), Rgb::new(0, 0, 0)).dim();

/// Board frame starts below the title and score rows
const BOARD_TOP: u16 = 3;
const PANEL_GAP: u16 = 2;

pub struct ArcadeView {
    title: String,
    hint: String,
}

impl ArcadeView {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            hint: "Enter play/pause   Esc menu   q quit".to_string(),
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = hint.to_string();
        self
    }

    /// Render the whole page into `fb`, rebuilding `hits`.
    pub fn render_into<G: Game + BoardView>(
        &self,
        shell: &GameShell<G>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
        hits: &mut HitMap,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));
        hits.clear();

        let surface = shell.surface();
        fb.put_str_centered(0, 0, viewport.width, &self.title, TITLE);
        draw_scores(fb, surface, viewport);

        let (bw, bh) = shell.game().board_size();
        let frame = Rect::centered(viewport, bw + 2, bh + 2, BOARD_TOP);
        fb.draw_border(frame.x, frame.y, frame.w, frame.h, BORDER);
        let board = frame.inner();
        shell.game().draw_board(fb, board.x, board.y);
        shell
            .game()
            .draw_panel(fb, frame.right().saturating_add(PANEL_GAP), frame.y + 1);

        let overlay = OVERLAYS
            .iter()
            .find(|(screen, _, _)| surface.is_visible(screen));
        match overlay {
            Some(&(screen, score, button)) => {
                draw_overlay(fb, hits, surface, frame, screen, score, button);
            }
            None => {
                hits.push(board, HitTarget::Board);
                if shell.state() == AppState::Paused {
                    let y = frame.y + frame.h / 2;
                    fb.put_str_centered(frame.x, y, frame.w, " PAUSED ", OVERLAY.bold());
                }
            }
        }

        let mut y = frame.bottom().saturating_add(1);
        if draw_buttons(fb, hits, surface, viewport, y) {
            y = y.saturating_add(2);
        }
        draw_controls(fb, hits, surface, viewport, y);

        let footer = viewport.height.saturating_sub(1);
        if footer > y {
            fb.put_str_centered(0, footer, viewport.width, &self.hint, HINT);
        }
    }
}

fn is_overlay_text(id: &str) -> bool {
    OVERLAYS.iter().any(|&(_, score, _)| score == id)
}

fn is_overlay_button(id: &str) -> bool {
    OVERLAYS.iter().any(|&(_, _, button)| button == id)
}

/// Score slots in one centred row: `Score 12   Best 40`
fn draw_scores(fb: &mut FrameBuffer, surface: &Surface, viewport: Viewport) {
    let mut line = String::new();
    for e in surface.elements_of(ElementKind::Text) {
        if is_overlay_text(e.id()) || !e.is_visible() {
            continue;
        }
        if !line.is_empty() {
            line.push_str("   ");
        }
        line.push_str(e.label());
        line.push(' ');
        line.push_str(if e.text().is_empty() { "0" } else { e.text() });
    }
    fb.put_str_centered(0, 1, viewport.width, &line, TEXT);
}

fn draw_overlay(
    fb: &mut FrameBuffer,
    hits: &mut HitMap,
    surface: &Surface,
    frame: Rect,
    screen: &str,
    score: &str,
    button: &str,
) {
    let label = surface.element(screen).map_or("", |e| e.label());
    let score_line = surface
        .element(score)
        .map(|e| format!("{} {}", e.label(), e.text()));
    let button = surface
        .element(button)
        .filter(|e| e.is_visible())
        .map(|e| (e.id(), format!("[ {} ]", e.label())));

    let mut w = label.chars().count() as u16 + 4;
    if let Some(line) = &score_line {
        w = w.max(line.chars().count() as u16 + 4);
    }
    if let Some((_, text)) = &button {
        w = w.max(text.chars().count() as u16 + 4);
    }
    w = w.max(20).min(frame.w);
    let h = 7;

    let x = frame.x + frame.w.saturating_sub(w) / 2;
    let y = frame.y + frame.h.saturating_sub(h) / 2;
    fb.fill_rect(x, y, w, h, ' ', OVERLAY);
    fb.draw_border(x, y, w, h, OVERLAY);
    fb.put_str_centered(x, y + 1, w, label, OVERLAY.bold());
    if let Some(line) = &score_line {
        fb.put_str_centered(x, y + 3, w, line, OVERLAY);
    }
    match &button {
        Some((id, text)) => {
            let len = text.chars().count() as u16;
            let bx = x + w.saturating_sub(len) / 2;
            fb.put_str(bx, y + 5, text, BUTTON);
            hits.push(Rect::new(bx, y + 5, len, 1), HitTarget::Element(id.to_string()));
        }
        None => fb.put_str_centered(x, y + 5, w, "press Enter", HINT),
    }
}

/// A centred row of items; returns the hit rect of each.
fn draw_row(
    fb: &mut FrameBuffer,
    viewport: Viewport,
    y: u16,
    items: &[(String, String)],
    style: CellStyle,
) -> Vec<(Rect, String)> {
    let total: u16 = items
        .iter()
        .map(|(_, text)| text.chars().count() as u16 + 1)
        .sum::<u16>()
        .saturating_sub(1);
    let mut x = viewport.width.saturating_sub(total) / 2;
    let mut rects = Vec::with_capacity(items.len());
    for (id, text) in items {
        let len = text.chars().count() as u16;
        fb.put_str(x, y, text, style);
        rects.push((Rect::new(x, y, len, 1), id.clone()));
        x = x.saturating_add(len + 1);
    }
    rects
}

/// Visible lifecycle buttons (play, pause, stop). Returns true when drawn.
fn draw_buttons(
    fb: &mut FrameBuffer,
    hits: &mut HitMap,
    surface: &Surface,
    viewport: Viewport,
    y: u16,
) -> bool {
    let items: Vec<(String, String)> = surface
        .elements_of(ElementKind::Button)
        .filter(|e| e.is_visible() && !is_overlay_button(e.id()))
        .map(|e| (e.id().to_string(), format!("[ {} ]", e.label())))
        .collect();
    if items.is_empty() {
        return false;
    }
    for (rect, id) in draw_row(fb, viewport, y, &items, BUTTON) {
        hits.push(rect, HitTarget::Element(id));
    }
    true
}

fn draw_controls(
    fb: &mut FrameBuffer,
    hits: &mut HitMap,
    surface: &Surface,
    viewport: Viewport,
    y: u16,
) {
    let items: Vec<(String, String)> = surface
        .elements_of(ElementKind::Control)
        .filter(|e| e.is_visible())
        .map(|e| (e.id().to_string(), format!(" {} ", e.label())))
        .collect();
    for (rect, id) in draw_row(fb, viewport, y, &items, CONTROL) {
        hits.push(rect, HitTarget::Element(id));
    }
}
