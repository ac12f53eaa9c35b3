//! Hub menu: pick a game.

use tui_arcade_input::KeyInput;

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::layout::{HitMap, HitTarget, Rect, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub title: &'static str,
    pub blurb: &'static str,
}

#[derive(Debug, Clone)]
pub struct HubMenu {
    entries: Vec<MenuEntry>,
    selected: usize,
}

const ENTRY_W: u16 = 36;

impl HubMenu {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            entries,
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + self.entries.len() - 1) % self.entries.len();
        }
    }

    /// Move the selection or pick an entry. Digits pick directly (1-based).
    pub fn key_down(&mut self, input: &KeyInput) -> Option<usize> {
        match input.key() {
            "ArrowUp" | "w" | "k" => self.select_prev(),
            "ArrowDown" | "s" | "j" | "Tab" => self.select_next(),
            "Enter" | " " => return (!self.entries.is_empty()).then_some(self.selected),
            key => {
                let digit = key.parse::<usize>().ok()?;
                if (1..=self.entries.len()).contains(&digit) {
                    self.selected = digit - 1;
                    return Some(self.selected);
                }
            }
        }
        None
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer, hits: &mut HitMap) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));
        hits.clear();

        let title = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let normal = CellStyle::new(Rgb::new(210, 210, 210), Rgb::new(30, 30, 40));
        let active = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(120, 190, 230)).bold();
        let blurb = CellStyle::new(Rgb::new(150, 150, 150), Rgb::new(0, 0, 0)).dim();

        let h = self.entries.len() as u16 * 3 + 4;
        let area = Rect::centered(viewport, ENTRY_W, h, 0);
        fb.put_str_centered(0, area.y, viewport.width, "TUI ARCADE", title);

        for (i, entry) in self.entries.iter().enumerate() {
            let y = area.y + 2 + i as u16 * 3;
            let style = if i == self.selected { active } else { normal };
            let row = Rect::new(area.x, y, ENTRY_W, 1);
            fb.fill_rect(row.x, row.y, row.w, 1, ' ', style);
            let label = format!(" {}  {}", i + 1, entry.title);
            fb.put_str(row.x, row.y, &label, style);
            fb.put_str(row.x + 1, y + 1, entry.blurb, blurb);
            hits.push(row, HitTarget::MenuItem(i));
        }

        let hint = "Up/Down select   Enter play   q quit";
        fb.put_str_centered(0, area.bottom().saturating_sub(1), viewport.width, hint, blurb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> HubMenu {
        HubMenu::new(vec![
            MenuEntry {
                title: "2048",
                blurb: "",
            },
            MenuEntry {
                title: "Snake",
                blurb: "",
            },
            MenuEntry {
                title: "Falling blocks",
                blurb: "",
            },
        ])
    }

    #[test]
    fn test_selection_wraps() {
        let mut m = menu();
        m.select_prev();
        assert_eq!(m.selected(), 2);
        m.select_next();
        assert_eq!(m.selected(), 0);
    }

    #[test]
    fn test_keys_pick_entries() {
        let mut m = menu();
        assert_eq!(m.key_down(&KeyInput::named("ArrowDown")), None);
        assert_eq!(m.key_down(&KeyInput::named("Enter")), Some(1));
        assert_eq!(m.key_down(&KeyInput::from_char('3')), Some(2));
        assert_eq!(m.key_down(&KeyInput::from_char('9')), None);
        assert_eq!(m.key_down(&KeyInput::from_char('x')), None);
    }

    #[test]
    fn test_entries_are_clickable() {
        let m = menu();
        let mut fb = FrameBuffer::new(60, 20);
        let mut hits = HitMap::new();
        m.render_into(Viewport::new(60, 20), &mut fb, &mut hits);

        let rect = hits.rect_of(&HitTarget::MenuItem(1)).unwrap();
        assert_eq!(hits.hit(rect.x + 3, rect.y), Some(&HitTarget::MenuItem(1)));
        assert!(fb.row_text(rect.y).contains("2  Snake"));
    }
}
