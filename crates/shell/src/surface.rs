//! UI surface - the host-declared set of elements the shell can drive
//!
//! A browser page has a DOM; the terminal host has a [`Surface`]: an ordered
//! list of elements registered by id (screens, buttons, text slots, the game
//! area) or by selector (on-screen control buttons). The shell resolves what
//! it needs by id, skips what is missing, and only ever toggles `visible` or
//! writes `text`. Renderers read the surface back to draw the chrome.

/// Well-known element ids used by the hub presets and the terminal chrome
pub mod ids {
    pub const GAME: &str = "game";
    pub const GRID: &str = "grid";
    pub const SCORE: &str = "score";
    pub const HIGH_SCORE: &str = "high-score";
    pub const FINAL_SCORE: &str = "final-score";
    pub const WIN_SCORE: &str = "win-score";
    pub const START_SCREEN: &str = "start-screen";
    pub const GAME_OVER_SCREEN: &str = "game-over-screen";
    pub const WIN_SCREEN: &str = "win-screen";
    pub const PLAY: &str = "play";
    pub const PAUSE: &str = "pause";
    pub const STOP: &str = "stop";
    pub const START_BTN: &str = "start-btn";
    pub const RESTART_BTN: &str = "restart-btn";
    pub const WIN_RESTART_BTN: &str = "win-restart-btn";
}

/// What an element is, for hit testing and drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// The board the controller draws into
    Game,
    /// A text slot (scores)
    Text,
    /// An overlay (start, game over, win)
    Screen,
    /// A lifecycle button (play, pause, stop, restart)
    Button,
    /// An on-screen control button, addressed by selector
    Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: String,
    kind: ElementKind,
    label: String,
    visible: bool,
    text: String,
    width: u16,
    height: u16,
}

impl Element {
    pub fn new(id: &str, kind: ElementKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: String::new(),
            visible: true,
            text: String::new(),
            width: 0,
            height: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Size in terminal cells (zero for elements without an area)
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Surface {
    elements: Vec<Element>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, element: Element) -> &mut Self {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
        self
    }

    /// The game area, `width x height` cells
    pub fn add_game(&mut self, id: &str, width: u16, height: u16) -> &mut Self {
        let mut element = Element::new(id, ElementKind::Game);
        element.width = width;
        element.height = height;
        self.push(element)
    }

    pub fn add_text(&mut self, id: &str, label: &str) -> &mut Self {
        let mut element = Element::new(id, ElementKind::Text);
        element.label = label.to_string();
        self.push(element)
    }

    pub fn add_screen(&mut self, id: &str, label: &str) -> &mut Self {
        let mut element = Element::new(id, ElementKind::Screen);
        element.label = label.to_string();
        self.push(element)
    }

    pub fn add_button(&mut self, id: &str, label: &str) -> &mut Self {
        let mut element = Element::new(id, ElementKind::Button);
        element.label = label.to_string();
        self.push(element)
    }

    /// An on-screen control addressed by `selector` (e.g. `".upBtn"`)
    pub fn add_control(&mut self, selector: &str, label: &str) -> &mut Self {
        let mut element = Element::new(selector, ElementKind::Control);
        element.label = label.to_string();
        self.push(element)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// True when a control with this selector exists
    pub fn has_selector(&self, selector: &str) -> bool {
        self.element(selector)
            .is_some_and(|e| e.kind == ElementKind::Control)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.element(id).is_some_and(|e| e.visible)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(|e| e.text.as_str())
    }

    pub fn show(&mut self, id: &str) {
        if let Some(e) = self.element_mut(id) {
            e.visible = true;
        }
    }

    pub fn hide(&mut self, id: &str) {
        if let Some(e) = self.element_mut(id) {
            e.visible = false;
        }
    }

    pub fn set_text(&mut self, id: &str, text: &str) {
        if let Some(e) = self.element_mut(id) {
            e.text.clear();
            e.text.push_str(text);
        }
    }

    /// Update the size of the game area after a terminal resize
    pub fn resize_game(&mut self, id: &str, width: u16, height: u16) {
        if let Some(e) = self.element_mut(id) {
            e.width = width;
            e.height = height;
        }
    }
}
