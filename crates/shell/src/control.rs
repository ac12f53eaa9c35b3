//! Control tables - declarative key and button bindings for a game
//!
//! One [`ControlMapping`] binds a set of key values and/or an on-screen
//! control selector to a game action. The first mapping listing a key wins.

use tui_arcade_input::KeyInput;
use tui_arcade_types::KeyMatchMode;

/// A game action, called on the controller the shell owns
pub type Action<G> = fn(&mut G);

pub struct ControlMapping<G> {
    /// Key values (or codes, per [`KeyMatchMode`]) that trigger the action
    pub keys: &'static [&'static str],
    /// On-screen control that triggers the action when clicked
    pub selector: Option<&'static str>,
    pub action: Action<G>,
}

impl<G> ControlMapping<G> {
    pub fn new(
        keys: &'static [&'static str],
        selector: Option<&'static str>,
        action: Action<G>,
    ) -> Self {
        Self {
            keys,
            selector,
            action,
        }
    }

    pub fn keys(keys: &'static [&'static str], action: Action<G>) -> Self {
        Self::new(keys, None, action)
    }

    pub fn button(selector: &'static str, action: Action<G>) -> Self {
        Self::new(&[], Some(selector), action)
    }

    pub fn matches_key(&self, value: &str) -> bool {
        self.keys.contains(&value)
    }
}

// Manual impls: derives would demand G: Clone
impl<G> Clone for ControlMapping<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for ControlMapping<G> {}

impl<G> std::fmt::Debug for ControlMapping<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlMapping")
            .field("keys", &self.keys)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// The half of a key press a control table is matched against
pub fn match_value(input: &KeyInput, mode: KeyMatchMode) -> &str {
    match mode {
        KeyMatchMode::Key => input.key(),
        KeyMatchMode::Code => input.code(),
    }
}

/// First mapping that lists `value`
pub fn find_by_key<'a, G>(
    controls: &'a [ControlMapping<G>],
    value: &str,
) -> Option<&'a ControlMapping<G>> {
    controls.iter().find(|c| c.matches_key(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        up: u32,
        down: u32,
    }

    fn up(c: &mut Counter) {
        c.up += 1;
    }

    fn down(c: &mut Counter) {
        c.down += 1;
    }

    #[test]
    fn test_key_mode_matches_value() {
        let w = KeyInput::from_char('W');
        assert_eq!(match_value(&w, KeyMatchMode::Key), "W");
        assert_eq!(match_value(&w, KeyMatchMode::Code), "KeyW");
    }

    #[test]
    fn test_first_listing_wins() {
        let controls = [
            ControlMapping::keys(&["ArrowUp", "w"], up),
            ControlMapping::keys(&["w", "s"], down),
        ];
        let mut counter = Counter::default();
        if let Some(control) = find_by_key(&controls, "w") {
            (control.action)(&mut counter);
        }
        assert_eq!((counter.up, counter.down), (1, 0));
        assert!(find_by_key(&controls, "x").is_none());
    }

    #[test]
    fn test_button_only_mapping_has_no_keys() {
        let control = ControlMapping::<Counter>::button(".dropBtn", up);
        assert!(!control.matches_key(""));
        assert_eq!(control.selector, Some(".dropBtn"));
    }
}
