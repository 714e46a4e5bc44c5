//! Top-level screen selection
//!
//! Exactly one [`Screen`] is active at a time. Transitions are unconditional
//! and have no side effects beyond the assignment; the previous screen is
//! returned so callers can mount or tear down per-screen state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Landing,
    Chat,
    Dashboard,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Chat => "chat",
            Screen::Dashboard => "dashboard",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_screen(&self) -> Screen {
        self.current
    }

    pub fn go_to_landing(&mut self) -> Screen {
        self.go_to(Screen::Landing)
    }

    pub fn go_to_chat(&mut self) -> Screen {
        self.go_to(Screen::Chat)
    }

    pub fn go_to_dashboard(&mut self) -> Screen {
        self.go_to(Screen::Dashboard)
    }

    fn go_to(&mut self, screen: Screen) -> Screen {
        let previous = std::mem::replace(&mut self.current, screen);
        if previous != screen {
            tracing::debug!("Navigate {} -> {}", previous.as_str(), screen.as_str());
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_landing() {
        assert_eq!(Navigator::new().current_screen(), Screen::Landing);
    }

    #[test]
    fn test_transition_sequence() {
        let mut nav = Navigator::new();
        nav.go_to_chat();
        nav.go_to_landing();
        nav.go_to_dashboard();
        assert_eq!(nav.current_screen(), Screen::Dashboard);
        assert_eq!(nav.go_to_landing(), Screen::Dashboard);
        assert_eq!(nav.current_screen(), Screen::Landing);
    }

    #[test]
    fn test_repeat_transition_is_noop() {
        let mut nav = Navigator::new();
        assert_eq!(nav.go_to_chat(), Screen::Landing);
        assert_eq!(nav.go_to_chat(), Screen::Chat);
        assert_eq!(nav.current_screen(), Screen::Chat);
    }
}
