//! Keyboard state for terminal environments.
//!
//! Turns crossterm key events into the held/edge snapshot a tick consumes.
//! Supports terminals that do not emit key release events by expiring held
//! keys after a timeout.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

// Without release events a held key is only visible through auto-repeat. The
// timeout must outlast the typical initial repeat delay or movement stutters.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 300;

/// Logical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    Jump,
    Start,
    Reset,
    Quit,
}

/// Map a key event to a game key
pub fn map_key(key: &KeyEvent) -> Option<GameKey> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(GameKey::Quit);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameKey::Right),
        KeyCode::Up | KeyCode::Char(' ') => Some(GameKey::Jump),
        KeyCode::Enter => Some(GameKey::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameKey::Reset),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameKey::Quit),
        _ => None,
    }
}

/// Press state of one held key
#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    down: bool,
    last_seen_ms: u64,
}

impl HeldKey {
    fn press(&mut self, now_ms: u64) {
        self.down = true;
        self.last_seen_ms = now_ms;
    }

    fn release(&mut self) {
        self.down = false;
    }

    fn is_held(&self, now_ms: u64, timeout_ms: Option<u64>) -> bool {
        match timeout_ms {
            Some(timeout) => self.down && now_ms.saturating_sub(self.last_seen_ms) <= timeout,
            None => self.down,
        }
    }
}

/// Accumulates key events between frames
#[derive(Debug, Clone)]
pub struct Keyboard {
    left: HeldKey,
    right: HeldKey,
    // Tracked as held so auto-repeat presses do not re-fire the jump edge
    jump_key: HeldKey,
    jump: bool,
    start: bool,
    reset: bool,
    quit: bool,
    /// `None` when the terminal reports releases
    release_timeout_ms: Option<u64>,
}

impl Keyboard {
    /// `reports_release`: the terminal emits key release events
    pub fn new(reports_release: bool) -> Self {
        Self {
            left: HeldKey::default(),
            right: HeldKey::default(),
            jump_key: HeldKey::default(),
            jump: false,
            start: false,
            reset: false,
            quit: false,
            release_timeout_ms: (!reports_release).then_some(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        if self.release_timeout_ms.is_some() {
            self.release_timeout_ms = Some(timeout_ms);
        }
        self
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) {
        let Some(game_key) = map_key(&key) else {
            return;
        };

        match key.kind {
            KeyEventKind::Press => match game_key {
                GameKey::Left => self.left.press(now_ms),
                GameKey::Right => self.right.press(now_ms),
                GameKey::Jump => {
                    if !self.jump_key.is_held(now_ms, self.release_timeout_ms) {
                        self.jump = true;
                    }
                    self.jump_key.press(now_ms);
                }
                GameKey::Start => self.start = true,
                GameKey::Reset => self.reset = true,
                GameKey::Quit => self.quit = true,
            },
            // Auto-repeat keeps held keys alive but never re-fires edges
            KeyEventKind::Repeat => match game_key {
                GameKey::Left => self.left.press(now_ms),
                GameKey::Right => self.right.press(now_ms),
                GameKey::Jump => self.jump_key.press(now_ms),
                _ => {}
            },
            KeyEventKind::Release => match game_key {
                GameKey::Left => self.left.release(),
                GameKey::Right => self.right.release(),
                GameKey::Jump => self.jump_key.release(),
                _ => {}
            },
        }
    }

    /// Input for this frame; consumes pending edges
    pub fn snapshot(&mut self, now_ms: u64) -> TickInput {
        let input = TickInput {
            left: self.left.is_held(now_ms, self.release_timeout_ms),
            right: self.right.is_held(now_ms, self.release_timeout_ms),
            start: self.start,
            jump: self.jump,
            reset: self.reset,
        };
        self.start = false;
        self.jump = false;
        self.reset = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&press(KeyCode::Char('a'))), Some(GameKey::Left));
        assert_eq!(map_key(&press(KeyCode::Right)), Some(GameKey::Right));
        assert_eq!(map_key(&press(KeyCode::Char(' '))), Some(GameKey::Jump));
        assert_eq!(map_key(&press(KeyCode::Up)), Some(GameKey::Jump));
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(GameKey::Start));
        assert_eq!(map_key(&press(KeyCode::Char('R'))), Some(GameKey::Reset));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(GameKey::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(GameKey::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_edges_consumed_once() {
        let mut kb = Keyboard::new(true);
        kb.handle_key(press(KeyCode::Char(' ')), 0);
        kb.handle_key(press(KeyCode::Enter), 0);

        let first = kb.snapshot(0);
        assert!(first.jump && first.start);
        let second = kb.snapshot(16);
        assert!(!second.jump && !second.start);
    }

    #[test]
    fn test_repeat_does_not_refire_jump() {
        let mut kb = Keyboard::new(true);
        kb.handle_key(press(KeyCode::Char(' ')), 0);
        kb.snapshot(0);
        kb.handle_key(repeat(KeyCode::Char(' ')), 30);
        assert!(!kb.snapshot(30).jump);
    }

    #[test]
    fn test_held_jump_without_release_events_fires_once() {
        let mut kb = Keyboard::new(false);
        kb.handle_key(press(KeyCode::Char(' ')), 0);
        assert!(kb.snapshot(0).jump);

        // Auto-repeat arrives as more presses on these terminals
        for t in [33, 66, 99, 132] {
            kb.handle_key(press(KeyCode::Char(' ')), t);
            assert!(!kb.snapshot(t).jump);
        }

        // Let go long enough for the hold to lapse, then press again
        kb.handle_key(press(KeyCode::Char(' ')), 1_000);
        assert!(kb.snapshot(1_000).jump);
    }

    #[test]
    fn test_jump_refires_after_release() {
        let mut kb = Keyboard::new(true);
        kb.handle_key(press(KeyCode::Char(' ')), 0);
        assert!(kb.snapshot(0).jump);
        kb.handle_key(release(KeyCode::Char(' ')), 20);
        kb.handle_key(press(KeyCode::Char(' ')), 40);
        assert!(kb.snapshot(40).jump);
    }

    #[test]
    fn test_held_until_release() {
        let mut kb = Keyboard::new(true);
        kb.handle_key(press(KeyCode::Left), 0);
        assert!(kb.snapshot(5_000).left);
        kb.handle_key(release(KeyCode::Left), 5_000);
        assert!(!kb.snapshot(5_001).left);
    }

    #[test]
    fn test_held_expires_without_release_events() {
        let mut kb = Keyboard::new(false).with_key_release_timeout_ms(150);
        kb.handle_key(press(KeyCode::Right), 1_000);
        assert!(kb.snapshot(1_100).right);
        assert!(!kb.snapshot(1_151).right);

        // Auto-repeat refreshes it
        kb.handle_key(press(KeyCode::Right), 1_200);
        kb.handle_key(repeat(KeyCode::Right), 1_300);
        assert!(kb.snapshot(1_400).right);
    }

    #[test]
    fn test_both_directions_reported() {
        let mut kb = Keyboard::new(true);
        kb.handle_key(press(KeyCode::Left), 0);
        kb.handle_key(press(KeyCode::Right), 0);
        let input = kb.snapshot(0);
        assert!(input.left && input.right);
    }

    #[test]
    fn test_quit() {
        let mut kb = Keyboard::new(true);
        assert!(!kb.quit_requested());
        kb.handle_key(press(KeyCode::Char('q')), 0);
        assert!(kb.quit_requested());
    }
}
