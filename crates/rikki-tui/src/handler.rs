use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use rikki_core::content::CHAT_LOGS;
use rikki_core::Screen;
use crate::app::{App, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key).await?,
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => app.scroll_chat_to_bottom(),
        AppEvent::Tick => app.tick_animation(),
    }
    Ok(())
}

async fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    // Any key dismisses a transient notice
    app.status = None;

    if app.show_attach_input {
        handle_attach_input(app, key).await;
        return Ok(());
    }

    match app.screen() {
        Screen::Landing => handle_landing(app, key),
        Screen::Dashboard => handle_dashboard(app, key),
        Screen::Chat => match app.input_mode {
            InputMode::Normal => handle_chat_normal(app, key),
            InputMode::Editing => handle_chat_editing(app, key),
        },
    }

    Ok(())
}

fn handle_landing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        // Start Chatting with Rikki / Get Started Free
        KeyCode::Enter | KeyCode::Char('c') => app.go_to_chat(),
        // View Your Dashboard
        KeyCode::Char('d') => app.go_to_dashboard(),
        _ => {}
    }
}

fn handle_dashboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('h') => app.go_to_landing(),
        KeyCode::Char('j') | KeyCode::Down => app.dashboard_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.dashboard_nav_up(),
        // Continue a past conversation. History is not persisted, so this opens a fresh chat.
        KeyCode::Enter => {
            if let Some(log) = app.dashboard_state.selected().and_then(|i| CHAT_LOGS.get(i)) {
                tracing::info!("Continue requested for \"{}\"", log.title);
            }
            app.go_to_chat();
        }
        // New Chat
        KeyCode::Char('n') | KeyCode::Char('c') => app.go_to_chat(),
        _ => {}
    }
}

fn handle_chat_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_chat_down(app.chat_height / 2);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_chat_up(app.chat_height / 2);
        }
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('b') => app.go_to_landing(),
        KeyCode::Char('d') => app.go_to_dashboard(),
        KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Enter => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('u') => {
            app.show_attach_input = true;
            app.attach_input.clear();
        }
        KeyCode::Char('j') | KeyCode::Down => app.scroll_chat_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_chat_up(1),
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        KeyCode::Char('g') => app.chat_scroll = 0,
        _ => {}
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.submit_chat_input(),
        KeyCode::Backspace => {
            if app.chat_cursor > 0 {
                app.chat_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
                app.chat_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.chat_input.chars().count();
            if app.chat_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
                app.chat_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.chat_cursor = app.chat_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.chat_input.chars().count();
            app.chat_cursor = (app.chat_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.chat_cursor = 0;
        }
        KeyCode::End => {
            app.chat_cursor = app.chat_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
            app.chat_input.insert(byte_pos, c);
            app.chat_cursor += 1;
        }
        _ => {}
    }
}

async fn handle_attach_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.show_attach_input = false;
            app.attach_input.clear();
        }
        KeyCode::Enter => {
            let path = std::mem::take(&mut app.attach_input);
            app.show_attach_input = false;
            app.attach_image(&path).await;
        }
        KeyCode::Backspace => {
            app.attach_input.pop();
        }
        KeyCode::Char(c) => {
            app.attach_input.push(c);
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_chat = app
        .chat_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);

    match (app.screen(), mouse.kind) {
        (Screen::Chat, MouseEventKind::ScrollDown) if in_chat => app.scroll_chat_down(3),
        (Screen::Chat, MouseEventKind::ScrollUp) if in_chat => app.scroll_chat_up(3),
        (Screen::Dashboard, MouseEventKind::ScrollDown) => app.dashboard_nav_down(),
        (Screen::Dashboard, MouseEventKind::ScrollUp) => app.dashboard_nav_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use rikki_core::{ChatRole, ReplyMode};

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, press(KeyCode::Char(c))).await.unwrap();
        }
    }

    #[test]
    fn test_char_to_byte_index_multibyte() {
        let s = "añb🌱c";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 2), 3);
        assert_eq!(char_to_byte_index(s, 4), 8);
        assert_eq!(char_to_byte_index(s, 10), s.len());
    }

    #[tokio::test]
    async fn test_landing_to_chat_to_dashboard() {
        let (mut app, _rx) = test_app(ReplyMode::Scripted);

        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.screen(), Screen::Chat);

        // Esc leaves editing first, then the screen
        handle_event(&mut app, press(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.screen(), Screen::Chat);
        handle_event(&mut app, press(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.screen(), Screen::Landing);

        handle_event(&mut app, press(KeyCode::Char('d'))).await.unwrap();
        assert_eq!(app.screen(), Screen::Dashboard);
        assert!(app.session.is_none());

        handle_event(&mut app, press(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.screen(), Screen::Chat);
        assert!(app.session.is_some());
    }

    #[tokio::test]
    async fn test_typed_message_is_submitted() {
        let (mut app, _rx) = test_app(ReplyMode::Scripted);
        app.go_to_chat();

        type_text(&mut app, "How do I recycle plastic?").await;
        assert_eq!(app.chat_cursor, 25);
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();

        let session = app.session.as_ref().unwrap();
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(last.body, "How do I recycle plastic?");
        assert!(session.is_typing());
        assert!(app.chat_input.is_empty());
    }

    #[tokio::test]
    async fn test_cursor_editing() {
        let (mut app, _rx) = test_app(ReplyMode::Scripted);
        app.go_to_chat();

        type_text(&mut app, "compst").await;
        for _ in 0..2 {
            handle_event(&mut app, press(KeyCode::Left)).await.unwrap();
        }
        type_text(&mut app, "o").await;
        assert_eq!(app.chat_input, "compost");

        handle_event(&mut app, press(KeyCode::Home)).await.unwrap();
        handle_event(&mut app, press(KeyCode::Delete)).await.unwrap();
        assert_eq!(app.chat_input, "ompost");

        handle_event(&mut app, press(KeyCode::End)).await.unwrap();
        handle_event(&mut app, press(KeyCode::Backspace)).await.unwrap();
        assert_eq!(app.chat_input, "ompos");
    }

    #[tokio::test]
    async fn test_attach_popup_cancel() {
        let (mut app, _rx) = test_app(ReplyMode::Scripted);
        app.go_to_chat();
        handle_event(&mut app, press(KeyCode::Esc)).await.unwrap();

        handle_event(&mut app, press(KeyCode::Char('u'))).await.unwrap();
        assert!(app.show_attach_input);
        type_text(&mut app, "leaf.png").await;
        assert_eq!(app.attach_input, "leaf.png");

        handle_event(&mut app, press(KeyCode::Esc)).await.unwrap();
        assert!(!app.show_attach_input);
        assert!(app.attach_input.is_empty());
        assert_eq!(app.screen(), Screen::Chat);
        assert_eq!(app.session.as_ref().unwrap().messages().len(), 1);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_anywhere() {
        let (mut app, _rx) = test_app(ReplyMode::Scripted);
        app.go_to_chat();
        let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        handle_event(&mut app, ctrl_c).await.unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_dashboard_continue_opens_chat() {
        let (mut app, _rx) = test_app(ReplyMode::Scripted);
        app.go_to_dashboard();
        handle_event(&mut app, press(KeyCode::Down)).await.unwrap();
        assert_eq!(app.dashboard_state.selected(), Some(1));
        handle_event(&mut app, press(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.screen(), Screen::Chat);
    }
}
