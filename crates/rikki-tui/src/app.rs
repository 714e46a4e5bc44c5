use std::path::Path;

use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use rikki_core::content::CHAT_LOGS;
use rikki_core::{ChatSession, ImageUpload, Navigator, ReplyMode, Screen, SessionBuilder, SessionEvent};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub navigator: Navigator,
    pub input_mode: InputMode,

    // Chat state (session only exists while the chat screen is mounted)
    pub session_builder: SessionBuilder,
    pub session: Option<ChatSession>,
    pub chat_input: String,
    pub chat_cursor: usize,
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,

    // Image attach popup
    pub show_attach_input: bool,
    pub attach_input: String,

    // Dashboard state
    pub dashboard_state: ListState,

    // Transient notice shown in the footer
    pub status: Option<String>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Panel areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
}

impl App {
    pub fn new(session_builder: SessionBuilder) -> Self {
        let mut dashboard_state = ListState::default();
        dashboard_state.select(Some(0));

        Self {
            should_quit: false,
            navigator: Navigator::new(),
            input_mode: InputMode::Normal,

            session_builder,
            session: None,
            chat_input: String::new(),
            chat_cursor: 0,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            show_attach_input: false,
            attach_input: String::new(),

            dashboard_state,
            status: None,
            animation_frame: 0,
            chat_area: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current_screen()
    }

    pub fn reply_mode(&self) -> ReplyMode {
        match self.session.as_ref() {
            Some(session) => session.mode(),
            None => self.session_builder.reply_mode(),
        }
    }

    pub fn is_typing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_typing())
    }

    // Navigation. The chat session is mounted on entering the chat screen and
    // torn down on leaving it.

    pub fn go_to_landing(&mut self) {
        let previous = self.navigator.go_to_landing();
        self.leave(previous);
    }

    pub fn go_to_dashboard(&mut self) {
        let previous = self.navigator.go_to_dashboard();
        self.leave(previous);
    }

    pub fn go_to_chat(&mut self) {
        let previous = self.navigator.go_to_chat();
        if previous != Screen::Chat {
            self.session = Some(self.session_builder.build());
            self.chat_input.clear();
            self.chat_cursor = 0;
            self.chat_scroll = 0;
            self.input_mode = InputMode::Editing;
        }
    }

    fn leave(&mut self, previous: Screen) {
        if previous == Screen::Chat && self.screen() != Screen::Chat {
            if let Some(mut session) = self.session.take() {
                session.close();
            }
            self.show_attach_input = false;
            self.attach_input.clear();
            self.input_mode = InputMode::Normal;
        }
    }

    // Chat

    pub fn submit_chat_input(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.submit_user_text(&self.chat_input) {
            tracing::info!("User message submitted ({} chars)", self.chat_input.chars().count());
            self.chat_input.clear();
            self.chat_cursor = 0;
            self.scroll_chat_to_bottom();
        }
    }

    /// Read an image from disk and hand it to the session for analysis
    pub async fn attach_image(&mut self, raw_path: &str) {
        let path_str = raw_path.trim().trim_matches(|c: char| c == '"' || c == '\'');
        if path_str.is_empty() {
            return;
        }
        let path = Path::new(path_str);

        let Some(mime_type) = image_mime_type(path) else {
            self.status = Some(format!("Not a supported image: {}", path.display()));
            return;
        };

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("Could not read {}: {}", path.display(), err);
                self.status = Some(format!("Could not read {}: {}", path.display(), err));
                return;
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        if let Some(session) = self.session.as_mut() {
            session.submit_image(ImageUpload::new(bytes, mime_type, file_name));
            self.status = None;
            self.scroll_chat_to_bottom();
        }
    }

    pub fn apply_session_event(&mut self, event: SessionEvent) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("Session event with no mounted session, dropping");
            return;
        };
        if session.apply(event) {
            self.scroll_chat_to_bottom();
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_typing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Scroll the transcript so the newest message (or typing indicator) is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        let total_lines = self.chat_line_count();

        self.chat_scroll = total_lines.saturating_sub(self.visible_chat_height());
    }

    /// Wrapped line count of the transcript as rendered
    pub fn chat_line_count(&self) -> u16 {
        if self.session.is_none() {
            return 0;
        }
        let wrap_width = if self.chat_width > 0 { self.chat_width } else { 50 };
        let total = ui::chat_transcript(self).line_count(wrap_width);
        u16::try_from(total).unwrap_or(u16::MAX)
    }

    /// Transcript rows on screen; a guess until the first render
    fn visible_chat_height(&self) -> u16 {
        if self.chat_height > 0 { self.chat_height } else { 20 }
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        let max = self.chat_line_count().saturating_sub(self.visible_chat_height());
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max);
    }

    // Dashboard

    pub fn dashboard_nav_down(&mut self) {
        let len = CHAT_LOGS.len();
        let i = self.dashboard_state.selected().map(|i| (i + 1) % len).unwrap_or(0);
        self.dashboard_state.select(Some(i));
    }

    pub fn dashboard_nav_up(&mut self) {
        let len = CHAT_LOGS.len();
        let i = self
            .dashboard_state
            .selected()
            .map(|i| if i == 0 { len - 1 } else { i - 1 })
            .unwrap_or(0);
        self.dashboard_state.select(Some(i));
    }
}

/// MIME type for the image extensions the analysis endpoint accepts
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}
