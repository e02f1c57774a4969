use std::time::Instant;

use carbonzero_core::{FrameClock, FrameScheduler, palette};
use carbonzero_scene::{SceneSettings, SceneState};
use carbonzero_waitlist::{Tone, WaitlistForm};
use chrono::{Datelike, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the email input box, in cells.
const INPUT_WIDTH: u16 = 44;

/// The landing page: scene animations plus the waitlist form.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Sphere, particles and counter.
    scene: SceneState,
    /// Email signup form.
    form: WaitlistForm,
    /// Paces frames.
    clock: FrameClock,
}

impl App {
    pub fn new(settings: &SceneSettings, form: WaitlistForm, fps: u32, now: Instant) -> Self {
        Self {
            running: false,
            scene: SceneState::new(settings, now),
            form,
            clock: FrameClock::new(fps, now),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let now = Instant::now();
            self.scene.update(now);
            self.form.poll(now);

            // One frame at a time: the next is not scheduled until this one is drawn.
            if self.clock.is_due(now) {
                terminal.draw(|frame| self.render(frame, now))?;
                self.clock.frame_presented(Instant::now());
            }

            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the page.
    fn render(&mut self, frame: &mut Frame, now: Instant) {
        let area = frame.area();
        let text = palette::TEXT.to_color();
        let accent = palette::ACCENT.to_color();
        let muted = palette::MUTED.to_color();

        frame.render_widget(
            Block::new().style(Style::new().bg(palette::PAGE_BACKGROUND.to_color())),
            area,
        );
        self.scene.render_particles(frame, area, self.clock.elapsed_ms(now));

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Tagline
            Constraint::Min(4),    // Sphere
            Constraint::Length(1), // Counter label
            Constraint::Length(1), // Counter value
            Constraint::Length(1), // Spacing
            Constraint::Length(3), // Email input
            Constraint::Length(1), // Button
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Footer
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let title = Paragraph::new("carbonzero")
            .style(Style::new().fg(accent).bold())
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let tagline = Paragraph::new("Climate action you can watch happen.")
            .style(Style::new().fg(muted))
            .alignment(Alignment::Center);
        frame.render_widget(tagline, chunks[2]);

        self.scene.render_sphere(frame, chunks[3]);

        let label = Paragraph::new("tonnes of CO₂ emitted this year")
            .style(Style::new().fg(muted))
            .alignment(Alignment::Center);
        frame.render_widget(label, chunks[4]);

        let counter = Paragraph::new(self.scene.counter().display())
            .style(Style::new().fg(text).bold())
            .alignment(Alignment::Center);
        frame.render_widget(counter, chunks[5]);

        self.render_form(frame, chunks[7], chunks[8], chunks[9]);

        let footer = Paragraph::new(footer_text(Local::now().year()))
            .style(Style::new().fg(muted))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[10]);

        let help = Line::from(vec![
            "Enter".bold().fg(accent),
            " join waitlist  ".fg(muted),
            "Esc".bold().fg(accent),
            " quit".fg(muted),
        ])
        .centered();
        frame.render_widget(help, chunks[11]);
    }

    fn render_form(
        &self,
        frame: &mut Frame,
        input_area: Rect,
        button_area: Rect,
        feedback_area: Rect,
    ) {
        let text = palette::TEXT.to_color();
        let accent = palette::ACCENT.to_color();
        let muted = palette::MUTED.to_color();

        let [_, input_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(INPUT_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(input_area);

        let inner_width = input_area.width.saturating_sub(2) as usize;
        let input = visible_tail(self.form.input(), inner_width.saturating_sub(1));
        let field = Paragraph::new(input).style(Style::new().fg(text)).block(
            Block::new()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(accent))
                .title(" Email "),
        );
        frame.render_widget(field, input_area);
        if input_area.width > 2 && input_area.height > 2 {
            let cursor_x = input_area.x + 1 + input.width() as u16;
            frame.set_cursor_position((cursor_x, input_area.y + 1));
        }

        let label = format!("[ {} ]", self.form.button_label());
        let button_style = if self.form.button_disabled() {
            Style::new().fg(muted)
        } else {
            Style::new()
                .fg(palette::PAGE_BACKGROUND.to_color())
                .bg(accent)
                .bold()
        };
        frame.render_widget(
            Paragraph::new(label)
                .style(button_style)
                .alignment(Alignment::Center),
            centered(button_area, self.form.button_label().width() as u16 + 4),
        );

        if let Some(feedback) = self.form.feedback() {
            let color = match feedback.tone {
                Tone::Error => palette::FEEDBACK_ERROR,
                Tone::Success => palette::FEEDBACK_SUCCESS,
            };
            frame.render_widget(
                Paragraph::new(feedback.text.as_str())
                    .style(Style::new().fg(color.to_color()))
                    .alignment(Alignment::Center),
                feedback_area,
            );
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks no longer than the next frame or timer deadline.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let now = Instant::now();
        let timeout = self
            .clock
            .time_until_next(now)
            .min(self.scene.next_timer_deadline().saturating_duration_since(now));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.on_key_event(key, Instant::now())
                }
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, now: Instant) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc)
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Enter) => {
                let outcome = self.form.submit(now);
                debug!(?outcome, "waitlist submit");
            }
            (_, KeyCode::Backspace) => self.form.backspace(),
            (modifiers, KeyCode::Char(c)) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.push_char(c)
            }
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn footer_text(year: i32) -> String {
    format!("© {year}")
}

/// The longest suffix of `text` that fits in `width` terminal columns.
fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}

/// A `width`-wide slice from the middle of `area`.
fn centered(area: Rect, width: u16) -> Rect {
    let [_, middle, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}
