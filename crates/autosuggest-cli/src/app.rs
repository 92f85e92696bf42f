//! Terminal application loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use autosuggest_core::{
    AutocompleteBuilder, AutocompleteConfig, AutocompleteHandle, InteractionHub,
    OutsideInteractionGuard, Point, SuggestionSource,
};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
            MouseEvent, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use tokio::sync::mpsc;

use crate::input::{map_key, Command, InputBuffer};
use crate::render::{render, ScreenLayout, View};

/// Owns the terminal and restores it when dropped
struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Screen {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

/// The demo host: one autocomplete mounted on a full-screen terminal
pub struct App {
    screen: Screen,
    handle: AutocompleteHandle,
    hub: InteractionHub,
    outside: OutsideInteractionGuard,
    values: mpsc::UnboundedReceiver<String>,
    input: InputBuffer,
    layout: ScreenLayout,
    running: bool,
}

impl App {
    /// Mount the component and take over the terminal
    pub fn new(
        source: Arc<dyn SuggestionSource>,
        config: AutocompleteConfig,
        initial: &str,
    ) -> Result<Self> {
        let (values_tx, values) = mpsc::unbounded_channel();
        let handle = AutocompleteBuilder::new(source)
            .config(config)
            .initial_value(initial)
            .on_value_change(move |value: &str| {
                let _ = values_tx.send(value.to_string());
            })
            .mount()?;

        let hub = InteractionHub::new();
        let layout = ScreenLayout::default();
        let outside = handle.watch_outside(&hub, layout.region());
        let screen = Screen::enter()?;

        Ok(Self {
            screen,
            handle,
            hub,
            outside,
            values,
            input: InputBuffer::new(initial),
            layout,
            running: true,
        })
    }

    /// Run the event loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        while self.running {
            while let Ok(value) = self.values.try_recv() {
                self.input.observe(value);
            }

            let state = self.handle.state();
            let view = View {
                state: &state,
                input: self.input.text(),
            };
            let mut layout = self.layout;
            self.screen.terminal.draw(|frame| {
                layout = render(frame, &view);
            })?;
            if layout != self.layout {
                self.outside.set_region(layout.region());
                self.layout = layout;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(command) = map_key(key, self.input.text()) {
                            self.handle_command(command)?;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse)?,
                    _ => {}
                }
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Quit => self.running = false,
            Command::Edit(text) => {
                if let Some(text) = self.input.edit(text) {
                    self.handle.input_changed(text)?;
                }
            }
            Command::Key(key) => self.handle.key_down(key)?,
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }

        let point = Point::new(i32::from(mouse.column), i32::from(mouse.row));
        self.hub.dispatch(point);

        if self.layout.input_contains(point) {
            self.handle.activate()?;
        } else if let Some(index) = self.layout.suggestion_at(point) {
            self.handle.click_suggestion(index)?;
        }
        Ok(())
    }

    /// Unmount the component, restore the terminal and return the final value
    pub async fn finish(mut self) -> String {
        while let Ok(value) = self.values.try_recv() {
            self.input.observe(value);
        }
        let value = self.input.text().to_string();

        drop(self.outside);
        self.handle.unmount().await;
        drop(self.screen);
        value
    }
}
