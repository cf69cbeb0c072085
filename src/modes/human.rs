use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::cell::RefCell;
use std::io::{Stderr, stderr};
use std::rc::Rc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{Command, GameConfig, GameController, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::{BoardView, Renderer};

pub struct HumanMode {
    controller: GameController,
    view: Rc<RefCell<BoardView>>,
    stats: Rc<RefCell<SessionStats>>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let view = Rc::new(RefCell::new(BoardView::new(config.cols, config.rows)));
        let stats = Rc::new(RefCell::new(SessionStats::new()));

        let mut controller = GameController::new(config).context("Failed to create game")?;
        controller.subscribe(view.clone());
        controller.subscribe(stats.clone());

        Ok(Self {
            controller,
            view,
            stats,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        let stats = self.stats.borrow();
        info!(
            games = stats.games_played,
            high_score = stats.high_score,
            "session finished"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.controller.tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        let was_running = self.controller.state() == GameState::Running;
                        self.handle_event(event)?;
                        // A fresh start waits a full interval before the first move
                        if !was_running && self.controller.state() == GameState::Running {
                            tick_timer.reset();
                        }
                    }
                }

                // Game logic tick, only requested while running
                _ = tick_timer.tick() => {
                    if self.controller.state() == GameState::Running {
                        self.controller.dispatch(Command::Tick)?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.stats.borrow_mut().update();
                    let view = self.view.borrow();
                    let stats = self.stats.borrow();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view, &stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => self.controller.dispatch(command)?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
