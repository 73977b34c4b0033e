//! Browser bindings for the canvas front-end.
//!
//! The page owns the canvas and the event loop: it forwards clicks, calls
//! [`CanvasGame::step`] until the human is asked again (waiting
//! [`CanvasGame::ai_delay_ms`] before computer turns), and paints the
//! [`Frame`](crate::frontend::canvas::Frame) it gets back.

use tracing::{debug, trace};
use wasm_bindgen::prelude::*;

use crate::ai::GreedySelector;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::frontend::canvas::{CanvasLayout, CanvasRenderer, ClickQueue};
use crate::frontend::{Driver, Step};
use crate::game::Session;

#[wasm_bindgen]
pub struct CanvasGame {
    session: Session,
    driver: Driver<GreedySelector>,
    renderer: CanvasRenderer,
    clicks: ClickQueue,
    config: GameConfig,
    last_step: Step,
}

#[wasm_bindgen]
impl CanvasGame {
    /// `config` may be `undefined`; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CanvasGame, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<GameConfig>(config)
                .map_err(|err| ConfigError::Deserialize(err.to_string()))?
        }
        .validate()?;

        Ok(Self::with_config(config))
    }

    /// Plays a click at canvas pixel `(x, y)` as the human's move.
    ///
    /// Clicks while the computer is to move, or after the game ended, are
    /// ignored. A click the turn does not consume is dropped rather than
    /// carried over to a later turn.
    pub fn click(&mut self, x: f64, y: f64) -> Result<String, JsError> {
        if self.last_step.is_terminal() || self.session.to_move() != Some(self.driver.human()) {
            trace!(x, y, "click outside the human's turn");
            return Ok(self.last_step.as_str().to_string());
        }
        self.clicks.push(x, y);
        let status = self.step();
        self.clicks.clear();
        status
    }

    /// Runs one turn; returns `"continue"`, `"awaiting_input"`,
    /// `"aborted"` or `"finished"`.
    pub fn step(&mut self) -> Result<String, JsError> {
        if !self.last_step.is_terminal() {
            self.renderer.clear_messages();
            self.last_step =
                self.driver
                    .step(&mut self.session, &mut self.renderer, &mut self.clicks)?;
            debug!(step = self.last_step.as_str(), "canvas step");
        }
        Ok(self.last_step.as_str().to_string())
    }

    pub fn frame(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.renderer.frame())?)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.to_game_state())?)
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.to_game_result())?)
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    pub fn ai_delay_ms(&self) -> u32 {
        self.config.ai_delay_ms.min(u32::MAX as u64) as u32
    }

    pub fn canvas_size(&self) -> u32 {
        CanvasLayout::new(self.config.cell_size).canvas_size()
    }
}

impl CanvasGame {
    pub fn with_config(config: GameConfig) -> Self {
        let layout = CanvasLayout::new(config.cell_size);
        let session = Session::new();
        let driver = Driver::new(GreedySelector::from_seed(config.seed));
        let mut renderer = CanvasRenderer::new(layout, driver.human());
        renderer.paint(&session);

        Self {
            session,
            driver,
            renderer,
            clicks: ClickQueue::new(layout),
            config,
            last_step: Step::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Player, Position};

    #[test]
    fn game_runs_to_completion_from_clicks() {
        let config = GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        };
        let mut game = CanvasGame::with_config(config);
        let layout = CanvasLayout::new(game.config.cell_size);
        let mut turns = 0;

        loop {
            turns += 1;
            assert!(turns < 1000);
            let status = game.step().map_err(|_| "step failed").unwrap();
            match status.as_str() {
                "continue" => {}
                "awaiting_input" => {
                    // Click the first legal hint.
                    let hint = game.renderer.frame().hints[0].clone();
                    let (x, y) = layout.center_of(Position {
                        row: hint.row,
                        col: hint.col,
                    });
                    game.clicks.push(x, y);
                }
                "finished" => break,
                other => panic!("unexpected step {other}"),
            }
        }

        assert!(game.is_game_over());
        let frame = game.renderer.frame();
        assert!(frame.game_over);
        assert!(frame.messages[0].starts_with("Final score - Black: "));
    }

    #[test]
    fn clicks_during_the_computer_turn_are_ignored() {
        let mut game = CanvasGame::with_config(GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        });
        let layout = CanvasLayout::new(game.config.cell_size);
        let click_at = |game: &mut CanvasGame, row, col| {
            let (x, y) = layout.center_of(Position::new(row, col).unwrap());
            game.click(x, y).map_err(|_| "click failed").unwrap()
        };

        assert_eq!(game.step().map_err(|_| "step failed").unwrap(), "awaiting_input");
        assert_eq!(click_at(&mut game, 2, 4), "continue");
        assert_eq!(game.session.to_move(), Some(Player::White));

        assert_eq!(click_at(&mut game, 1, 2), "continue");
        assert!(game.clicks.is_empty());
        assert_eq!(game.session.board().score().total(), 5);

        assert_eq!(game.step().map_err(|_| "step failed").unwrap(), "continue");
        assert_eq!(game.step().map_err(|_| "step failed").unwrap(), "awaiting_input");
        assert_eq!(game.session.board().score().total(), 6);
        assert_eq!(game.session.to_move(), Some(Player::Black));
    }

    #[test]
    fn a_rejected_click_is_not_replayed_later() {
        let mut game = CanvasGame::with_config(GameConfig::default());
        let layout = CanvasLayout::new(game.config.cell_size);

        game.step().map_err(|_| "step failed").unwrap();
        let (x, y) = layout.center_of(Position::new(0, 0).unwrap());
        assert_eq!(game.click(x, y).map_err(|_| "click failed").unwrap(), "continue");

        assert!(game.clicks.is_empty());
        assert_eq!(*game.session.board(), crate::board::Board::new());
        assert_eq!(game.step().map_err(|_| "step failed").unwrap(), "awaiting_input");
    }
}
