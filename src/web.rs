//! Browser bindings
//!
//! The page owns the DOM, sounds and requestAnimationFrame; it calls
//! `frame()` from its refresh callback and stops scheduling once a report
//! comes back with `running: false`. Reports cross the boundary as JSON.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{PrizeTable, RiskLevel, Simulation, parse_bet};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger already initialised");
    }
    log::info!("Plinko core loaded");
}

/// One board session
#[wasm_bindgen]
pub struct PlinkoGame {
    sim: Simulation,
}

#[wasm_bindgen]
impl PlinkoGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: f64) -> Result<PlinkoGame, JsError> {
        let mut sim = Simulation::new(Settings::with_seed(seed as u64));
        sim.on_resize(width, height)?;
        log::info!("Game initialized with seed: {}", seed as u64);
        Ok(PlinkoGame { sim })
    }

    /// Build from a JSON settings override
    pub fn with_settings(json: &str, width: f32, height: f32) -> Result<PlinkoGame, JsError> {
        let settings = Settings::from_json(json)?;
        let mut sim = Simulation::new(settings);
        sim.on_resize(width, height)?;
        Ok(PlinkoGame { sim })
    }

    /// Drop a ball for the clicked risk button
    pub fn drop_ball(&mut self, risk: &str) -> Result<bool, JsError> {
        let risk: RiskLevel = risk.parse()?;
        Ok(self.sim.drop_ball(risk))
    }

    /// Advance one frame; `undefined` when the loop is idle
    pub fn frame(&mut self) -> Result<Option<String>, JsError> {
        match self.sim.on_frame() {
            Some(report) => Ok(Some(serde_json::to_string(&report)?)),
            None => Ok(None),
        }
    }

    /// Rebuild for a new container size; NaN, infinite or non-positive
    /// sizes throw and keep the current board
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsError> {
        self.sim.on_resize(width, height)?;
        Ok(())
    }

    pub fn set_bet(&mut self, amount: f64) -> bool {
        self.sim.set_bet(amount).is_ok()
    }

    /// Set the bet from the custom-amount text field
    pub fn set_bet_text(&mut self, input: &str) -> bool {
        match parse_bet(input) {
            Ok(amount) => self.sim.set_bet(amount).is_ok(),
            Err(_) => false,
        }
    }

    pub fn set_risk(&mut self, risk: &str) -> Result<(), JsError> {
        self.sim.set_risk(risk.parse()?);
        Ok(())
    }

    pub fn risk(&self) -> String {
        self.sim.risk().to_string()
    }

    pub fn balance(&self) -> f64 {
        self.sim.balance()
    }

    pub fn bet_amount(&self) -> f64 {
        self.sim.bet_amount()
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    /// Peg centers and radii for placing peg elements
    pub fn pegs_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.sim.pegs())?)
    }

    /// Multiplier row for drawing a prize strip
    pub fn prize_row(risk: &str) -> Result<Vec<f64>, JsError> {
        let risk: RiskLevel = risk.parse()?;
        Ok(PrizeTable::multipliers(risk).to_vec())
    }
}
