//! Browser-side checks of the exported canvas API.
#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use othello::wasm::CanvasGame;

wasm_bindgen_test_configure!(run_in_browser);

fn ok<T>(result: Result<T, wasm_bindgen::JsError>) -> T {
    result.ok().expect("call into the canvas API failed")
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn ready() {
    assert!(othello::wasm_ready());
}

#[wasm_bindgen_test]
fn config_object_is_applied() {
    let config = Object::new();
    Reflect::set(&config, &"cellSize".into(), &JsValue::from(50)).unwrap();
    Reflect::set(&config, &"aiDelayMs".into(), &JsValue::from(0)).unwrap();

    let game = ok(CanvasGame::new(config.into()));

    assert_eq!(game.canvas_size(), 400);
    assert_eq!(game.ai_delay_ms(), 0);
}

#[wasm_bindgen_test]
fn zero_cell_size_is_rejected() {
    let config = Object::new();
    Reflect::set(&config, &"cellSize".into(), &JsValue::from(0)).unwrap();

    assert!(CanvasGame::new(config.into()).is_err());
}

#[wasm_bindgen_test]
fn opening_click_flips_one_disc() {
    let mut game = ok(CanvasGame::new(JsValue::UNDEFINED));
    assert_eq!(ok(game.step()), "awaiting_input");

    // Row 2, column 4 with 60px cells.
    assert_eq!(ok(game.click(270.0, 150.0)), "continue");

    let state = ok(game.state());
    assert_eq!(get(&state, "black_count").as_f64(), Some(4.0));
    assert_eq!(get(&state, "white_count").as_f64(), Some(1.0));
    assert_eq!(get(&state, "current_player").as_f64(), Some(2.0));
    assert_eq!(Array::from(&get(&state, "flipped")).length(), 1);
}

#[wasm_bindgen_test]
fn frame_lists_discs_and_hints() {
    let mut game = ok(CanvasGame::new(JsValue::UNDEFINED));
    ok(game.step());

    let frame = ok(game.frame());
    assert_eq!(Array::from(&get(&frame, "discs")).length(), 4);
    assert_eq!(Array::from(&get(&frame, "hints")).length(), 4);
    assert_eq!(get(&frame, "width").as_f64(), Some(480.0));
}
