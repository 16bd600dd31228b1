#![cfg(target_arch = "wasm32")]

use js_sys::{Float32Array, Reflect, Uint32Array, Uint8Array};
use sprouts_wasm::Game;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()).unwrap_or(false)
}

fn is_err(v: &JsValue, code: &str) -> bool {
    if is_ok(v) {
        return false;
    }
    Reflect::get(v, &JsValue::from_str("error"))
        .and_then(|e| Reflect::get(&e, &JsValue::from_str("code")))
        .ok()
        .and_then(|c| c.as_string())
        .map_or(false, |s| s == code)
}

fn fixed(points: &[f32]) -> Game {
    let mut g = Game::new();
    let arr = Float32Array::new_with_length(points.len() as u32);
    arr.copy_from(points);
    assert!(is_ok(&g.start_fixed_res(&arr)));
    g
}

#[wasm_bindgen_test]
fn straight_move_through_the_api() {
    let mut g = fixed(&[100.0, 100.0, 200.0, 100.0, 150.0, 200.0]);
    assert!(is_ok(&g.select_dot_res(0)));
    assert!(is_ok(&g.select_dot_res(1)));
    assert!(is_ok(&g.set_straight_res(true)));
    assert!(is_ok(&g.commit_res(150.0, 100.0)));
    assert_eq!(g.dot_count(), 4);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.current_player(), 2);
    assert_eq!(g.status_text(), "Player 2's turn");

    let dd = g.get_dot_data();
    let pos = Float32Array::new(&Reflect::get(&dd, &JsValue::from_str("positions")).unwrap());
    let conns = Uint8Array::new(&Reflect::get(&dd, &JsValue::from_str("connections")).unwrap());
    assert_eq!(pos.length(), 8);
    assert_eq!(conns.to_vec(), vec![1, 1, 0, 2]);

    let ed = g.get_edge_data();
    let ep = Uint32Array::new(&Reflect::get(&ed, &JsValue::from_str("endpoints")).unwrap());
    let kinds = Uint8Array::new(&Reflect::get(&ed, &JsValue::from_str("kinds")).unwrap());
    assert_eq!(ep.to_vec(), vec![0, 3, 3, 1]);
    assert_eq!(kinds.to_vec(), vec![0, 0]);
}

#[wasm_bindgen_test]
fn rejections_come_back_as_envelopes() {
    let mut g = Game::new();
    assert!(is_err(&g.select_dot_res(0), "invalid_selection_state"));
    assert!(is_err(&g.start_res(3, "spiral", 1), "invalid_layout"));
    assert!(is_err(&g.start_res(0, "grid", 1), "out_of_range"));
    assert!(is_ok(&g.start_res(6, "grid", 1)));
    assert!(is_err(&g.select_dot_res(99), "invalid_selection_state"));
    assert!(is_err(&g.commit_res(f32::NAN, 0.0), "non_finite"));
    assert!(is_err(&g.undo_res(), "invalid_selection_state"));
}

#[wasm_bindgen_test]
fn crossing_is_rejected_without_mutation() {
    let mut g = fixed(&[100.0, 100.0, 300.0, 100.0, 163.0, 7.0, 203.0, 197.0]);
    g.select_dot_res(0);
    g.select_dot_res(1);
    g.set_straight_res(true);
    assert!(is_ok(&g.commit_res(200.0, 100.0)));
    g.select_dot_res(2);
    g.select_dot_res(3);
    g.set_straight_res(true);
    assert!(is_err(&g.commit_res(183.0, 102.0), "crossing_violation"));
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.phase(), "idle");
    assert_eq!(g.status_text(), "Invalid move: Line crosses another line.");
}

#[wasm_bindgen_test]
fn pointer_routing_shapes_and_commits_a_curve() {
    let mut g = fixed(&[100.0, 300.0, 300.0, 300.0]);
    assert!(is_ok(&g.pointer_down(101.0, 301.0)));
    assert!(is_ok(&g.pointer_down(299.0, 299.0)));
    assert_eq!(g.phase(), "shaping");
    assert!(g.pointer_move(200.0, 200.0));
    assert!(is_ok(&g.context_menu()));
    assert_eq!(g.phase(), "locked");
    // Control point at (200, 200): the curve peaks at (200, 250)
    assert!(is_ok(&g.double_click(200.0, 250.0)));
    assert_eq!(g.edge_count(), 2);
    let snap = g.snapshot();
    assert_eq!(Reflect::get(&snap, &JsValue::from_str("current_player")).unwrap().as_f64(), Some(2.0));
    assert_eq!(g.selection().length(), 0);
}

#[wasm_bindgen_test]
fn config_object_overrides_defaults() {
    let bad = js_sys::Object::new();
    Reflect::set(&bad, &JsValue::from_str("candidate_offsets"), &js_sys::Array::new()).unwrap();
    assert!(Game::with_config(bad.into()).is_err());

    let cfg = js_sys::Object::new();
    Reflect::set(&cfg, &JsValue::from_str("pick_radius"), &JsValue::from_f64(25.5)).unwrap();
    let mut g = Game::with_config(cfg.into()).unwrap();
    let v = g.config();
    assert_eq!(Reflect::get(&v, &JsValue::from_str("pick_radius")).unwrap().as_f64(), Some(25.5));
    assert!(is_ok(&g.start_res(4, "circle", 7)));
    assert_eq!(g.dot_count(), 4);
}

#[wasm_bindgen_test]
fn fixed_start_drops_the_circle_mask() {
    let mut g = Game::new();
    assert!(is_ok(&g.start_res(4, "circle", 3)));
    let arr = Float32Array::new_with_length(4);
    arr.copy_from(&[10.0, 10.0, 110.0, 10.0]);
    assert!(is_ok(&g.start_fixed_res(&arr)));
    g.select_dot_res(0);
    g.select_dot_res(1);
    g.set_straight_res(true);
    // (60, 10) lies far outside the disc used by the circle layout
    assert!(is_ok(&g.commit_res(60.0, 10.0)));
    assert_eq!(g.edge_count(), 2);
}
