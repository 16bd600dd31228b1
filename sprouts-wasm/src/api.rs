use crate::Game;
use js_sys::Float32Array;
use sprouts::geometry::math::distance;
use sprouts::{
    Boundary, EdgeKind, GridLayout, Layout, MaskBoundary, Phase, RectBoundary, ScatterLayout, Unbounded, Vec2,
};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{arr_f32, arr_u32, arr_u8, new_obj, set_kv, to_js};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Disc inscribed in the playable area, used by the "circle" layout.
fn board_disc(game: &Game) -> impl Fn(Vec2) -> bool + 'static {
    let cfg = game.inner.config();
    let center = Vec2::new(cfg.width * 0.5, cfg.height * 0.5);
    let radius = (cfg.width.min(cfg.height) * 0.5 - cfg.margin).max(0.0);
    move |p: Vec2| distance(p, center) <= radius
}

fn check_point(x: f32, y: f32) -> Result<Vec2, JsValue> {
    if !x.is_finite() {
        return Err(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Err(error::non_finite("y"));
    }
    Ok(Vec2::new(x, y))
}

fn unit(r: Result<(), sprouts::MoveError>) -> JsValue {
    match r {
        Ok(()) => error::ok(JsValue::UNDEFINED),
        Err(e) => error::from_move(e),
    }
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        crate::Game::rs_new()
    }

    /// Build from a partial config object; missing keys keep their defaults.
    pub fn with_config(v: JsValue) -> Result<Game, JsValue> {
        let value = serde_wasm_bindgen::from_value::<serde_json::Value>(v)
            .map_err(|e| error::err("invalid_json", e.to_string(), None))?;
        let config = sprouts::GameConfig::from_json_value(value).map_err(error::from_config)?;
        crate::Game::rs_with_config(config).map_err(error::from_config)
    }

    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }

    // Lifecycle
    pub fn start_res(&mut self, dot_count: u32, layout: &str, seed: u32) -> JsValue {
        tracing::debug!(dot_count, layout, seed, "start requested");
        let placed: Box<dyn Layout> = match layout {
            "scatter" => Box::new(ScatterLayout::new(seed as u64)),
            "grid" => Box::new(GridLayout::new()),
            "circle" => Box::new(ScatterLayout::new(seed as u64).with_mask(board_disc(self))),
            other => return error::unknown_layout(other),
        };
        let boundary: Box<dyn Boundary> = match layout {
            "circle" => Box::new(MaskBoundary(board_disc(self))),
            _ => Box::new(Unbounded),
        };
        match self.inner.start_game(dot_count as usize, placed) {
            Ok(()) => {
                self.inner.set_boundary(boundary);
                error::ok(JsValue::from_f64(self.inner.board().dot_count() as f64))
            }
            Err(e) => error::from_config(e),
        }
    }
    /// Start from explicit `[x0, y0, x1, y1, ...]` positions.
    pub fn start_fixed_res(&mut self, positions: &Float32Array) -> JsValue {
        let flat = positions.to_vec();
        if flat.len() % 2 != 0 {
            return error::err("invalid_length", "positions must hold x,y pairs", None);
        }
        if let Some(i) = flat.iter().position(|v| !v.is_finite()) {
            return error::non_finite(if i % 2 == 0 { "x" } else { "y" });
        }
        let pts: Vec<Vec2> = flat.chunks_exact(2).map(|c| Vec2::new(c[0], c[1])).collect();
        match self.inner.start_game(pts.len(), sprouts::FixedLayout(pts)) {
            Ok(()) => {
                self.inner.set_boundary(Box::new(Unbounded));
                error::ok(JsValue::from_f64(self.inner.board().dot_count() as f64))
            }
            Err(e) => error::from_config(e),
        }
    }
    pub fn restart_res(&mut self) -> JsValue {
        match self.inner.restart_game() {
            Ok(()) => error::ok(JsValue::from_f64(self.inner.board().dot_count() as f64)),
            Err(e) => error::from_config(e),
        }
    }
    /// Require new dots to land inside this rectangle.
    pub fn set_board_rect_res(&mut self, x: f32, y: f32, w: f32, h: f32) -> JsValue {
        for (param, v) in [("x", x), ("y", y), ("w", w), ("h", h)] {
            if !v.is_finite() {
                return error::non_finite(param);
            }
        }
        self.inner.set_boundary(Box::new(RectBoundary::new(x, y, w, h)));
        error::ok(JsValue::UNDEFINED)
    }
    pub fn clear_board_boundary(&mut self) {
        self.inner.set_boundary(Box::new(Unbounded));
    }

    // Commands
    pub fn select_dot_res(&mut self, id: u32) -> JsValue {
        unit(self.inner.select_dot(id))
    }
    pub fn select_at_res(&mut self, x: f32, y: f32) -> JsValue {
        let p = match check_point(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.select_at(p) {
            Ok(Some(id)) => error::ok(JsValue::from_f64(id as f64)),
            Ok(None) => error::ok(JsValue::NULL),
            Err(e) => error::from_move(e),
        }
    }
    pub fn begin_loop_res(&mut self) -> JsValue {
        unit(self.inner.begin_loop_on_selected_dot())
    }
    pub fn set_straight_res(&mut self, straight: bool) -> JsValue {
        unit(self.inner.set_pending_straight(straight))
    }
    pub fn update_control_point(&mut self, x: f32, y: f32) -> bool {
        self.inner.update_pending_control_point(Vec2::new(x, y)).is_ok()
    }
    pub fn lock_res(&mut self) -> JsValue {
        unit(self.inner.lock_pending_shape())
    }
    pub fn grab_res(&mut self, x: f32, y: f32) -> JsValue {
        match check_point(x, y) {
            Ok(p) => unit(self.inner.grab_control_point(p)),
            Err(e) => e,
        }
    }
    pub fn release(&mut self) {
        self.inner.release_control_point();
    }
    pub fn commit_res(&mut self, x: f32, y: f32) -> JsValue {
        let p = match check_point(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.attempt_commit(p) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::from_move(e),
        }
    }
    pub fn undo_res(&mut self) -> JsValue {
        unit(self.inner.undo())
    }

    // Pointer routing for a canvas front-end
    pub fn pointer_down(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(pending) = self.inner.pending().copied() {
            // Clicks away from the handle belong to a double click on the path.
            let p = Vec2::new(x, y);
            let on_handle = pending
                .control_point()
                .map_or(false, |cp| distance(cp, p) < self.inner.config().grab_radius);
            if on_handle {
                return self.grab_res(x, y);
            }
            return error::ok(JsValue::from_bool(false));
        }
        self.select_at_res(x, y)
    }
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.inner.pending().is_some() && self.update_control_point(x, y)
    }
    pub fn pointer_up(&mut self) {
        self.release();
    }
    pub fn double_click(&mut self, x: f32, y: f32) -> JsValue {
        self.commit_res(x, y)
    }
    pub fn context_menu(&mut self) -> JsValue {
        self.lock_res()
    }

    // Queries
    pub fn status_text(&self) -> String {
        self.inner.status_text()
    }
    pub fn phase(&self) -> String {
        self.inner.phase().name().to_string()
    }
    pub fn current_player(&self) -> u8 {
        self.inner.board().current_player().number()
    }
    pub fn is_over(&self) -> bool {
        matches!(self.inner.phase(), Phase::GameOver { .. })
    }
    /// 0 while the game is running.
    pub fn winner(&self) -> u8 {
        self.inner.board().winner().map_or(0, |w| w.number())
    }
    pub fn dot_count(&self) -> u32 {
        self.inner.board().dot_count()
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.board().edge_count()
    }
    pub fn selection(&self) -> js_sys::Uint32Array {
        arr_u32(&self.inner.selection())
    }

    // Typed arrays getters
    pub fn get_dot_data(&self) -> JsValue {
        let dots = self.inner.board().dots();
        let ids: Vec<u32> = (0..dots.len() as u32).collect();
        let pos: Vec<f32> = dots.iter().flat_map(|d| [d.x, d.y]).collect();
        let conns: Vec<u8> = dots.iter().map(|d| d.connections).collect();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "positions", &arr_f32(&pos).into());
        set_kv(&obj, "connections", &arr_u8(&conns).into());
        obj.into()
    }
    /// Endpoints as id pairs, kinds (0 straight, 1 curve, 2 loop) and control
    /// points as x,y pairs (NaN for straight edges).
    pub fn get_edge_data(&self) -> JsValue {
        let edges = self.inner.board().edges();
        let endpoints: Vec<u32> = edges.iter().flat_map(|e| [e.a, e.b]).collect();
        let kinds: Vec<u8> = edges.iter().map(|e| e.kind.code()).collect();
        let cps: Vec<f32> = edges
            .iter()
            .flat_map(|e| match e.kind {
                EdgeKind::Straight => [f32::NAN, f32::NAN],
                EdgeKind::Curve { cp } | EdgeKind::Loop { cp } => [cp.x, cp.y],
            })
            .collect();
        let obj = new_obj();
        set_kv(&obj, "endpoints", &arr_u32(&endpoints).into());
        set_kv(&obj, "kinds", &arr_u8(&kinds).into());
        set_kv(&obj, "control_points", &arr_f32(&cps).into());
        obj.into()
    }
    pub fn get_pending(&self) -> JsValue {
        self.inner.snapshot().pending.as_ref().map_or(JsValue::NULL, to_js)
    }
    pub fn snapshot(&self) -> JsValue {
        to_js(&self.inner.snapshot())
    }
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json_value())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
