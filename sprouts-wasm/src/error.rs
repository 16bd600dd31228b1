use wasm_bindgen::prelude::*;
use js_sys::{Object, Reflect};
use sprouts::{ConfigError, MoveError};

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

/// Rule and selection rejections. `data` carries the structured error, e.g.
/// `{ code: "saturated_dot", dot: 3, max_degree: 3 }`.
pub fn from_move(e: MoveError) -> JsValue {
    err(e.code(), e.to_string(), Some(crate::interop::to_js(&e)))
}

pub fn from_config(e: ConfigError) -> JsValue {
    let code = match e {
        ConfigError::DotCount { .. } | ConfigError::OutOfRange { .. } => "out_of_range",
        ConfigError::LayoutShort { .. } => "layout_failed",
        ConfigError::NotStarted => "not_started",
        ConfigError::Json(_) => "invalid_json",
        _ => "invalid_config",
    };
    err(code, e.to_string(), None)
}

#[inline]
pub fn unknown_layout(name: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(name));
    err("invalid_layout", "layout must be 'scatter', 'grid' or 'circle'", Some(d.into()))
}
