// CSS value formatting for animated page chrome. Pure string helpers so they
// can be tested on the host.

/// Trim a float to at most three decimals without trailing zeros.
pub fn css_number(v: f32) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Vertical offset as a composited 3D transform.
pub fn translate_y_pct(y_pct: f32) -> String {
    format!("translate3d(0px, {}%, 0px)", css_number(y_pct))
}

pub fn percent(v: f32) -> String {
    format!("{}%", css_number(v))
}

pub fn opacity(v: f32) -> String {
    css_number(v.clamp(0.0, 1.0))
}

pub fn px(v: f64) -> String {
    format!("{}px", css_number(v as f32))
}
