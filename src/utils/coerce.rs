//! 设置接口的宽松输入转换: 非法输入退回安全默认值而不是报错

use serde_json::Value;

/// `max_names` → 非负整数，无法解析时为 0
pub fn coerce_max_names(value: &Value) -> u64 {
    let n = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        Value::Bool(true) => 1,
        _ => 0,
    };
    n.max(0) as u64
}

/// `muted` → bool，无法识别时为 false
pub fn coerce_muted(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    }
}
