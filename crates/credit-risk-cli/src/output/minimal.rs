use serde_json::Value;

/// Headline fields, most newsworthy first. The first one present in the
/// result wins.
const PRIORITY_KEYS: [&str; 8] = [
    "score",
    "roi_pct",
    "auc",
    "accuracy",
    "auc_uplift_pct",
    "estimated_savings",
    "total_savings",
    "break_even_month",
];

/// Print only the headline number, for shell pipelines.
pub fn print_minimal(value: &Value) {
    let result = match value {
        Value::Object(map) if map.contains_key("result") => &map["result"],
        other => other,
    };

    let Value::Object(fields) = result else {
        println!("{}", format_minimal(result));
        return;
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = fields.get(key) {
            println!("{}", format_minimal(val));
            return;
        }
    }

    // No headline field; fall back to the first scalar, then to raw JSON.
    match fields.values().find(|v| !v.is_object() && !v.is_array()) {
        Some(val) => println!("{}", format_minimal(val)),
        None => println!("{}", result),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
