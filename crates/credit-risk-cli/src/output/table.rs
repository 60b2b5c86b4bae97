use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Render the computation result as human-readable tables.
///
/// Scalar result fields go into a two-column Field/Value table. Row
/// collections nested in the result (factor breakdowns, sensitivity rows,
/// timeline points) each get their own table below it.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if map.contains_key("result") => print_envelope(map),
        Value::Object(_) => print_fields(value),
        Value::Array(items) => print_rows(items),
        other => println!("{}", other),
    }
}

fn print_envelope(envelope: &serde_json::Map<String, Value>) {
    match envelope.get("result") {
        Some(result @ Value::Object(fields)) => {
            print_fields(result);

            for (key, val) in fields {
                if let Value::Array(items) = val {
                    if is_row_collection(val) {
                        println!("\n{}:", key);
                        print_rows(items);
                    }
                }
            }
        }
        Some(other) => println!("{}", other),
        None => {}
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for warning in warnings {
                if let Value::String(text) = warning {
                    println!("  - {}", text);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

/// Two-column table of an object's scalar fields. Nested objects are
/// flattened one level with dotted keys; row collections are skipped here
/// and rendered separately.
fn print_fields(value: &Value) {
    let Value::Object(fields) = value else {
        println!("{}", value);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);

    for (key, val) in fields {
        match val {
            Value::Object(nested) => {
                for (sub_key, sub_val) in nested {
                    builder.push_record([format!("{}.{}", key, sub_key), format_value(sub_val)]);
                }
            }
            _ if is_row_collection(val) => {}
            _ => {
                builder.push_record([key.clone(), format_value(val)]);
            }
        }
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

/// One table per homogeneous array of objects, columns from the first row.
fn print_rows(items: &[Value]) {
    let Some(Value::Object(first)) = items.first() else {
        println!("{}", Value::Array(items.to_vec()));
        return;
    };

    let columns: Vec<&String> = first.keys().collect();

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.as_str()));

    for item in items {
        let record: Vec<String> = columns
            .iter()
            .map(|col| {
                item.get(col.as_str())
                    .map(format_value)
                    .unwrap_or_else(|| "-".to_string())
            })
            .collect();
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

fn is_row_collection(value: &Value) -> bool {
    matches!(value, Value::Array(items) if matches!(items.first(), Some(Value::Object(_))))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
