use serde_json::Value;

/// Render the result as CSV for spreadsheet import.
///
/// When the result carries exactly one row collection (sensitivity rows,
/// timeline points, benchmark rows, factor breakdowns) those rows become the
/// CSV body. Otherwise the scalar fields are emitted as field,value pairs.
pub fn print_csv(value: &Value) {
    let result = match value {
        Value::Object(map) if map.contains_key("result") => &map["result"],
        other => other,
    };

    let _ = write_csv(result);
}

fn write_csv(result: &Value) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());

    let Value::Object(fields) = result else {
        writer.write_record(["value"])?;
        writer.write_record([format_cell(result)])?;
        return writer.flush().map_err(Into::into);
    };

    let collections: Vec<&Vec<Value>> = fields
        .values()
        .filter_map(|val| match val {
            Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => Some(items),
            _ => None,
        })
        .collect();

    if let [rows] = collections[..] {
        write_rows(&mut writer, rows)?;
    } else {
        write_fields(&mut writer, fields)?;
    }

    writer.flush().map_err(Into::into)
}

fn write_rows<W: std::io::Write>(writer: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };

    let columns: Vec<&String> = first.keys().collect();
    writer.write_record(columns.iter().map(|c| c.as_str()))?;

    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|col| row.get(col.as_str()).map(format_cell).unwrap_or_default())
            .collect();
        writer.write_record(record)?;
    }
    Ok(())
}

fn write_fields<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    fields: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    writer.write_record(["field", "value"])?;

    for (key, val) in fields {
        match val {
            Value::Object(nested) => {
                for (sub_key, sub_val) in nested {
                    writer.write_record([format!("{}.{}", key, sub_key), format_cell(sub_val)])?;
                }
            }
            Value::Array(_) => {}
            _ => {
                writer.write_record([key.clone(), format_cell(val)])?;
            }
        }
    }
    Ok(())
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
