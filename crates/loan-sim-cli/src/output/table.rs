use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_fields, format_scalar, result_of, schedule_rows};

/// Format output as tables: summary fields first, then the schedule.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match result {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in flatten_fields(map) {
                builder.push_record([key, format_scalar(&val)]);
            }
            println!("{}", Table::from(builder));

            if let Some(rows) = schedule_rows(result) {
                println!();
                print_rows(rows);
            }
        }
        _ => println!("{}", format_scalar(result)),
    }

    if let Some(envelope) = value.as_object() {
        if let Some(Value::Array(warnings)) = envelope.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }

        if let Some(Value::String(meth)) = envelope.get("methodology") {
            println!("\nMethodology: {}", meth);
        }
    }
}

fn print_rows(rows: &[Value]) {
    // Column order follows the first row.
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut builder = Builder::default();
    builder.push_record(headers.iter().cloned());
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h).map(format_scalar).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}
