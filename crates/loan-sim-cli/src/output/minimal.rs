use serde_json::Value;

use super::{format_scalar, result_of};

/// Print just the key answer: the first installment of a schedule or the
/// interest difference of a comparison.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    let priority_paths: [&[&str]; 3] = [
        &["first_installment"],
        &["difference", "interest"],
        &["total_interest"],
    ];

    for path in priority_paths {
        if let Some(val) = lookup(result, path) {
            if !val.is_null() {
                println!("{}", format_scalar(val));
                return;
            }
        }
    }

    println!("{}", format_scalar(result));
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}
