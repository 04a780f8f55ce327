// hdiutil-core/src/flag.rs
//
// Argument-token encoders shared by every option type. Each encoder is
// total and pure: it returns the tokens to append for one option, and an
// empty vector is the only way to emit nothing.

/// `-name`, emitted only when the value is true.
pub(crate) fn bool_flag(name: &str, value: bool) -> Vec<String> {
    if value {
        vec![format!("-{name}")]
    } else {
        Vec::new()
    }
}

/// `-name` or `-noname`. Always emits; these options override a tool-side
/// default in both directions.
pub(crate) fn bool_no_flag(name: &str, value: bool) -> Vec<String> {
    if value {
        vec![format!("-{name}")]
    } else {
        vec![format!("-no{name}")]
    }
}

/// `-name value` as two tokens. The value is passed through untouched;
/// quoting is the job of whoever eventually renders a shell line, not ours.
pub(crate) fn string_flag(name: &str, value: &str) -> Vec<String> {
    vec![format!("-{name}"), value.to_string()]
}

/// `-name` followed by the decimal form of the value.
pub(crate) fn int_flag(name: &str, value: u64) -> Vec<String> {
    vec![format!("-{name}"), value.to_string()]
}

/// `-name elem1 elem2 ...`, one token per element.
pub(crate) fn string_list_flag(name: &str, values: &[String]) -> Vec<String> {
    let mut args = Vec::with_capacity(values.len() + 1);
    args.push(format!("-{name}"));
    args.extend(values.iter().cloned());
    args
}

/// `-name key=value` as two tokens.
pub(crate) fn key_value_flag(name: &str, key: &str, value: &str) -> Vec<String> {
    vec![format!("-{name}"), format!("{key}={value}")]
}
