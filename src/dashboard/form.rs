use crate::api::StrategyConfig;
use crate::dom::{ids, Document};

/// Lenient float parsing: leading whitespace is skipped and the longest
/// numeric prefix wins, so `"1.5 lots"` reads as `1.5`. Anything without a
/// numeric prefix is NaN.
pub fn parse_float(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let end = numeric_prefix_len(trimmed);
    trimmed[..end].parse().unwrap_or(f64::NAN)
}

fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    if s[i..].starts_with("Infinity") {
        return i + "Infinity".len();
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// Builds the submission from the four form inputs. No validation.
pub fn read_strategy_form(doc: &Document) -> StrategyConfig {
    let field = |id: &str| doc.value(id).unwrap_or_default().to_string();

    StrategyConfig {
        name: field(ids::STRATEGY_NAME),
        symbol: field(ids::STRATEGY_SYMBOL),
        strategy_type: field(ids::STRATEGY_TYPE),
        volume: parse_float(&field(ids::STRATEGY_VOLUME)),
    }
}
