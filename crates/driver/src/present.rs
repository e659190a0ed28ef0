//! Render a solver model for display.
//!
//! Output layout: a `CONSTANTS:` block with one decoded `name = value` line
//! per model constant, a blank line, then `MODEL:` with the solver's native
//! model block verbatim. Purely presentational; nothing here feeds back into
//! analysis.

use satlint_solver::Model;

/// Render the full two-block model text.
pub fn render_model(model: &Model) -> String {
    let mut out = String::from("CONSTANTS:\n");
    for (name, value) in &model.assignments {
        out.push_str(name);
        out.push_str(" = ");
        out.push_str(&render_value(value));
        out.push('\n');
    }
    out.push('\n');
    out.push_str("MODEL:\n");
    out.push_str(&model.raw);
    out
}

/// Decode one model value into display text.
///
/// Bitvector literals become unsigned decimal, booleans `True`/`False`,
/// floating-point values their decimal rendering with `+oo`/`-oo`/`-0`/`NaN`
/// for the special forms. Anything unrecognized passes through unchanged.
pub fn render_value(value: &str) -> String {
    let value = value.trim();

    match value {
        "true" => return "True".to_string(),
        "false" => return "False".to_string(),
        _ => {}
    }

    if let Some(n) = parse_bitvec_literal(value) {
        return n.to_string();
    }

    if let Some(special) = render_fp_special(value) {
        return special;
    }

    if let Some(decoded) = render_fp_triple(value) {
        return decoded;
    }

    value.to_string()
}

/// Parse `#x...`, `#b...`, or `(_ bvN w)` into an unsigned value.
fn parse_bitvec_literal(value: &str) -> Option<u128> {
    if let Some(hex) = value.strip_prefix("#x") {
        return u128::from_str_radix(hex, 16).ok();
    }
    if let Some(bin) = value.strip_prefix("#b") {
        return u128::from_str_radix(bin, 2).ok();
    }
    if let Some(rest) = value.strip_prefix("(_ bv") {
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        return digits.parse().ok();
    }
    None
}

/// Map the indexed special-value forms.
fn render_fp_special(value: &str) -> Option<String> {
    if !value.starts_with("(_ ") {
        return None;
    }
    let token = value[3..].split_whitespace().next()?;
    match token {
        "+oo" => Some("+oo".to_string()),
        "-oo" => Some("-oo".to_string()),
        "NaN" => Some("NaN".to_string()),
        "-zero" => Some("-0".to_string()),
        "+zero" => Some("0".to_string()),
        _ => None,
    }
}

/// Decode a `(fp sign exp sig)` bit triple into decimal text.
///
/// Field widths identify the format: (8, 24) decodes as f32, (11, 53) as
/// f64, anything else passes through.
fn render_fp_triple(value: &str) -> Option<String> {
    let inner = value.strip_prefix("(fp ")?.strip_suffix(')')?;
    let fields: Vec<&str> = inner.split_whitespace().collect();
    if fields.len() != 3 {
        return None;
    }
    let (sign, sign_w) = parse_bit_field(fields[0])?;
    let (exp, exp_w) = parse_bit_field(fields[1])?;
    let (sig, sig_w) = parse_bit_field(fields[2])?;
    if sign_w != 1 {
        return None;
    }

    match (exp_w, sig_w) {
        // Rendered at native precision; widening f32 to f64 first would
        // turn 0.1f32 into 0.10000000149011612.
        (8, 23) => {
            let bits = ((sign as u32) << 31) | ((exp as u32) << 23) | sig as u32;
            Some(render_f32(f32::from_bits(bits)))
        }
        (11, 52) => {
            let bits = (sign << 63) | (exp << 52) | sig;
            Some(render_f64(f64::from_bits(bits)))
        }
        _ => None,
    }
}

/// Parse one `#b...`/`#x...` field into its value and bit width.
fn parse_bit_field(field: &str) -> Option<(u64, u32)> {
    if let Some(bin) = field.strip_prefix("#b") {
        let v = u64::from_str_radix(bin, 2).ok()?;
        return Some((v, bin.len() as u32));
    }
    if let Some(hex) = field.strip_prefix("#x") {
        let v = u64::from_str_radix(hex, 16).ok()?;
        return Some((v, hex.len() as u32 * 4));
    }
    None
}

fn render_f32(v: f32) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f32::INFINITY {
        "+oo".to_string()
    } else if v == f32::NEG_INFINITY {
        "-oo".to_string()
    } else if v == 0.0 && v.is_sign_negative() {
        "-0".to_string()
    } else {
        v.to_string()
    }
}

fn render_f64(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+oo".to_string()
    } else if v == f64::NEG_INFINITY {
        "-oo".to_string()
    } else if v == 0.0 && v.is_sign_negative() {
        "-0".to_string()
    } else {
        v.to_string()
    }
}
