/// Integer division rounded half up, the way `Math.round(a / b)` behaves
/// for non-negative operands. Returns `None` when `denominator` is zero.
pub fn round_div(numerator: u64, denominator: u64) -> Option<u64> {
    match denominator {
        0 => None,
        d => {
            let rem = numerator % d;
            Some(numerator / d + u64::from(rem >= d - rem))
        }
    }
}

/// Rounded percentage of `part` over `whole`, 0 when `whole` is zero.
pub fn percent(part: u64, whole: u64) -> u64 {
    round_div(part.saturating_mul(100), whole).unwrap_or(0)
}

/// Thousands-separated rendering for score counters.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
