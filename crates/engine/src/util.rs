//! Internal helpers for parsing and distributing fixed-point values.
//!
//! These utilities are **not** part of the public API. Money and percentages
//! are both stored as scaled integers, so they share one decimal parser and
//! one largest-remainder distribution routine.

/// What to do with fraction digits beyond the supported precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Excess {
    Reject,
    /// Round half away from zero.
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FixedError {
    Empty,
    Invalid,
    TooManyDecimals,
    Overflow,
}

/// Parse a decimal string into an integer scaled by `10^decimals`.
///
/// Accepts `.` or `,` as separator and an optional leading `+`/`-`.
pub(crate) fn parse_fixed(s: &str, decimals: u8, excess: Excess) -> Result<i64, FixedError> {
    let trimmed = s.trim();
    let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
        (true, stripped.trim_start())
    } else if let Some(stripped) = trimmed.strip_prefix('+') {
        (false, stripped.trim_start())
    } else {
        (false, trimmed)
    };
    if rest.is_empty() {
        return Err(FixedError::Empty);
    }

    let rest = rest.replace(',', ".");
    let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest.as_str(), ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(FixedError::Invalid);
    }
    let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !digits_only(int_part) || !digits_only(frac_part) {
        return Err(FixedError::Invalid);
    }

    let decimals = usize::from(decimals);
    let (kept, dropped) = if frac_part.len() > decimals {
        if excess == Excess::Reject {
            return Err(FixedError::TooManyDecimals);
        }
        frac_part.split_at(decimals)
    } else {
        (frac_part, "")
    };

    let scale = 10i64
        .checked_pow(decimals as u32)
        .ok_or(FixedError::Overflow)?;
    let major: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| FixedError::Overflow)?
    };
    let minor: i64 = if kept.is_empty() {
        0
    } else {
        format!("{kept:0<decimals$}")
            .parse()
            .map_err(|_| FixedError::Invalid)?
    };
    let round_up = dropped.bytes().next().is_some_and(|b| b >= b'5');

    let magnitude = major
        .checked_mul(scale)
        .and_then(|v| v.checked_add(minor))
        .and_then(|v| v.checked_add(i64::from(round_up)))
        .ok_or(FixedError::Overflow)?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Distribute `total` proportionally to `weights` (largest remainder method).
///
/// The parts always sum back to `total`. Ties go to the earlier weight. All
/// parts are zero when every weight is zero.
pub(crate) fn distribute(total: i64, weights: &[u64]) -> Vec<i64> {
    let weight_total: i128 = weights.iter().map(|w| i128::from(*w)).sum();
    if weight_total == 0 {
        return vec![0; weights.len()];
    }

    let total = i128::from(total);
    let mut parts = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for (idx, weight) in weights.iter().enumerate() {
        let exact = total * i128::from(*weight);
        parts.push(exact.div_euclid(weight_total));
        remainders.push((idx, exact.rem_euclid(weight_total)));
    }

    let assigned: i128 = parts.iter().sum();
    let leftover = usize::try_from(total - assigned).unwrap_or(0);
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (idx, _) in remainders.into_iter().take(leftover) {
        parts[idx] += 1;
    }

    parts.into_iter().map(|p| p as i64).collect()
}

/// `value × num / den` rounded half away from zero; `0` when `den == 0`.
pub(crate) fn mul_div_round(value: i64, num: u64, den: u64) -> i64 {
    if den == 0 {
        return 0;
    }
    let product = i128::from(value) * i128::from(num);
    let den = i128::from(den);
    let mut quotient = product / den;
    if (product % den).abs() * 2 >= den {
        quotient += product.signum();
    }
    quotient as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fixed_rounds_or_rejects_excess() {
        assert_eq!(parse_fixed("33.333", 2, Excess::Round), Ok(3333));
        assert_eq!(parse_fixed("33.335", 2, Excess::Round), Ok(3334));
        assert_eq!(parse_fixed("-0.005", 2, Excess::Round), Ok(-1));
        assert_eq!(
            parse_fixed("33.333", 2, Excess::Reject),
            Err(FixedError::TooManyDecimals)
        );
        assert_eq!(parse_fixed("4", 0, Excess::Reject), Ok(4));
    }

    #[test]
    fn parse_fixed_errors() {
        assert_eq!(parse_fixed("", 2, Excess::Round), Err(FixedError::Empty));
        assert_eq!(parse_fixed("x1", 2, Excess::Round), Err(FixedError::Invalid));
        assert_eq!(
            parse_fixed("99999999999999999999", 2, Excess::Round),
            Err(FixedError::Overflow)
        );
    }

    #[test]
    fn distribute_even_thirds() {
        assert_eq!(distribute(10_000, &[1, 1, 1]), vec![3334, 3333, 3333]);
        assert_eq!(distribute(0, &[1, 2]), vec![0, 0]);
        assert!(distribute(10, &[]).is_empty());
    }
}
