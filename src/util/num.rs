/// Converts a collection length to the language's integer type.
///
/// Collections cannot practically exceed `i64::MAX` entries; the
/// conversion saturates rather than wraps.
#[must_use]
pub fn len_to_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Widens an integer to a float, as mixed-type arithmetic and integer
/// division do.
///
/// Magnitudes beyond 2^53 round to the nearest representable float; that
/// loss is part of the language's widening rule, not an error.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}
