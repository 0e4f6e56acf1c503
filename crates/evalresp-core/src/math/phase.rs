//! Phase wrapping and unwrapping in degrees
//!
//! Both transforms return the input slice borrowed when nothing had to be
//! adjusted, so callers can detect a no-op with `Cow::is_borrowed`.

use std::borrow::Cow;

/// Remove 360 degree discontinuities from a phase array
///
/// A running offset (a multiple of 360) is shifted by -/+360 whenever the
/// step between consecutive adjusted values exceeds +/-180. With
/// `first_non_negative` a negative first sample is lifted by 360 first.
///
/// # Example
/// ```
/// use evalresp_core::math::phase::unwrap_phase;
/// let unwrapped = unwrap_phase(&[170.0, -170.0, -150.0], false);
/// assert_eq!(unwrapped.as_ref(), &[170.0, 190.0, 210.0]);
/// ```
pub fn unwrap_phase(phase: &[f64], first_non_negative: bool) -> Cow<'_, [f64]> {
    let Some(&first) = phase.first() else {
        return Cow::Borrowed(phase);
    };

    let mut offset = if first_non_negative && first < 0.0 {
        360.0
    } else {
        0.0
    };
    let mut changed = offset != 0.0;

    let mut out = Vec::with_capacity(phase.len());
    let mut prev = first + offset;
    out.push(prev);

    for &raw in &phase[1..] {
        let mut value = raw + offset;
        let delta = value - prev;
        if delta > 180.0 {
            offset -= 360.0;
            value -= 360.0;
            changed = true;
        } else if delta < -180.0 {
            offset += 360.0;
            value += 360.0;
            changed = true;
        }
        out.push(value);
        prev = value;
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(phase)
    }
}

/// Constrain every phase value to [-180, 180]
///
/// The running offset is pre-seeded when the first value is already out of
/// range and then carried forward, mirroring [`unwrap_phase`].
pub fn wrap_phase(phase: &[f64]) -> Cow<'_, [f64]> {
    let Some(&first) = phase.first() else {
        return Cow::Borrowed(phase);
    };

    let mut offset = 0.0;
    if !(-180.0..=180.0).contains(&first) {
        offset = -360.0 * ((first - 180.0) / 360.0).ceil();
    }
    let mut changed = offset != 0.0;

    let mut out = Vec::with_capacity(phase.len());
    for &raw in phase {
        let mut value = raw + offset;
        while value > 180.0 {
            offset -= 360.0;
            value -= 360.0;
            changed = true;
        }
        while value < -180.0 {
            offset += 360.0;
            value += 360.0;
            changed = true;
        }
        out.push(value);
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unwrap_no_change_is_borrowed() {
        let phase = [10.0, 20.0, -30.0, 100.0];
        let out = unwrap_phase(&phase, false);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(std::ptr::eq(out.as_ref(), &phase[..]));
    }

    #[test]
    fn test_unwrap_descending_crossing() {
        let phase = [-170.0, 175.0, 160.0, -179.0];
        let out = unwrap_phase(&phase, false);
        assert_eq!(out.as_ref(), &[-170.0, -185.0, -200.0, -179.0]);
    }

    #[test]
    fn test_unwrap_first_non_negative() {
        let out = unwrap_phase(&[-90.0, -80.0], true);
        assert_eq!(out.as_ref(), &[270.0, 280.0]);
        assert!(matches!(unwrap_phase(&[90.0, 80.0], true), Cow::Borrowed(_)));
    }

    #[test]
    fn test_wrap_pre_seeds_offset() {
        let out = wrap_phase(&[540.0, 530.0, 370.0]);
        assert_relative_eq!(out[0], 180.0);
        assert_relative_eq!(out[1], 170.0);
        assert_relative_eq!(out[2], 10.0);
    }

    #[test]
    fn test_wrap_in_range_is_borrowed() {
        let phase = [-180.0, 0.0, 180.0];
        assert!(matches!(wrap_phase(&phase), Cow::Borrowed(_)));
    }

    #[test]
    fn test_wrap_inverts_unwrap() {
        // Crosses +/-180 several times in both directions
        let phase: Vec<f64> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.1;
                let v = 400.0 * t.sin() + 35.0 * t;
                (v + 180.0).rem_euclid(360.0) - 180.0
            })
            .collect();

        let unwrapped = unwrap_phase(&phase, false);
        assert!(matches!(unwrapped, Cow::Owned(_)));
        let rewrapped = wrap_phase(&unwrapped);

        for (a, b) in phase.iter().zip(rewrapped.iter()) {
            let diff = (a - b).rem_euclid(360.0);
            assert!(diff < 1e-9 || 360.0 - diff < 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_empty() {
        assert!(unwrap_phase(&[], true).is_empty());
        assert!(wrap_phase(&[]).is_empty());
    }
}
