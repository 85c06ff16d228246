use super::OperatorHandler;
use crate::Result;
use crate::field::FieldContext;
use crate::session::ValidationState;

/// `date`: empty, or a `YYYY-MM-DD` value naming a real calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DateOperator;

impl OperatorHandler for DateOperator {
    fn evaluate(
        &self,
        field: &dyn FieldContext,
        state: &mut ValidationState,
        _args: &[String],
    ) -> Result<()> {
        let value = field.value();
        if !value.is_empty() {
            state.require(is_calendar_date(&value));
        }
        Ok(())
    }
}

/// Builds the date with legacy `Date(year, month, day)` rules (overflowing
/// months and days roll over, years `0..=99` mean `19xx`) and checks that
/// reading it back yields the same year, month and day.
pub(crate) fn is_calendar_date(src: &str) -> bool {
    let Some((year, month, day)) = split_iso_date(src) else {
        return false;
    };

    let constructed_year = if (0..=99).contains(&year) {
        1900 + year
    } else {
        year
    };
    let (norm_year, norm_month) = normalize_year_month(constructed_year, month - 1);
    let days = days_from_civil(norm_year, norm_month, 1) + (day - 1);
    let (out_year, out_month, out_day) = civil_from_days(days);

    out_year == year && i64::from(out_month) == month && i64::from(out_day) == day
}

fn split_iso_date(src: &str) -> Option<(i64, i64, i64)> {
    let bytes = src.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits = |range: std::ops::Range<usize>| -> Option<i64> {
        let part = src.get(range)?;
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse::<i64>().ok()
    };
    Some((digits(0..4)?, digits(5..7)?, digits(8..10)?))
}

fn normalize_year_month(year: i64, month_zero_based: i64) -> (i64, u32) {
    let total_month = year.saturating_mul(12).saturating_add(month_zero_based);
    let norm_year = total_month.div_euclid(12);
    let norm_month = total_month.rem_euclid(12) as u32 + 1;
    (norm_year, norm_month)
}

fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let adjusted_year = year - if month <= 2 { 1 } else { 0 };
    let era = adjusted_year.div_euclid(400);
    let yoe = adjusted_year - era * 400;
    let month = i64::from(month);
    let day = i64::from(day);
    let doy = (153 * (month + if month > 2 { -3 } else { 9 }) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096).div_euclid(365);
    let mut year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2).div_euclid(153);
    let day = (doy - (153 * mp + 2).div_euclid(5) + 1) as u32;
    let month = (mp + if mp < 10 { 3 } else { -9 }) as u32;
    if month <= 2 {
        year += 1;
    }
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_real_days() {
        assert!(is_calendar_date("2014-10-27"));
        assert!(is_calendar_date("2016-02-29"));
        assert!(is_calendar_date("2000-02-29"));
        assert!(is_calendar_date("1999-12-31"));
    }

    #[test]
    fn rejects_overflowing_days_and_months() {
        assert!(!is_calendar_date("2014-02-30"));
        assert!(!is_calendar_date("2015-02-29"));
        assert!(!is_calendar_date("1900-02-29"));
        assert!(!is_calendar_date("2014-04-31"));
        assert!(!is_calendar_date("2014-13-01"));
        assert!(!is_calendar_date("2014-00-10"));
        assert!(!is_calendar_date("2014-01-00"));
    }

    #[test]
    fn rejects_other_shapes() {
        for src in ["NotADate", "2014-1-27", "14-10-27", "2014/10/27", "2014-10-27T00", "２０１４-10-27"] {
            assert!(!is_calendar_date(src), "{src}");
        }
    }

    #[test]
    fn two_digit_years_do_not_round_trip() {
        assert!(!is_calendar_date("0050-01-01"));
        assert!(is_calendar_date("0100-01-01"));
    }
}
