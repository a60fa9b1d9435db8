use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Stats key of a date, `YYYY-MM-DD`.
pub fn date_key(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn generate_from_period(p: &str) -> Result<Vec<NaiveDate>, String> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok(vec![d]);
    }

    // YYYY-MM
    if let Ok(dm) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d") {
        return Ok(all_days_of_month(dm.year(), dm.month()));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        return Ok(all_days_of_year(year));
    }

    Err(format!("Invalid period: {}", p))
}

pub fn generate_range(start: &str, end: &str) -> Result<Vec<NaiveDate>, String> {
    let s = generate_from_period(start)?;
    let e = generate_from_period(end)?;

    let (Some(&start_date), Some(&end_date)) = (s.first(), e.last()) else {
        return Err(format!("Invalid range: {}:{}", start, end));
    };

    if start_date > end_date {
        return Err(format!("Range start after end: {}:{}", start, end));
    }

    Ok(start_date
        .iter_days()
        .take_while(|d| *d <= end_date)
        .collect())
}

/// Resolve a period expression (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `a:b`) into
/// an inclusive pair of bounds. `None` or `all` means unbounded.
pub fn resolve_bounds(period: Option<&str>) -> Result<Option<(NaiveDate, NaiveDate)>, String> {
    let Some(p) = period else {
        return Ok(None);
    };

    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let days = match p.split_once(':') {
        Some((a, b)) => generate_range(a, b)?,
        None => generate_from_period(p)?,
    };

    match (days.first(), days.last()) {
        (Some(first), Some(last)) => Ok(Some((*first, *last))),
        _ => Err(format!("Invalid period: {}", p)),
    }
}

/// True when `key` (a `YYYY-MM-DD` stats key) falls inside the bounds.
/// Unparseable keys only pass an unbounded filter.
pub fn key_in_bounds(key: &str, bounds: Option<(NaiveDate, NaiveDate)>) -> bool {
    match bounds {
        None => true,
        Some((from, to)) => parse_date(key).is_some_and(|d| d >= from && d <= to),
    }
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first.iter_days().take_while(|d| d.month() == month).collect()
}

pub fn all_days_of_year(year: i32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    first.iter_days().take_while(|d| d.year() == year).collect()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
