use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate, TimeDelta, Weekday};

const TOMORROW_WORDS: &[&str] = &["tomorrow", "tmrw", "tmwr"];
const TODAY_WORDS: &[&str] = &["today", "tdy", "td"];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Scans free text for a date keyword and returns the suggested due date.
///
/// Words are compared case-insensitively. Tomorrow keywords win over today
/// keywords when both are present. `None` means the suggestion is cleared.
pub fn suggest_due(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let has_any = |keywords: &[&str]| words.iter().any(|w| keywords.contains(w));

    if has_any(TOMORROW_WORDS) {
        Some(today + TimeDelta::days(1))
    } else if has_any(TODAY_WORDS) {
        Some(today)
    } else {
        None
    }
}

/// Parses an explicit due value such as `due:fri` or `due:+2w`.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    // 1. Reserved keywords
    match input.as_str() {
        "today" | "tod" | "tdy" | "td" => return Ok(today),
        "tomorrow" | "tom" | "tmrw" | "tmwr" => return Ok(today + TimeDelta::days(1)),
        "eow" => {
            // End of week (Sunday)
            let days_to_sunday = (7 - today.weekday().num_days_from_sunday() as i64) % 7;
            return Ok(today + TimeDelta::days(days_to_sunday));
        }
        "eom" => return last_day_of_month(today.year(), today.month()),
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw, +Nm)
    if let Some(rest) = input.strip_prefix('+') {
        let Some(unit) = rest.chars().last() else {
            return Err(anyhow!("Invalid relative format: {}", input));
        };
        let num_str = &rest[..rest.len() - unit.len_utf8()];
        let count: i64 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;

        return match unit {
            'd' => shift_days(today, TimeDelta::try_days(count)),
            'w' => shift_days(today, TimeDelta::try_weeks(count)),
            'm' => add_months(today, count),
            _ => Err(anyhow!("Unknown unit in relative time: {}", unit)),
        };
    }

    // 3. ISO date
    if let Ok(d) = NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
        return Ok(d);
    }

    // 4. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(&input) {
        let target = parse_weekday_str(day_str)?;
        let mut days_needed = target.num_days_from_sunday() as i64
            - today.weekday().num_days_from_sunday() as i64;
        if days_needed <= 0 {
            days_needed += 7;
        }
        // count = 1 is the next such weekday, each extra count adds a week.
        let extra = (count - 1)
            .checked_mul(7)
            .and_then(|d| d.checked_add(days_needed));
        return shift_days(today, extra.and_then(TimeDelta::try_days));
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn shift_days(today: NaiveDate, delta: Option<TimeDelta>) -> Result<NaiveDate> {
    delta
        .and_then(|d| today.checked_add_signed(d))
        .ok_or_else(|| anyhow!("Date out of range"))
}

fn add_months(today: NaiveDate, count: i64) -> Result<NaiveDate> {
    let months = (today.year() as i64 * 12 + today.month0() as i64)
        .checked_add(count)
        .ok_or_else(|| anyhow!("Date out of range"))?;
    let year = i32::try_from(months.div_euclid(12))
        .map_err(|_| anyhow!("Date out of range"))?;
    let month = months.rem_euclid(12) as u32 + 1;
    match NaiveDate::from_ymd_opt(year, month, today.day()) {
        Some(d) => Ok(d),
        // Jan 31 + 1m lands on the last day of February.
        None => last_day_of_month(year, month),
    }
}

fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1), 1)
    } else {
        (Some(year), month + 1)
    };
    next_year
        .and_then(|y| NaiveDate::from_ymd_opt(y, next_month, 1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| anyhow!("Date out of range: {}-{}", year, month))
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => {
            let count = count.parse::<i64>().ok()?;
            (count >= 1).then_some((count, day))
        }
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Could not parse date: {}", s)),
    }
}
