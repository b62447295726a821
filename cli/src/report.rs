use chrono::NaiveDate;
use swipedo_core::{levenshtein, suggest_due, TagSet};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Distance")]
    distance: usize,
}

/// Table of the tags matching `query`, closest first.
pub fn tag_table(tags: &TagSet, query: &str) -> Option<String> {
    let matches = tags.filter(query);
    if matches.is_empty() {
        return None;
    }

    let query = query.to_lowercase();
    let rows: Vec<TagRow> = matches
        .into_iter()
        .map(|tag| TagRow {
            name: format!("#{}", tag.text),
            color: tag.color.to_string(),
            distance: levenshtein(&query, &tag.text.to_lowercase()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    Some(table.to_string())
}

pub fn describe_suggestion(text: &str, today: NaiveDate) -> String {
    match suggest_due(text, today) {
        Some(date) if date == today => format!("today ({})", date),
        Some(date) => format!("tomorrow ({})", date),
        None => "no date keyword found".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_table_orders_by_distance() {
        let table = tag_table(&TagSet::defaults(), "o").unwrap();
        let work = table.find("#work").unwrap();
        let personal = table.find("#personal").unwrap();
        assert!(work < personal);
        assert!(!table.contains("#health"));
    }

    #[test]
    fn test_tag_table_no_match() {
        assert!(tag_table(&TagSet::defaults(), "zzz").is_none());
    }

    #[test]
    fn test_describe_suggestion() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(describe_suggestion("do it tmrw", today), "tomorrow (2025-05-02)");
        assert_eq!(describe_suggestion("do it td", today), "today (2025-05-01)");
        assert_eq!(describe_suggestion("do it", today), "no date keyword found");
    }
}
