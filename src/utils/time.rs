
use chrono::{Days, NaiveDate};


/// This is the standard way of converting a date to a journal file name in daycoach.
/// Matches Logseq's default `yyyy_MM_dd` journal naming.
pub fn date_to_journal_name(date: NaiveDate) -> String {
    format!("{}.md", date.format("%Y_%m_%d"))
}

/// Days strictly before `date`, newest first, at most `days` of them.
pub fn days_before(date: NaiveDate, days: u32) -> impl Iterator<Item = NaiveDate> {
    (1..=u64::from(days)).map_while(move |offset| date.checked_sub_days(Days::new(offset)))
}
