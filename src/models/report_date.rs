use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Reports are dated in UTC+7 regardless of where the job runs.
const REPORT_UTC_OFFSET_HOURS: i64 = 7;

/// The day being reported on: yesterday, in the reporting timezone.
pub fn report_date(now: DateTime<Utc>) -> NaiveDate {
    let local = now + Duration::hours(REPORT_UTC_OFFSET_HOURS);
    local.date_naive() - Duration::days(1)
}
