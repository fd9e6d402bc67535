use crate::error::{AppError, Result};
use crate::meta::InsightRecord;
use crate::models::AdAccount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use std::str::FromStr;

/// Column headers of the report worksheet, in row order.
pub const HEADER: [&str; 12] = [
    "Date",
    "Brand",
    "Campaign Name",
    "Account ID",
    "Account Name",
    "Impressions",
    "Spend",
    "CPM",
    "Clicks",
    "CPC",
    "CTR",
    "Reach",
];

const UNKNOWN_CAMPAIGN: &str = "Unknown Campaign";
const UNKNOWN_ACCOUNT: &str = "Unknown Account";

/// Brand label used for override-account campaigns matching [`OVERRIDE_CAMPAIGN_MARKER`].
pub const OVERRIDE_BRAND: &str = "TaffOmicron";

/// Case-sensitive, matched anywhere in the campaign name.
pub const OVERRIDE_CAMPAIGN_MARKER: &str = "omi - ";

/// One line of the report: a campaign's metrics for the report date.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub date: NaiveDate,
    pub brand: String,
    pub campaign_name: String,
    pub account_id: String,
    pub account_name: String,
    pub impressions: i64,
    pub spend: Decimal,
    pub cpm: Decimal,
    pub clicks: i64,
    pub cpc: Decimal,
    pub ctr: Decimal,
    pub reach: i64,
}

impl SheetRow {
    /// Build a row from an insight record fetched for `account`.
    ///
    /// Missing metrics become zero. A metric that is present but not a number
    /// is an error.
    pub fn from_insight(
        record: &InsightRecord,
        account: &AdAccount,
        date: NaiveDate,
    ) -> Result<Self> {
        let campaign_name = record
            .campaign_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_CAMPAIGN.to_string());
        let account_name = record
            .account_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_ACCOUNT.to_string());
        let brand = brand_for(account, &campaign_name, &account_name).to_string();

        Ok(SheetRow {
            date,
            brand,
            account_id: record.account_id.clone().unwrap_or_default(),
            impressions: parse_count("impressions", record.impressions.as_ref())?,
            spend: parse_amount("spend", record.spend.as_ref())?,
            cpm: parse_amount("cpm", record.cpm.as_ref())?,
            clicks: parse_count("clicks", record.clicks.as_ref())?,
            cpc: parse_amount("cpc", record.cpc.as_ref())?,
            ctr: parse_amount("ctr", record.ctr.as_ref())?,
            reach: parse_count("reach", record.reach.as_ref())?,
            campaign_name,
            account_name,
        })
    }

    /// Cell values in [`HEADER`] order. Counts are written as integers and
    /// amounts as floats so the sheet stores them as numbers.
    pub fn to_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.date.format("%Y-%m-%d").to_string()),
            Value::from(self.brand.as_str()),
            Value::from(self.campaign_name.as_str()),
            Value::from(self.account_id.as_str()),
            Value::from(self.account_name.as_str()),
            Value::from(self.impressions),
            decimal_value(self.spend),
            decimal_value(self.cpm),
            Value::from(self.clicks),
            decimal_value(self.cpc),
            decimal_value(self.ctr),
            Value::from(self.reach),
        ]
    }
}

pub fn header_values() -> Vec<Value> {
    HEADER.iter().map(|h| Value::from(*h)).collect()
}

/// Brand is the account name, except on the override account where
/// campaigns carrying the marker belong to [`OVERRIDE_BRAND`].
pub fn brand_for<'a>(
    account: &AdAccount,
    campaign_name: &str,
    account_name: &'a str,
) -> &'a str {
    if account.brand_override && campaign_name.contains(OVERRIDE_CAMPAIGN_MARKER) {
        OVERRIDE_BRAND
    } else {
        account_name
    }
}

fn decimal_value(amount: Decimal) -> Value {
    Value::from(amount.to_f64().unwrap_or_default())
}

fn invalid(field: &str, value: &Value) -> AppError {
    AppError::Mapping(format!("invalid value for '{}': {}", field, value))
}

fn parse_count(field: &str, value: Option<&Value>) -> Result<i64> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(field, &Value::from(s.as_str()))),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| invalid(field, &Value::Number(n.clone()))),
        Some(other) => Err(invalid(field, other)),
    }
}

fn parse_amount(field: &str, value: Option<&Value>) -> Result<Decimal> {
    let parse = |s: &str| {
        let s = s.trim();
        Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s))
    };

    match value {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(Value::String(s)) => {
            parse(s).map_err(|_| invalid(field, &Value::from(s.as_str())))
        }
        Some(Value::Number(n)) => {
            parse(&n.to_string()).map_err(|_| invalid(field, &Value::Number(n.clone())))
        }
        Some(other) => Err(invalid(field, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::test_helpers::{mock_account, mock_override_account};
    use rust_decimal::prelude::dec;
    use serde_json::json;

    fn report_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn record(value: Value) -> InsightRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_override_account_row() {
        let record = record(json!({
            "campaign_name": "omi - Spring",
            "account_name": "Acme",
            "account_id": "123",
            "impressions": "1000",
            "spend": "50.5",
            "cpm": "5",
            "clicks": "20",
            "cpc": "2.5",
            "ctr": "2",
            "reach": "900"
        }));

        let account = mock_override_account("act_taff");
        let row = SheetRow::from_insight(&record, &account, report_day()).unwrap();

        assert_eq!(
            row,
            SheetRow {
                date: report_day(),
                brand: "TaffOmicron".to_string(),
                campaign_name: "omi - Spring".to_string(),
                account_id: "123".to_string(),
                account_name: "Acme".to_string(),
                impressions: 1000,
                spend: dec!(50.5),
                cpm: dec!(5),
                clicks: 20,
                cpc: dec!(2.5),
                ctr: dec!(2),
                reach: 900,
            }
        );
        assert_eq!(
            Value::from(row.to_values()),
            json!([
                "2024-03-10",
                "TaffOmicron",
                "omi - Spring",
                "123",
                "Acme",
                1000,
                50.5,
                5.0,
                20,
                2.5,
                2.0,
                900
            ])
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let record = InsightRecord::default();
        let row = SheetRow::from_insight(&record, &mock_account("act_1"), report_day()).unwrap();

        assert_eq!(row.campaign_name, "Unknown Campaign");
        assert_eq!(row.account_name, "Unknown Account");
        assert_eq!(row.brand, "Unknown Account");
        assert_eq!(row.account_id, "");
        assert_eq!(row.impressions, 0);
        assert_eq!(row.clicks, 0);
        assert_eq!(row.reach, 0);
        assert_eq!(row.spend, Decimal::ZERO);
        assert_eq!(row.cpm, Decimal::ZERO);
        assert_eq!(row.cpc, Decimal::ZERO);
        assert_eq!(row.ctr, Decimal::ZERO);
        assert_eq!(row.to_values().len(), HEADER.len());
    }

    #[test]
    fn test_some_numeric_fields_missing() {
        let record = record(json!({
            "campaign_name": "Summer",
            "account_name": "Acme",
            "impressions": "10",
            "ctr": null,
            "cpc": "0.75"
        }));

        let row = SheetRow::from_insight(&record, &mock_account("act_1"), report_day()).unwrap();

        assert_eq!(row.impressions, 10);
        assert_eq!(row.cpc, dec!(0.75));
        assert_eq!(row.ctr, Decimal::ZERO);
        assert_eq!(row.spend, Decimal::ZERO);
        assert_eq!(row.reach, 0);
    }

    #[test]
    fn test_json_numbers_are_accepted() {
        let record = record(json!({ "impressions": 42, "spend": 1.25, "reach": 7.0 }));
        let row = SheetRow::from_insight(&record, &mock_account("act_1"), report_day()).unwrap();

        assert_eq!(row.impressions, 42);
        assert_eq!(row.spend, dec!(1.25));
        assert_eq!(row.reach, 7);
    }

    #[test]
    fn test_scientific_notation_amount() {
        let record = record(json!({ "ctr": "1.5e-2" }));
        let row = SheetRow::from_insight(&record, &mock_account("act_1"), report_day()).unwrap();
        assert_eq!(row.ctr, dec!(0.015));
    }

    #[test]
    fn test_non_numeric_metric_is_an_error() {
        let record = record(json!({ "campaign_name": "Spring", "spend": "n/a" }));
        let err = SheetRow::from_insight(&record, &mock_account("act_1"), report_day())
            .unwrap_err();

        assert!(matches!(err, AppError::Mapping(_)));
        assert!(err.to_string().contains("spend"), "got: {}", err);
    }

    #[test]
    fn test_fractional_count_string_is_an_error() {
        let record = record(json!({ "clicks": "1.5" }));
        let result = SheetRow::from_insight(&record, &mock_account("act_1"), report_day());
        assert!(matches!(result, Err(AppError::Mapping(_))));
    }

    #[test]
    fn test_brand_override_requires_marker() {
        let account = mock_override_account("act_taff");

        assert_eq!(brand_for(&account, "Spring Sale", "Acme"), "Acme");
        assert_eq!(brand_for(&account, "omi-Spring", "Acme"), "Acme");
        // Matching is case-sensitive.
        assert_eq!(brand_for(&account, "OMI - Spring", "Acme"), "Acme");
    }

    #[test]
    fn test_brand_override_matches_anywhere() {
        let account = mock_override_account("act_taff");

        assert_eq!(brand_for(&account, "omi - Spring", "Acme"), "TaffOmicron");
        assert_eq!(
            brand_for(&account, "2024 Taff omi - Retarget", "Acme"),
            "TaffOmicron"
        );
        assert_eq!(brand_for(&account, "x-omi - ", "Acme"), "TaffOmicron");
    }

    #[test]
    fn test_brand_without_override_is_account_name() {
        let account = mock_account("act_thc");

        assert_eq!(brand_for(&account, "omi - Spring", "Acme"), "Acme");
        assert_eq!(brand_for(&account, "Spring", "Acme"), "Acme");
    }

    #[test]
    fn test_header_values() {
        let header = header_values();
        assert_eq!(header.len(), 12);
        assert_eq!(header[0], json!("Date"));
        assert_eq!(header[11], json!("Reach"));
    }
}
