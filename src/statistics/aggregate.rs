//! The aggregation engine: summary statistics and grouped breakdowns over a
//! set of transactions already fetched into memory.
//!
//! Everything in this module is a pure function of its inputs; the record
//! set comes from [crate::transaction::get_transactions_matching].

use std::collections::HashMap;

use time::Date;

use crate::{Error, transaction::Transaction};

/// The date-bucketing unit used for time-series aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One bucket per calendar date.
    Day,
    /// One bucket per calendar month.
    Month,
    /// One bucket per calendar quarter.
    Quarter,
    /// One bucket per calendar year.
    Year,
}

impl Granularity {
    /// Parse the `by` query parameter.
    ///
    /// # Errors
    /// Returns [Error::InvalidGranularity] if the value is missing or not
    /// one of `year`, `month`, `day`, `quarter`.
    pub fn parse(value: Option<&str>) -> Result<Self, Error> {
        match value {
            Some("day") => Ok(Self::Day),
            Some("month") => Ok(Self::Month),
            Some("quarter") => Ok(Self::Quarter),
            Some("year") => Ok(Self::Year),
            _ => Err(Error::InvalidGranularity),
        }
    }

    /// The bucket key a record dated `date` falls into.
    ///
    /// Key formats: day `YYYY-MM-DD`, month `YYYY-M` (month number without
    /// zero padding), quarter `YYYY-QQ` (e.g. `2024-3Q`), year `YYYY`.
    fn bucket_key(self, date: Date) -> String {
        match self {
            Self::Day => date.to_string(),
            Self::Month => format!("{}-{}", date.year(), u8::from(date.month())),
            Self::Quarter => format!("{}-{}Q", date.year(), quarter_number(date)),
            Self::Year => date.year().to_string(),
        }
    }
}

fn quarter_number(date: Date) -> u8 {
    (u8::from(date.month()) - 1) / 3 + 1
}

/// The dimension a statistics query groups records by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Group by secondary category name.
    Category,
    /// Group by source name.
    Source,
    /// Group by a date bucket of the given granularity.
    Date(Granularity),
}

/// One group in an aggregation breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// The value of the grouping dimension, e.g. a category name or a date
    /// bucket key.
    pub key: String,
    /// The sum of the amounts of the records in this group.
    pub amount: f64,
}

/// Summary statistics plus a grouped breakdown over a set of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// The sum of all record amounts.
    pub total: f64,
    /// The number of records.
    pub count: usize,
    /// The largest record amount.
    pub max: f64,
    /// The smallest record amount.
    pub min: f64,
    /// The per-group sums, one entry per distinct dimension value.
    pub groups: Vec<Group>,
}

/// Compute summary statistics over `records` and group them by `dimension`.
///
/// Returns `None` for an empty record set so callers can distinguish
/// "no data" from a zero-sum result.
///
/// Records without a category (or source) still count toward the summary
/// when grouping by category (or source), but produce no group. Category
/// and source groups appear in the order their keys are first seen; date
/// buckets are sorted chronologically.
pub fn aggregate(records: &[Transaction], dimension: Dimension) -> Option<Aggregate> {
    let first = records.first()?;

    let mut total = 0.0;
    let mut max = first.amount;
    let mut min = first.amount;
    for record in records {
        total += record.amount;
        max = max.max(record.amount);
        min = min.min(record.amount);
    }

    let groups = match dimension {
        Dimension::Category => group_by_key(records, |record| record.category_level2.as_deref()),
        Dimension::Source => group_by_key(records, |record| record.source.as_deref()),
        Dimension::Date(granularity) => group_by_date(records, granularity),
    };

    Some(Aggregate {
        total,
        count: records.len(),
        max,
        min,
        groups,
    })
}

fn group_by_key<'a>(
    records: &'a [Transaction],
    key_of: impl Fn(&'a Transaction) -> Option<&'a str>,
) -> Vec<Group> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        let Some(key) = key_of(record) else {
            continue;
        };

        match index.get(key) {
            Some(&position) => groups[position].amount += record.amount,
            None => {
                index.insert(key, groups.len());
                groups.push(Group {
                    key: key.to_string(),
                    amount: record.amount,
                });
            }
        }
    }

    groups
}

fn group_by_date(records: &[Transaction], granularity: Granularity) -> Vec<Group> {
    struct DateBucket {
        key: String,
        // Any date inside the bucket; used for chronological ordering.
        date: Date,
        amount: f64,
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<DateBucket> = Vec::new();

    for record in records {
        let key = granularity.bucket_key(record.date);

        match index.get(&key) {
            Some(&position) => buckets[position].amount += record.amount,
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(DateBucket {
                    key,
                    date: record.date,
                    amount: record.amount,
                });
            }
        }
    }

    match granularity {
        // Month keys like "2024-10" do not sort correctly as strings
        // ("2024-10" < "2024-2"), so order by the underlying date instead.
        Granularity::Day | Granularity::Month => buckets.sort_by_key(|bucket| bucket.date),
        // Quarter and year keys are zero-free and year-prefixed, so the
        // lexical order is already chronological.
        Granularity::Quarter | Granularity::Year => {
            buckets.sort_by(|a, b| a.key.cmp(&b.key));
        }
    }

    buckets
        .into_iter()
        .map(|bucket| Group {
            key: bucket.key,
            amount: bucket.amount,
        })
        .collect()
}

#[cfg(test)]
mod aggregate_tests {
    use time::{Date, OffsetDateTime, macros::date};

    use crate::transaction::{SYSTEM_ACTOR, Transaction};

    use super::{Aggregate, Dimension, Granularity, aggregate};

    fn record(transaction_date: Date, amount: f64) -> Transaction {
        let now = OffsetDateTime::now_utc();

        Transaction {
            id: 0,
            date: transaction_date,
            description: "test".to_string(),
            notes: None,
            category_level1: None,
            category_level2: None,
            type_name: Some("Sale".to_string()),
            amount,
            source: None,
            created_at: now,
            created_by: SYSTEM_ACTOR.to_string(),
            modified_at: now,
            modified_by: SYSTEM_ACTOR.to_string(),
        }
    }

    fn record_with_category(transaction_date: Date, amount: f64, category: &str) -> Transaction {
        Transaction {
            category_level2: Some(category.to_string()),
            ..record(transaction_date, amount)
        }
    }

    fn group_keys(aggregate: &Aggregate) -> Vec<&str> {
        aggregate
            .groups
            .iter()
            .map(|group| group.key.as_str())
            .collect()
    }

    #[test]
    fn empty_input_yields_no_data() {
        assert_eq!(aggregate(&[], Dimension::Category), None);
        assert_eq!(aggregate(&[], Dimension::Date(Granularity::Month)), None);
    }

    #[test]
    fn summary_covers_all_records() {
        let records = vec![
            record_with_category(date!(2024 - 01 - 01), 10.0, "A"),
            record_with_category(date!(2024 - 01 - 02), 20.0, "A"),
            record_with_category(date!(2024 - 01 - 03), 5.0, "B"),
        ];

        let got = aggregate(&records, Dimension::Category).expect("Expected a summary");

        assert_eq!(got.total, 35.0);
        assert_eq!(got.count, 3);
        assert_eq!(got.max, 20.0);
        assert_eq!(got.min, 5.0);
    }

    #[test]
    fn category_groups_sum_per_key_in_discovery_order() {
        let records = vec![
            record_with_category(date!(2024 - 01 - 01), 10.0, "A"),
            record_with_category(date!(2024 - 01 - 02), 20.0, "A"),
            record_with_category(date!(2024 - 01 - 03), 5.0, "B"),
        ];

        let got = aggregate(&records, Dimension::Category).expect("Expected a summary");

        assert_eq!(group_keys(&got), vec!["A", "B"]);
        assert_eq!(got.groups[0].amount, 30.0);
        assert_eq!(got.groups[1].amount, 5.0);
    }

    #[test]
    fn group_sums_partition_the_total() {
        let records = vec![
            record_with_category(date!(2024 - 01 - 01), 12.5, "A"),
            record_with_category(date!(2024 - 01 - 02), -2.5, "B"),
            record_with_category(date!(2024 - 01 - 03), 7.0, "C"),
            record_with_category(date!(2024 - 01 - 04), 3.0, "A"),
        ];

        let got = aggregate(&records, Dimension::Category).expect("Expected a summary");

        let group_sum: f64 = got.groups.iter().map(|group| group.amount).sum();
        assert!((group_sum - got.total).abs() < 1e-9);
    }

    #[test]
    fn records_without_a_category_count_toward_the_summary_only() {
        let records = vec![
            record_with_category(date!(2024 - 01 - 01), 10.0, "A"),
            record(date!(2024 - 01 - 02), 20.0),
        ];

        let got = aggregate(&records, Dimension::Category).expect("Expected a summary");

        assert_eq!(got.total, 30.0);
        assert_eq!(got.count, 2);
        assert_eq!(group_keys(&got), vec!["A"]);
    }

    #[test]
    fn source_groups_use_the_source_name() {
        let mut with_source = record(date!(2024 - 01 - 01), 10.0);
        with_source.source = Some("Checking".to_string());

        let got = aggregate(&[with_source], Dimension::Source).expect("Expected a summary");

        assert_eq!(group_keys(&got), vec!["Checking"]);
    }

    #[test]
    fn date_bucket_keys_are_mutually_consistent() {
        let records = vec![record(date!(2024 - 03 - 15), 1.0)];

        let by_day = aggregate(&records, Dimension::Date(Granularity::Day)).unwrap();
        let by_month = aggregate(&records, Dimension::Date(Granularity::Month)).unwrap();
        let by_quarter = aggregate(&records, Dimension::Date(Granularity::Quarter)).unwrap();
        let by_year = aggregate(&records, Dimension::Date(Granularity::Year)).unwrap();

        assert_eq!(group_keys(&by_day), vec!["2024-03-15"]);
        assert_eq!(group_keys(&by_month), vec!["2024-3"]);
        assert_eq!(group_keys(&by_quarter), vec!["2024-1Q"]);
        assert_eq!(group_keys(&by_year), vec!["2024"]);
    }

    #[test]
    fn quarter_keys_cover_all_four_quarters() {
        let records = vec![
            record(date!(2024 - 01 - 31), 1.0),
            record(date!(2024 - 06 - 01), 1.0),
            record(date!(2024 - 09 - 30), 1.0),
            record(date!(2024 - 12 - 25), 1.0),
        ];

        let got = aggregate(&records, Dimension::Date(Granularity::Quarter)).unwrap();

        assert_eq!(
            group_keys(&got),
            vec!["2024-1Q", "2024-2Q", "2024-3Q", "2024-4Q"]
        );
    }

    #[test]
    fn month_buckets_sort_chronologically_not_lexically() {
        let records = vec![
            record(date!(2024 - 10 - 01), 1.0),
            record(date!(2024 - 02 - 01), 2.0),
        ];

        let got = aggregate(&records, Dimension::Date(Granularity::Month)).unwrap();

        // Lexical ordering would put "2024-10" first.
        assert_eq!(group_keys(&got), vec!["2024-2", "2024-10"]);
    }

    #[test]
    fn day_buckets_sum_records_on_the_same_date() {
        let records = vec![
            record(date!(2024 - 01 - 02), 1.0),
            record(date!(2024 - 01 - 01), 2.0),
            record(date!(2024 - 01 - 02), 3.0),
        ];

        let got = aggregate(&records, Dimension::Date(Granularity::Day)).unwrap();

        assert_eq!(group_keys(&got), vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(got.groups[1].amount, 4.0);
    }

    #[test]
    fn year_buckets_sort_lexically() {
        let records = vec![
            record(date!(2025 - 01 - 01), 1.0),
            record(date!(2023 - 01 - 01), 2.0),
            record(date!(2024 - 01 - 01), 3.0),
        ];

        let got = aggregate(&records, Dimension::Date(Granularity::Year)).unwrap();

        assert_eq!(group_keys(&got), vec!["2023", "2024", "2025"]);
    }

    #[test]
    fn parse_granularity_accepts_the_four_units() {
        assert_eq!(Granularity::parse(Some("day")), Ok(Granularity::Day));
        assert_eq!(Granularity::parse(Some("month")), Ok(Granularity::Month));
        assert_eq!(
            Granularity::parse(Some("quarter")),
            Ok(Granularity::Quarter)
        );
        assert_eq!(Granularity::parse(Some("year")), Ok(Granularity::Year));
    }

    #[test]
    fn parse_granularity_rejects_missing_or_unknown_values() {
        use crate::Error;

        assert_eq!(Granularity::parse(None), Err(Error::InvalidGranularity));
        assert_eq!(
            Granularity::parse(Some("week")),
            Err(Error::InvalidGranularity)
        );
        assert_eq!(Granularity::parse(Some("")), Err(Error::InvalidGranularity));
    }
}
