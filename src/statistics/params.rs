//! Query-parameter handling shared by the statistics endpoints.

use std::collections::BTreeMap;

use time::{Date, macros::format_description};

use crate::Error;

/// The raw query parameters of a statistics request.
///
/// Kept as a plain map so the response can echo back exactly what the
/// client sent.
pub(crate) type QueryParams = BTreeMap<String, String>;

/// Parse an optional `YYYY-MM-DD` date parameter.
///
/// Absent and empty values both mean "no constraint", so `startDate=`
/// behaves the same as leaving the parameter off entirely.
///
/// # Errors
/// Returns [Error::InvalidDateParameter] naming the parameter if the value
/// is present but not a valid date.
pub(crate) fn parse_date_param(
    params: &QueryParams,
    name: &'static str,
) -> Result<Option<Date>, Error> {
    let Some(value) = params.get(name).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|_| Error::InvalidDateParameter {
            parameter: name,
            value: value.clone(),
        })
}

#[cfg(test)]
mod params_tests {
    use time::macros::date;

    use crate::Error;

    use super::{QueryParams, parse_date_param};

    #[test]
    fn parses_iso_dates() {
        let params =
            QueryParams::from([("startDate".to_string(), "2024-03-15".to_string())]);

        let got = parse_date_param(&params, "startDate").unwrap();

        assert_eq!(got, Some(date!(2024 - 03 - 15)));
    }

    #[test]
    fn absent_and_empty_values_mean_no_constraint() {
        let empty = QueryParams::from([("endDate".to_string(), String::new())]);

        assert_eq!(parse_date_param(&QueryParams::new(), "startDate"), Ok(None));
        assert_eq!(parse_date_param(&empty, "endDate"), Ok(None));
    }

    #[test]
    fn malformed_dates_name_the_offending_parameter() {
        let params =
            QueryParams::from([("startDate".to_string(), "15/03/2024".to_string())]);

        let got = parse_date_param(&params, "startDate");

        assert_eq!(
            got,
            Err(Error::InvalidDateParameter {
                parameter: "startDate",
                value: "15/03/2024".to_string()
            })
        );
    }
}
