//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/v1/transaction/{transaction_id}', use
//! [format_endpoint].

/// The route for checking that the server is up.
pub const HEALTH: &str = "/v1/health";
/// The route for registering a new user.
pub const REGISTER: &str = "/v1/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/v1/auth/login";
/// The route for fetching the authenticated user's profile.
pub const USER: &str = "/v1/auth/user";
/// The route for listing transactions.
pub const TRANSACTIONS: &str = "/v1/transaction";
/// The route for creating a transaction.
pub const CREATE_TRANSACTION: &str = "/v1/transaction/create";
/// The route for getting, updating, or deleting a single transaction.
pub const TRANSACTION: &str = "/v1/transaction/{transaction_id}";
/// The route for the per-category totals over a date range.
pub const MONTHLY_SUMMARY: &str = "/v1/transaction/monthly-summary";
/// The route for the essentials quarterly report.
pub const REPORT_ESSENTIALS: &str = "/v1/report/quarter/essentials";
/// The route for the non-essentials quarterly report.
pub const REPORT_NON_ESSENTIALS: &str = "/v1/report/quarter/non-essentials";
/// The route for the shopping quarterly report.
pub const REPORT_SHOPPING: &str = "/v1/report/quarter/shopping";
/// The route for the per-month income and expense totals of one year.
pub const REPORT_ANNUAL_CASHFLOW: &str = "/v1/report/annual/cashflow";
/// The route for listing asset snapshots.
pub const ASSETS: &str = "/v1/asset";
/// The route for recording an asset snapshot.
pub const CREATE_ASSET: &str = "/v1/asset/create";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/v1/transaction/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::HEALTH);
        assert_endpoint_is_valid_uri(endpoints::REGISTER);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::USER);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::CREATE_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_SUMMARY);
        assert_endpoint_is_valid_uri(endpoints::REPORT_ESSENTIALS);
        assert_endpoint_is_valid_uri(endpoints::REPORT_NON_ESSENTIALS);
        assert_endpoint_is_valid_uri(endpoints::REPORT_SHOPPING);
        assert_endpoint_is_valid_uri(endpoints::REPORT_ANNUAL_CASHFLOW);
        assert_endpoint_is_valid_uri(endpoints::ASSETS);
        assert_endpoint_is_valid_uri(endpoints::CREATE_ASSET);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::TRANSACTION, 1);

        assert_eq!(formatted_path, "/v1/transaction/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
