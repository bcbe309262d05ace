//! Network URL and scheduling constants for the SMJ client.

use std::time::Duration;

/// Default REST API endpoint. Every call selects its operation with `option=`.
pub const DEFAULT_API_URL: &str = "https://smjuthangarai.in/RestApi/restApiPHP.php";

/// `option` value for the credential check.
pub const LOGIN_OPTION: &str = "LoginVerifyCustomer";

/// `option` value for today's price list.
pub const PRICE_LIST_OPTION: &str = "PriceListToday";

/// How often the dashboard re-polls prices (10 minutes).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(600_000);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
