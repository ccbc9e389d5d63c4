use super::event::HttpMethod;
use std::str::FromStr;

/// Value of the `action` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Releases,
    Analytics,
    Earnings,
    Payouts,
    Platforms,
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "releases" => Ok(Action::Releases),
            "analytics" => Ok(Action::Analytics),
            "earnings" => Ok(Action::Earnings),
            "payouts" => Ok(Action::Payouts),
            "platforms" => Ok(Action::Platforms),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    ListReleases,
    Analytics,
    Earnings,
    ListPayouts,
    CreatePayout,
    ListPlatforms,
    NotFound,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Preflight => "preflight",
            Route::ListReleases => "list_releases",
            Route::Analytics => "analytics",
            Route::Earnings => "earnings",
            Route::ListPayouts => "list_payouts",
            Route::CreatePayout => "create_payout",
            Route::ListPlatforms => "list_platforms",
            Route::NotFound => "not_found",
        }
    }
}

/// OPTIONS is always a preflight, whatever the action.
pub fn resolve(method: &HttpMethod, action: Option<&str>) -> Route {
    if *method == HttpMethod::Options {
        return Route::Preflight;
    }
    let action = match action.map(Action::from_str) {
        Some(Ok(action)) => action,
        _ => return Route::NotFound,
    };
    match (method, action) {
        (HttpMethod::Get, Action::Releases) => Route::ListReleases,
        (HttpMethod::Get, Action::Analytics) => Route::Analytics,
        (HttpMethod::Get, Action::Earnings) => Route::Earnings,
        (HttpMethod::Get, Action::Payouts) => Route::ListPayouts,
        (HttpMethod::Post, Action::Payouts) => Route::CreatePayout,
        (HttpMethod::Get, Action::Platforms) => Route::ListPlatforms,
        _ => Route::NotFound,
    }
}
