//! Define our own macro to simplify the code
//!

/// Call the HTTP client with the proper arguments
///
/// - unauth call to fetch token by submitting credentials
///
#[macro_export]
macro_rules! http_post {
    ($self:ident, $url:ident, $cred:expr) => {
        $self
            .client
            .post(&$url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .header("content-type", "application/json")
            .json($cred)
            .send()
    };
}

/// Call the HTTP client with the proper arguments
///
/// - auth call to fetch data
///
#[macro_export]
macro_rules! http_get_auth {
    ($self:ident, $url:ident, $token:expr) => {
        $self
            .client
            .get(&$url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .header("accept", "application/json")
            .bearer_auth($token)
            .send()
    };
}
