//! Mirror test utilities

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};

use mirror_version::show::VersionSwitcher;
use mirror_version::version::constraint::SemverConstraintResolver;
use mirror_version::version::fetcher::HttpPageFetcher;
use mirror_version::version::latest::LatestStrategy;

/// Directory listing in the layout served by releases.hashicorp.com (newest first)
pub const TERRAFORM_LISTING: &str = r#"<!DOCTYPE html>
<html>
<head><title>Terraform Versions | HashiCorp Releases</title></head>
<body>
  <ul>
    <li><a href="../">../</a></li>
    <li><a href="/terraform/1.7.0-alpha20231025/">terraform_1.7.0-alpha20231025</a></li>
    <li><a href="/terraform/1.6.2/">terraform_1.6.2</a></li>
    <li><a href="/terraform/1.6.1/">terraform_1.6.1</a></li>
    <li><a href="/terraform/1.6.0/">terraform_1.6.0</a></li>
    <li><a href="/terraform/1.6.0-rc1/">terraform_1.6.0-rc1</a></li>
    <li><a href="/terraform/1.6.0-beta3/">terraform_1.6.0-beta3</a></li>
    <li><a href="/terraform/1.5.7/">terraform_1.5.7</a></li>
    <li><a href="/terraform/0.13.7/">terraform_0.13.7</a></li>
    <li><a href="/terraform/0.13.6/">terraform_0.13.6</a></li>
  </ul>
</body>
</html>
"#;

/// Starts a mock mirror serving `body` at `/terraform/`
pub async fn start_mirror(body: &str) -> (ServerGuard, Mock, String) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/terraform/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create_async()
        .await;
    let mirror_url = format!("{}/terraform", server.url());
    (server, mock, mirror_url)
}

/// Creates a switcher talking HTTP to the mock mirror
pub fn create_switcher(strategy: LatestStrategy) -> VersionSwitcher {
    VersionSwitcher::new(
        Arc::new(HttpPageFetcher::with_defaults().unwrap()),
        Arc::new(SemverConstraintResolver),
        strategy,
    )
}
