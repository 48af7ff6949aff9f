use client::client::Client;
use types::domain::{CreateAccountRequest, LoginRequest, SubmissionResult};

#[cfg_attr(test, faux::create)]
pub struct Submitter {
    client: Client,
}

#[cfg_attr(test, faux::methods)]
impl Submitter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create_account(&self, request: CreateAccountRequest) -> SubmissionResult {
        self.client.create_account(request).await
    }

    pub async fn login(&self, request: LoginRequest) -> SubmissionResult {
        self.client.login(request).await
    }
}
