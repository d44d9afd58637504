use super::{ApiClient, ApiResult};

impl ApiClient {
    /// Fetches a random plain-text insult
    pub async fn insult(&self) -> ApiResult<String> {
        let url = format!("{}/api/insult", self.endpoints.insult);
        let text = self.get_text(&url, &[]).await?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::mock_client;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn insult_is_trimmed() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/insult"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("You smell of elderberries.\n"),
            )
            .mount(&server)
            .await;

        assert_eq!(client.insult().await.unwrap(), "You smell of elderberries.");
    }
}
