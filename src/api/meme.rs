use super::{ApiClient, ApiResult};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Meme {
    pub title: String,
    pub subreddit: String,
    pub image: String,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub downs: i64,
}

impl ApiClient {
    pub async fn meme(&self) -> ApiResult<Meme> {
        let url = format!("{}/api", self.endpoints.memes);
        self.get_json(&url, &[("lang", "en")]).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::mock_client;
    use serde_json::json;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[tokio::test]
    async fn parses_meme() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .and(query_param("lang", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "When the build passes",
                "subreddit": "/r/ProgrammerHumor",
                "image": "https://i.example/meme.png",
                "ups": 1200
            })))
            .mount(&server)
            .await;

        let meme = client.meme().await.unwrap();
        assert_eq!(meme.subreddit, "/r/ProgrammerHumor");
        assert_eq!(meme.ups, 1200);
        assert_eq!(meme.downs, 0);
    }
}
