use super::{ApiClient, ApiResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DefineResponse {
    #[serde(default)]
    list: Vec<Definition>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Definition {
    pub word: String,
    pub definition: String,
    pub permalink: String,
    #[serde(default)]
    pub example: String,
    pub author: String,
    #[serde(default)]
    pub thumbs_up: i64,
    #[serde(default)]
    pub thumbs_down: i64,
}

impl Definition {
    /// Urban Dictionary marks linked words with `[brackets]`
    pub fn clean_definition(&self) -> String {
        strip_brackets(&self.definition)
    }

    pub fn clean_example(&self) -> String {
        strip_brackets(&self.example)
    }
}

fn strip_brackets(text: &str) -> String {
    text.chars().filter(|c| *c != '[' && *c != ']').collect()
}

impl ApiClient {
    pub async fn define(&self, term: &str) -> ApiResult<Vec<Definition>> {
        let url = format!("{}/v0/define", self.endpoints.urban);
        let response: DefineResponse = self.get_json(&url, &[("term", term)]).await?;
        Ok(response.list)
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
    async fn term_is_sent_as_query_and_brackets_are_removed() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/v0/define"))
            .and(query_param("term", "rust belt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [{
                    "word": "rust belt",
                    "definition": "A [region] of old factories",
                    "permalink": "https://urban.example/1",
                    "example": "He moved to the [rust belt].",
                    "author": "someone",
                    "thumbs_up": 10,
                    "thumbs_down": 2
                }]
            })))
            .mount(&server)
            .await;

        let definitions = client.define("rust belt").await.unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].clean_definition(), "A region of old factories");
        assert_eq!(definitions[0].clean_example(), "He moved to the rust belt.");
    }

    #[tokio::test]
    async fn unknown_term_is_empty() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/v0/define"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
            .mount(&server)
            .await;

        assert!(client.define("qwertyuiop").await.unwrap().is_empty());
    }
}
