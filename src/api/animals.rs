use super::{ApiClient, ApiResult};
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Animal {
    Dog,
    Cat,
    Panda,
    Fox,
    Bird,
    Koala,
}

impl Animal {
    pub const ALL: [Animal; 6] = [
        Animal::Dog,
        Animal::Cat,
        Animal::Panda,
        Animal::Fox,
        Animal::Bird,
        Animal::Koala,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        let needle = input.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|animal| animal.name() == needle)
    }

    pub fn name(self) -> &'static str {
        match self {
            Animal::Dog => "dog",
            Animal::Cat => "cat",
            Animal::Panda => "panda",
            Animal::Fox => "fox",
            Animal::Bird => "bird",
            Animal::Koala => "koala",
        }
    }

    /// The image endpoint spells bird as `birb`
    fn image_slug(self) -> &'static str {
        match self {
            Animal::Bird => "birb",
            other => other.name(),
        }
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct FactResponse {
    fact: String,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    link: String,
}

impl ApiClient {
    pub async fn animal_fact(&self, animal: Animal) -> ApiResult<String> {
        let url = format!("{}/facts/{}", self.endpoints.some_random, animal.name());
        let response: FactResponse = self.get_json(&url, &[]).await?;
        Ok(response.fact)
    }

    pub async fn animal_image(&self, animal: Animal) -> ApiResult<String> {
        let url = format!("{}/img/{}", self.endpoints.some_random, animal.image_slug());
        let response: ImageResponse = self.get_json(&url, &[]).await?;
        Ok(response.link)
    }
}

#[cfg(test)]
mod tests {
    use super::Animal;
    use crate::api::test_support::mock_client;
    use serde_json::json;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn parses_animals_case_insensitively() {
        assert_eq!(Animal::parse("Koala"), Some(Animal::Koala));
        assert_eq!(Animal::parse(" BIRD "), Some(Animal::Bird));
        assert_eq!(Animal::parse("parrot"), None);
        assert_eq!(Animal::Panda.to_string(), "Panda");
    }

    #[tokio::test]
    async fn bird_images_use_the_birb_route() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/img/birb"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"link": "https://i.example/b.png"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/facts/bird"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fact": "Birds sing."})))
            .mount(&server)
            .await;

        assert_eq!(
            client.animal_image(Animal::Bird).await.unwrap(),
            "https://i.example/b.png"
        );
        assert_eq!(client.animal_fact(Animal::Bird).await.unwrap(), "Birds sing.");
    }
}
