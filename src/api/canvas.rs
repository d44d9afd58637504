use super::{ApiClient, ApiResult};

/// Avatar overlays served by the canvas endpoint
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CanvasFilter {
    Glass,
    Jail,
    Wasted,
    Triggered,
    SimpCard,
    Pride,
    Lolice,
    Horny,
}

impl CanvasFilter {
    fn route(self) -> &'static str {
        match self {
            CanvasFilter::Glass => "glass",
            CanvasFilter::Jail => "jail",
            CanvasFilter::Wasted => "wasted",
            CanvasFilter::Triggered => "triggered",
            CanvasFilter::SimpCard => "simpcard",
            CanvasFilter::Pride => "gay",
            CanvasFilter::Lolice => "lolice",
            CanvasFilter::Horny => "horny",
        }
    }

    /// File name used when the image is attached to the reply
    pub fn file_name(self) -> &'static str {
        match self {
            CanvasFilter::Glass => "glass.png",
            CanvasFilter::Jail => "jail.png",
            CanvasFilter::Wasted => "wasted.png",
            CanvasFilter::Triggered => "triggered.gif",
            CanvasFilter::SimpCard => "simpcard.png",
            CanvasFilter::Pride => "pride.png",
            CanvasFilter::Lolice => "lolice.png",
            CanvasFilter::Horny => "horny.png",
        }
    }
}

impl ApiClient {
    pub async fn canvas_filter(&self, filter: CanvasFilter, avatar: &str) -> ApiResult<Vec<u8>> {
        let url = format!("{}/canvas/{}", self.endpoints.some_random, filter.route());
        self.get_bytes(&url, &[("avatar", avatar)]).await
    }

    pub async fn its_so_stupid(&self, avatar: &str, comment: &str) -> ApiResult<Vec<u8>> {
        let url = format!("{}/canvas/its-so-stupid", self.endpoints.some_random);
        self.get_bytes(&url, &[("avatar", avatar), ("dog", comment)])
            .await
    }

    pub async fn youtube_comment(
        &self,
        avatar: &str,
        username: &str,
        comment: &str,
    ) -> ApiResult<Vec<u8>> {
        let url = format!("{}/canvas/youtube-comment", self.endpoints.some_random);
        self.get_bytes(
            &url,
            &[("avatar", avatar), ("username", username), ("comment", comment)],
        )
        .await
    }

    /// URL of a rendered swatch for the colour, suitable as an embed thumbnail
    pub fn color_viewer_url(&self, hex: &str) -> String {
        format!(
            "{}/canvas/colorviewer?hex={hex}",
            self.endpoints.some_random
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CanvasFilter;
    use crate::api::test_support::mock_client;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[tokio::test]
    async fn downloads_filtered_avatar() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/canvas/gay"))
            .and(query_param("avatar", "https://cdn.example/a.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
            .mount(&server)
            .await;

        let bytes = client
            .canvas_filter(CanvasFilter::Pride, "https://cdn.example/a.png")
            .await
            .unwrap();
        assert_eq!(bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn youtube_comment_forwards_every_parameter() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/canvas/youtube-comment"))
            .and(query_param("username", "polly"))
            .and(query_param("comment", "hello there"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .mount(&server)
            .await;

        let bytes = client
            .youtube_comment("https://cdn.example/a.png", "polly", "hello there")
            .await
            .unwrap();
        assert_eq!(bytes, b"img".to_vec());
    }

    #[tokio::test]
    async fn horny_card_has_its_own_route() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/canvas/horny"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"card".to_vec()))
            .mount(&server)
            .await;

        let bytes = client
            .canvas_filter(CanvasFilter::Horny, "https://cdn.example/a.png")
            .await
            .unwrap();
        assert_eq!(bytes, b"card".to_vec());
        assert_eq!(CanvasFilter::Horny.file_name(), "horny.png");
    }

    #[test]
    fn triggered_is_animated() {
        assert!(CanvasFilter::Triggered.file_name().ends_with(".gif"));
    }
}
