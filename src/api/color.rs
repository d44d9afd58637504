use super::{ApiClient, ApiResult};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct ColorInfo {
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub hsv: Hsv,
    pub name: ColorName,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub fraction: RgbFraction,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RgbFraction {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Hsl {
    pub h: i64,
    pub s: i64,
    pub l: i64,
    pub fraction: HslFraction,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HslFraction {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Hsv {
    pub h: i64,
    pub s: i64,
    pub v: i64,
    pub fraction: HsvFraction,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HsvFraction {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ColorName {
    pub value: String,
    pub closest_named_hex: String,
    pub exact_match_name: bool,
    pub distance: i64,
}

/// Normalizes user input like `#FFAA00` or `fa0` into bare lowercase hex digits
pub fn normalize_hex(input: &str) -> Option<String> {
    let digits = input.trim().trim_start_matches('#');
    let valid_len = digits.len() == 3 || digits.len() == 6;
    if valid_len && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(digits.to_ascii_lowercase())
    } else {
        None
    }
}

impl ApiClient {
    /// Looks up a colour by its hex code (without `#`)
    pub async fn color(&self, hex: &str) -> ApiResult<ColorInfo> {
        let url = format!("{}/id", self.endpoints.color);
        self.get_json(&url, &[("format", "json"), ("hex", hex)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_hex;
    use crate::api::test_support::mock_client;
    use serde_json::json;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[test]
    fn hex_input_is_normalized() {
        assert_eq!(normalize_hex("#FFAA00").as_deref(), Some("ffaa00"));
        assert_eq!(normalize_hex("fa0").as_deref(), Some("fa0"));
        assert_eq!(normalize_hex("#12345"), None);
        assert_eq!(normalize_hex("zzzzzz"), None);
    }

    #[tokio::test]
    async fn parses_color_payload() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/id"))
            .and(query_param("hex", "ff0000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rgb": {"r": 255, "g": 0, "b": 0, "fraction": {"r": 1.0, "g": 0.0, "b": 0.0}},
                "hsl": {"h": 0, "s": 100, "l": 50, "fraction": {"h": 0.0, "s": 1.0, "l": 0.5}},
                "hsv": {"h": 0, "s": 100, "v": 100, "fraction": {"h": 0.0, "s": 1.0, "v": 1.0}},
                "name": {
                    "value": "Red",
                    "closest_named_hex": "#FF0000",
                    "exact_match_name": true,
                    "distance": 0
                }
            })))
            .mount(&server)
            .await;

        let info = client.color("ff0000").await.unwrap();
        assert_eq!(info.rgb.r, 255);
        assert_eq!(info.hsl.l, 50);
        assert_eq!(info.name.value, "Red");
        assert!(info.name.exact_match_name);
    }
}
