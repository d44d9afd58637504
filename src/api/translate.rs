use super::{ApiClient, ApiResult};
use serde::Deserialize;
use std::{collections::HashMap, sync::OnceLock};

const LANGUAGES_JSON: &str = include_str!("../../assets/languages.json");

static LANGUAGES: OnceLock<HashMap<String, Language>> = OnceLock::new();

#[derive(Clone, Debug, Deserialize)]
struct Language {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TranslateResponse {
    pub status: u16,
    #[serde(default)]
    pub given: Option<GivenText>,
    #[serde(default)]
    pub translated: Option<TranslatedText>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GivenText {
    pub text: String,
    pub lang: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TranslatedText {
    pub text: String,
    pub lang: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Translation {
    pub source_text: String,
    pub source_lang: String,
    pub text: String,
    pub lang: String,
    pub pronunciation: Option<String>,
}

impl TranslateResponse {
    /// Collapses the payload into a translation, `None` when the API reported failure
    pub fn into_translation(self) -> Option<Translation> {
        if self.status != 200 {
            return None;
        }
        let given = self.given?;
        let translated = self.translated?;
        Some(Translation {
            source_text: given.text,
            source_lang: given.lang,
            text: translated.text,
            lang: translated.lang,
            pronunciation: translated.pronunciation.filter(|p| !p.trim().is_empty()),
        })
    }
}

/// Human readable name for a language code, falling back to the code itself
pub fn language_name(code: &str) -> String {
    let table = LANGUAGES.get_or_init(|| serde_json::from_str(LANGUAGES_JSON).unwrap_or_default());
    table
        .get(&code.to_ascii_lowercase())
        .map(|language| language.name.clone())
        .unwrap_or_else(|| code.to_string())
}

impl ApiClient {
    pub async fn translate(&self, text: &str, to: &str) -> ApiResult<Option<Translation>> {
        let url = format!("{}/translate", self.endpoints.translate);
        let lang = to.trim().to_ascii_lowercase();
        let response: TranslateResponse = self
            .get_json(&url, &[("text", text), ("lang", lang.as_str())])
            .await?;
        Ok(response.into_translation())
    }
}
