//! IMDb metadata adapter backed by the `api.imdbapi.dev` REST service.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    MetadataProvider, MovieMetadata, MovieSearchResult, PersonCredit,
    ProviderError,
};

/// Default base URL of the IMDb REST API.
pub const DEFAULT_API_BASE: &str = "https://api.imdbapi.dev";

/// Credit categories folded into the actors relation.
const ACTOR_CATEGORIES: [&str; 2] = ["actor", "actress"];

#[derive(Debug, Clone)]
pub struct ImdbApiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl ImdbApiProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }
        if !status.is_success() {
            return Err(ProviderError::Api(format!(
                "{} returned {}",
                url, status
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

impl Default for ImdbApiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl MetadataProvider for ImdbApiProvider {
    async fn search_movies(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<MovieSearchResult>, ProviderError> {
        debug!(title, limit, "Searching IMDb titles");

        let limit_param = limit.to_string();
        let response: SearchTitlesResponse = self
            .get_json(
                "/search/titles",
                &[("query", title), ("limit", limit_param.as_str())],
            )
            .await?;

        Ok(response
            .titles
            .into_iter()
            .take(limit)
            .map(|title| MovieSearchResult {
                poster_url: title
                    .primary_image
                    .map(|image| image.url)
                    .unwrap_or_default(),
                title: title.primary_title.unwrap_or_default(),
                imdb_id: title.id,
            })
            .collect())
    }

    async fn get_movie_details(
        &self,
        imdb_id: &str,
    ) -> Result<MovieMetadata, ProviderError> {
        debug!(imdb_id, "Fetching IMDb title details");

        let title_path = format!("/titles/{}", imdb_id);
        let credits_path = format!("/titles/{}/credits", imdb_id);
        let (title, credits) = tokio::join!(
            self.get_json::<TitleDto>(&title_path, &[]),
            self.get_json::<CreditsResponse>(&credits_path, &[]),
        );
        let title = title?;
        let (directors, producers, actors) = partition_credits(credits?);

        Ok(MovieMetadata {
            imdb_id: imdb_id.to_string(),
            title: title.primary_title.unwrap_or_default(),
            runtime_minutes: title.runtime_minutes,
            plot: title.plot,
            poster_url: title.primary_image.map(|image| image.url),
            genres: title.genres,
            directors,
            producers,
            actors,
        })
    }
}

/// Split a credits payload into the three person relations the catalog
/// keeps. Unrecognized categories (writers, composers, ...) are dropped.
fn partition_credits(
    response: CreditsResponse,
) -> (Vec<PersonCredit>, Vec<PersonCredit>, Vec<PersonCredit>) {
    let mut directors = Vec::new();
    let mut producers = Vec::new();
    let mut actors = Vec::new();

    for credit in response.credits {
        let person = PersonCredit {
            name: credit.name.display_name,
            imdb_id: Some(credit.name.id),
        };
        let category = credit.category.to_ascii_lowercase();
        if category == "director" {
            directors.push(person);
        } else if category == "producer" {
            producers.push(person);
        } else if ACTOR_CATEGORIES.contains(&category.as_str()) {
            actors.push(person);
        }
    }

    (directors, producers, actors)
}

#[derive(Debug, Deserialize)]
struct SearchTitlesResponse {
    #[serde(default)]
    titles: Vec<TitleDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitleDto {
    id: String,
    #[serde(default)]
    primary_title: Option<String>,
    #[serde(default)]
    primary_image: Option<ImageDto>,
    #[serde(default)]
    runtime_minutes: Option<u32>,
    #[serde(default)]
    plot: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ImageDto {
    url: String,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    credits: Vec<CreditDto>,
}

#[derive(Debug, Deserialize)]
struct CreditDto {
    name: NameDto,
    category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NameDto {
    id: String,
    display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_response() {
        let payload = r#"{
            "titles": [
                {
                    "id": "tt1375666",
                    "type": "movie",
                    "primaryTitle": "Inception",
                    "primaryImage": {"url": "http://example.com/poster1.jpg"},
                    "startYear": 2010
                },
                {
                    "id": "tt0133093",
                    "type": "movie",
                    "primaryTitle": "The Matrix"
                }
            ]
        }"#;

        let response: SearchTitlesResponse =
            serde_json::from_str(payload).unwrap();
        assert_eq!(response.titles.len(), 2);
        assert_eq!(response.titles[0].id, "tt1375666");
        assert_eq!(
            response.titles[0].primary_title.as_deref(),
            Some("Inception")
        );
        assert_eq!(
            response.titles[0].primary_image.as_ref().map(|i| i.url.as_str()),
            Some("http://example.com/poster1.jpg")
        );
        assert!(response.titles[1].primary_image.is_none());
    }

    #[test]
    fn parses_title_details() {
        let payload = r#"{
            "id": "tt0111161",
            "primaryTitle": "The Shawshank Redemption",
            "runtimeMinutes": 142,
            "plot": "Two imprisoned men bond over a number of years.",
            "genres": ["Drama", "Crime"]
        }"#;

        let title: TitleDto = serde_json::from_str(payload).unwrap();
        assert_eq!(title.runtime_minutes, Some(142));
        assert_eq!(title.genres, vec!["Drama", "Crime"]);
    }

    #[test]
    fn partitions_credits_by_category() {
        let payload = r#"{
            "credits": [
                {"name": {"id": "nm0001104", "displayName": "Frank Darabont"}, "category": "director"},
                {"name": {"id": "nm0005133", "displayName": "Niki Marvin"}, "category": "producer"},
                {"name": {"id": "nm0000209", "displayName": "Tim Robbins"}, "category": "actor"},
                {"name": {"id": "nm0000151", "displayName": "Rita Hayworth"}, "category": "actress"},
                {"name": {"id": "nm0000175", "displayName": "Stephen King"}, "category": "writer"}
            ]
        }"#;

        let response: CreditsResponse = serde_json::from_str(payload).unwrap();
        let (directors, producers, actors) = partition_credits(response);

        assert_eq!(directors.len(), 1);
        assert_eq!(directors[0].name, "Frank Darabont");
        assert_eq!(directors[0].imdb_id.as_deref(), Some("nm0001104"));
        assert_eq!(producers.len(), 1);
        assert_eq!(actors.len(), 2);
    }
}
