//! One-shot search command.

use super::render;
use gamedex_search::{RawgClient, SearchConfig, SearchProvider, SearchQuery};

/// Searches once and prints the requested page.
pub async fn run(
    config: &SearchConfig,
    query: &str,
    page: u32,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", search(config, query, page, format).await?);
    Ok(())
}

/// Searches once and formats the requested page as `text` or `json`.
async fn search(
    config: &SearchConfig,
    query: &str,
    page: u32,
    format: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let client = RawgClient::new(config)?;
    let query = SearchQuery::new(query, config.page_size).with_page(page);
    let results = client.search(&query).await?;

    let output = match format {
        "json" => serde_json::to_string_pretty(&results.results)?,
        _ => render::search_page(&results, query.page),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn games(
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        if params.get("key").map(String::as_str) != Some("test-key") {
            return Err(StatusCode::UNAUTHORIZED);
        }
        let page: u64 = params
            .get("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        let search = params.get("search").cloned().unwrap_or_default();
        let previous = (page > 1).then(|| format!("/api/games?page={}", page - 1));

        Ok(Json(json!({
            "count": 7,
            "next": "/api/games?page=9",
            "previous": previous,
            "results": [
                {
                    "id": page * 100,
                    "name": format!("{search} #{page}"),
                    "background_image": "https://media.example/cover.jpg",
                }
            ]
        })))
    }

    async fn spawn_api() -> SearchConfig {
        let app = Router::new().route("/api/games", get(games));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        SearchConfig::new(format!("http://{addr}")).with_api_key("test-key")
    }

    #[tokio::test]
    async fn text_output_numbers_results() {
        let config = spawn_api().await;
        let output = search(&config, "doom", 2, "text").await.unwrap();
        assert!(output.contains(" 1. doom #2 [rawg:200]"));
        assert!(output.ends_with("page 2 of 7 matches (prev/next)"));
    }

    #[tokio::test]
    async fn json_output_lists_summaries() {
        let config = spawn_api().await;
        let output = search(&config, "doom", 1, "json").await.unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            json!([{
                "id": 100,
                "name": "doom #1",
                "background_image": "https://media.example/cover.jpg",
            }])
        );
    }

    #[tokio::test]
    async fn rejected_key_is_an_error() {
        let config = spawn_api().await.with_api_key("wrong");
        let err = search(&config, "doom", 1, "text").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
