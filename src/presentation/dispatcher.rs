use crate::application::formatter::Formatter;
use crate::application::services::JokeApi;
use crate::domain::errors::{ChuckError, PersistenceFailure};
use crate::domain::value_objects::{Category, SearchQuery};
use crate::infrastructure::favorites::FavoritesStore;
use crate::infrastructure::output;
use crate::presentation::cli::Command;
use anyhow::Result;
use std::io::Write;
use tracing::debug;

/// Runs one command: validate, one API call, render, write.
///
/// Output is rendered completely before anything reaches `out`.
pub struct Dispatcher<'a> {
    api: &'a dyn JokeApi,
    formatter: Formatter,
    favorites: Option<FavoritesStore>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        api: &'a dyn JokeApi,
        formatter: Formatter,
        favorites: Option<FavoritesStore>,
    ) -> Self {
        Self {
            api,
            formatter,
            favorites,
        }
    }

    pub async fn dispatch<W: Write + ?Sized>(&self, command: &Command, out: &mut W) -> Result<()> {
        debug!(?command, mode = ?self.formatter.mode(), "dispatching");
        let rendered = self.render(command).await?;
        output::write_rendered(out, &rendered)?;
        Ok(())
    }

    async fn render(&self, command: &Command) -> Result<String> {
        let rendered = match command {
            Command::Random { category, save } => {
                let category = category.as_deref().map(Category::new).transpose()?;
                let joke = self.api.fetch_random(category.map(Category::into_inner)).await?;
                if *save {
                    let outcome = self.favorites()?.save(&joke)?;
                    output::print_notice(outcome.describe());
                }
                self.formatter.joke(&joke)?
            }
            Command::Categories => {
                let categories = self.api.fetch_categories().await?;
                self.formatter.categories(&categories)?
            }
            Command::Search { query, limit } => {
                let query = SearchQuery::new(query)?;
                let result = self.api.search(query.as_str().to_string(), *limit).await?;
                self.formatter.search(&result)?
            }
            Command::Favorites => {
                let jokes = self.favorites()?.load()?;
                self.formatter.favorites(&jokes)?
            }
        };
        Ok(rendered)
    }

    fn favorites(&self) -> Result<&FavoritesStore, ChuckError> {
        self.favorites.as_ref().ok_or_else(|| {
            ChuckError::persistence(
                PersistenceFailure::NoDataDir,
                None,
                "no favorites path configured and no platform data directory",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::formatter::OutputMode;
    use crate::application::services::MockJokeApi;
    use crate::domain::entities::{Joke, SearchResult};
    use mockall::predicate::eq;
    use std::time::Duration;
    use tempfile::tempdir;

    fn joke(id: &str, value: &str) -> Joke {
        Joke {
            id: id.to_string(),
            value: value.to_string(),
            url: String::new(),
            icon_url: String::new(),
            categories: Vec::new(),
        }
    }

    async fn run(api: &MockJokeApi, mode: OutputMode, command: Command) -> Result<String> {
        let dispatcher = Dispatcher::new(api, Formatter::new(mode), None);
        let mut out = Vec::new();
        dispatcher.dispatch(&command, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn random_prints_only_the_joke() {
        let mut api = MockJokeApi::new();
        api.expect_fetch_random()
            .with(eq(None))
            .times(1)
            .returning(|_| Ok(joke("abc", "Chuck Norris can compile syntax errors.")));

        let out = run(
            &api,
            OutputMode::Plain,
            Command::Random {
                category: None,
                save: false,
            },
        )
        .await
        .unwrap();

        assert_eq!(out, "Chuck Norris can compile syntax errors.\n");
    }

    #[tokio::test]
    async fn category_is_forwarded_trimmed() {
        let mut api = MockJokeApi::new();
        api.expect_fetch_random()
            .with(eq(Some("food".to_string())))
            .times(1)
            .returning(|_| Ok(joke("1", "food joke")));

        run(
            &api,
            OutputMode::Plain,
            Command::Random {
                category: Some(" food ".to_string()),
                save: false,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn blank_search_is_rejected_before_the_api() {
        let mut api = MockJokeApi::new();
        api.expect_search().never();

        let err = run(
            &api,
            OutputMode::Plain,
            Command::Search {
                query: "   ".to_string(),
                limit: 5,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ChuckError>(),
            Some(ChuckError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn search_forwards_query_and_limit() {
        let mut api = MockJokeApi::new();
        api.expect_search()
            .with(eq("python".to_string()), eq(2))
            .times(1)
            .returning(|_, _| {
                Ok(SearchResult {
                    total: 3,
                    result: vec![joke("1", "first"), joke("2", "second")],
                })
            });

        let out = run(
            &api,
            OutputMode::Plain,
            Command::Search {
                query: "python".to_string(),
                limit: 2,
            },
        )
        .await
        .unwrap();

        assert_eq!(out, "1. first\n2. second\n");
    }

    #[tokio::test]
    async fn categories_in_json() {
        let mut api = MockJokeApi::new();
        api.expect_fetch_categories()
            .returning(|| Ok(vec!["dev".to_string(), "food".to_string()]));

        let out = run(&api, OutputMode::Json, Command::Categories).await.unwrap();
        assert_eq!(out, "[\"dev\",\"food\"]\n");
    }

    #[tokio::test]
    async fn api_failure_writes_nothing() {
        let mut api = MockJokeApi::new();
        api.expect_fetch_categories()
            .returning(|| Err(ChuckError::Timeout(Duration::from_secs(10))));

        let dispatcher = Dispatcher::new(&api, Formatter::new(OutputMode::Plain), None);
        let mut out = Vec::new();
        let err = dispatcher
            .dispatch(&Command::Categories, &mut out)
            .await
            .unwrap_err();

        assert!(out.is_empty());
        assert!(matches!(
            err.downcast_ref::<ChuckError>(),
            Some(ChuckError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn save_stores_joke_once() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().join("favorites.json"));

        let mut api = MockJokeApi::new();
        api.expect_fetch_random()
            .times(2)
            .returning(|_| Ok(joke("abc", "saved joke")));

        let dispatcher =
            Dispatcher::new(&api, Formatter::new(OutputMode::Plain), Some(store.clone()));
        let command = Command::Random {
            category: None,
            save: true,
        };
        for _ in 0..2 {
            let mut out = Vec::new();
            dispatcher.dispatch(&command, &mut out).await.unwrap();
            assert_eq!(out, b"saved joke\n");
        }

        assert_eq!(store.load().unwrap(), vec![joke("abc", "saved joke")]);
    }

    #[tokio::test]
    async fn favorites_without_store_is_persistence_error() {
        let api = MockJokeApi::new();
        let err = run(&api, OutputMode::Plain, Command::Favorites)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChuckError>(),
            Some(ChuckError::Persistence {
                failure: PersistenceFailure::NoDataDir,
                ..
            })
        ));
    }
}
