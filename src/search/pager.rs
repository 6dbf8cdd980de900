//! Cursor pagination engine.
//!
//! Pull-driven: a page is fetched only when the caller has drained the
//! previous one, so the caller's consumption rate governs the fetch rate
//! and dropping the stream stops all fetching. At most one fetch is in
//! flight per stream.

use std::collections::VecDeque;

use futures_util::Stream;
use futures_util::stream;
use tracing::{debug, warn};

use crate::client::ApiError;
use crate::query::{DEFAULT_ROWS, SearchRequest};

use super::{CURSOR_START, FetchPage, SearchPage};

/// Empty pages that still carry a cursor are followed, but only this
/// many times in a row before the stream gives up on the cursor.
pub const MAX_CONSECUTIVE_EMPTY_PAGES: u32 = 2;

struct PagerState<'a, T, F: ?Sized> {
    fetcher: &'a F,
    request: SearchRequest,
    /// Cursor for the next fetch; `None` once the result set is exhausted.
    cursor: Option<String>,
    yielded: usize,
    budget: Option<usize>,
    empty_streak: u32,
    buffered: VecDeque<T>,
}

/// Streams every item of `request`'s result set, page by page.
///
/// Each page fetch gets its own immutable request snapshot whose row
/// count is the page size (or the remaining budget when that is
/// smaller); the row count on `request` itself only applies to
/// single-page calls. `max_records` caps the number of items yielded:
/// once reached, emission stops immediately, the rest of the buffered
/// page is discarded and no further fetch is issued.
///
/// Termination: a page without a continuation cursor ends the stream, as
/// does a cursor that fails to advance or a run of
/// [`MAX_CONSECUTIVE_EMPTY_PAGES`] empty pages. A transport error ends
/// the stream with an `Err` item, observably distinct from exhaustion.
pub fn page_stream<'a, T, F>(
    fetcher: &'a F,
    request: SearchRequest,
    max_records: Option<usize>,
) -> impl Stream<Item = Result<T, ApiError>> + 'a
where
    F: FetchPage<T> + ?Sized,
    T: 'a,
{
    let state = PagerState {
        fetcher,
        request,
        cursor: Some(CURSOR_START.to_string()),
        yielded: 0,
        budget: max_records,
        empty_streak: 0,
        buffered: VecDeque::new(),
    };

    stream::try_unfold(state, |mut state| async move {
        loop {
            if let Some(budget) = state.budget
                && state.yielded >= budget
            {
                return Ok(None);
            }

            if let Some(item) = state.buffered.pop_front() {
                state.yielded += 1;
                return Ok(Some((item, state)));
            }

            let Some(cursor) = state.cursor.take() else {
                return Ok(None);
            };

            let rows = match state.budget {
                Some(budget) => DEFAULT_ROWS.min(budget - state.yielded),
                None => DEFAULT_ROWS,
            };
            let page_request = state.request.with_rows(rows);

            debug!(cursor = %cursor, rows, yielded = state.yielded, "fetching page");
            let page: SearchPage<T> = state.fetcher.fetch_page(&page_request, &cursor).await?;
            debug!(
                page_items = page.items.len(),
                total = page.total_results,
                has_cursor = page.next_cursor.is_some(),
                "page received"
            );

            state.cursor = match page.next_cursor {
                Some(next) if next == cursor => {
                    warn!(cursor = %next, "cursor did not advance, treating result set as exhausted");
                    None
                }
                other => other,
            };

            if page.items.is_empty() {
                if state.cursor.is_none() {
                    return Ok(None);
                }
                state.empty_streak += 1;
                if state.empty_streak >= MAX_CONSECUTIVE_EMPTY_PAGES {
                    warn!(
                        empty_pages = state.empty_streak,
                        "empty page limit reached, stopping pagination"
                    );
                    return Ok(None);
                }
                continue;
            }

            state.empty_streak = 0;
            state.buffered = page.items.into();
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use futures_util::{StreamExt, TryStreamExt};

    use super::*;
    use crate::query::QueryBuilder;

    /// Replays a fixed script of pages and records every fetch. Running
    /// out of script is a test failure: it means the engine issued a
    /// fetch the scenario forbids.
    struct ScriptedFetcher {
        pages: Mutex<VecDeque<Result<SearchPage<u32>, ApiError>>>,
        /// (cursor, rows, query) per observed fetch.
        calls: Mutex<Vec<(String, usize, String)>>,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<Result<SearchPage<u32>, ApiError>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, usize, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FetchPage<u32> for ScriptedFetcher {
        async fn fetch_page(
            &self,
            request: &SearchRequest,
            cursor: &str,
        ) -> Result<SearchPage<u32>, ApiError> {
            self.calls.lock().unwrap().push((
                cursor.to_string(),
                request.rows(),
                request.query().to_string(),
            ));
            match self.pages.lock().unwrap().pop_front() {
                Some(page) => page,
                None => panic!("fetch beyond scripted pages, cursor {cursor}"),
            }
        }
    }

    fn page(range: std::ops::Range<u32>, next: Option<&str>) -> SearchPage<u32> {
        SearchPage {
            items: range.collect(),
            total_results: 300,
            next_cursor: next.map(String::from),
            facets: None,
            query: None,
        }
    }

    #[tokio::test]
    async fn test_unbudgeted_stream_drains_all_pages() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(0..100, Some("c1"))),
            Ok(page(100..200, Some("c2"))),
            Ok(page(200..300, Some("c3"))),
            Ok(page(300..300, None)),
        ]);
        let request = QueryBuilder::new().who("Rembrandt").build();

        let items: Vec<u32> = page_stream(&fetcher, request, None)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(items.len(), 300);
        assert_eq!(items[0], 0);
        assert_eq!(items[299], 299);

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].0, CURSOR_START);
        assert_eq!(calls[1].0, "c1");
        assert_eq!(calls[3].0, "c3");
    }

    #[tokio::test]
    async fn test_page_rows_ignore_builder_rows() {
        let fetcher = ScriptedFetcher::new(vec![Ok(page(0..10, None))]);
        // Builder asks for 7 rows; pagination sizes pages itself.
        let request = QueryBuilder::new().rows(7).build();

        let items: Vec<u32> = page_stream(&fetcher, request, None)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(items.len(), 10);
        assert_eq!(
            fetcher.calls(),
            vec![(CURSOR_START.to_string(), DEFAULT_ROWS, String::new())]
        );
    }

    #[tokio::test]
    async fn test_budget_stops_mid_page_with_no_extra_fetch() {
        // Only 3 pages scripted: a 4th fetch would panic.
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(0..100, Some("c1"))),
            Ok(page(100..200, Some("c2"))),
            Ok(page(200..300, Some("c3"))),
        ]);
        let request = QueryBuilder::new().build();

        let items: Vec<u32> = page_stream(&fetcher, request, Some(250))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(items.len(), 250);
        assert_eq!(items[249], 249);

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 3);
        // Third page only needs the remaining 50 records.
        assert_eq!(calls[2].1, 50);
    }

    #[tokio::test]
    async fn test_budget_at_page_boundary_issues_no_extra_fetch() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(0..100, Some("c1"))),
            Ok(page(100..200, Some("c2"))),
        ]);
        let request = QueryBuilder::new().build();

        let items: Vec<u32> = page_stream(&fetcher, request, Some(200))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(items.len(), 200);
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_first_page_costs_exactly_one_fetch() {
        let fetcher = ScriptedFetcher::new(vec![Ok(page(0..0, None))]);
        let request = QueryBuilder::new().build();

        let items: Vec<u32> = page_stream(&fetcher, request, None)
            .try_collect()
            .await
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_cursor_yields_page_then_terminates() {
        let fetcher = ScriptedFetcher::new(vec![Ok(page(0..100, Some(CURSOR_START)))]);
        let request = QueryBuilder::new().build();

        let items: Vec<u32> = page_stream(&fetcher, request, None)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(items.len(), 100);
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cursored_pages_tolerated_then_capped() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(0..0, Some("c1"))),
            Ok(page(0..0, Some("c2"))),
        ]);
        let request = QueryBuilder::new().build();

        let items: Vec<u32> = page_stream(&fetcher, request, None)
            .try_collect()
            .await
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_single_empty_cursored_page_recovers() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(0..0, Some("c1"))),
            Ok(page(0..50, None)),
        ]);
        let request = QueryBuilder::new().build();

        let items: Vec<u32> = page_stream(&fetcher, request, None)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(items.len(), 50);
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_surfaces_as_err_item() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(0..100, Some("c1"))),
            Err(ApiError::Status {
                status: 500,
                reason: "server error".to_string(),
            }),
        ]);
        let request = QueryBuilder::new().build();

        let outcomes: Vec<Result<u32, ApiError>> =
            page_stream(&fetcher, request, None).collect().await;

        assert_eq!(outcomes.len(), 101);
        assert!(outcomes[..100].iter().all(Result::is_ok));
        assert!(matches!(
            outcomes[100],
            Err(ApiError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_no_prefetch_before_page_is_drained() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(0..100, Some("c1"))),
            Ok(page(100..200, None)),
        ]);
        let request = QueryBuilder::new().build();

        let mut stream = std::pin::pin!(page_stream(&fetcher, request, None));
        for _ in 0..100 {
            stream.next().await.unwrap().unwrap();
        }
        // First page drained, second fetch not yet issued.
        assert_eq!(fetcher.calls().len(), 1);

        assert_eq!(stream.next().await.unwrap().unwrap(), 100);
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_started_stream_ignores_later_builder_changes() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(0..100, Some("c1"))),
            Ok(page(100..200, None)),
        ]);
        let mut builder = QueryBuilder::new().who("Rembrandt");
        let request = builder.build();

        let mut stream = std::pin::pin!(page_stream(&fetcher, request, None));
        for _ in 0..100 {
            stream.next().await.unwrap().unwrap();
        }

        // Rebuilding with new terms between pages must not reach fetches
        // of the already-started stream.
        builder = builder.who("Vermeer");
        let rebuilt = builder.build();
        assert_eq!(rebuilt.query(), "who:Vermeer");

        while stream.next().await.is_some() {}

        let queries: Vec<String> =
            fetcher.calls().into_iter().map(|call| call.2).collect();
        assert_eq!(
            queries,
            vec!["who:Rembrandt".to_string(), "who:Rembrandt".to_string()]
        );
    }

    /// `FetchPage` stays object-safe; pagination accepts `dyn` fetchers.
    #[test]
    fn test_page_stream_accepts_trait_objects() {
        let boxed: Box<dyn FetchPage<u32>> = Box::new(ScriptedFetcher::new(vec![Ok(page(
            0..3,
            None,
        ))]));

        let items: Vec<u32> = tokio_test::block_on(
            page_stream(boxed.as_ref(), QueryBuilder::new().build(), None).try_collect(),
        )
        .unwrap();

        assert_eq!(items, vec![0, 1, 2]);
    }
}
