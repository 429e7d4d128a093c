//! Admin product list: page/limit cursor, row projection and guarded deletion.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::domain::{Cursor, Product, ResourceId};
use crate::error::{AccessDenied, ApiError, ApiErrorKind, ViewError};
use crate::ports::{Confirmation, Confirmer, Notice, Notifier, ProductApi, Session};

/// Shown in place of an image when a product has none.
pub const NO_IMAGE_PLACEHOLDER: &str = "No image";

/// Lifecycle of the list: `Idle -> Loading -> (Loaded | Errored)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Loaded,
    Errored(ApiError),
}

/// Read-only presentation projection of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub number: u64,
    pub product_id: ResourceId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub quantity: i64,
    pub image: String,
}

impl ProductRow {
    fn project(number: u64, product: &Product) -> Self {
        Self {
            number,
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            category: product.category_name().to_string(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity,
            image: product
                .primary_image()
                .unwrap_or(NO_IMAGE_PLACEHOLDER)
                .to_string(),
        }
    }
}

/// Everything a renderer needs from the view at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub status: ListStatus,
    pub cursor: Cursor,
    pub rows: Vec<ProductRow>,
}

/// What happened to a fetch once it resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was the newest one and now backs the view.
    Applied { rows: usize },
    /// A newer fetch was issued meanwhile; this response was dropped.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend accepted the delete. `removed` is false when the row was not on this page.
    Deleted { removed: bool },
    /// The user cancelled at the confirmation prompt.
    Declined,
}

struct ListState {
    status: ListStatus,
    cursor: Cursor,
    rows: Vec<Product>,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

/// Paginated product view bound to one [`ProductApi`].
///
/// Each fetch is tagged with a generation number; responses older than the latest issued
/// fetch are discarded. Starting a fetch cancels the one before it, and dropping or
/// shutting down the view cancels whatever is still in flight.
pub struct ProductListView {
    api: Arc<dyn ProductApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    state: RwLock<ListState>,
    lifetime: CancellationToken,
}

impl ProductListView {
    pub fn new(
        api: Arc<dyn ProductApi>,
        session: Session,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        limit: u32,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            confirmer,
            state: RwLock::new(ListState {
                status: ListStatus::Idle,
                cursor: Cursor::new(limit),
                rows: Vec::new(),
                generation: 0,
                in_flight: None,
            }),
            lifetime: CancellationToken::new(),
        }
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        let state = self.state.read().await;
        let rows = match state.status {
            ListStatus::Loaded => state
                .rows
                .iter()
                .enumerate()
                .map(|(i, p)| ProductRow::project(state.cursor.row_number(i), p))
                .collect(),
            _ => Vec::new(),
        };

        ListSnapshot {
            status: state.status.clone(),
            cursor: state.cursor,
            rows,
        }
    }

    pub async fn status(&self) -> ListStatus {
        self.state.read().await.status.clone()
    }

    pub async fn cursor(&self) -> Cursor {
        self.state.read().await.cursor
    }

    /// Initial fetch when the view is first shown.
    pub async fn load(&self) -> Result<FetchOutcome, ViewError> {
        self.refresh().await
    }

    /// Fetch the current page again.
    pub async fn refresh(&self) -> Result<FetchOutcome, ViewError> {
        if self.lifetime.is_cancelled() {
            return Err(ViewError::Api(ApiError::cancelled()));
        }

        let (generation, request, token) = {
            let mut state = self.state.write().await;
            state.generation += 1;
            if let Some(previous) = state.in_flight.take() {
                previous.cancel();
            }
            let token = self.lifetime.child_token();
            state.in_flight = Some(token.clone());
            state.status = ListStatus::Loading;
            state.rows.clear();
            (state.generation, state.cursor.request(), token)
        };

        tracing::debug!(
            generation,
            page = request.page,
            limit = request.limit,
            "Fetching product page"
        );

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(ApiError::cancelled()),
            result = self.api.list_products(request) => result,
        };

        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(
                generation,
                latest = state.generation,
                "Discarding superseded product page"
            );
            return Ok(FetchOutcome::Superseded);
        }
        state.in_flight = None;

        match result {
            Ok(page) => {
                state.cursor.apply_server_totals(page.total, page.limit);
                state.rows = page.data;
                state.status = ListStatus::Loaded;
                let rows = state.rows.len();
                tracing::debug!(generation, rows, total = page.total, "Product page loaded");
                Ok(FetchOutcome::Applied { rows })
            }
            Err(err) => {
                tracing::error!(generation, error = %err, "Failed to fetch product page");
                state.status = ListStatus::Errored(err.clone());
                Err(ViewError::Api(err))
            }
        }
    }

    /// Jump to `page`. Out-of-range pages are rejected before any request is made.
    pub async fn go_to_page(&self, page: u32) -> Result<FetchOutcome, ViewError> {
        {
            let mut state = self.state.write().await;
            if !state.cursor.contains(page) {
                let total_pages = state.cursor.total_pages();
                tracing::warn!(requested = page, total_pages, "Page out of range");
                return Err(ViewError::PageOutOfRange {
                    requested: page,
                    total_pages,
                });
            }
            state.cursor.set_page(page);
        }
        self.refresh().await
    }

    pub async fn next_page(&self) -> Result<FetchOutcome, ViewError> {
        let page = self.state.read().await.cursor.page().saturating_add(1);
        self.go_to_page(page).await
    }

    pub async fn previous_page(&self) -> Result<FetchOutcome, ViewError> {
        let page = self.state.read().await.cursor.page().saturating_sub(1);
        self.go_to_page(page).await
    }

    /// Change the page size; the view returns to page 1.
    pub async fn set_limit(&self, limit: u32) -> Result<FetchOutcome, ViewError> {
        if limit == 0 {
            return Err(ViewError::InvalidLimit);
        }
        self.state.write().await.cursor.set_limit(limit);
        self.refresh().await
    }

    /// Delete a product after the local role gate and a confirmation prompt.
    ///
    /// The role gate is a convenience for the user, not a security boundary: the backend
    /// must reject unauthorized deletes no matter what this client sends.
    pub async fn delete_product(&self, product_id: &ResourceId) -> Result<DeleteOutcome, ViewError> {
        if let Err(denied) = self.check_delete_gate().await? {
            tracing::warn!(%product_id, reason = %denied, "Delete blocked by role gate");
            self.notifier.notify(Notice::error(
                "Not authorized",
                "You are not authorized to delete this product.",
            ));
            return Err(ViewError::NotAuthorized(denied));
        }

        if !self.confirmer.confirm(&Confirmation::delete_product()).await {
            tracing::debug!(%product_id, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        match self.api.delete_product(product_id).await {
            Ok(()) => {
                let (removed, stepped_back) = {
                    let mut state = self.state.write().await;
                    let before = state.rows.len();
                    state.rows.retain(|p| &p.product_id != product_id);
                    let removed = state.rows.len() != before;
                    let mut stepped_back = false;
                    if removed {
                        state.cursor.decrement_total();
                        stepped_back = state.cursor.clamp_page();
                    }
                    (removed, stepped_back)
                };
                tracing::info!(%product_id, removed, "Product deleted");
                self.notifier.notify(Notice::success(
                    "Deleted!",
                    "The product has been deleted.",
                ));

                // The last row of the last page is gone; show the new last page.
                if stepped_back {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!(error = %e, "Could not reload after delete");
                    }
                }
                Ok(DeleteOutcome::Deleted { removed })
            }
            Err(err) => {
                tracing::error!(%product_id, error = %err, "Failed to delete product");
                match err.kind {
                    // Already announced by the client.
                    ApiErrorKind::Unauthorized => {}
                    ApiErrorKind::Transport => self.notifier.notify(Notice::error(
                        "Error",
                        "An error occurred while deleting the product.",
                    )),
                    _ => self
                        .notifier
                        .notify(Notice::error("Error", "Failed to delete product.")),
                }
                Err(ViewError::Api(err))
            }
        }
    }

    /// Cancel every in-flight and future fetch of this view.
    pub fn shutdown(&self) {
        self.lifetime.cancel();
    }

    async fn check_delete_gate(&self) -> Result<Result<(), AccessDenied>, ViewError> {
        let token = self.session.token().await.map_err(ApiError::from)?;
        if token.is_none() {
            return Ok(Err(AccessDenied::MissingToken));
        }
        if !self.session.is_admin().await.map_err(ApiError::from)? {
            return Ok(Err(AccessDenied::NotAdmin));
        }
        Ok(Ok(()))
    }
}

impl Drop for ProductListView {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::PageRequest;
    use crate::test_support::{
        FakeProductApi, MapStore, RecordingNotifier, ScriptedConfirmer, product,
    };

    struct Harness {
        api: Arc<FakeProductApi>,
        store: Arc<MapStore>,
        notifier: Arc<RecordingNotifier>,
        confirmer: Arc<ScriptedConfirmer>,
        view: ProductListView,
    }

    fn harness(total: usize, limit: u32) -> Harness {
        let api = Arc::new(FakeProductApi::with_products(total));
        let store = Arc::new(MapStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let confirmer = Arc::new(ScriptedConfirmer::new(true));
        let view = ProductListView::new(
            api.clone(),
            Session::new(store.clone()),
            notifier.clone(),
            confirmer.clone(),
            limit,
        );
        Harness {
            api,
            store,
            notifier,
            confirmer,
            view,
        }
    }

    async fn login_admin(store: &MapStore) {
        Session::new(Arc::new(store.clone()))
            .login("abc", Some(ADMIN))
            .await
            .unwrap();
    }

    const ADMIN: &str = crate::ports::ADMIN_ROLE;

    #[tokio::test]
    async fn test_starts_idle_on_page_one() {
        let h = harness(5, 10);
        let snap = h.view.snapshot().await;
        assert_eq!(snap.status, ListStatus::Idle);
        assert_eq!(snap.cursor.page(), 1);
        assert!(snap.rows.is_empty());
        assert_eq!(h.api.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_load_projects_rows() {
        let h = harness(3, 10);
        let outcome = h.view.load().await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied { rows: 3 });

        let snap = h.view.snapshot().await;
        assert_eq!(snap.status, ListStatus::Loaded);
        assert_eq!(snap.cursor.total(), 3);
        assert_eq!(snap.rows[0].number, 1);
        assert_eq!(snap.rows[0].category, "Vegetables");
        assert_eq!(snap.rows[1].image, NO_IMAGE_PLACEHOLDER);
        assert_eq!(
            h.api.requests(),
            vec![PageRequest { page: 1, limit: 10 }]
        );
    }

    #[tokio::test]
    async fn test_pages_cover_total_without_exceeding_limit() {
        let h = harness(23, 10);
        h.view.load().await.unwrap();
        let total_pages = h.view.cursor().await.total_pages();
        assert_eq!(total_pages, 3);

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            if page > 1 {
                h.view.go_to_page(page).await.unwrap();
            }
            let snap = h.view.snapshot().await;
            assert!(snap.rows.len() <= 10);
            seen.extend(snap.rows.into_iter().map(|r| r.product_id));
        }

        assert_eq!(seen.len(), 23);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 23);
    }

    #[tokio::test]
    async fn test_out_of_range_navigation_is_local() {
        let h = harness(23, 10);
        h.view.load().await.unwrap();
        let calls = h.api.list_calls();

        let err = h.view.go_to_page(0).await.unwrap_err();
        assert!(matches!(
            err,
            ViewError::PageOutOfRange {
                requested: 0,
                total_pages: 3
            }
        ));
        let err = h.view.go_to_page(4).await.unwrap_err();
        assert!(matches!(err, ViewError::PageOutOfRange { requested: 4, .. }));
        assert!(h.view.previous_page().await.is_err());

        assert_eq!(h.api.list_calls(), calls);
        assert_eq!(h.view.cursor().await.page(), 1);
        assert_eq!(h.view.status().await, ListStatus::Loaded);
    }

    #[tokio::test]
    async fn test_next_and_previous() {
        let h = harness(23, 10);
        h.view.load().await.unwrap();
        h.view.next_page().await.unwrap();
        h.view.next_page().await.unwrap();
        assert_eq!(h.view.cursor().await.page(), 3);
        assert_eq!(h.view.snapshot().await.rows[0].number, 21);

        assert!(h.view.next_page().await.is_err());
        h.view.previous_page().await.unwrap();
        assert_eq!(h.view.cursor().await.page(), 2);
    }

    #[tokio::test]
    async fn test_set_limit_resets_page() {
        let h = harness(23, 10);
        h.view.load().await.unwrap();
        h.view.go_to_page(2).await.unwrap();

        h.view.set_limit(5).await.unwrap();
        let cursor = h.view.cursor().await;
        assert_eq!(cursor.page(), 1);
        assert_eq!(cursor.limit(), 5);
        assert_eq!(cursor.total_pages(), 5);

        assert!(matches!(
            h.view.set_limit(0).await,
            Err(ViewError::InvalidLimit)
        ));
    }

    #[tokio::test]
    async fn test_fetch_error_sets_errored() {
        let h = harness(5, 10);
        h.api.fail_list_with(ApiError::from_status(500, "boom"));

        let err = h.view.load().await.unwrap_err();
        assert_eq!(err.api().map(|e| e.kind), Some(ApiErrorKind::Server));

        let snap = h.view.snapshot().await;
        assert!(matches!(snap.status, ListStatus::Errored(_)));
        assert!(snap.rows.is_empty());
    }

    #[tokio::test]
    async fn test_superseded_response_is_discarded() {
        let h = harness(23, 10);
        h.view.load().await.unwrap();

        // Page 2 answers slowly, page 3 immediately.
        h.api.delay_page(2, Duration::from_millis(200));
        h.view.state.write().await.cursor.set_page(2);

        let (slow, fast) = tokio::join!(h.view.refresh(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            h.view.go_to_page(3).await
        });

        // The slow request is cancelled when the newer fetch starts; either way it must not win.
        assert!(matches!(slow, Ok(FetchOutcome::Superseded)));
        assert!(matches!(fast, Ok(FetchOutcome::Applied { rows: 3 })));

        let snap = h.view.snapshot().await;
        assert_eq!(snap.cursor.page(), 3);
        assert_eq!(snap.rows.len(), 3);
        assert_eq!(snap.rows[0].number, 21);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_fetches() {
        let h = harness(5, 10);
        h.api.delay_page(1, Duration::from_secs(30));

        let (result, ()) = tokio::join!(h.view.load(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            h.view.shutdown();
        });
        let err = result.unwrap_err();
        assert_eq!(err.api().map(|e| e.kind), Some(ApiErrorKind::Cancelled));

        let err = h.view.refresh().await.unwrap_err();
        assert_eq!(err.api().map(|e| e.kind), Some(ApiErrorKind::Cancelled));
    }

    #[tokio::test]
    async fn test_fetch_after_shutdown_never_reaches_backend() {
        let h = harness(5, 10);
        h.view.shutdown();

        for _ in 0..50 {
            let err = h.view.refresh().await.unwrap_err();
            assert_eq!(err.api().map(|e| e.kind), Some(ApiErrorKind::Cancelled));
        }
        assert_eq!(h.api.list_calls(), 0);
        assert_eq!(h.view.status().await, ListStatus::Idle);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let h = harness(5, 10);
        login_admin(&h.store).await;
        h.view.load().await.unwrap();

        let target = ResourceId::from(3);
        let outcome = h.view.delete_product(&target).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted { removed: true });

        let snap = h.view.snapshot().await;
        assert_eq!(snap.rows.len(), 4);
        assert!(snap.rows.iter().all(|r| r.product_id != target));
        assert_eq!(snap.cursor.total(), 4);
        assert_eq!(snap.status, ListStatus::Loaded);
        assert_eq!(h.api.deleted(), vec![target]);
        // No re-fetch after delete.
        assert_eq!(h.api.list_calls(), 1);
        assert_eq!(h.notifier.titles(), vec!["Deleted!".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_state() {
        let h = harness(5, 10);
        login_admin(&h.store).await;
        h.view.load().await.unwrap();
        h.api.fail_delete_with(ApiError::from_status(500, "db down"));

        let before = h.view.snapshot().await;
        let err = h.view.delete_product(&ResourceId::from(3)).await.unwrap_err();
        assert!(matches!(err, ViewError::Api(_)));

        assert_eq!(h.view.snapshot().await, before);
        assert_eq!(h.notifier.texts(), vec!["Failed to delete product.".to_string()]);
    }

    #[tokio::test]
    async fn test_transport_failure_on_delete_has_its_own_message() {
        let h = harness(5, 10);
        login_admin(&h.store).await;
        h.view.load().await.unwrap();
        h.api.fail_delete_with(ApiError::transport("connection reset"));

        assert!(h.view.delete_product(&ResourceId::from(3)).await.is_err());
        assert_eq!(
            h.notifier.texts(),
            vec!["An error occurred while deleting the product.".to_string()]
        );
        assert_eq!(h.view.snapshot().await.rows.len(), 5);
    }

    #[tokio::test]
    async fn test_unauthorized_delete_adds_no_second_notice() {
        let h = harness(5, 10);
        login_admin(&h.store).await;
        h.view.load().await.unwrap();
        h.api.fail_delete_with(ApiError::from_status(401, "expired"));

        assert!(h.view.delete_product(&ResourceId::from(1)).await.is_err());
        assert!(h.notifier.texts().is_empty());
    }

    #[tokio::test]
    async fn test_delete_gate_requires_token() {
        let h = harness(5, 10);
        h.view.load().await.unwrap();
        h.store.insert(crate::ports::ROLE_KEY, ADMIN);

        let err = h.view.delete_product(&ResourceId::from(1)).await.unwrap_err();
        assert!(matches!(
            err,
            ViewError::NotAuthorized(AccessDenied::MissingToken)
        ));
        assert!(h.api.deleted().is_empty());
        assert_eq!(h.confirmer.asked(), 0);
        assert_eq!(
            h.notifier.texts(),
            vec!["You are not authorized to delete this product.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_gate_requires_admin_role() {
        let h = harness(5, 10);
        h.view.load().await.unwrap();
        h.store.insert(crate::ports::TOKEN_KEY, "abc");
        h.store.insert(crate::ports::ROLE_KEY, "customer");

        let err = h.view.delete_product(&ResourceId::from(1)).await.unwrap_err();
        assert!(matches!(err, ViewError::NotAuthorized(AccessDenied::NotAdmin)));
        assert!(h.api.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_declined_confirmation_skips_request() {
        let h = harness(5, 10);
        login_admin(&h.store).await;
        h.view.load().await.unwrap();
        h.confirmer.answer(false);

        let outcome = h.view.delete_product(&ResourceId::from(1)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(h.confirmer.asked(), 1);
        assert!(h.api.deleted().is_empty());
        assert_eq!(h.view.snapshot().await.rows.len(), 5);
    }

    #[tokio::test]
    async fn test_deleting_last_row_of_last_page_steps_back() {
        let h = harness(21, 10);
        login_admin(&h.store).await;
        h.view.load().await.unwrap();
        h.view.go_to_page(3).await.unwrap();

        let outcome = h.view.delete_product(&ResourceId::from(21)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted { removed: true });

        let snap = h.view.snapshot().await;
        assert_eq!(snap.cursor.page(), 2);
        assert_eq!(snap.cursor.total_pages(), 2);
        assert_eq!(snap.rows.len(), 10);
        assert_eq!(snap.rows[0].number, 11);
        assert_eq!(
            h.api.requests().last(),
            Some(&PageRequest { page: 2, limit: 10 })
        );
    }

    #[tokio::test]
    async fn test_delete_of_row_not_on_page() {
        let h = harness(23, 10);
        login_admin(&h.store).await;
        h.view.load().await.unwrap();

        let outcome = h.view.delete_product(&ResourceId::from(22)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted { removed: false });
        assert_eq!(h.view.snapshot().await.rows.len(), 10);
        assert_eq!(h.view.cursor().await.total(), 23);
    }

    #[test]
    fn test_row_projection_uses_first_image() {
        let p = product(7);
        let row = ProductRow::project(12, &p);
        assert_eq!(row.number, 12);
        assert_eq!(row.image, "https://cdn.example/7.png");
        assert_eq!(row.price, "1700");
    }
}
