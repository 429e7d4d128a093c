//! In-process fakes for the ports, shared by the view tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    Category, Comment, LikeState, PageRequest, Post, Price, Product, ProductImage, ProductPage,
    ResourceId,
};
use crate::error::ApiError;
use crate::ports::{
    Confirmation, Confirmer, ForumApi, Notice, Notifier, ProductApi, SessionError, SessionStore,
};

#[derive(Clone, Default)]
pub struct MapStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MapStore {
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl SessionStore for MapStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.title).collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.text).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub struct ScriptedConfirmer {
    answer: AtomicBool,
    asked: AtomicUsize,
}

impl ScriptedConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer: AtomicBool::new(answer),
            asked: AtomicUsize::new(0),
        }
    }

    pub fn answer(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, _request: &Confirmation) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer.load(Ordering::SeqCst)
    }
}

/// Product `id`: odd ids carry an image, every product is a vegetable.
pub fn product(id: u64) -> Product {
    Product {
        product_id: ResourceId::from(id),
        name: format!("Product {id}"),
        category: Some(Category {
            name: "Vegetables".to_string(),
        }),
        description: format!("Description {id}"),
        price: Price::new((1000 + id * 100).to_string()),
        quantity: id as i64,
        images: if id % 2 == 1 {
            vec![ProductImage {
                image_url: format!("https://cdn.example/{id}.png"),
            }]
        } else {
            Vec::new()
        },
    }
}

/// Product backend over a fixed in-memory collection.
#[derive(Default)]
pub struct FakeProductApi {
    products: Mutex<Vec<Product>>,
    requests: Mutex<Vec<PageRequest>>,
    deleted: Mutex<Vec<ResourceId>>,
    delays: Mutex<HashMap<u32, Duration>>,
    list_error: Mutex<Option<ApiError>>,
    delete_error: Mutex<Option<ApiError>>,
}

impl FakeProductApi {
    pub fn with_products(count: usize) -> Self {
        let api = Self::default();
        *api.products.lock().unwrap() = (1..=count as u64).map(product).collect();
        api
    }

    pub fn delay_page(&self, page: u32, delay: Duration) {
        self.delays.lock().unwrap().insert(page, delay);
    }

    pub fn fail_list_with(&self, err: ApiError) {
        *self.list_error.lock().unwrap() = Some(err);
    }

    pub fn fail_delete_with(&self, err: ApiError) {
        *self.delete_error.lock().unwrap() = Some(err);
    }

    pub fn list_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<ResourceId> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductApi for FakeProductApi {
    async fn list_products(&self, request: PageRequest) -> Result<ProductPage, ApiError> {
        self.requests.lock().unwrap().push(request);
        let delay = self.delays.lock().unwrap().get(&request.page).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }

        let products = self.products.lock().unwrap();
        let start = (request.page as usize - 1) * request.limit as usize;
        let data = products
            .iter()
            .skip(start)
            .take(request.limit as usize)
            .cloned()
            .collect();
        Ok(ProductPage {
            data,
            total: products.len() as u64,
            limit: None,
            page: Some(request.page),
        })
    }

    async fn delete_product(&self, product_id: &ResourceId) -> Result<(), ApiError> {
        if let Some(err) = self.delete_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.products
            .lock()
            .unwrap()
            .retain(|p| &p.product_id != product_id);
        self.deleted.lock().unwrap().push(product_id.clone());
        Ok(())
    }
}

pub fn post(id: u64, likes: u64) -> Post {
    Post {
        id: ResourceId::from(id),
        title: format!("Post {id}"),
        content: format!("Content {id}"),
        like_count: likes,
        created_at: None,
    }
}

/// Forum backend keeping posts and comments in memory.
#[derive(Default)]
pub struct FakeForumApi {
    posts: Mutex<Vec<Post>>,
    comments: Mutex<HashMap<ResourceId, Vec<Comment>>>,
    likes: Mutex<Vec<ResourceId>>,
    report_like_count: AtomicBool,
    calls: AtomicUsize,
    error: Mutex<Option<ApiError>>,
}

impl FakeForumApi {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let api = Self::default();
        *api.posts.lock().unwrap() = posts;
        api
    }

    /// Make like responses carry the new count.
    pub fn report_like_count(&self, report: bool) {
        self.report_like_count.store(report, Ordering::SeqCst);
    }

    pub fn fail_with(&self, err: ApiError) {
        *self.error.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn likes(&self) -> Vec<ResourceId> {
        self.likes.lock().unwrap().clone()
    }

    fn begin(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ForumApi for FakeForumApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.begin()?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ApiError> {
        self.begin()?;
        let mut posts = self.posts.lock().unwrap();
        let post = Post {
            id: ResourceId::from(posts.len() as u64 + 100),
            title: title.to_string(),
            content: content.to_string(),
            like_count: 0,
            created_at: None,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn like_post(&self, post_id: &ResourceId) -> Result<LikeState, ApiError> {
        self.begin()?;
        self.likes.lock().unwrap().push(post_id.clone());
        let mut posts = self.posts.lock().unwrap();
        let post = posts.iter_mut().find(|p| &p.id == post_id);
        let count = post.map(|p| {
            p.like_count += 1;
            p.like_count
        });
        if self.report_like_count.load(Ordering::SeqCst) {
            Ok(LikeState {
                liked: Some(true),
                like_count: count,
                message: None,
            })
        } else {
            Ok(LikeState::default())
        }
    }

    async fn add_comment(&self, post_id: &ResourceId, content: &str) -> Result<Comment, ApiError> {
        self.begin()?;
        let comment = Comment {
            id: None,
            post_id: Some(post_id.clone()),
            content: content.to_string(),
            created_at: None,
        };
        self.comments
            .lock()
            .unwrap()
            .entry(post_id.clone())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, post_id: &ResourceId) -> Result<Vec<Comment>, ApiError> {
        self.begin()?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(post_id)
            .cloned()
            .unwrap_or_default())
    }
}
