#![allow(dead_code)]

//! In-memory fakes standing in for PostgreSQL and Redis so handler tests
//! run hermetically. The listing fake counts store reads, which makes the
//! cache-aside properties observable.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use estate_api::application::services::{
    AccountService, AuthService, ListingService, OutreachService, PaymentService,
};
use estate_api::domain::email_job::EmailJob;
use estate_api::domain::entities::{
    ContactRequest, Favourite, Listing, NewListing, NewUser, RecentlyViewed, Subscriber,
    Transaction, User,
};
use estate_api::domain::listing_filter::{ListingFilter, PriceBound};
use estate_api::domain::repositories::{
    FavouriteRepository, ListingRepository, OutreachRepository, RecentlyViewedRepository,
    TransactionRepository, UserRepository,
};
use estate_api::error::AppError;
use estate_api::infrastructure::cache::{CacheResult, CacheService};
use estate_api::infrastructure::media::{MediaFile, MediaResult, MediaStore};
use estate_api::infrastructure::oauth::NullOAuthProvider;
use estate_api::infrastructure::payment::{
    GatewayOrder, PaymentGateway, service::PaymentResult,
};
use estate_api::state::AppState;

// ─── Cache ───────────────────────────────────────────────────────────────────

/// In-memory cache; entries never expire within a test run.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Drops every entry, simulating TTL expiry.
    pub fn expire_all(&self) {
        self.entries.lock().unwrap().clear();
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        payload: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

// ─── Listings ────────────────────────────────────────────────────────────────

/// In-memory listing store with a read counter.
pub struct MemoryListingRepository {
    listings: Mutex<Vec<Listing>>,
    next_id: AtomicI64,
    /// Number of `find` calls served; cache hits must not advance it.
    pub find_calls: AtomicUsize,
}

impl MemoryListingRepository {
    pub fn new() -> Self {
        Self {
            listings: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            find_calls: AtomicUsize::new(0),
        }
    }

    pub fn seed(&self, new_listing: NewListing) -> Listing {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let listing = materialize(id, new_listing);
        self.listings.lock().unwrap().push(listing.clone());
        listing
    }

    pub fn reads(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

fn materialize(id: i64, new_listing: NewListing) -> Listing {
    Listing {
        id,
        title: new_listing.title,
        price: new_listing.price,
        price_display: new_listing.price_display,
        city: new_listing.city,
        location: new_listing.location,
        address: new_listing.address,
        transaction_type: new_listing.transaction_type,
        property_type: new_listing.property_type,
        bedrooms: new_listing.bedrooms,
        bathrooms: new_listing.bathrooms,
        balconies: new_listing.balconies,
        floor: new_listing.floor,
        furnished: new_listing.furnished,
        facing: new_listing.facing,
        parking: new_listing.parking,
        carpet_area: new_listing.carpet_area,
        carpet_area_unit: new_listing.carpet_area_unit,
        image_urls: new_listing.image_urls,
        thumbnail_urls: new_listing.thumbnail_urls,
        coordinates: new_listing.coordinates,
        amenities: new_listing.amenities,
        nearby_landmarks: new_listing.nearby_landmarks,
        short_description: new_listing.short_description,
        detailed_description: new_listing.detailed_description,
        is_prime_location: new_listing.is_prime_location,
        posted_date: new_listing.posted_date,
        created_at: Utc::now(),
    }
}

fn matches(filter: &ListingFilter, listing: &Listing) -> bool {
    let contains = |field: &Option<String>, needle: &str| {
        field
            .as_deref()
            .map(|v| v.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    };

    if let Some(city) = &filter.city
        && !contains(&listing.city, city)
    {
        return false;
    }

    if let Some(search) = &filter.search {
        let title_hit = listing
            .title
            .to_lowercase()
            .contains(&search.to_lowercase());
        if !(contains(&listing.city, search) || contains(&listing.location, search) || title_hit) {
            return false;
        }
    }

    let exact = |field: &Option<String>, wanted: &Option<String>| match wanted {
        Some(wanted) => field.as_deref() == Some(wanted.as_str()),
        None => true,
    };

    if !exact(&listing.property_type, &filter.property_type)
        || !exact(&listing.transaction_type, &filter.transaction_type)
        || !exact(&listing.bedrooms, &filter.bedrooms)
        || !exact(&listing.bathrooms, &filter.bathrooms)
    {
        return false;
    }

    match filter.min_price_bound() {
        PriceBound::Value(min) if listing.price < min => return false,
        PriceBound::Unparseable => return false,
        _ => {}
    }

    match filter.max_price_bound() {
        PriceBound::Value(max) if listing.price > max => return false,
        PriceBound::Unparseable => return false,
        _ => {}
    }

    true
}

#[async_trait]
impl ListingRepository for MemoryListingRepository {
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);

        let mut rows: Vec<Listing> = self
            .listings
            .lock()
            .unwrap()
            .iter()
            .filter(|listing| matches(filter, listing))
            .cloned()
            .collect();

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(rows
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit() as usize)
            .collect())
    }

    async fn count(&self, filter: &ListingFilter) -> Result<i64, AppError> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .filter(|listing| matches(filter, listing))
            .count() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, AppError> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .find(|listing| listing.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Listing>, AppError> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .filter(|listing| ids.contains(&listing.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, new_listing: NewListing) -> Result<Listing, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let listing = materialize(id, new_listing);
        self.listings.lock().unwrap().push(listing.clone());
        Ok(listing)
    }

    async fn sample(&self, n: i64) -> Result<Vec<Listing>, AppError> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .take(n as usize)
            .cloned()
            .collect())
    }
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// In-memory account store.
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seeds a verified account with a bcrypt-hashed password.
    pub fn seed_with_password(&self, email: &str, password: &str) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            email: email.to_string(),
            password_hash: Some(bcrypt::hash(password, 4).unwrap()),
            google_id: None,
            name: None,
            photo: None,
            refresh_token_hash: None,
            otp: None,
            otp_expires_at: None,
            is_subscribed: false,
            subscription_type: None,
            subscription_date: None,
            payment_id: None,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn get_by_email(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.get_by_email(email))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        if self.get_by_email(&new_user.email).is_some() {
            return Err(AppError::conflict(
                "Unique constraint violation",
                serde_json::json!({ "constraint": "users_email_key" }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            google_id: new_user.google_id,
            name: new_user.name,
            photo: new_user.photo,
            refresh_token_hash: None,
            otp: new_user.otp,
            otp_expires_at: new_user.otp_expires_at,
            is_subscribed: false,
            subscription_type: None,
            subscription_date: None,
            payment_id: None,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn set_otp(
        &self,
        id: i64,
        otp: &str,
        expires_at: chrono::DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.otp = Some(otp.to_string());
            user.otp_expires_at = Some(expires_at);
        }
        Ok(())
    }

    async fn clear_otp(&self, id: i64) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.otp = None;
            user.otp_expires_at = None;
        }
        Ok(())
    }

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.password_hash = Some(password_hash.to_string());
        }
        Ok(())
    }

    async fn set_refresh_token_hash<'a>(
        &self,
        id: i64,
        refresh_token_hash: Option<&'a str>,
    ) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.refresh_token_hash = refresh_token_hash.map(|h| h.to_string());
        }
        Ok(())
    }

    async fn attach_google_identity<'a>(
        &self,
        id: i64,
        google_id: &str,
        name: Option<&'a str>,
        photo: Option<&'a str>,
    ) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.google_id = Some(google_id.to_string());
            if name.is_some() {
                user.name = name.map(|n| n.to_string());
            }
            if photo.is_some() {
                user.photo = photo.map(|p| p.to_string());
            }
        }
        Ok(())
    }

    async fn mark_subscribed<'a>(
        &self,
        email: &str,
        payment_id: &str,
        subscription_type: Option<&'a str>,
        subscription_date: chrono::DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|user| user.email == email) {
            Some(user) => {
                user.payment_id = Some(payment_id.to_string());
                user.is_subscribed = true;
                user.subscription_type = subscription_type.map(|s| s.to_string());
                user.subscription_date = Some(subscription_date);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

// ─── Favourites / recently viewed ────────────────────────────────────────────

/// In-memory favourite sets.
pub struct MemoryFavouriteRepository {
    sets: Mutex<HashMap<i64, Vec<i64>>>,
}

impl MemoryFavouriteRepository {
    pub fn new() -> Self {
        Self {
            sets: Mutex::new(HashMap::new()),
        }
    }

    pub fn ids_for(&self, user_id: i64) -> Vec<i64> {
        self.sets
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl FavouriteRepository for MemoryFavouriteRepository {
    async fn find_by_owner(&self, user_id: i64) -> Result<Option<Favourite>, AppError> {
        Ok(self.sets.lock().unwrap().get(&user_id).map(|listing_ids| {
            Favourite {
                user_id,
                listing_ids: listing_ids.clone(),
            }
        }))
    }

    async fn insert(&self, user_id: i64, listing_ids: Vec<i64>) -> Result<Favourite, AppError> {
        self.sets.lock().unwrap().insert(user_id, listing_ids.clone());
        Ok(Favourite {
            user_id,
            listing_ids,
        })
    }

    async fn set_listing_ids(&self, user_id: i64, listing_ids: Vec<i64>) -> Result<(), AppError> {
        self.sets.lock().unwrap().insert(user_id, listing_ids);
        Ok(())
    }
}

/// In-memory recently-viewed sets.
pub struct MemoryRecentlyViewedRepository {
    sets: Mutex<HashMap<i64, Vec<i64>>>,
}

impl MemoryRecentlyViewedRepository {
    pub fn new() -> Self {
        Self {
            sets: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RecentlyViewedRepository for MemoryRecentlyViewedRepository {
    async fn find_by_owner(&self, user_id: i64) -> Result<Option<RecentlyViewed>, AppError> {
        Ok(self.sets.lock().unwrap().get(&user_id).map(|listing_ids| {
            RecentlyViewed {
                user_id,
                listing_ids: listing_ids.clone(),
            }
        }))
    }

    async fn add(&self, user_id: i64, listing_id: i64) -> Result<(), AppError> {
        let mut sets = self.sets.lock().unwrap();
        let listing_ids = sets.entry(user_id).or_default();
        if !listing_ids.contains(&listing_id) {
            listing_ids.push(listing_id);
        }
        Ok(())
    }
}

// ─── Transactions / outreach ─────────────────────────────────────────────────

/// In-memory transaction history.
pub struct MemoryTransactionRepository {
    transactions: Mutex<Vec<Transaction>>,
}

impl MemoryTransactionRepository {
    pub fn new() -> Self {
        Self {
            transactions: Mutex::new(Vec::new()),
        }
    }

    pub fn seed(&self, user_id: i64, location: &str, kind: &str, price: &str, area: i64) {
        let mut transactions = self.transactions.lock().unwrap();
        let id = transactions.len() as i64 + 1;
        transactions.push(Transaction {
            id,
            user_id,
            transaction_date: Utc::now(),
            location: location.to_string(),
            kind: kind.to_string(),
            price: price.to_string(),
            area,
        });
    }
}

#[async_trait]
impl TransactionRepository for MemoryTransactionRepository {
    async fn find_by_owner(&self, user_id: i64) -> Result<Vec<Transaction>, AppError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|transaction| transaction.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// In-memory outreach records.
pub struct MemoryOutreachRepository {
    subscribers: Mutex<Vec<Subscriber>>,
    contacts: Mutex<Vec<ContactRequest>>,
}

impl MemoryOutreachRepository {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            contacts: Mutex::new(Vec::new()),
        }
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }
}

#[async_trait]
impl OutreachRepository for MemoryOutreachRepository {
    async fn find_subscriber(&self, email: &str) -> Result<Option<Subscriber>, AppError> {
        Ok(self
            .subscribers
            .lock()
            .unwrap()
            .iter()
            .find(|subscriber| subscriber.email == email)
            .cloned())
    }

    async fn insert_subscriber(&self, email: &str) -> Result<Subscriber, AppError> {
        let mut subscribers = self.subscribers.lock().unwrap();
        let subscriber = Subscriber {
            id: subscribers.len() as i64 + 1,
            email: email.to_string(),
            created_at: Utc::now(),
        };
        subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    async fn insert_contact(
        &self,
        name: &str,
        email: &str,
        requested_date: chrono::DateTime<Utc>,
    ) -> Result<ContactRequest, AppError> {
        let mut contacts = self.contacts.lock().unwrap();
        let contact = ContactRequest {
            id: contacts.len() as i64 + 1,
            name: name.to_string(),
            email: email.to_string(),
            requested_date,
            created_at: Utc::now(),
        };
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn count_subscribers(&self) -> Result<i64, AppError> {
        Ok(self.subscribers.lock().unwrap().len() as i64)
    }
}

// ─── Collaborator stubs ──────────────────────────────────────────────────────

/// Media store returning deterministic CDN URLs.
pub struct StubMediaStore;

#[async_trait]
impl MediaStore for StubMediaStore {
    async fn upload(&self, file: MediaFile) -> MediaResult<String> {
        Ok(format!("https://cdn.test/{}", file.filename))
    }
}

/// Payment gateway returning a fixed order id.
pub struct StubPaymentGateway;

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        _receipt: &str,
    ) -> PaymentResult<GatewayOrder> {
        Ok(GatewayOrder {
            id: "order_test_1".to_string(),
            amount,
            currency: currency.to_string(),
        })
    }
}

// ─── State assembly ──────────────────────────────────────────────────────────

/// Everything a handler test needs: the assembled state plus handles on
/// the fakes for seeding and assertions.
pub struct TestContext {
    pub state: AppState,
    pub listings: Arc<MemoryListingRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub favourites: Arc<MemoryFavouriteRepository>,
    pub transactions: Arc<MemoryTransactionRepository>,
    pub outreach: Arc<MemoryOutreachRepository>,
    pub cache: Arc<MemoryCache>,
    pub mail_rx: mpsc::Receiver<EmailJob>,
}

/// Builds an [`AppState`] over in-memory fakes.
pub fn create_test_state() -> TestContext {
    let listings = Arc::new(MemoryListingRepository::new());
    let users = Arc::new(MemoryUserRepository::new());
    let favourites = Arc::new(MemoryFavouriteRepository::new());
    let recents = Arc::new(MemoryRecentlyViewedRepository::new());
    let transactions = Arc::new(MemoryTransactionRepository::new());
    let outreach = Arc::new(MemoryOutreachRepository::new());
    let cache = Arc::new(MemoryCache::new());

    let (mail_tx, mail_rx) = mpsc::channel(100);

    let listing_service = Arc::new(ListingService::new(
        listings.clone(),
        cache.clone(),
        Arc::new(StubMediaStore),
        300,
    ));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        Arc::new(NullOAuthProvider),
        mail_tx.clone(),
        "test-jwt-secret".to_string(),
        "test-signing-secret".to_string(),
        900,
        86_400,
        600,
    ));
    let account_service = Arc::new(AccountService::new(
        favourites.clone(),
        recents.clone(),
        transactions.clone(),
        users.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        Arc::new(StubPaymentGateway),
        users.clone(),
    ));
    let outreach_service = Arc::new(OutreachService::new(
        outreach.clone(),
        mail_tx.clone(),
        Some("admin@example.com".to_string()),
    ));

    let state = AppState {
        listing_service,
        auth_service,
        account_service,
        payment_service,
        outreach_service,
        cache: cache.clone(),
        mail_sender: mail_tx,
    };

    TestContext {
        state,
        listings,
        users,
        favourites,
        transactions,
        outreach,
        cache,
        mail_rx,
    }
}

/// A minimal listing input; override fields as needed.
pub fn new_listing(title: &str, price: i64, property_type: &str, city: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        price,
        price_display: format!("{}", price),
        city: Some(city.to_string()),
        location: None,
        address: None,
        transaction_type: Some("Sell".to_string()),
        property_type: Some(property_type.to_string()),
        bedrooms: Some("2".to_string()),
        bathrooms: Some("2".to_string()),
        balconies: None,
        floor: None,
        furnished: None,
        facing: None,
        parking: None,
        carpet_area: None,
        carpet_area_unit: None,
        image_urls: vec![],
        thumbnail_urls: vec![],
        coordinates: None,
        amenities: None,
        nearby_landmarks: vec![],
        short_description: None,
        detailed_description: None,
        is_prime_location: false,
        posted_date: Utc::now(),
    }
}

/// Logs a seeded user in through the service and returns a Bearer token.
pub async fn access_token_for(context: &TestContext, email: &str, password: &str) -> String {
    context
        .state
        .auth_service
        .login(email, password)
        .await
        .unwrap()
        .access_token
}
