//! # Mock Store
//!
//! `MockStore<T>` hands out a real [`StoreClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running
//! [`StoreActor`](super::StoreActor). Services that take store clients
//! (access verification, purchases, registration) can then be tested
//! against exact replies, including failures that are awkward to provoke
//! with a real store, such as a write that fails with
//! [`StoreError::Unavailable`] halfway through a flow.
//!
//! ```rust
//! use fraserpay::model::{Role, User, UserCreate, UserId};
//! use fraserpay::store::mock::MockStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut users = MockStore::<User>::new();
//! let id = UserId::from("u1");
//! let user = User::from_parts(id.clone(), UserCreate::student("123", "Ann", "ann@x.org"));
//! users.expect_get(id.clone()).return_ok(Some(user));
//!
//! let client = users.client();
//! let fetched = client.get(id).await.unwrap().unwrap();
//! assert_eq!(fetched.role, Role::Student);
//! users.verify();
//! # }
//! ```
//!
//! Expectations are consumed in order. A request that does not match the
//! next expectation (wrong kind or wrong id) gets no reply, so the caller
//! sees [`StoreError::Dropped`], and [`MockStore::verify`] reports it.

use super::{Record, StoreClient, StoreError, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

enum Expectation<T: Record> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Find {
        response: Result<Vec<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A store double with an ordered expectation queue.
pub struct MockStore<T: Record> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    failures: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_id<I: PartialEq + std::fmt::Debug>(expected: &I, got: &I, failures: &Mutex<Vec<String>>) -> bool {
    if expected == got {
        return true;
    }
    failures
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(format!("expected id {expected:?}, got {got:?}"));
    false
}

impl<T: Record> MockStore<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let seen_failures = failures.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();

                match (request, next) {
                    (StoreRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        if check_id(&want, &id, &seen_failures) {
                            let _ = respond_to.send(response);
                        }
                    }
                    (StoreRequest::Find { respond_to, .. }, Some(Expectation::Find { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        if check_id(&want, &id, &seen_failures) {
                            let _ = respond_to.send(response);
                        }
                    }
                    (StoreRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        if check_id(&want, &id, &seen_failures) {
                            let _ = respond_to.send(response);
                        }
                    }
                    (
                        StoreRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        if check_id(&want, &id, &seen_failures) {
                            let _ = respond_to.send(response);
                        }
                    }
                    (request, _) => {
                        seen_failures
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(format!("unexpected request {request:?}"));
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            failures,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(expectation);
    }

    pub fn expect_get(&mut self, id: T::Id) -> Reply<'_, T, Option<T>> {
        Reply::new(self, move |response| Expectation::Get { id, response })
    }

    pub fn expect_find(&mut self) -> Reply<'_, T, Vec<T>> {
        Reply::new(self, |response| Expectation::Find { response })
    }

    pub fn expect_create(&mut self) -> Reply<'_, T, T::Id> {
        Reply::new(self, |response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> Reply<'_, T, T> {
        Reply::new(self, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Reply<'_, T, ()> {
        Reply::new(self, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Reply<'_, T, T::ActionResult> {
        Reply::new(self, move |response| Expectation::Action { id, response })
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        if !failures.is_empty() {
            panic!("Mock store saw mismatched requests: {failures:?}");
        }
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder returned by the `expect_*` methods; choose the reply.
pub struct Reply<'a, T: Record, R> {
    mock: &'a MockStore<T>,
    build: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + 'a>,
}

impl<'a, T: Record, R> Reply<'a, T, R> {
    fn new(mock: &'a MockStore<T>, build: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + 'a) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Answer with a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Answer with an error.
    pub fn return_err(self, error: StoreError) {
        self.mock.push((self.build)(Err(error)));
    }
}
