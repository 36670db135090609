//! End-to-end purchases with every store running.

use fraserpay::access::AccessScope;
use fraserpay::ledger_actor::LedgerError;
use fraserpay::lifecycle::{Config, FraserPaySystem};
use fraserpay::model::{Booth, BoothCreate, ProductCreate, TransactionId, UserCreate, UserId};
use fraserpay::purchase::{Checkout, PurchaseError, Terminal};
use fraserpay::store::RecordClient;

async fn setup() -> (FraserPaySystem, Booth, UserId, UserId) {
    let system = FraserPaySystem::start(Config::default());
    let booth_id = system
        .booths
        .create_booth(
            BoothCreate::new("Snacks", "Chips and pop", "111111")
                .with_product(ProductCreate::new("Chips", 150))
                .with_product(ProductCreate::new("Pop", 225)),
        )
        .await
        .expect("Failed to create booth");
    let booth = system.booths.get(booth_id).await.unwrap().expect("Booth not found");

    let buyer = system
        .users
        .create_user(UserCreate::student("100", "Ann", "ann@example.com").with_balance(1000))
        .await
        .expect("Failed to create buyer");
    let staff = system
        .users
        .create_user(UserCreate::student("200", "Bob", "bob@example.com"))
        .await
        .expect("Failed to create staff");
    system
        .access()
        .verify_access("111111", &staff, AccessScope::BoothJoin)
        .await
        .expect("Failed to join booth");

    (system, booth, buyer, staff)
}

async fn booth_sales(system: &FraserPaySystem, booth: &Booth) -> u64 {
    system.booths.get(booth.id.clone()).await.unwrap().unwrap().sales_total
}

async fn balance(system: &FraserPaySystem, user: &UserId) -> u64 {
    system.users.get(user.clone()).await.unwrap().unwrap().balance
}

#[tokio::test]
async fn test_terminal_purchase_updates_both_sides() {
    let (system, booth, buyer, staff) = setup().await;
    let mut terminal = Terminal::new(system.purchases(), staff, "Bob");
    terminal.select_booth(booth.clone());
    terminal.lookup_student("100").await.unwrap();
    terminal.add_product(&booth.products[0].id).unwrap();
    terminal.add_product(&booth.products[0].id).unwrap();
    terminal.add_product(&booth.products[1].id).unwrap();

    let outcome = terminal.submit().await.unwrap();
    assert_eq!(outcome.total, 2 * 150 + 225);
    assert_eq!(outcome.buyer_balance, Some(1000 - 525));
    assert!(terminal.cart().is_empty());
    assert_eq!(terminal.student().unwrap().balance, 475);

    assert_eq!(balance(&system, &buyer).await, 475);
    assert_eq!(booth_sales(&system, &booth).await, 525);

    let history = system.ledger.history_for_booth(booth.id.clone()).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, outcome.transaction_id);
    assert_eq!(history[0].actor_name, "Bob");

    drop(terminal);
    system.shutdown().await;
}

#[tokio::test]
async fn test_two_checkouts_with_same_cart_charge_twice() {
    let (system, booth, buyer, staff) = setup().await;
    let mut terminal = Terminal::new(system.purchases(), staff, "Bob");
    terminal.select_booth(booth.clone());

    for _ in 0..2 {
        terminal.lookup_student("100").await.unwrap();
        terminal.add_product(&booth.products[0].id).unwrap();
        let outcome = terminal.submit().await.unwrap();
        assert!(!outcome.replayed);
    }

    assert_eq!(balance(&system, &buyer).await, 700);
    assert_eq!(system.ledger.history_for_buyer(buyer).await.unwrap().len(), 2);

    drop(terminal);
    system.shutdown().await;
}

#[tokio::test]
async fn test_resubmitting_one_checkout_charges_once() {
    let (system, booth, buyer, staff) = setup().await;
    let orchestrator = system.purchases();
    let student = orchestrator.find_student("100").await.unwrap();

    let mut cart = fraserpay::purchase::Cart::new();
    cart.add(booth.products[1].clone());
    let checkout = Checkout {
        request_id: TransactionId::generate(),
        booth_id: booth.id.clone(),
        booth_name: booth.name.clone(),
        buyer: student,
        actor_id: staff,
        actor_name: "Bob".into(),
        items: cart.items().to_vec(),
    };

    let first = orchestrator.process_purchase(checkout.clone()).await.unwrap();
    let second = orchestrator.process_purchase(checkout).await.unwrap();
    assert!(!first.replayed);
    assert!(second.replayed);
    assert_eq!(first.transaction_id, second.transaction_id);
    assert_eq!(balance(&system, &buyer).await, 775);
    assert_eq!(booth_sales(&system, &booth).await, 225);

    drop(orchestrator);
    system.shutdown().await;
}

#[tokio::test]
async fn test_stale_balance_is_caught_by_the_ledger() {
    let (system, booth, buyer, staff) = setup().await;
    let orchestrator = system.purchases();
    let student = orchestrator.find_student("100").await.unwrap();
    // Balance spent elsewhere since the lookup
    system.users.debit(buyer.clone(), 900).await.unwrap();

    let mut cart = fraserpay::purchase::Cart::new();
    cart.add(booth.products[1].clone());
    let result = orchestrator
        .process_purchase(Checkout {
            request_id: TransactionId::generate(),
            booth_id: booth.id.clone(),
            booth_name: booth.name.clone(),
            buyer: student,
            actor_id: staff,
            actor_name: "Bob".into(),
            items: cart.items().to_vec(),
        })
        .await;

    assert!(matches!(
        result,
        Err(PurchaseError::RemoteFailure(LedgerError::InsufficientBalance {
            requested: 225,
            available: 100
        }))
    ));
    assert_eq!(balance(&system, &buyer).await, 100);
    assert_eq!(booth_sales(&system, &booth).await, 0);

    drop(orchestrator);
    system.shutdown().await;
}

#[tokio::test]
async fn test_local_balance_check_keeps_cart() {
    let (system, booth, _buyer, staff) = setup().await;
    let mut terminal = Terminal::new(system.purchases(), staff, "Bob");
    terminal.select_booth(booth.clone());
    terminal.lookup_student("100").await.unwrap();
    terminal.add_product(&booth.products[1].id).unwrap();
    terminal.set_quantity(&booth.products[1].id, 5);

    let result = terminal.submit().await;
    assert_eq!(
        result,
        Err(PurchaseError::InsufficientBalance {
            total: 1125,
            balance: 1000
        })
    );
    assert_eq!(terminal.cart().item_count(), 5);

    terminal.reset();
    assert!(terminal.student().is_none());
    assert!(terminal.cart().is_empty());

    drop(terminal);
    system.shutdown().await;
}

#[tokio::test]
async fn test_unknown_student_and_unlisted_product() {
    let (system, booth, _buyer, staff) = setup().await;
    let mut terminal = Terminal::new(system.purchases(), staff, "Bob");

    assert_eq!(
        terminal.add_product(&booth.products[0].id),
        Err(PurchaseError::BoothNotFound)
    );
    terminal.select_booth(booth);
    assert!(matches!(
        terminal.lookup_student("999").await,
        Err(PurchaseError::StudentNotFound(_))
    ));
    assert!(matches!(
        terminal.add_product(&"nope".into()),
        Err(PurchaseError::UnknownProduct(_))
    ));

    drop(terminal);
    system.shutdown().await;
}


#[tokio::test]
async fn test_failed_lookup_deselects_previous_student() {
    let (system, booth, buyer, staff) = setup().await;
    let mut terminal = Terminal::new(system.purchases(), staff, "Bob");
    terminal.select_booth(booth.clone());

    terminal.lookup_student("100").await.unwrap();
    assert!(matches!(
        terminal.lookup_student("999").await,
        Err(PurchaseError::StudentNotFound(_))
    ));
    assert!(terminal.student().is_none());

    terminal.add_product(&booth.products[0].id).unwrap();
    assert!(matches!(terminal.submit().await, Err(PurchaseError::NoStudentSelected)));
    assert_eq!(terminal.cart().item_count(), 1);

    assert_eq!(balance(&system, &buyer).await, 1000);
    assert_eq!(booth_sales(&system, &booth).await, 0);
    assert!(system.ledger.history_for_buyer(buyer.clone()).await.unwrap().is_empty());

    drop(terminal);
    system.shutdown().await;
}
