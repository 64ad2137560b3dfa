use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};

use engine::{CurrencyCode, Engine, EngineError, NewTransaction, Transaction, UserId};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .primary_currency(CurrencyCode::new("USD"))
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

async fn store(
    engine: &Engine,
    user: i64,
    kind: &str,
    amount: Decimal,
    currency: &str,
    created_at: DateTime<Utc>,
) -> Transaction {
    engine
        .new_transaction(NewTransaction {
            user_id: UserId::new(user),
            kind: kind.to_string(),
            amount,
            currency_code: CurrencyCode::new(currency),
            source_transaction_id: None,
            metadata: None,
            created_at,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn new_transaction_round_trips() {
    let (engine, _db) = engine_with_db().await;

    let stored = engine
        .new_transaction(NewTransaction {
            user_id: UserId::new(7),
            kind: "PAYMENT".to_string(),
            amount: dec!(12.34),
            currency_code: CurrencyCode::new("EUR"),
            source_transaction_id: Some(99),
            metadata: Some("{\"merchant\":\"cafe\"}".to_string()),
            created_at: base_time(),
        })
        .await
        .unwrap();

    let loaded = engine.transaction(stored.id).await.unwrap();
    assert_eq!(loaded, stored);
    assert_eq!(loaded.amount, dec!(12.34));
    assert_eq!(loaded.source_transaction_id, Some(99));
}

#[tokio::test]
async fn missing_transaction_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.transaction(42).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn rated_transactions_are_ordered_and_scoped_to_user() {
    let (engine, _db) = engine_with_db().await;
    let t0 = base_time();

    let late = store(&engine, 7, "DEPOSIT", dec!(1), "USD", t0 + Duration::hours(2)).await;
    let early = store(&engine, 7, "DEPOSIT", dec!(2), "USD", t0).await;
    let tie_a = store(&engine, 7, "DEPOSIT", dec!(3), "USD", t0 + Duration::hours(1)).await;
    let tie_b = store(&engine, 7, "DEPOSIT", dec!(4), "USD", t0 + Duration::hours(1)).await;
    store(&engine, 8, "DEPOSIT", dec!(5), "USD", t0).await;

    let rated = engine.rated_transactions(UserId::new(7)).await.unwrap();
    let ids: Vec<i64> = rated.iter().map(|r| r.transaction.id).collect();
    assert_eq!(ids, vec![early.id, tie_a.id, tie_b.id, late.id]);
}

#[tokio::test]
async fn rates_are_joined_by_exact_code() {
    let (engine, _db) = engine_with_db().await;
    engine.set_rate(&CurrencyCode::new("EUR"), dec!(1.1)).await.unwrap();

    store(&engine, 7, "DEPOSIT", dec!(10), "EUR", base_time()).await;
    store(&engine, 7, "DEPOSIT", dec!(10), "eur", base_time()).await;
    store(&engine, 7, "DEPOSIT", dec!(10), "GBP", base_time()).await;

    let rated = engine.rated_transactions(UserId::new(7)).await.unwrap();
    let rates: Vec<Option<Decimal>> = rated.iter().map(|r| r.rate_to_primary).collect();
    assert_eq!(rates, vec![Some(dec!(1.1)), None, None]);
}

#[tokio::test]
async fn set_rate_replaces_previous_value() {
    let (engine, _db) = engine_with_db().await;
    let eur = CurrencyCode::new("EUR");

    engine.set_rate(&eur, dec!(1.1)).await.unwrap();
    engine.set_rate(&eur, dec!(1.08)).await.unwrap();
    engine.set_rate(&CurrencyCode::new("CHF"), dec!(1.13)).await.unwrap();

    let rates = engine.rates().await.unwrap();
    assert_eq!(
        rates,
        vec![
            (CurrencyCode::new("CHF"), dec!(1.13)),
            (CurrencyCode::new("EUR"), dec!(1.08)),
        ]
    );
}

#[tokio::test]
async fn negative_rate_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .set_rate(&CurrencyCode::new("EUR"), dec!(-1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn summary_uses_stored_rates_and_default_currency() {
    let (engine, _db) = engine_with_db().await;
    let t0 = base_time();
    engine.set_rate(&CurrencyCode::new("EUR"), dec!(1.1)).await.unwrap();

    let deposit = store(&engine, 7, "DEPOSIT", dec!(100), "USD", t0).await;
    store(&engine, 7, "DEPOSIT", dec!(200), "EUR", t0 + Duration::minutes(1)).await;
    engine
        .new_transaction(NewTransaction {
            user_id: UserId::new(7),
            kind: "WITHDRAWAL".to_string(),
            amount: dec!(30),
            currency_code: CurrencyCode::new("USD"),
            source_transaction_id: Some(deposit.id),
            metadata: None,
            created_at: t0 + Duration::minutes(2),
        })
        .await
        .unwrap();

    let summary = engine
        .transaction_summary(UserId::new(7), None)
        .await
        .unwrap();
    assert_eq!(summary.primary_currency.as_str(), "USD");
    assert_eq!(summary.final_balance_primary, dec!(290));
    assert_eq!(summary.transactions[2].is_fund_source_valid, Some(true));
    assert_eq!(summary.balances_by_currency.len(), 2);

    let blank = engine
        .transaction_summary(UserId::new(7), Some("  "))
        .await
        .unwrap();
    assert_eq!(blank, summary);
}

#[tokio::test]
async fn summary_in_requested_currency() {
    let (engine, _db) = engine_with_db().await;
    store(&engine, 7, "DEPOSIT", dec!(100), "EUR", base_time()).await;
    store(&engine, 7, "FEE", dec!(5), "USD", base_time()).await;

    let summary = engine
        .transaction_summary(UserId::new(7), Some("eur"))
        .await
        .unwrap();

    assert_eq!(summary.primary_currency.as_str(), "eur");
    // USD has no stored rate, so it is devalued to zero
    assert_eq!(summary.final_balance_primary, dec!(100));
}

#[tokio::test]
async fn summary_of_unknown_user_is_empty() {
    let (engine, _db) = engine_with_db().await;

    let summary = engine
        .transaction_summary(UserId::new(404), None)
        .await
        .unwrap();
    assert!(summary.transactions.is_empty());
    assert!(summary.balances_by_currency.is_empty());
    assert_eq!(summary.final_balance_primary, Decimal::ZERO);
}

#[tokio::test]
async fn audit_entries_newest_first_per_user() {
    let (engine, _db) = engine_with_db().await;

    let first = engine.record_audit("user1", "CREATE").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = engine.record_audit("user1", "UPDATE").await.unwrap();
    engine.record_audit("user2", "DELETE").await.unwrap();

    let entries = engine.audit_entries("user1").await.unwrap();
    let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(entries[0].action, "UPDATE");
    assert!(engine.audit_entries("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn audit_rejects_blank_action() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.record_audit("user1", " ").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}
