use std::fs;

use anyhow::Result;
use tally::application::{AppError, LedgerService};
use tally::domain::{Kind, Summary, TransactionFilter};
use tally::storage::LoadStatus;

mod common;
use common::{data_file, test_service, StandardLedger};

#[test]
fn test_salary_and_groceries_walkthrough() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    let salary = service.add(Kind::Income, "Salary", 100000, "March pay")?;
    assert_eq!(salary.id, 1);
    assert_eq!(service.balance()?, 100000);

    let groceries = service.add(Kind::Expense, "Groceries", 4550, "Weekly shop")?;
    assert_eq!(groceries.id, 2);
    assert_eq!(service.balance()?, 95450);

    service.delete(1)?;
    assert_eq!(service.balance()?, -4550);
    assert_eq!(
        service.summary()?,
        Summary {
            income: 0,
            expense: 4550
        }
    );

    Ok(())
}

#[test]
fn test_ids_strictly_increase() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    let mut previous = 0;
    for i in 1..=20 {
        let kind = if i % 3 == 0 { Kind::Income } else { Kind::Expense };
        let tx = service.add(kind, "Misc", i * 37, format!("entry {}", i))?;
        assert!(tx.id > previous, "id {} not after {}", tx.id, previous);
        previous = tx.id;
    }

    let mut ids: Vec<_> = service.transactions().iter().map(|t| t.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 20);

    Ok(())
}

#[test]
fn test_balance_equals_summary_net_through_mutations() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    StandardLedger::populate(&mut service)?;

    let check = |service: &LedgerService| {
        let summary = service.summary().unwrap();
        assert_eq!(service.balance().unwrap(), summary.income - summary.expense);
    };

    check(&service);
    service.delete(2)?;
    check(&service);
    service.add(Kind::Expense, "Dining", 1999, "Pizza")?;
    check(&service);
    service.delete(1)?;
    check(&service);

    let summary = service.summary()?;
    assert_eq!(summary.income, 25000);
    assert_eq!(summary.expense, 61999);

    Ok(())
}

#[test]
fn test_delete_missing_id_changes_nothing() -> Result<()> {
    let (mut service, temp) = test_service()?;
    StandardLedger::populate(&mut service)?;
    let before = service.transactions().to_vec();
    let on_disk = fs::read_to_string(data_file(&temp))?;

    let err = service.delete(99).unwrap_err();

    assert!(matches!(err, AppError::TransactionNotFound(99)));
    assert_eq!(service.transactions(), before.as_slice());
    assert_eq!(service.next_id(), 5);
    assert_eq!(fs::read_to_string(data_file(&temp))?, on_disk);

    Ok(())
}

#[test]
fn test_every_mutation_is_persisted() -> Result<()> {
    let (mut service, temp) = test_service()?;
    StandardLedger::populate(&mut service)?;
    service.delete(3)?;

    let (reloaded, status) = LedgerService::load(data_file(&temp));

    assert!(matches!(status, LoadStatus::Loaded { count: 3 }));
    assert_eq!(reloaded.transactions(), service.transactions());
    assert_eq!(reloaded.next_id(), 5);
    assert_eq!(reloaded.balance()?, service.balance()?);

    Ok(())
}

#[test]
fn test_next_id_after_reload_is_max_plus_one() -> Result<()> {
    let (mut service, temp) = test_service()?;
    StandardLedger::populate(&mut service)?;
    service.delete(1)?;
    service.delete(2)?;

    let (reloaded, _) = LedgerService::load(data_file(&temp));
    assert_eq!(reloaded.next_id(), 5);

    Ok(())
}

#[test]
fn test_corrupt_data_file_starts_empty() -> Result<()> {
    let (_, temp) = test_service()?;
    fs::write(data_file(&temp), "this is not json")?;

    let (mut service, status) = LedgerService::load(data_file(&temp));

    assert!(matches!(status, LoadStatus::Recovered(AppError::Decode { .. })));
    assert!(service.transactions().is_empty());
    assert_eq!(service.next_id(), 1);

    // The next save replaces the unreadable file.
    service.add(Kind::Income, "Salary", 100, "")?;
    let (reloaded, status) = LedgerService::load(data_file(&temp));
    assert!(matches!(status, LoadStatus::Loaded { count: 1 }));
    assert_eq!(reloaded.transactions().len(), 1);

    Ok(())
}

#[test]
fn test_wrong_shape_data_file_starts_empty() -> Result<()> {
    let (_, temp) = test_service()?;
    fs::write(data_file(&temp), r#"{"transactions": []}"#)?;

    let (service, status) = LedgerService::load(data_file(&temp));

    assert!(matches!(
        status,
        LoadStatus::Recovered(AppError::InvalidLedgerFile { .. })
    ));
    assert!(service.transactions().is_empty());

    Ok(())
}

#[test]
fn test_filter_views() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    StandardLedger::populate(&mut service)?;
    service.add(Kind::Expense, "GROCERIES", 1200, "Snacks")?;

    let all = service.filter(&TransactionFilter::All);
    assert_eq!(all.len(), 5);

    let income = service.filter(&TransactionFilter::Kind(Kind::Income));
    let income_ids: Vec<_> = income.iter().map(|t| t.id).collect();
    assert_eq!(income_ids, vec![1, 4]);

    let groceries = service.filter(&TransactionFilter::Category("groceries".into()));
    let grocery_ids: Vec<_> = groceries.iter().map(|t| t.id).collect();
    assert_eq!(grocery_ids, vec![2, 5]);
    assert_eq!(groceries[1].category, "GROCERIES");

    assert!(service
        .filter(&TransactionFilter::Category("travel".into()))
        .is_empty());

    Ok(())
}

#[test]
fn test_data_file_uses_documented_layout() -> Result<()> {
    let (mut service, temp) = test_service()?;
    service.add(Kind::Expense, "Groceries", 4550, "Weekly shop")?;

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(data_file(&temp))?)?;
    let record = &raw[0];

    assert_eq!(record["id"], 1);
    assert_eq!(record["kind"], "expense");
    assert_eq!(record["category"], "Groceries");
    assert_eq!(record["amount"], 45.5);
    assert_eq!(record["description"], "Weekly shop");
    assert_eq!(record["timestamp"].as_str().map(str::len), Some(19));

    Ok(())
}
