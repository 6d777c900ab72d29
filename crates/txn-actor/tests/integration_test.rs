use std::collections::HashMap;
use std::time::Duration;
use txn_actor::{Database, DatabaseActor, DatabaseClient, TxError};

// --- Test Database ---

/// Account balances keyed by name.
#[derive(Default)]
struct Ledger {
    balances: HashMap<String, i64>,
}

#[derive(Debug)]
enum LedgerStatement {
    Set(&'static str, i64),
    /// Moves funds, failing after the debit if the target does not exist.
    Transfer {
        from: &'static str,
        to: &'static str,
        amount: i64,
    },
    /// Writes, then fails with an error that aborts the transaction.
    Poison(&'static str),
}

#[derive(Debug)]
struct Restore {
    name: String,
    previous: Option<i64>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum LedgerError {
    #[error("unknown account {0}")]
    UnknownAccount(String),
    #[error("poisoned")]
    Poisoned,
}

impl Ledger {
    fn write(&mut self, name: &str, value: i64, changes: &mut Vec<Restore>) {
        let previous = self.balances.insert(name.to_string(), value);
        changes.push(Restore {
            name: name.to_string(),
            previous,
        });
    }
}

impl Database for Ledger {
    type Statement = LedgerStatement;
    type Outcome = usize;
    type Query = &'static str;
    type QueryResult = Option<i64>;
    type Change = Restore;
    type Error = LedgerError;

    fn execute(
        &mut self,
        statement: LedgerStatement,
        changes: &mut Vec<Restore>,
    ) -> Result<usize, LedgerError> {
        match statement {
            LedgerStatement::Set(name, value) => {
                self.write(name, value, changes);
                Ok(1)
            }
            LedgerStatement::Transfer { from, to, amount } => {
                let debit = self.balances.get(from).copied().unwrap_or(0) - amount;
                self.write(from, debit, changes);
                let credit = self
                    .balances
                    .get(to)
                    .copied()
                    .ok_or_else(|| LedgerError::UnknownAccount(to.to_string()))?
                    + amount;
                self.write(to, credit, changes);
                Ok(2)
            }
            LedgerStatement::Poison(name) => {
                self.write(name, -1, changes);
                Err(LedgerError::Poisoned)
            }
        }
    }

    fn revert(&mut self, change: Restore) {
        match change.previous {
            Some(value) => self.balances.insert(change.name, value),
            None => self.balances.remove(&change.name),
        };
    }

    fn query(&self, name: &'static str) -> Result<Option<i64>, LedgerError> {
        Ok(self.balances.get(name).copied())
    }

    fn aborts_transaction(error: &LedgerError) -> bool {
        matches!(error, LedgerError::Poisoned)
    }
}

fn start() -> DatabaseClient<Ledger> {
    let (actor, client) = DatabaseActor::new(16, Ledger::default());
    tokio::spawn(actor.run());
    client
}

// --- Tests ---

#[tokio::test]
async fn test_autocommit_statements_persist() {
    let client = start();

    client.execute(LedgerStatement::Set("alice", 100)).await.unwrap();
    assert_eq!(client.query("alice").await.unwrap(), Some(100));
    assert_eq!(client.query("bob").await.unwrap(), None);
}

#[tokio::test]
async fn test_rollback_discards_the_transaction() {
    let client = start();
    client.execute(LedgerStatement::Set("alice", 100)).await.unwrap();

    let session = client.session().await.unwrap();
    session.begin().await.unwrap();
    session.execute(LedgerStatement::Set("alice", 5)).await.unwrap();
    session.execute(LedgerStatement::Set("bob", 7)).await.unwrap();
    assert_eq!(session.query("bob").await.unwrap(), Some(7));
    session.rollback().await.unwrap();

    assert_eq!(client.query("alice").await.unwrap(), Some(100));
    assert_eq!(client.query("bob").await.unwrap(), None);
}

#[tokio::test]
async fn test_commit_keeps_the_transaction() {
    let client = start();

    let session = client.session().await.unwrap();
    session.begin().await.unwrap();
    session.execute(LedgerStatement::Set("alice", 1)).await.unwrap();
    session.execute(LedgerStatement::Set("bob", 2)).await.unwrap();
    session.commit().await.unwrap();

    // A rollback after commit has nothing left to undo.
    session.rollback().await.unwrap();
    assert_eq!(client.query("alice").await.unwrap(), Some(1));
    assert_eq!(client.query("bob").await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_rollback_to_savepoint_keeps_earlier_work() {
    let client = start();

    let session = client.session().await.unwrap();
    session.begin().await.unwrap();
    session.execute(LedgerStatement::Set("alice", 1)).await.unwrap();
    session.savepoint("after_alice").await.unwrap();
    session.execute(LedgerStatement::Set("bob", 2)).await.unwrap();
    session.execute(LedgerStatement::Set("alice", 3)).await.unwrap();
    session.rollback_to("after_alice").await.unwrap();

    assert_eq!(session.query("alice").await.unwrap(), Some(1));
    assert_eq!(session.query("bob").await.unwrap(), None);

    // The savepoint survives its own rollback.
    session.execute(LedgerStatement::Set("carol", 4)).await.unwrap();
    session.rollback_to("after_alice").await.unwrap();
    session.commit().await.unwrap();

    assert_eq!(client.query("alice").await.unwrap(), Some(1));
    assert_eq!(client.query("carol").await.unwrap(), None);
}

#[tokio::test]
async fn test_unknown_savepoint_and_savepoint_outside_transaction() {
    let client = start();
    let session = client.session().await.unwrap();

    assert!(matches!(
        session.savepoint("sp").await,
        Err(TxError::NoActiveTransaction)
    ));

    session.begin().await.unwrap();
    assert!(matches!(
        session.rollback_to("missing").await,
        Err(TxError::SavepointNotFound(name)) if name == "missing"
    ));
    session.savepoint("sp").await.unwrap();
    session.release("sp").await.unwrap();
    assert!(matches!(
        session.rollback_to("sp").await,
        Err(TxError::SavepointNotFound(_))
    ));
    assert!(matches!(
        session.begin().await,
        Err(TxError::TransactionInProgress)
    ));
    session.rollback().await.unwrap();
}

#[tokio::test]
async fn test_failed_statement_is_reverted_and_transaction_continues() {
    let client = start();
    client.execute(LedgerStatement::Set("alice", 100)).await.unwrap();

    let session = client.session().await.unwrap();
    session.begin().await.unwrap();
    session.execute(LedgerStatement::Set("bob", 1)).await.unwrap();

    let err = session
        .execute(LedgerStatement::Transfer {
            from: "alice",
            to: "nobody",
            amount: 30,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::Statement(_)));
    assert_eq!(
        err.source_as::<LedgerError>(),
        Some(&LedgerError::UnknownAccount("nobody".into()))
    );

    // The half-applied debit is gone, earlier work is still pending.
    assert_eq!(session.query("alice").await.unwrap(), Some(100));
    session.commit().await.unwrap();
    assert_eq!(client.query("bob").await.unwrap(), Some(1));
}

#[tokio::test]
async fn test_aborting_error_rolls_back_whole_transaction() {
    let client = start();

    let session = client.session().await.unwrap();
    session.begin().await.unwrap();
    session.execute(LedgerStatement::Set("alice", 1)).await.unwrap();

    let err = session
        .execute(LedgerStatement::Poison("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::Aborted(_)));
    assert_eq!(err.source_as::<LedgerError>(), Some(&LedgerError::Poisoned));

    // The transaction is over: savepoints are refused, commit is a no-op.
    assert!(matches!(
        session.savepoint("sp").await,
        Err(TxError::NoActiveTransaction)
    ));
    session.commit().await.unwrap();
    assert_eq!(client.query("alice").await.unwrap(), None);
    assert_eq!(client.query("bob").await.unwrap(), None);
}

#[tokio::test]
async fn test_autocommit_aborting_error_is_a_statement_failure() {
    let client = start();

    let err = client
        .execute(LedgerStatement::Poison("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::Statement(_)));
    assert_eq!(client.query("bob").await.unwrap(), None);
}

#[tokio::test]
async fn test_other_sessions_wait_for_open_transaction() {
    let client = start();

    let first = client.session().await.unwrap();
    first.begin().await.unwrap();
    first.execute(LedgerStatement::Set("alice", 1)).await.unwrap();

    // An autocommit read from elsewhere must not see or overtake the open transaction.
    let reader = client.clone();
    let read = tokio::spawn(async move { reader.query("alice").await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!read.is_finished());

    first.rollback().await.unwrap();
    assert_eq!(read.await.unwrap().unwrap(), None);
}

#[tokio::test]
async fn test_dropping_session_rolls_back_and_unblocks() {
    let client = start();

    let session = client.session().await.unwrap();
    session.begin().await.unwrap();
    session.execute(LedgerStatement::Set("alice", 1)).await.unwrap();
    drop(session);

    let result = tokio::time::timeout(Duration::from_secs(1), client.query("alice"))
        .await
        .expect("query should not stay blocked");
    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn test_dropped_session_with_queued_begin_does_not_hold_store() {
    let client = start();

    let holder = client.session().await.unwrap();
    holder.begin().await.unwrap();

    let waiter = client.session().await.unwrap();
    let gave_up = tokio::time::timeout(Duration::from_millis(50), waiter.begin()).await;
    assert!(gave_up.is_err());
    drop(waiter);

    holder.execute(LedgerStatement::Set("alice", 7)).await.unwrap();
    holder.commit().await.unwrap();
    drop(holder);

    let result = tokio::time::timeout(Duration::from_secs(1), client.query("alice"))
        .await
        .expect("store should be free once the holder commits");
    assert_eq!(result.unwrap(), Some(7));
}

#[tokio::test]
async fn test_cancelled_begin_does_not_start_transaction() {
    let client = start();

    let holder = client.session().await.unwrap();
    holder.begin().await.unwrap();

    // The session stays alive; only its begin call is cancelled.
    let waiter = client.session().await.unwrap();
    let gave_up = tokio::time::timeout(Duration::from_millis(50), waiter.begin()).await;
    assert!(gave_up.is_err());

    holder.commit().await.unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(1),
        client.execute(LedgerStatement::Set("bob", 3)),
    )
    .await
    .expect("autocommit should not wait on a cancelled begin");
    assert_eq!(result.unwrap(), 1);

    // The waiter can still start a transaction of its own.
    waiter.begin().await.unwrap();
    waiter.rollback().await.unwrap();
}
