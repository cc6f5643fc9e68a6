use crate::{
    ActorRepository, Error, LockRepository, Repository,
    proto::{Consignment, Container},
};
use std::collections::HashSet;
use std::sync::Arc;

const ACTOR_BUFFER: usize = 16;

fn consignment(id: &str) -> Consignment {
    Consignment {
        id: id.to_string(),
        description: format!("Cargo for {id}"),
        weight: 55_000,
        containers: vec![Container {
            id: format!("{id}-c1"),
            customer_id: "cust001".to_string(),
            origin: "Manchester, United Kingdom".to_string(),
            user_id: "user001".to_string(),
        }],
        vessel_id: "vessel001".to_string(),
    }
}

fn ids(consignments: &[Consignment]) -> Vec<&str> {
    consignments.iter().map(|c| c.id.as_str()).collect()
}

async fn run_starts_empty(repo: Arc<dyn Repository>) {
    let all = repo.get_all().await.unwrap();
    assert!(all.is_empty());
}

async fn run_create_echoes_and_stores(repo: Arc<dyn Repository>) {
    let input = consignment("x1");
    let stored = repo.create(input.clone()).await.unwrap();
    assert_eq!(stored, input);

    let all = repo.get_all().await.unwrap();
    assert_eq!(all, vec![input]);
}

async fn run_preserves_insertion_order(repo: Arc<dyn Repository>) {
    for id in ["a", "b", "c"] {
        repo.create(consignment(id)).await.unwrap();
    }
    let all = repo.get_all().await.unwrap();
    assert_eq!(ids(&all), ["a", "b", "c"]);
}

async fn run_keeps_duplicates(repo: Arc<dyn Repository>) {
    let dup = consignment("dup");
    repo.create(dup.clone()).await.unwrap();
    repo.create(dup.clone()).await.unwrap();
    assert_eq!(repo.get_all().await.unwrap(), vec![dup.clone(), dup]);
}

async fn run_concurrent_creates_are_all_kept(repo: Arc<dyn Repository>) {
    const CREATES: usize = 50;

    let handles: Vec<_> = (0..CREATES)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.create(consignment(&format!("c{i}"))).await })
        })
        .collect();
    for handle in futures::future::join_all(handles).await {
        handle.unwrap().unwrap();
    }

    let all = repo.get_all().await.unwrap();
    assert_eq!(all.len(), CREATES);
    let unique: HashSet<_> = ids(&all).into_iter().collect();
    assert_eq!(unique.len(), CREATES);
    for i in 0..CREATES {
        assert!(unique.contains(format!("c{i}").as_str()));
    }
}

async fn run_snapshots_are_isolated(repo: Arc<dyn Repository>) {
    repo.create(consignment("first")).await.unwrap();
    let mut snapshot = repo.get_all().await.unwrap();

    repo.create(consignment("second")).await.unwrap();
    assert_eq!(ids(&snapshot), ["first"]);

    // Mutating the copy must not leak back into the store.
    snapshot.clear();
    snapshot.push(consignment("intruder"));
    let all = repo.get_all().await.unwrap();
    assert_eq!(ids(&all), ["first", "second"]);
}

async fn run_snapshots_are_never_torn(repo: Arc<dyn Repository>) {
    const WRITERS: usize = 64;
    const READERS: usize = 8;
    const READS_PER_READER: usize = 32;

    let writers: Vec<_> = (0..WRITERS)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.create(consignment(&format!("w{i}"))).await.unwrap();
            })
        })
        .collect();
    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                let mut snapshots = Vec::with_capacity(READS_PER_READER);
                for _ in 0..READS_PER_READER {
                    snapshots.push(repo.get_all().await.unwrap());
                    tokio::task::yield_now().await;
                }
                snapshots
            })
        })
        .collect();

    for writer in futures::future::join_all(writers).await {
        writer.unwrap();
    }
    let mut snapshots = Vec::new();
    for reader in futures::future::join_all(readers).await {
        snapshots.extend(reader.unwrap());
    }

    // Storage is append-only, so any instant's state is a prefix of the final.
    let final_state = repo.get_all().await.unwrap();
    assert_eq!(final_state.len(), WRITERS);
    for snapshot in snapshots {
        assert!(snapshot.len() <= final_state.len());
        assert_eq!(snapshot[..], final_state[..snapshot.len()]);
    }
}

fn lock() -> Arc<dyn Repository> {
    Arc::new(LockRepository::new())
}

fn actor() -> Arc<dyn Repository> {
    Arc::new(ActorRepository::new(ACTOR_BUFFER))
}

#[tokio::test]
async fn lock_starts_empty() {
    run_starts_empty(lock()).await;
}

#[tokio::test]
async fn lock_create_echoes_and_stores() {
    run_create_echoes_and_stores(lock()).await;
}

#[tokio::test]
async fn lock_preserves_insertion_order() {
    run_preserves_insertion_order(lock()).await;
}

#[tokio::test]
async fn lock_keeps_duplicates() {
    run_keeps_duplicates(lock()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn lock_concurrent_creates_are_all_kept() {
    run_concurrent_creates_are_all_kept(lock()).await;
}

#[tokio::test]
async fn lock_snapshots_are_isolated() {
    run_snapshots_are_isolated(lock()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn lock_snapshots_are_never_torn() {
    run_snapshots_are_never_torn(lock()).await;
}

#[tokio::test]
async fn lock_clones_share_one_store() {
    let repo = LockRepository::new();
    let other = repo.clone();
    repo.create(consignment("shared")).await.unwrap();
    assert_eq!(ids(&other.get_all().await.unwrap()), ["shared"]);
}

#[tokio::test]
async fn lock_shutdown_is_a_no_op() {
    let repo = LockRepository::new();
    repo.shutdown().await.unwrap();
    repo.create(consignment("after")).await.unwrap();
    assert_eq!(repo.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn actor_starts_empty() {
    run_starts_empty(actor()).await;
}

#[tokio::test]
async fn actor_create_echoes_and_stores() {
    run_create_echoes_and_stores(actor()).await;
}

#[tokio::test]
async fn actor_preserves_insertion_order() {
    run_preserves_insertion_order(actor()).await;
}

#[tokio::test]
async fn actor_keeps_duplicates() {
    run_keeps_duplicates(actor()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn actor_concurrent_creates_are_all_kept() {
    run_concurrent_creates_are_all_kept(actor()).await;
}

#[tokio::test]
async fn actor_snapshots_are_isolated() {
    run_snapshots_are_isolated(actor()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn actor_snapshots_are_never_torn() {
    run_snapshots_are_never_torn(actor()).await;
}

#[tokio::test]
async fn actor_rejects_calls_after_shutdown() {
    let repo = ActorRepository::new(ACTOR_BUFFER);
    repo.create(consignment("before")).await.unwrap();
    repo.shutdown().await.unwrap();

    assert_eq!(
        repo.create(consignment("after")).await,
        Err(Error::ServiceShutdown)
    );
    assert_eq!(repo.get_all().await, Err(Error::ServiceShutdown));
}

#[tokio::test]
async fn actor_shutdown_is_idempotent() {
    let repo = ActorRepository::new(ACTOR_BUFFER);
    repo.shutdown().await.unwrap();
    repo.shutdown().await.unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn actor_drains_queued_creates_on_shutdown() {
    const QUEUED: usize = 40;
    let repo = ActorRepository::new(64);

    let creates: Vec<_> = (0..QUEUED)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(consignment(&format!("q{i}"))).await })
        })
        .collect();

    // Let every create reach the channel before the stop command is queued.
    tokio::task::yield_now().await;
    repo.shutdown().await.unwrap();

    let results = futures::future::join_all(creates).await;
    assert_eq!(results.len(), QUEUED);
    for (i, joined) in results.into_iter().enumerate() {
        let stored = joined.unwrap().unwrap();
        assert_eq!(stored.id, format!("q{i}"));
    }
}

#[test]
fn actor_shutdown_reports_a_missing_store_task() {
    let first = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let repo = first.block_on(async { ActorRepository::new(ACTOR_BUFFER) });
    // Dropping the runtime drops the store task and its receiver.
    drop(first);

    let second = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    second.block_on(async {
        assert!(matches!(
            repo.shutdown().await,
            Err(Error::ChannelError { .. })
        ));
        // Already refusing calls; a second stop has nothing left to report.
        repo.shutdown().await.unwrap();
        assert_eq!(repo.get_all().await, Err(Error::ServiceShutdown));
    });
}
