//! # SDK Benchmarks
//!
//! Hot paths of a consensus read and of optimistic verification:
//!
//! | Crate | Operation | Runs per |
//! |-------|-----------|----------|
//! | zs-04 Consensus Query | tally add, canonical digest | sharder response |
//! | zs-02 Node Health | success / fail re-rank, healthy view | sharder response |
//! | shared-crypto | Merkle path verify | confirmation |
//! | shared-types | transaction hash | submission |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_crypto::{hash, verify_merkle_path, MerkleTree};
use shared_types::Transaction;
use zs_02_node_health::NodeHolder;
use zs_04_consensus_query::{canonical_digest, ConsensusTally};

fn balance_body(nonce: i64) -> String {
    format!(
        r#"{{"txn":"{}","round":1200,"balance":5000000000,"nonce":{}}}"#,
        hash("last"),
        nonce
    )
}

// ============================================================================
// ZS-04: Consensus Tally
// ============================================================================

fn bench_consensus_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("zs-04-consensus-tally");

    let body = balance_body(7);
    let reordered = r#"{"nonce":7,"balance":5000000000,"round":1200,"txn":"x"}"#;

    group.bench_function("canonical_digest", |b| {
        b.iter(|| black_box(canonical_digest(black_box(&body))))
    });
    group.bench_function("canonical_digest_reordered", |b| {
        b.iter(|| black_box(canonical_digest(black_box(reordered))))
    });

    for k in [3usize, 10, 30] {
        let responses: Vec<(u16, String)> = (0..k)
            .map(|i| match i % 4 {
                3 => (500, r#"{"error":"internal"}"#.to_string()),
                _ => (200, balance_body(7)),
            })
            .collect();

        group.throughput(Throughput::Elements(k as u64));
        group.bench_with_input(BenchmarkId::new("tally_k", k), &responses, |b, responses| {
            b.iter(|| {
                let mut tally = ConsensusTally::new();
                for (status, body) in responses {
                    tally.add(*status, body);
                }
                black_box(tally.rate(k))
            })
        });
    }

    group.finish();
}

// ============================================================================
// ZS-02: Node Holder
// ============================================================================

fn bench_node_holder(c: &mut Criterion) {
    let mut group = c.benchmark_group("zs-02-node-holder");

    for n in [10usize, 100] {
        let urls: Vec<String> = (0..n).map(|i| format!("http://sharder-{i}")).collect();
        let holder = match NodeHolder::new(urls.clone(), 3) {
            Ok(holder) => holder,
            Err(err) => panic!("holder: {err}"),
        };

        group.bench_with_input(BenchmarkId::new("success_fail", n), &urls, |b, urls| {
            let mut i = 0usize;
            b.iter(|| {
                let url = &urls[i % urls.len()];
                if i % 3 == 0 {
                    holder.fail(url);
                } else {
                    holder.success(url);
                }
                i += 1;
            })
        });
        group.bench_function(BenchmarkId::new("healthy", n), |b| {
            b.iter(|| black_box(holder.healthy()))
        });
    }

    group.finish();
}

// ============================================================================
// SHARED: Merkle Proofs and Transaction Hash
// ============================================================================

fn bench_merkle_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-merkle");

    for leaves in [16usize, 1024] {
        let hashes: Vec<String> = (0..leaves).map(|i| hash(format!("txn-{i}"))).collect();
        let tree = MerkleTree::from_leaves(&hashes);
        let root = tree.root();
        let index = leaves / 2;
        let nodes = tree.path(index).unwrap_or_default();

        group.bench_with_input(
            BenchmarkId::new("verify_path", leaves),
            &(hashes[index].clone(), nodes),
            |b, (leaf, nodes)| {
                b.iter(|| black_box(verify_merkle_path(leaf, nodes, index as u64, &root)))
            },
        );
    }

    let mut txn = Transaction::new("alice", "bob", 1_000, r#"{"name":"transfer","input":{}}"#);
    txn.nonce = 42;
    group.bench_function("transaction_hash", |b| b.iter(|| black_box(txn.hash_data())));

    group.finish();
}

criterion_group!(
    benches,
    bench_consensus_tally,
    bench_node_holder,
    bench_merkle_verify,
);

criterion_main!(benches);
