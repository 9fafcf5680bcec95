//! Insert / search / delete throughput of the balanced tree against BTreeMap.

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::seq::SliceRandom;
use rand::{Rng, rng};

use avlstore::{AvlTree, Identifier, Record};

const TREE_SIZES: [usize; 3] = [1 << 10, 1 << 14, 1 << 17];

fn gen_keys(n: usize) -> Vec<Identifier> {
    let mut keys: Vec<Identifier> = (0..n).map(|i| format!("key{i:012}").into()).collect();
    keys.shuffle(&mut rng());
    keys
}

pub fn seq_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_insert");
    group.throughput(Throughput::Elements(1));
    group.bench_function("avl", |b| {
        let mut tree = AvlTree::new();
        let mut i = 0u64;
        b.iter(|| {
            tree.insert(Record::new(format!("{i:016}"), i));
            i += 1;
        })
    });
    group.bench_function("btreemap", |b| {
        let mut map = BTreeMap::new();
        let mut i = 0u64;
        b.iter(|| {
            map.insert(Identifier::from(format!("{i:016}")), i);
            i += 1;
        })
    });
    group.finish();
}

pub fn rand_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_search");
    group.throughput(Throughput::Elements(1));
    for size in TREE_SIZES {
        let keys = gen_keys(size);
        group.bench_with_input(BenchmarkId::new("avl", size), &keys, |b, keys| {
            let tree: AvlTree<usize> = keys.iter().enumerate().map(|(i, k)| Record::new(k, i)).collect();
            let mut rng = rng();
            b.iter(|| {
                let key = &keys[rng.random_range(0..keys.len())];
                black_box(tree.search_k(key));
            })
        });
        group.bench_with_input(BenchmarkId::new("btreemap", size), &keys, |b, keys| {
            let map: BTreeMap<Identifier, usize> = keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
            let mut rng = rng();
            b.iter(|| {
                let key = &keys[rng.random_range(0..keys.len())];
                black_box(map.get(key));
            })
        });
    }
    group.finish();
}

pub fn delete_reinsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_reinsert");
    group.throughput(Throughput::Elements(2));
    for size in TREE_SIZES {
        let keys = gen_keys(size);
        group.bench_with_input(BenchmarkId::new("avl", size), &keys, |b, keys| {
            let mut tree: AvlTree<usize> = keys.iter().enumerate().map(|(i, k)| Record::new(k, i)).collect();
            let mut rng = rng();
            b.iter(|| {
                let key = &keys[rng.random_range(0..keys.len())];
                let record = tree.delete_k(key);
                if let Some(record) = record {
                    tree.insert(record);
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, seq_insert, rand_search, delete_reinsert);
criterion_main!(benches);
