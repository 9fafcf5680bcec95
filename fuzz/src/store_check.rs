#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use avlstore::{Record, ScoreStore};

#[derive(Arbitrary, Debug)]
enum StoreMethod {
    Add { key: u8, score: i16 },
    Remove { key: u8 },
    MergeIn { keys: Vec<(u8, i16)> },
    Clean,
}

fn check(store: &ScoreStore, model: &BTreeMap<String, f64>) {
    assert_eq!(store.count(), model.len());
    if model.is_empty() {
        assert_eq!(store.mean(), 0.0);
        assert_eq!(store.stddev(), 0.0);
        return;
    }
    let n = model.len() as f64;
    let mean = model.values().sum::<f64>() / n;
    let var = model.values().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    assert!((store.mean() - mean).abs() < 1e-6, "mean {} != {}", store.mean(), mean);
    let got = store.stddev() * store.stddev();
    assert!((got - var).abs() < 1e-6 * (1.0 + var + mean * mean), "variance {got} != {var}");
}

fuzz_target!(|methods: Vec<StoreMethod>| {
    let mut store = ScoreStore::new();
    let mut model = BTreeMap::<String, f64>::new();

    for m in methods {
        match m {
            StoreMethod::Add { key, score } => {
                let k = format!("s{key}");
                let fresh = !model.contains_key(&k);
                assert_eq!(store.add(Record::new(k.as_str(), score as f64)), fresh);
                model.entry(k).or_insert(score as f64);
            }
            StoreMethod::Remove { key } => {
                let k = format!("s{key}");
                assert_eq!(store.remove(k.as_str()).is_some(), model.remove(&k).is_some());
            }
            StoreMethod::MergeIn { keys } => {
                let mut source = ScoreStore::new();
                for (key, score) in keys {
                    source.add(Record::new(format!("s{key}"), score as f64));
                }
                for record in source.tree().records() {
                    model.entry(record.id().to_string()).or_insert(*record.value());
                }
                store.merge(&mut source);
                assert!(source.is_empty());
                assert!(source.tree().is_empty());
            }
            StoreMethod::Clean => {
                store.clean();
                model.clear();
            }
        }
        check(&store, &model);
    }
});
