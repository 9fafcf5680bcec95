#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use avlstore::{AvlTree, Identifier, Record};

#[derive(Arbitrary, Debug)]
enum TreeMethod {
    Search { key: u16 },
    Insert { key: u16, val: u32 },
    Delete { key: u16 },
    Teardown,
}

fn key_of(key: u16) -> Identifier {
    format!("{key:x}").into()
}

fuzz_target!(|methods: Vec<TreeMethod>| {
    let mut tree = AvlTree::<u32>::new();
    let mut bt_map = BTreeMap::<Identifier, u32>::new();

    for m in methods {
        match m {
            TreeMethod::Search { key } => {
                let k = key_of(key);
                assert_eq!(tree.get(k), bt_map.get(&k));
            }
            TreeMethod::Insert { key, val } => {
                let k = key_of(key);
                let fresh = !bt_map.contains_key(&k);
                if fresh {
                    bt_map.insert(k, val);
                }
                assert_eq!(tree.insert(Record::new(k, val)), fresh);
            }
            TreeMethod::Delete { key } => {
                let k = key_of(key);
                let removed = tree.delete_k(&k).map(|r| *r.value());
                assert_eq!(removed, bt_map.remove(&k));
            }
            TreeMethod::Teardown => {
                assert_eq!(tree.teardown(), bt_map.len());
                bt_map.clear();
            }
        }
    }

    tree.validate().expect("tree invariants");
    let in_order: Vec<(Identifier, u32)> = tree.records().iter().map(|r| (*r.id(), *r.value())).collect();
    let expected: Vec<(Identifier, u32)> = bt_map.into_iter().collect();
    assert_eq!(in_order, expected);
});
